//! Crucible's Ansible provisioner — generates the scenario's inventory and
//! engine config files and drives `ansible-playbook` over them.

#![cfg_attr(test, allow(clippy::expect_used))]

pub mod application;
pub mod domain;
pub mod infra;
