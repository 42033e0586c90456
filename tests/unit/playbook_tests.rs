//! Unit and property tests for `PlaybookCommand` flag serialization.

#![allow(clippy::expect_used)]

use std::collections::HashMap;

use crucible_provisioner::infra::playbook::PlaybookCommand;
use proptest::prelude::*;
use serde_yaml::Value;

use crate::mocks::MockCommandRunner;

const INVENTORY: &str = "/tmp/ephemeral/ansible_inventory.yml";
const PLAYBOOK: &str = "/scenarios/default/playbook.yml";

fn make_command(runner: &MockCommandRunner) -> PlaybookCommand<'_, MockCommandRunner> {
    PlaybookCommand::new(runner, INVENTORY, PLAYBOOK)
}

// ── Unit tests ───────────────────────────────────────────────────────────────

#[test]
fn test_args_lead_with_playbook_and_inventory() {
    let runner = MockCommandRunner::new_ok();
    let command = make_command(&runner);
    let args = command.args();
    assert_eq!(args[0], PLAYBOOK);
    assert_eq!(args[1], "--inventory");
    assert_eq!(args[2], INVENTORY);
    assert_eq!(args.len(), 3);
}

#[test]
fn test_add_cli_arg_overrides_earlier_value() {
    let runner = MockCommandRunner::new_ok();
    let mut command = make_command(&runner);
    command.add_cli_arg("tags", "alpha");
    command.add_cli_arg("tags", "beta");
    let args = command.args();
    assert!(args.contains(&"--tags=beta".to_string()));
    assert!(!args.contains(&"--tags=alpha".to_string()));
}

#[test]
fn test_flag_value_renderings() {
    let runner = MockCommandRunner::new_ok();
    let mut command = make_command(&runner);
    command.add_cli_arg("become", true);
    command.add_cli_arg("step", false);
    command.add_cli_arg("forks", 10);
    command.add_cli_arg("limit", "web");
    let args = command.args();
    assert!(args.contains(&"--become".to_string()));
    assert!(args.contains(&"--forks=10".to_string()));
    assert!(args.contains(&"--limit=web".to_string()));
    assert!(!args.iter().any(|a| a.contains("step")));
}

#[tokio::test]
async fn test_execute_returns_captured_stdout() {
    let runner = MockCommandRunner::new_ok_with_stdout(b"ok: [instance-1]");
    let command = make_command(&runner);
    let out = command.execute().await.expect("execute succeeds");
    assert_eq!(out, "ok: [instance-1]");
}

// ── Property tests ───────────────────────────────────────────────────────────

/// Flag values a scenario file can realistically hold.
#[derive(Debug, Clone)]
enum Flag {
    Bool(bool),
    Text(String),
    Count(u32),
}

fn flag_strategy() -> impl Strategy<Value = Flag> {
    prop_oneof![
        any::<bool>().prop_map(Flag::Bool),
        "[a-z0-9./:]{1,12}".prop_map(Flag::Text),
        any::<u32>().prop_map(Flag::Count),
    ]
}

fn flag_map_strategy() -> impl Strategy<Value = HashMap<String, Flag>> {
    proptest::collection::hash_map(
        "[a-z][a-z0-9-]{0,10}".prop_filter("reserved flag", |k| k != "inventory"),
        flag_strategy(),
        0..8,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every flag serializes by its value: `true` appears as a bare
    /// `--flag` exactly once, `false` is omitted entirely, and scalars
    /// appear as `--flag=value`.
    #[test]
    fn prop_flags_serialize_by_value(flags in flag_map_strategy()) {
        let runner = MockCommandRunner::new_ok();
        let mut command = make_command(&runner);
        for (name, flag) in &flags {
            match flag {
                Flag::Bool(b) => command.add_cli_arg(name, *b),
                Flag::Text(s) => command.add_cli_arg(name, s.as_str()),
                Flag::Count(n) => command.add_cli_arg(name, *n),
            }
        }
        let args = command.args();

        // Fixed prefix is untouched by flags.
        prop_assert_eq!(&args[0], PLAYBOOK);
        prop_assert_eq!(&args[1], "--inventory");
        prop_assert_eq!(&args[2], INVENTORY);

        for (name, flag) in &flags {
            let bare = format!("--{name}");
            let assigned_prefix = format!("--{name}=");
            match flag {
                Flag::Bool(true) => {
                    prop_assert_eq!(
                        args.iter().filter(|a| **a == bare).count(),
                        1,
                        "expected one {} in {:?}", bare, args
                    );
                }
                Flag::Bool(false) => {
                    prop_assert!(
                        !args.iter().any(|a| *a == bare || a.starts_with(&assigned_prefix)),
                        "false flag {} must be omitted, got {:?}", name, args
                    );
                }
                Flag::Text(s) => {
                    let expected = format!("--{name}={s}");
                    prop_assert!(args.contains(&expected), "missing {} in {:?}", expected, args);
                }
                Flag::Count(n) => {
                    let expected = format!("--{name}={n}");
                    prop_assert!(args.contains(&expected), "missing {} in {:?}", expected, args);
                }
            }
        }

        // One argument per non-false flag, nothing extra.
        let expected_len = 3 + flags
            .values()
            .filter(|f| !matches!(f, Flag::Bool(false)))
            .count();
        prop_assert_eq!(args.len(), expected_len);
    }

    /// A mode flag appended last lands after every scenario flag, and
    /// appending it never disturbs the earlier ones.
    #[test]
    fn prop_mode_flag_appends_last(flags in flag_map_strategy()) {
        let runner = MockCommandRunner::new_ok();
        let mut command = make_command(&runner);
        for (name, flag) in &flags {
            match flag {
                Flag::Bool(b) => command.add_cli_arg(name, *b),
                Flag::Text(s) => command.add_cli_arg(name, s.as_str()),
                Flag::Count(n) => command.add_cli_arg(name, *n),
            }
        }
        let before = command.args();
        command.add_cli_arg("syntax-check", true);
        let after = command.args();

        prop_assert_eq!(after.last(), Some(&"--syntax-check".to_string()));
        prop_assert_eq!(&after[..after.len() - 1], &before[..]);
    }
}

#[test]
fn test_value_conversions_cover_yaml_scalars() {
    let runner = MockCommandRunner::new_ok();
    let mut command = make_command(&runner);
    command.add_cli_arg("verbose", Value::from("vvv"));
    assert!(command.args().contains(&"--verbose=vvv".to_string()));
}
