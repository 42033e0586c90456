//! Install-relative paths.

use std::path::PathBuf;

/// The filter-plugins directory shipped next to the running executable,
/// referenced by the generated config's `filter_plugins` search path.
///
/// Falls back to a relative path when the executable's location cannot be
/// determined.
#[must_use]
pub fn filter_plugins_directory() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("plugins")
        .join("filters")
}
