//! Environment layer of Settings loading.
//!
//! Kept in its own test binary: environment variables are process-wide and
//! would leak into the file-layer tests running in parallel.

use std::env;
use std::fs;

use tempfile::TempDir;

use behavior_tree_view::config::Settings;

#[test]
fn given_btv_env_vars_when_load_then_they_override_file_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tree-view.toml");
    fs::write(&path, "test_data_count = 42\n").expect("write config");

    env::set_var("BTV_TEST_DATA_COUNT", "12");
    env::set_var("BTV_SEARCH__CASE_SENSITIVE", "true");
    let result = Settings::load(Some(&path));
    env::remove_var("BTV_TEST_DATA_COUNT");
    env::remove_var("BTV_SEARCH__CASE_SENSITIVE");

    let settings = result.expect("load settings");
    assert_eq!(settings.test_data_count, 12);
    assert!(settings.search.case_sensitive);
    assert_eq!(settings.root_label, "Root");
}
