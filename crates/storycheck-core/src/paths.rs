use std::path::{Path, PathBuf};

pub const STORYCHECK_DIR: &str = ".storycheck";
pub const CONFIG_FILE: &str = ".storycheck/config.yaml";

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}
