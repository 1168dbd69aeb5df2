use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("recall");
            Some(state_dir.join("recall.log"))
        } else {
            ProjectDirs::from("", "", "recall")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("recall.log"))
        }
    }
}
