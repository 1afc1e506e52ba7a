use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    pub encoded_name: String,
    pub display_name: String,
    pub project_dir: PathBuf,
}
