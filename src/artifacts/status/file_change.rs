use colored::Colorize;

/// Change in the working directory that is not staged for commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WorkspaceChangeType {
    Modified,
    Deleted,
}

impl From<&WorkspaceChangeType> for &str {
    fn from(change: &WorkspaceChangeType) -> Self {
        match change {
            WorkspaceChangeType::Modified => "modified",
            WorkspaceChangeType::Deleted => "deleted",
        }
    }
}

impl std::fmt::Display for WorkspaceChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let change: &str = self.into();
        write!(f, "{}", change)
    }
}

impl WorkspaceChangeType {
    /// `name (change)` as listed in the status report
    pub fn describe(&self, name: &str) -> String {
        format!("{} ({})", name, self).red().to_string()
    }
}
