use crate::artifacts::branch::{DEFAULT_BRANCH, INVALID_BRANCH_NAME_REGEX};
use crate::errors::GitletError;
use anyhow::Context;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        if name.is_empty() {
            return Err(GitletError::InvalidBranchName.into());
        }

        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .with_context(|| format!("invalid branch name regex: {INVALID_BRANCH_NAME_REGEX}"))?;

        if re.is_match(&name) {
            Err(GitletError::InvalidBranchName.into())
        } else {
            Ok(Self(name))
        }
    }

    /// Local branch tracking `branch` of the remote `remote`
    pub fn tracking(remote: &str, branch: &BranchName) -> anyhow::Result<Self> {
        Self::try_parse(format!("{remote}/{branch}"))
    }

    pub fn default_branch() -> Self {
        Self(DEFAULT_BRANCH.to_string())
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::proptest;

    proptest! {
        #[test]
        fn plain_names_are_accepted(
            branch_name in "[a-zA-Z0-9_-]+"
        ) {
            assert!(BranchName::try_parse(branch_name).is_ok());
        }

        #[test]
        fn tracking_style_names_are_accepted(
            prefix in "[a-zA-Z0-9_-]+",
            suffix in "[a-zA-Z0-9_-]+"
        ) {
            // remote tracking branches look like origin/master
            let parsed = BranchName::try_parse(format!("{prefix}/{suffix}"));
            assert!(parsed.is_ok());
        }

        #[test]
        fn leading_dot_is_rejected(
            suffix in "[a-zA-Z0-9_-]+"
        ) {
            assert!(BranchName::try_parse(format!(".{suffix}")).is_err());
        }

        #[test]
        fn double_dot_is_rejected(
            prefix in "[a-zA-Z0-9_-]+",
            suffix in "[a-zA-Z0-9_-]+"
        ) {
            assert!(BranchName::try_parse(format!("{prefix}..{suffix}")).is_err());
        }

        #[test]
        fn trailing_slash_is_rejected(
            prefix in "[a-zA-Z0-9_-]+"
        ) {
            assert!(BranchName::try_parse(format!("{prefix}/")).is_err());
        }

        #[test]
        fn special_characters_are_rejected(
            prefix in "[a-zA-Z0-9_-]+",
            suffix in "[a-zA-Z0-9_-]+",
            special_char in r"[\*:\?\[\\^~ ]"
        ) {
            let name = format!("{prefix}{special_char}{suffix}");
            assert!(BranchName::try_parse(name).is_err());
        }
    }

    #[test]
    fn empty_name_is_rejected() {
        let error = BranchName::try_parse("".to_string()).unwrap_err();
        assert_eq!(
            GitletError::find_in(&error),
            Some(&GitletError::InvalidBranchName)
        );
    }

    #[test]
    fn tracking_branch_joins_remote_and_branch() {
        let branch = BranchName::try_parse("master".to_string()).unwrap();

        let tracking = BranchName::tracking("origin", &branch).unwrap();

        assert_eq!(tracking.as_ref(), "origin/master");
    }
}
