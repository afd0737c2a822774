pub mod branch_name;
pub mod branch_table;

pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";

/// Branch every new repository starts on
pub const DEFAULT_BRANCH: &str = "master";
