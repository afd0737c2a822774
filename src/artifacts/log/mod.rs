//! Commit history records
//!
//! Every listing of commits (`log`, `global-log`) shares one record format:
//!
//! ```text
//! ===
//! commit <id>
//! Merge: <first 7 of parent> <first 7 of second parent>
//! Date: <timestamp>
//! <message>
//!
//! ```
//!
//! The `Merge:` line only appears for merge commits.

use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;
use std::io::Write;

pub const RECORD_SEPARATOR: &str = "===";

pub fn write_record(
    writer: &mut dyn Write,
    commit_id: &ObjectId,
    commit: &Commit,
) -> anyhow::Result<()> {
    writeln!(writer, "{}", RECORD_SEPARATOR)?;
    writeln!(writer, "{}", format!("commit {}", commit_id).yellow())?;
    if let (Some(parent), Some(second_parent)) = (commit.parent(), commit.second_parent()) {
        writeln!(
            writer,
            "Merge: {} {}",
            parent.to_short_oid(),
            second_parent.to_short_oid()
        )?;
    }
    writeln!(writer, "Date: {}", commit.readable_timestamp())?;
    writeln!(writer, "{}", commit.message())?;
    writeln!(writer)?;

    Ok(())
}
