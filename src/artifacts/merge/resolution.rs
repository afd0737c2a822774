//! Three-way file reconciliation
//!
//! Each file name present in the current or given tree is classified by
//! comparing its blob id at the split point, the current commit and the
//! given commit (absence counts as a value of its own):
//!
//! | current vs given | current vs split | given vs split | outcome        |
//! |------------------|------------------|----------------|----------------|
//! | equal            | any              | any            | keep current   |
//! | differ           | equal            | differ         | take given     |
//! | differ           | differ           | equal          | keep current   |
//! | differ           | differ           | differ         | conflict       |
//!
//! "Take given" means removal when the given side dropped the file.

use crate::artifacts::objects::commit::Tree;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};

const CONFLICT_HEAD_MARKER: &str = "<<<<<<< HEAD\n";
const CONFLICT_SEPARATOR: &str = "=======\n";
const CONFLICT_END_MARKER: &str = ">>>>>>>\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileResolution {
    /// Check out the given side's blob and stage it for addition
    TakeGiven(ObjectId),
    /// The given side deleted the file; stage its removal
    Remove(ObjectId),
    /// Both sides changed the file differently
    Conflict {
        current: Option<ObjectId>,
        given: Option<ObjectId>,
    },
}

/// Classify one file; `None` means the current version stays as it is
pub fn resolve_file(
    split: Option<&ObjectId>,
    current: Option<&ObjectId>,
    given: Option<&ObjectId>,
) -> Option<FileResolution> {
    if current == given || given == split {
        return None;
    }

    if current == split {
        return match (given, current) {
            (Some(given), _) => Some(FileResolution::TakeGiven(given.clone())),
            (None, Some(current)) => Some(FileResolution::Remove(current.clone())),
            (None, None) => None,
        };
    }

    Some(FileResolution::Conflict {
        current: current.cloned(),
        given: given.cloned(),
    })
}

/// Resolve every file of the merge, keyed and ordered by file name
///
/// Files whose current version stays untouched are left out.
pub fn resolve_trees(split: &Tree, current: &Tree, given: &Tree) -> BTreeMap<String, FileResolution> {
    let names = current.keys().chain(given.keys()).collect::<BTreeSet<_>>();

    names
        .into_iter()
        .filter_map(|name| {
            let resolution = resolve_file(split.get(name), current.get(name), given.get(name))?;
            debug_log!("Resolved {}: {:?}", name, resolution);
            Some((name.clone(), resolution))
        })
        .collect()
}

/// Build the content of a conflicted file
///
/// Each side ends in a newline before the following marker. An absent side
/// contributes nothing.
pub fn conflict_content(current: &[u8], given: &[u8]) -> Bytes {
    let mut content = Vec::with_capacity(
        CONFLICT_HEAD_MARKER.len()
            + current.len()
            + CONFLICT_SEPARATOR.len()
            + given.len()
            + CONFLICT_END_MARKER.len()
            + 2,
    );

    content.extend_from_slice(CONFLICT_HEAD_MARKER.as_bytes());
    push_section(&mut content, current);
    content.extend_from_slice(CONFLICT_SEPARATOR.as_bytes());
    push_section(&mut content, given);
    content.extend_from_slice(CONFLICT_END_MARKER.as_bytes());

    Bytes::from(content)
}

fn push_section(content: &mut Vec<u8>, section: &[u8]) {
    content.extend_from_slice(section);
    if !section.is_empty() && !section.ends_with(b"\n") {
        content.push(b'\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn oid(c: char) -> ObjectId {
        ObjectId::try_parse(c.to_string().repeat(40)).unwrap()
    }

    fn conflict(current: Option<char>, given: Option<char>) -> Option<FileResolution> {
        Some(FileResolution::Conflict {
            current: current.map(oid),
            given: given.map(oid),
        })
    }

    #[rstest]
    #[case::modified_in_given(Some('a'), Some('a'), Some('b'), Some(FileResolution::TakeGiven(oid('b'))))]
    #[case::modified_in_current(Some('a'), Some('b'), Some('a'), None)]
    #[case::modified_the_same_way(Some('a'), Some('b'), Some('b'), None)]
    #[case::deleted_in_given(Some('a'), Some('a'), None, Some(FileResolution::Remove(oid('a'))))]
    #[case::deleted_in_current(Some('a'), None, Some('a'), None)]
    #[case::deleted_on_both_sides(Some('a'), None, None, None)]
    #[case::added_in_given(None, None, Some('b'), Some(FileResolution::TakeGiven(oid('b'))))]
    #[case::added_in_current(None, Some('b'), None, None)]
    #[case::modified_differently(Some('a'), Some('b'), Some('c'), conflict(Some('b'), Some('c')))]
    #[case::modified_then_deleted(Some('a'), Some('b'), None, conflict(Some('b'), None))]
    #[case::deleted_then_modified(Some('a'), None, Some('c'), conflict(None, Some('c')))]
    #[case::added_differently(None, Some('b'), Some('c'), conflict(Some('b'), Some('c')))]
    fn classifies_each_file(
        #[case] split: Option<char>,
        #[case] current: Option<char>,
        #[case] given: Option<char>,
        #[case] expected: Option<FileResolution>,
    ) {
        let (split, current, given) = (split.map(oid), current.map(oid), given.map(oid));

        assert_eq!(
            resolve_file(split.as_ref(), current.as_ref(), given.as_ref()),
            expected
        );
    }

    #[test]
    fn resolves_whole_trees_in_name_order() {
        let split = Tree::from([("f".to_string(), oid('a')), ("g".to_string(), oid('a'))]);
        let current = Tree::from([("f".to_string(), oid('b')), ("g".to_string(), oid('a'))]);
        let given = Tree::from([("f".to_string(), oid('c')), ("h".to_string(), oid('d'))]);

        let resolutions = resolve_trees(&split, &current, &given);

        assert_eq!(
            resolutions.into_iter().collect::<Vec<_>>(),
            vec![
                ("f".to_string(), conflict(Some('b'), Some('c')).unwrap()),
                ("g".to_string(), FileResolution::Remove(oid('a'))),
                ("h".to_string(), FileResolution::TakeGiven(oid('d'))),
            ]
        );
    }

    #[rstest]
    #[case::no_trailing_newlines(b"B".as_slice(), b"C".as_slice(), "<<<<<<< HEAD\nB\n=======\nC\n>>>>>>>\n")]
    #[case::trailing_newlines(b"B\n".as_slice(), b"C\n".as_slice(), "<<<<<<< HEAD\nB\n=======\nC\n>>>>>>>\n")]
    #[case::given_absent(b"B\n".as_slice(), b"".as_slice(), "<<<<<<< HEAD\nB\n=======\n>>>>>>>\n")]
    #[case::current_absent(b"".as_slice(), b"C".as_slice(), "<<<<<<< HEAD\n=======\nC\n>>>>>>>\n")]
    fn conflict_text(#[case] current: &[u8], #[case] given: &[u8], #[case] expected: &str) {
        assert_eq!(conflict_content(current, given), Bytes::from(expected.to_string()));
    }
}
