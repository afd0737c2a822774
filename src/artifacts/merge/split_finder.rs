//! Split point finder
//!
//! The split point of two commits is the common ancestor closest to the
//! current commit. It is located in two breadth-first phases:
//!
//! 1. Mark every ancestor of the given commit, following both parent edges
//! 2. Walk breadth-first from the current commit, enqueueing the primary
//!    parent before the second parent; the first commit already marked in
//!    phase 1 is the split point
//!
//! Every history shares the initial commit, so the search always succeeds on
//! a consistent repository. When several common ancestors sit at the same
//! distance from the current commit the one reached through primary parents
//! wins.
//!
//! The finder never holds commits, only ids. Parents are resolved through a
//! loader closure, which keeps the traversal independent of the object store:
//!
//! ```rust,ignore
//! let finder = SplitFinder::new(|oid| Ok(database.load_commit(oid)?.parents()));
//! let split = finder.find_split_point(&head, &given_tip)?;
//! ```

use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b00;
        const VISITED_FROM_GIVEN = 0b01;
        const VISITED_FROM_CURRENT = 0b10;
        const VISITED_FROM_BOTH = Self::VISITED_FROM_GIVEN.bits() | Self::VISITED_FROM_CURRENT.bits();
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::VISITED_FROM_GIVEN) {
            flags.push("GIVEN");
        }
        if self.contains(VisitState::VISITED_FROM_CURRENT) {
            flags.push("CURRENT");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

impl fmt::Display for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Commit graph traversals driven by a parents loader
///
/// The loader returns the parent ids of a commit, primary parent first, and
/// an empty list for the initial commit.
pub struct SplitFinder<ParentsLoaderFn>
where
    ParentsLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    parents_loader: ParentsLoaderFn,
}

impl<ParentsLoaderFn> SplitFinder<ParentsLoaderFn>
where
    ParentsLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    pub fn new(parents_loader: ParentsLoaderFn) -> Self {
        Self { parents_loader }
    }

    /// Find the split point of `current` and `given`
    pub fn find_split_point(
        &self,
        current: &ObjectId,
        given: &ObjectId,
    ) -> anyhow::Result<ObjectId> {
        let mut states = HashMap::<ObjectId, VisitState>::new();

        for oid in self.reachable_from(given, |_| false)? {
            states.insert(oid, VisitState::VISITED_FROM_GIVEN);
        }

        let mut queue = VecDeque::from([current.clone()]);
        let mut seen = HashSet::from([current.clone()]);

        while let Some(commit_id) = queue.pop_front() {
            let state = states.entry(commit_id.clone()).or_insert(VisitState::NONE);
            *state |= VisitState::VISITED_FROM_CURRENT;
            debug_log!("Processing commit {}: state={}", commit_id, state);

            if *state == VisitState::VISITED_FROM_BOTH {
                debug_log!("Split point of {} and {}: {}", current, given, commit_id);
                return Ok(commit_id);
            }

            for parent in (self.parents_loader)(&commit_id)? {
                if seen.insert(parent.clone()) {
                    queue.push_back(parent);
                }
            }
        }

        anyhow::bail!("commits {current} and {given} share no common ancestor")
    }

    /// Every commit reachable from `start` over both parent edges, `start`
    /// included, in breadth-first order
    ///
    /// The walk does not enter commits for which `stop` returns true.
    pub fn reachable_from(
        &self,
        start: &ObjectId,
        stop: impl Fn(&ObjectId) -> bool,
    ) -> anyhow::Result<Vec<ObjectId>> {
        let mut reachable = Vec::new();
        if stop(start) {
            return Ok(reachable);
        }

        let mut queue = VecDeque::from([start.clone()]);
        let mut seen = HashSet::from([start.clone()]);

        while let Some(commit_id) = queue.pop_front() {
            for parent in (self.parents_loader)(&commit_id)? {
                if !stop(&parent) && seen.insert(parent.clone()) {
                    queue.push_back(parent);
                }
            }
            reachable.push(commit_id);
        }

        Ok(reachable)
    }

    /// Whether `target` lies on the primary-parent chain of `start`,
    /// `start` and the initial commit included
    pub fn primary_chain_contains(
        &self,
        start: &ObjectId,
        target: &ObjectId,
    ) -> anyhow::Result<bool> {
        let mut next = Some(start.clone());

        while let Some(commit_id) = next {
            if &commit_id == target {
                return Ok(true);
            }
            next = (self.parents_loader)(&commit_id)?.into_iter().next();
        }

        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    /// In-memory commit graph keyed by single-letter names
    struct InMemoryCommitStore {
        commits: HashMap<ObjectId, Vec<ObjectId>>,
    }

    impl InMemoryCommitStore {
        fn new() -> Self {
            Self {
                commits: HashMap::new(),
            }
        }

        fn add_commit(&mut self, name: char, parents: &[char]) {
            self.commits
                .insert(oid(name), parents.iter().copied().map(oid).collect());
        }

        fn parents(&self, commit_id: &ObjectId) -> anyhow::Result<Vec<ObjectId>> {
            self.commits
                .get(commit_id)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("unknown commit {commit_id}"))
        }

        fn finder(&self) -> SplitFinder<impl Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>> + '_> {
            SplitFinder::new(|commit_id| self.parents(commit_id))
        }
    }

    fn oid(name: char) -> ObjectId {
        ObjectId::try_parse(format!("{:0>40x}", name as u32)).unwrap()
    }

    // a - b - c - d        (master)
    //      \       \
    //       e - f - g      (feature, g merges d)
    #[fixture]
    fn store() -> InMemoryCommitStore {
        let mut store = InMemoryCommitStore::new();
        store.add_commit('a', &[]);
        store.add_commit('b', &['a']);
        store.add_commit('c', &['b']);
        store.add_commit('d', &['c']);
        store.add_commit('e', &['b']);
        store.add_commit('f', &['e']);
        store.add_commit('g', &['f', 'd']);
        store
    }

    #[rstest]
    #[case::diverged('d', 'f', 'b')]
    #[case::given_is_ancestor('d', 'b', 'b')]
    #[case::current_is_ancestor('b', 'f', 'b')]
    #[case::same_commit('c', 'c', 'c')]
    #[case::through_second_parent('g', 'd', 'd')]
    #[case::merged_into_given('c', 'g', 'c')]
    fn finds_the_split_point(
        store: InMemoryCommitStore,
        #[case] current: char,
        #[case] given: char,
        #[case] expected: char,
    ) {
        let split = store
            .finder()
            .find_split_point(&oid(current), &oid(given))
            .unwrap();

        assert_eq!(split, oid(expected));
    }

    #[test]
    fn criss_cross_prefers_the_closer_ancestor() {
        //   a - b - d - f
        //    \    X
        //     c ----- e
        let mut store = InMemoryCommitStore::new();
        store.add_commit('a', &[]);
        store.add_commit('b', &['a']);
        store.add_commit('c', &['a']);
        store.add_commit('d', &['b', 'c']);
        store.add_commit('e', &['c', 'b']);
        store.add_commit('f', &['d']);

        let split = store.finder().find_split_point(&oid('f'), &oid('e')).unwrap();

        assert_eq!(split, oid('b'));
    }

    #[rstest]
    fn reachable_stops_at_known_commits(store: InMemoryCommitStore) {
        let known = [oid('b')];
        let mut reachable = store
            .finder()
            .reachable_from(&oid('g'), |commit_id| known.contains(commit_id))
            .unwrap();
        reachable.sort();

        let mut expected = vec![oid('c'), oid('d'), oid('e'), oid('f'), oid('g')];
        expected.sort();
        assert_eq!(reachable, expected);
    }

    #[rstest]
    #[case::on_chain('g', 'e', true)]
    #[case::root_included('g', 'a', true)]
    #[case::only_via_second_parent('g', 'd', false)]
    #[case::descendant('b', 'g', false)]
    fn primary_chain_membership(
        store: InMemoryCommitStore,
        #[case] start: char,
        #[case] target: char,
        #[case] expected: bool,
    ) {
        assert_eq!(
            store
                .finder()
                .primary_chain_contains(&oid(start), &oid(target))
                .unwrap(),
            expected
        );
    }

    #[test]
    fn missing_commits_surface_as_errors() {
        let store = InMemoryCommitStore::new();

        assert!(store.finder().find_split_point(&oid('a'), &oid('b')).is_err());
    }
}
