//! Merge machinery: split-point search and three-way file resolution
//!
//! The split point of two branches is their lowest common ancestor in the
//! parent-pointer DAG, found with a breadth-first search from both tips that
//! tracks visited-ancestor sets by commit id. Unlike a positional scan of
//! linear branch histories, this stays correct across repeated merges.
//!
//! Per file, the standard three-way rule compares the blob digests at the
//! split point and on both tips; incompatible changes produce a conflict
//! block written verbatim into the working directory.

use crate::artifacts::digest::Digest;
use crate::errors::JotResult;
use std::collections::{BTreeSet, VecDeque};

/// Outcome of the three-way comparison for one file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileResolution {
    /// The current side already has the right content; no action
    Keep,
    /// Only the other side changed it; take its content and stage it
    TakeOther,
    /// Unchanged here, removed on the other side; delete and untrack
    Delete,
    /// Changed on both sides to different content; mark a conflict
    Conflict,
}

/// Apply the three-way rule to one file
///
/// Each argument is the blob digest recorded for the file at the split
/// point, on the current tip, and on the other tip; `None` means the file
/// is absent from that snapshot.
pub fn resolve_file(
    split: Option<&Digest>,
    current: Option<&Digest>,
    other: Option<&Digest>,
) -> FileResolution {
    // covers: unchanged everywhere, both sides same change, both deleted
    if current == other {
        return FileResolution::Keep;
    }

    let current_changed = current != split;
    let other_changed = other != split;

    match (current_changed, other_changed) {
        (false, true) => match other {
            Some(_) => FileResolution::TakeOther,
            None => FileResolution::Delete,
        },
        // changed only on the current side, or neither side moved
        (true, false) | (false, false) => FileResolution::Keep,
        // includes delete-versus-modify and both-added-differently
        (true, true) => FileResolution::Conflict,
    }
}

/// Render the conflict block written into the working directory
///
/// An absent side contributes the empty string.
pub fn conflict_block(current: &str, other: &str) -> String {
    format!("<<<<<<< HEAD\n{current}=======\n{other}>>>>>>>\n")
}

/// Lowest-common-ancestor search over the commit DAG
///
/// Generic over a parent loader so the algorithm stays independent of how
/// commits are stored.
pub struct SplitPointFinder<F>
where
    F: Fn(&Digest) -> JotResult<Vec<Digest>>,
{
    parents_of: F,
}

impl<F> SplitPointFinder<F>
where
    F: Fn(&Digest) -> JotResult<Vec<Digest>>,
{
    pub fn new(parents_of: F) -> Self {
        SplitPointFinder { parents_of }
    }

    /// Find the split point of two commits
    ///
    /// Collects the full ancestor set of `ours`, then walks breadth-first
    /// from `theirs`; the first commit reachable from both sides is the
    /// split point. Every history shares at least the root commit, so the
    /// search always terminates with a result.
    pub fn find(&self, ours: &Digest, theirs: &Digest) -> JotResult<Digest> {
        let our_ancestors = self.ancestors(ours)?;

        let mut queue = VecDeque::from([theirs.clone()]);
        let mut visited = BTreeSet::new();

        while let Some(id) = queue.pop_front() {
            if our_ancestors.contains(&id) {
                return Ok(id);
            }
            if !visited.insert(id.clone()) {
                continue;
            }
            queue.extend((self.parents_of)(&id)?);
        }

        // unreachable for any history grown from a single initial commit
        Err(anyhow::anyhow!("Commits {ours} and {theirs} share no ancestor").into())
    }

    fn ancestors(&self, tip: &Digest) -> JotResult<BTreeSet<Digest>> {
        let mut ancestors = BTreeSet::new();
        let mut queue = VecDeque::from([tip.clone()]);

        while let Some(id) = queue.pop_front() {
            if !ancestors.insert(id.clone()) {
                continue;
            }
            queue.extend((self.parents_of)(&id)?);
        }

        Ok(ancestors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn digest(tag: &str) -> Digest {
        Digest::over(tag.as_bytes())
    }

    fn finder(
        edges: Vec<(&'static str, Vec<&'static str>)>,
    ) -> SplitPointFinder<impl Fn(&Digest) -> JotResult<Vec<Digest>>> {
        let graph: BTreeMap<Digest, Vec<Digest>> = edges
            .into_iter()
            .map(|(child, parents)| {
                (digest(child), parents.into_iter().map(digest).collect())
            })
            .collect();

        SplitPointFinder::new(move |id: &Digest| Ok(graph.get(id).cloned().unwrap_or_default()))
    }

    #[test]
    fn split_of_simple_divergence_is_the_fork_commit() {
        // root <- a <- b (ours)
        //          \<- c (theirs)
        let finder = finder(vec![
            ("root", vec![]),
            ("a", vec!["root"]),
            ("b", vec!["a"]),
            ("c", vec!["a"]),
        ]);

        assert_eq!(finder.find(&digest("b"), &digest("c")).unwrap(), digest("a"));
    }

    #[test]
    fn split_of_linear_history_is_the_older_tip() {
        let finder = finder(vec![
            ("root", vec![]),
            ("a", vec!["root"]),
            ("b", vec!["a"]),
        ]);

        assert_eq!(finder.find(&digest("b"), &digest("a")).unwrap(), digest("a"));
        assert_eq!(finder.find(&digest("a"), &digest("b")).unwrap(), digest("a"));
    }

    #[test]
    fn split_search_crosses_merge_commits() {
        // root <- a <- b <---- m (ours, merge of b and c)
        //          \<- c <--/ \
        //               \<- d (theirs)
        let finder = finder(vec![
            ("root", vec![]),
            ("a", vec!["root"]),
            ("b", vec!["a"]),
            ("c", vec!["a"]),
            ("m", vec!["b", "c"]),
            ("d", vec!["c"]),
        ]);

        assert_eq!(finder.find(&digest("m"), &digest("d")).unwrap(), digest("c"));
    }

    #[test]
    fn three_way_rule_covers_the_standard_cases() {
        let base = digest("base");
        let ours = digest("ours");
        let theirs = digest("theirs");

        // changed only on the other side
        assert_eq!(
            resolve_file(Some(&base), Some(&base), Some(&theirs)),
            FileResolution::TakeOther
        );
        // added only on the other side
        assert_eq!(
            resolve_file(None, None, Some(&theirs)),
            FileResolution::TakeOther
        );
        // both sides agree
        assert_eq!(
            resolve_file(Some(&base), Some(&ours), Some(&ours)),
            FileResolution::Keep
        );
        // changed only on the current side
        assert_eq!(
            resolve_file(Some(&base), Some(&ours), Some(&base)),
            FileResolution::Keep
        );
        // removed on the other side, untouched here
        assert_eq!(
            resolve_file(Some(&base), Some(&base), None),
            FileResolution::Delete
        );
        // removed on both sides
        assert_eq!(resolve_file(Some(&base), None, None), FileResolution::Keep);
        // changed on both sides to different content
        assert_eq!(
            resolve_file(Some(&base), Some(&ours), Some(&theirs)),
            FileResolution::Conflict
        );
        // delete versus modify
        assert_eq!(
            resolve_file(Some(&base), None, Some(&theirs)),
            FileResolution::Conflict
        );
        // both introduced the same new file differently
        assert_eq!(
            resolve_file(None, Some(&ours), Some(&theirs)),
            FileResolution::Conflict
        );
    }

    #[test]
    fn conflict_block_matches_the_documented_format() {
        assert_eq!(
            conflict_block("mine\n", "yours\n"),
            "<<<<<<< HEAD\nmine\n=======\nyours\n>>>>>>>\n"
        );
        assert_eq!(
            conflict_block("", "yours\n"),
            "<<<<<<< HEAD\n=======\nyours\n>>>>>>>\n"
        );
    }
}
