use std::collections::HashSet;

use crate::tree::Node;

/// Greedy consume-from-front pairing of two sibling lists.
///
/// Left items are taken in order; each one claims at most one unused right
/// item, which is never offered again.
pub(crate) struct Matcher<'a, N> {
    left: Vec<&'a N>,
    right: Vec<&'a N>,
    next_left: usize,
    used_right: HashSet<usize>,
}

impl<'a, N: Node> Matcher<'a, N> {
    pub(crate) fn new(left: Vec<&'a N>, right: Vec<&'a N>) -> Self {
        Self {
            left,
            right,
            next_left: 0,
            used_right: HashSet::new(),
        }
    }

    pub(crate) fn next_left(&mut self) -> Option<&'a N> {
        let node = self.left.get(self.next_left).copied()?;
        self.next_left += 1;
        Some(node)
    }

    /// Claim the first unused right item, regardless of name.
    pub(crate) fn take_positional(&mut self) -> Option<&'a N> {
        let idx = (0..self.right.len()).find(|idx| !self.used_right.contains(idx))?;
        self.used_right.insert(idx);
        Some(self.right[idx])
    }

    /// Claim the first unused right item with the given local name.
    pub(crate) fn take_by_name(&mut self, local_name: &str) -> Option<&'a N> {
        let idx = self.right.iter().enumerate().find_map(|(idx, node)| {
            if self.used_right.contains(&idx) || node.local_name() != local_name {
                None
            } else {
                Some(idx)
            }
        })?;
        self.used_right.insert(idx);
        Some(self.right[idx])
    }

    /// Right items never claimed, in source order.
    pub(crate) fn unmatched_right(&self) -> impl Iterator<Item = &'a N> + '_ {
        self.right
            .iter()
            .enumerate()
            .filter(|(idx, _)| !self.used_right.contains(idx))
            .map(|(_, node)| *node)
    }
}
