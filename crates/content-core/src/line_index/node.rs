use std::ops::{AddAssign, SubAssign};

use crate::line_index::MAX_CHILDREN;
use crate::line_index::line_summary::LineSummary;

/// Contains child nodes with the total of its children's summaries
#[derive(Debug)]
pub struct InternalNode {
    pub summary: LineSummary,
    pub children: Vec<Node>,
}

/// Contains the lengths of consecutive lines
#[derive(Debug)]
pub struct LeafNode {
    pub summary: LineSummary,
    pub line_lengths: Vec<usize>,
}

#[derive(Debug)]
pub enum Node {
    Internal(InternalNode),
    Leaf(LeafNode),
}

impl Node {
    #[inline]
    pub fn summary(&self) -> &LineSummary {
        match self {
            Node::Internal(internal_node) => &internal_node.summary,
            Node::Leaf(leaf_node) => &leaf_node.summary,
        }
    }
}

impl LeafNode {
    pub fn new(line_lengths: Vec<usize>) -> Self {
        Self {
            summary: LineSummary::of_lengths(&line_lengths),
            line_lengths,
        }
    }

    /// A leaf holding the single empty line of an empty buffer.
    pub fn empty_line() -> Self {
        Self::new(vec![0])
    }

    #[inline]
    fn refresh_summary(&mut self) {
        self.summary = LineSummary::of_lengths(&self.line_lengths);
    }
}

impl InternalNode {
    pub fn new(children: Vec<Node>) -> Self {
        let mut node = Self {
            summary: LineSummary::default(),
            children,
        };

        node.refresh_summary();

        node
    }

    #[inline]
    fn refresh_summary(&mut self) {
        self.summary = self
            .children
            .iter()
            .fold(LineSummary::default(), |mut acc, child| {
                acc.add(child.summary());

                acc
            });
    }
}

/// Splits an overfull node's items into runs of at most `MAX_CHILDREN`,
/// leaving the first run in `items` and returning the others in order.
fn split_evenly<T>(items: &mut Vec<T>) -> Vec<Vec<T>> {
    let total = items.len();

    if total <= MAX_CHILDREN {
        return Vec::new();
    }

    let chunk_count = total.div_ceil(MAX_CHILDREN);
    let base = total / chunk_count;
    let extra = total % chunk_count;
    let mut tail = items.split_off(base + usize::from(extra > 0));
    let mut siblings = Vec::with_capacity(chunk_count - 1);

    for chunk_idx in 1..chunk_count {
        let rest = tail.split_off(base + usize::from(chunk_idx < extra));

        siblings.push(std::mem::replace(&mut tail, rest));
    }

    siblings
}

/*

=====================
====== GETTERS ======
=====================

 */

impl Node {
    pub fn line_length(&self, mut line_idx: usize) -> Option<usize> {
        match self {
            Node::Leaf(leaf_node) => leaf_node.line_lengths.get(line_idx).copied(),
            Node::Internal(internal_node) => {
                for child in &internal_node.children {
                    let child_lines = child.summary().line_count;

                    if line_idx < child_lines {
                        return child.line_length(line_idx);
                    }

                    line_idx.sub_assign(child_lines);
                }

                None
            }
        }
    }

    /// Offset of the first character of `line_idx`, relative to this node.
    pub fn line_start(&self, mut line_idx: usize) -> Option<usize> {
        match self {
            Node::Leaf(leaf_node) => {
                if line_idx >= leaf_node.line_lengths.len() {
                    return None;
                }

                Some(leaf_node.line_lengths[..line_idx].iter().sum())
            }
            Node::Internal(internal_node) => {
                let mut chars_before = 0usize;

                for child in &internal_node.children {
                    let child_summary = child.summary();

                    if line_idx < child_summary.line_count {
                        return child
                            .line_start(line_idx)
                            .map(|start| start + chars_before);
                    }

                    line_idx.sub_assign(child_summary.line_count);
                    chars_before.add_assign(child_summary.char_len);
                }

                None
            }
        }
    }

    /// The line whose span `[start, start + len)` contains `char_offset`.
    /// Returns `None` for offsets at or past this node's end; the caller
    /// resolves the end-of-buffer offset to the last line.
    pub fn line_at_offset(&self, mut char_offset: usize) -> Option<usize> {
        match self {
            Node::Leaf(leaf_node) => {
                for (line_idx, &line_len) in leaf_node.line_lengths.iter().enumerate() {
                    if char_offset < line_len {
                        return Some(line_idx);
                    }

                    char_offset.sub_assign(line_len);
                }

                None
            }
            Node::Internal(internal_node) => {
                let mut lines_before = 0usize;

                for child in &internal_node.children {
                    let child_summary = child.summary();

                    if char_offset < child_summary.char_len {
                        return child
                            .line_at_offset(char_offset)
                            .map(|line_idx| line_idx + lines_before);
                    }

                    char_offset.sub_assign(child_summary.char_len);
                    lines_before.add_assign(child_summary.line_count);
                }

                None
            }
        }
    }

    /// Pushes the path to `line_idx` onto `stack` and advances `char_offset`
    /// by the length of every line before it.
    pub fn seek<'node>(
        &'node self,
        mut line_idx: usize,
        char_offset: &mut usize,
        stack: &mut Vec<(&'node Node, usize)>,
    ) {
        match self {
            Node::Leaf(leaf_node) => {
                let skipped = line_idx.min(leaf_node.line_lengths.len());

                char_offset.add_assign(leaf_node.line_lengths[..skipped].iter().sum::<usize>());
                stack.push((self, skipped));
            }
            Node::Internal(internal_node) => {
                for (child_idx, child) in internal_node.children.iter().enumerate() {
                    let child_summary = child.summary();

                    if line_idx < child_summary.line_count {
                        stack.push((self, child_idx));
                        child.seek(line_idx, char_offset, stack);

                        return;
                    }

                    line_idx.sub_assign(child_summary.line_count);
                    char_offset.add_assign(child_summary.char_len);
                }

                stack.push((self, internal_node.children.len()));
            }
        }
    }
}

/*

=====================
===== INSERTION =====
=====================

 */

impl Node {
    /// Inserts `line_lengths` so the first of them becomes line `line_idx`.
    /// Returns the siblings split off this node when it overflows.
    pub fn insert_lines(&mut self, line_idx: usize, line_lengths: &[usize]) -> Vec<Node> {
        match self {
            Node::Leaf(leaf_node) => leaf_node
                .insert_lines(line_idx, line_lengths)
                .into_iter()
                .map(Node::Leaf)
                .collect(),
            Node::Internal(internal_node) => internal_node
                .insert_lines(line_idx, line_lengths)
                .into_iter()
                .map(Node::Internal)
                .collect(),
        }
    }
}

impl LeafNode {
    pub fn insert_lines(&mut self, line_idx: usize, line_lengths: &[usize]) -> Vec<LeafNode> {
        let at = line_idx.min(self.line_lengths.len());

        self.line_lengths
            .splice(at..at, line_lengths.iter().copied());
        self.split_if_needed()
    }

    pub fn split_if_needed(&mut self) -> Vec<LeafNode> {
        let siblings = split_evenly(&mut self.line_lengths);

        self.refresh_summary();

        siblings.into_iter().map(LeafNode::new).collect()
    }
}

impl InternalNode {
    pub fn insert_lines(&mut self, mut line_idx: usize, line_lengths: &[usize]) -> Vec<InternalNode> {
        let Some(last_child) = self.children.len().checked_sub(1) else {
            self.children
                .push(Node::Leaf(LeafNode::new(line_lengths.to_vec())));
            self.refresh_summary();

            return self.split_if_needed();
        };
        let mut target = last_child;

        for (child_idx, child) in self.children.iter().enumerate() {
            let child_lines = child.summary().line_count;

            if line_idx < child_lines || child_idx == last_child {
                target = child_idx;
                break;
            }

            line_idx.sub_assign(child_lines);
        }

        let new_siblings = self.children[target].insert_lines(line_idx, line_lengths);

        self.children
            .splice(target + 1..target + 1, new_siblings);
        self.refresh_summary();

        self.split_if_needed()
    }

    pub fn split_if_needed(&mut self) -> Vec<InternalNode> {
        let siblings = split_evenly(&mut self.children);

        self.refresh_summary();

        siblings.into_iter().map(InternalNode::new).collect()
    }
}

/*

======================
======= SETTER =======
======================

 */

impl Node {
    /// Returns `false` when `line_idx` does not exist under this node.
    pub fn set_line_length(&mut self, mut line_idx: usize, new_len: usize) -> bool {
        match self {
            Node::Leaf(leaf_node) => {
                let Some(line_len) = leaf_node.line_lengths.get_mut(line_idx) else {
                    return false;
                };

                *line_len = new_len;
                leaf_node.refresh_summary();

                true
            }
            Node::Internal(internal_node) => {
                let mut found = false;

                for child in internal_node.children.iter_mut() {
                    let child_lines = child.summary().line_count;

                    if line_idx < child_lines {
                        found = child.set_line_length(line_idx, new_len);
                        break;
                    }

                    line_idx.sub_assign(child_lines);
                }

                internal_node.refresh_summary();

                found
            }
        }
    }
}

/*

========================
======= DELETION =======
========================

 */

impl Node {
    /// Removes lines `start..=end` and culls nodes left without lines.
    #[inline]
    pub fn remove_line_range(&mut self, start: usize, end: usize) {
        match self {
            Node::Leaf(leaf_node) => leaf_node.remove_line_range(start, end),
            Node::Internal(internal_node) => internal_node.remove_line_range(start, end),
        }
    }
}

impl LeafNode {
    pub fn remove_line_range(&mut self, start: usize, end: usize) {
        let line_count = self.line_lengths.len();
        let remove_start = start.min(line_count);
        let remove_end = end.saturating_add(1).min(line_count);

        if remove_start < remove_end {
            self.line_lengths.drain(remove_start..remove_end);
            self.refresh_summary();
        }
    }
}

impl InternalNode {
    pub fn remove_line_range(&mut self, mut start: usize, mut end: usize) {
        let mut idx = 0usize;

        while idx < self.children.len() && start <= end {
            let child_lines = self.children[idx].summary().line_count;

            if start >= child_lines {
                start.sub_assign(child_lines);
                end.sub_assign(child_lines);
                idx.add_assign(1);

                continue;
            }

            self.children[idx].remove_line_range(start, end.min(child_lines - 1));

            if self.children[idx].summary().line_count == 0 {
                self.children.remove(idx);
            } else {
                idx.add_assign(1);
            }

            if end < child_lines {
                break;
            }

            end.sub_assign(child_lines);
            start = 0;
        }

        self.refresh_summary();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(line_lengths: &[usize]) -> LeafNode {
        LeafNode::new(line_lengths.to_vec())
    }

    fn internal_of(leaves: Vec<LeafNode>) -> InternalNode {
        InternalNode::new(leaves.into_iter().map(Node::Leaf).collect())
    }

    #[test]
    fn test_split_evenly_keeps_order_and_bounds() {
        let mut items: Vec<usize> = (0..40).collect();
        let siblings = split_evenly(&mut items);
        let mut rejoined = items.clone();

        for sibling in &siblings {
            assert!(sibling.len() <= MAX_CHILDREN);
            rejoined.extend_from_slice(sibling);
        }

        assert!(items.len() <= MAX_CHILDREN);
        assert_eq!(siblings.len(), 2);
        assert_eq!(rejoined, (0..40).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_evenly_noop_when_not_full() {
        let mut items = vec![1, 2, 3];

        assert!(split_evenly(&mut items).is_empty());
        assert_eq!(items, vec![1, 2, 3]);
    }

    // =====================
    // ===== INSERTION =====
    // =====================

    #[test]
    fn test_leaf_insert_lines() {
        let mut node = leaf(&[5, 3]);
        let split = node.insert_lines(1, &[2, 2]);

        assert!(split.is_empty());
        assert_eq!(node.line_lengths, vec![5, 2, 2, 3]);
        assert_eq!(node.summary.line_count, 4);
        assert_eq!(node.summary.char_len, 12);
    }

    #[test]
    fn test_leaf_insert_overflow_splits() {
        let mut node = leaf(&[0]);
        let split = node.insert_lines(0, &[2; 18]);

        assert_eq!(split.len(), 1);
        assert_eq!(node.summary.line_count + split[0].summary.line_count, 19);
        assert_eq!(node.summary.char_len + split[0].summary.char_len, 36);
        assert_eq!(split[0].line_lengths.last(), Some(&0));
    }

    #[test]
    fn test_internal_insert_routes_to_child() {
        let mut node = internal_of(vec![leaf(&[2, 2]), leaf(&[3, 1])]);

        // Line 2 is the first line of the second leaf
        let split = node.insert_lines(2, &[7]);

        assert!(split.is_empty());
        assert_eq!(node.summary.line_count, 5);
        assert_eq!(node.summary.char_len, 15);

        let Node::Leaf(second) = &node.children[1] else {
            panic!("Expected LeafNode");
        };
        assert_eq!(second.line_lengths, vec![7, 3, 1]);
    }

    #[test]
    fn test_internal_insert_at_end() {
        let mut node = internal_of(vec![leaf(&[2]), leaf(&[3])]);

        node.insert_lines(2, &[4]);

        let Node::Leaf(last) = &node.children[1] else {
            panic!("Expected LeafNode");
        };
        assert_eq!(last.line_lengths, vec![3, 4]);
        assert_eq!(node.summary.line_count, 3);
    }

    // =====================
    // ====== GETTERS ======
    // =====================

    #[test]
    fn test_internal_getters() {
        let node = Node::Internal(internal_of(vec![leaf(&[5, 10]), leaf(&[7, 0])]));

        assert_eq!(node.line_start(0), Some(0));
        assert_eq!(node.line_start(2), Some(15));
        assert_eq!(node.line_start(3), Some(22));
        assert_eq!(node.line_start(4), None);
        assert_eq!(node.line_length(1), Some(10));
        assert_eq!(node.line_at_offset(4), Some(0));
        assert_eq!(node.line_at_offset(15), Some(2));
        assert_eq!(node.line_at_offset(21), Some(2));
        assert_eq!(node.line_at_offset(22), None);
    }

    // ======================
    // ======= SETTER =======
    // ======================

    #[test]
    fn test_set_line_length_updates_summaries() {
        let mut node = Node::Internal(internal_of(vec![leaf(&[2, 2]), leaf(&[2, 2, 2])]));

        assert!(node.set_line_length(3, 5));
        assert_eq!(node.summary().char_len, 13);
        assert_eq!(node.line_length(3), Some(5));
        assert!(!node.set_line_length(9, 1));
    }

    // ========================
    // ======= DELETION =======
    // ========================

    #[test]
    fn test_leaf_remove_line_range() {
        let mut node = leaf(&[2, 2, 2, 2, 1]);

        node.remove_line_range(1, 3);

        assert_eq!(node.line_lengths, vec![2, 1]);
        assert_eq!(node.summary.line_count, 2);
        assert_eq!(node.summary.char_len, 3);
    }

    #[test]
    fn test_internal_remove_across_children() {
        let mut node = internal_of(vec![leaf(&[2, 2, 2]), leaf(&[2, 2, 0])]);

        node.remove_line_range(1, 3);

        assert_eq!(node.summary.line_count, 3);
        assert_eq!(node.summary.char_len, 4);
        assert_eq!(node.children.len(), 2);
    }

    #[test]
    fn test_internal_remove_culls_empty_nodes() {
        let mut node = internal_of(vec![leaf(&[2]), leaf(&[2, 0])]);

        node.remove_line_range(0, 0);

        assert_eq!(node.children.len(), 1);
        assert_eq!(node.summary.line_count, 2);

        let Node::Leaf(remaining) = &node.children[0] else {
            panic!("Expected LeafNode");
        };
        assert_eq!(remaining.line_lengths, vec![2, 0]);
    }
}
