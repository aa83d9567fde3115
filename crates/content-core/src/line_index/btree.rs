#[derive(Debug)]
pub struct BTreeLineIndex {
    pub(crate) root: crate::line_index::node::Node,
    pub(crate) cache: std::cell::Cell<Option<crate::line_index::search_cache::SearchCache>>,
}

impl Default for BTreeLineIndex {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/*

====================
===== CREATION =====
====================

*/

impl BTreeLineIndex {
    fn build_leaves(line_lengths: Vec<usize>) -> Vec<crate::line_index::node::Node> {
        let mut leaves = Vec::with_capacity(line_lengths.len().div_ceil(crate::line_index::MAX_CHILDREN));
        let mut iter = line_lengths.into_iter();

        loop {
            let chunk: Vec<usize> = iter
                .by_ref()
                .take(crate::line_index::MAX_CHILDREN)
                .collect();

            if chunk.is_empty() {
                break;
            }

            leaves.push(crate::line_index::node::Node::Leaf(
                crate::line_index::node::LeafNode::new(chunk),
            ));
        }

        leaves
    }

    fn build_tree(mut current_level: Vec<crate::line_index::node::Node>) -> crate::line_index::node::Node {
        while current_level.len() > 1 {
            let chunk_count = current_level
                .len()
                .div_ceil(crate::line_index::MAX_CHILDREN);
            let mut next_level = Vec::with_capacity(chunk_count);
            let mut iter = current_level.into_iter();

            for _ in 0..chunk_count {
                let chunk: Vec<crate::line_index::node::Node> = iter
                    .by_ref()
                    .take(crate::line_index::MAX_CHILDREN)
                    .collect();

                next_level.push(crate::line_index::node::Node::Internal(
                    crate::line_index::node::InternalNode::new(chunk),
                ));
            }

            current_level = next_level;
        }

        current_level.pop().unwrap_or_else(|| {
            crate::line_index::node::Node::Leaf(crate::line_index::node::LeafNode::empty_line())
        })
    }

    /// Builds an index over the given line lengths. An empty list is treated
    /// as the single empty line of an empty buffer.
    pub fn new(mut line_lengths: Vec<usize>) -> Self {
        if line_lengths.is_empty() {
            line_lengths.push(0);
        }

        Self {
            root: Self::build_tree(Self::build_leaves(line_lengths)),
            cache: std::cell::Cell::new(None),
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self::new(crate::delimiter::line_lengths(text))
    }
}

/*

======================
======= GETTER =======
======================

*/

impl BTreeLineIndex {
    #[inline]
    pub fn line_count(&self) -> usize {
        self.root.summary().line_count
    }

    #[inline]
    pub fn char_len(&self) -> usize {
        self.root.summary().char_len
    }

    /// Length of a line including its delimiter.
    pub fn line_length(&self, line_idx: usize) -> Option<usize> {
        self.root.line_length(line_idx)
    }

    pub fn line_start(&self, line_idx: usize, bust_cache: bool) -> Option<usize> {
        if !bust_cache
            && let Some(cache) = self.cache.get()
            && cache.line_idx == line_idx
        {
            return Some(cache.char_offset);
        }

        let result = self.root.line_start(line_idx)?;

        self.cache
            .set(Some(crate::line_index::search_cache::SearchCache {
                line_idx,
                char_offset: result,
            }));

        Some(result)
    }

    /// The line containing `char_offset`. The offset one past the last
    /// character belongs to the last line.
    pub fn line_at_offset(&self, char_offset: usize, bust_cache: bool) -> Option<usize> {
        if !bust_cache
            && let Some(cache) = self.cache.get()
            && cache.char_offset == char_offset
        {
            return Some(cache.line_idx);
        }

        let char_len = self.char_len();
        let result = if char_offset == char_len {
            self.line_count().checked_sub(1)?
        } else {
            self.root.line_at_offset(char_offset)?
        };

        // Only line starts are cached so both lookups agree on the pair
        if self.root.line_start(result) == Some(char_offset) {
            self.cache
                .set(Some(crate::line_index::search_cache::SearchCache {
                    line_idx: result,
                    char_offset,
                }));
        }

        Some(result)
    }

    /// Iterates lines `start_line..end_line` as `(line_idx, char_range)`,
    /// where each range covers the line and its delimiter.
    pub fn lines(
        &self,
        start_line: usize,
        end_line: usize,
    ) -> crate::line_index::line_iter::LineRangeIter<'_> {
        let mut stack = Vec::with_capacity(8);
        let mut current_char_offset = 0usize;

        self.root
            .seek(start_line, &mut current_char_offset, &mut stack);

        crate::line_index::line_iter::LineRangeIter {
            stack,
            current_line_idx: start_line,
            end_line_idx: end_line.min(self.line_count()),
            current_char_offset,
        }
    }

    #[inline]
    pub fn iter(&self) -> crate::line_index::line_iter::LineRangeIter<'_> {
        self.lines(0, self.line_count())
    }
}

/*

======================
======= SPLICE =======
======================

*/

impl BTreeLineIndex {
    /// Replaces lines `first_line..=last_line` with `line_lengths`.
    pub fn splice(
        &mut self,
        first_line: usize,
        last_line: usize,
        line_lengths: &[usize],
    ) -> crate::errors::ContentResult<()> {
        let line_count = self.line_count();

        if last_line >= line_count {
            return Err(crate::errors::ContentError::out_of_range(last_line, line_count));
        }

        if first_line > last_line {
            return Err(crate::errors::ContentError::InvalidArgument(
                "first line of a splice must not follow its last line",
            ));
        }

        let Some((&first_len, rest)) = line_lengths.split_first() else {
            return Err(crate::errors::ContentError::InvalidArgument(
                "a splice must leave at least one line",
            ));
        };

        self.cache.set(None);

        if !self.root.set_line_length(first_line, first_len) {
            return Err(crate::errors::ContentError::out_of_range(first_line, line_count));
        }

        if last_line > first_line {
            self.root.remove_line_range(first_line + 1, last_line);
        }

        if !rest.is_empty() {
            let siblings = self.root.insert_lines(first_line + 1, rest);

            if !siblings.is_empty() {
                self.grow_root(siblings);
            }
        }

        self.collapse_root();

        Ok(())
    }

    fn grow_root(&mut self, siblings: Vec<crate::line_index::node::Node>) {
        let old_root = std::mem::replace(
            &mut self.root,
            crate::line_index::node::Node::Leaf(crate::line_index::node::LeafNode::empty_line()),
        );
        let mut level = Vec::with_capacity(siblings.len() + 1);

        level.push(old_root);
        level.extend(siblings);

        self.root = Self::build_tree(level);
    }

    /// Drops internal roots left with a single child after removals.
    pub fn collapse_root(&mut self) {
        loop {
            let crate::line_index::node::Node::Internal(internal_node) = &mut self.root else {
                return;
            };

            if internal_node.children.len() != 1 {
                return;
            }

            let Some(child) = internal_node.children.pop() else {
                return;
            };

            self.root = child;
        }
    }
}
