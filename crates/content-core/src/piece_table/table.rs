use std::ops::SubAssign;

#[derive(Debug)]
pub struct PieceTable {
    /// Characters handed to the last reset, never modified.
    pub(crate) original: Vec<char>,
    /// Append-only buffer storing inserted characters.
    pub(crate) buf: Vec<char>,
    /// Ordered list of pieces describing the visible text.
    pub(crate) pieces: Vec<crate::piece_table::piece::Piece>,
    baseline_capacity: usize,
}

impl Default for PieceTable {
    fn default() -> Self {
        Self::new("", crate::piece_table::BASELINE_CAPACITY)
    }
}

/*

====================================
========= CREATION METHOD ==========
====================================

*/

impl PieceTable {
    pub fn new(text: &str, baseline_capacity: usize) -> Self {
        let mut table = Self {
            original: Vec::new(),
            buf: Vec::with_capacity(baseline_capacity),
            pieces: Vec::new(),
            baseline_capacity,
        };

        table.reset(text);

        table
    }

    /// Replaces the whole text, dropping every piece and clearing the add
    /// buffer back to its baseline capacity.
    pub fn reset(&mut self, text: &str) {
        self.original = text.chars().collect();
        self.buf.clear();

        if self.buf.capacity() > self.baseline_capacity {
            self.buf.shrink_to(self.baseline_capacity);
        }

        self.pieces.clear();

        if !self.original.is_empty() {
            self.pieces.push(crate::piece_table::piece::Piece {
                buf_kind: crate::enums::BufferKind::Original,
                range: 0..self.original.len(),
            });
        }
    }
}

/*

====================================
========= INLINE METHODS  ==========
====================================

*/

impl PieceTable {
    /// Total text length in characters
    #[inline]
    pub fn len(&self) -> usize {
        self.pieces.iter().map(crate::piece_table::piece::Piece::len).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pieces.iter().all(crate::piece_table::piece::Piece::is_empty)
    }

    /// The piece holding `pos` and the offset into it. A position on a
    /// boundary resolves to the end of the earlier piece.
    #[inline]
    pub fn locate(&self, mut pos: usize) -> (usize, usize) {
        for (idx, piece) in self.pieces.iter().enumerate() {
            let piece_len = piece.len();

            if pos <= piece_len {
                return (idx, pos);
            }

            pos.sub_assign(piece_len);
        }

        (self.pieces.len(), 0)
    }

    #[inline]
    fn slice_of(&self, piece: &crate::piece_table::piece::Piece) -> &[char] {
        let source = match piece.buf_kind {
            crate::enums::BufferKind::Original => &self.original,
            crate::enums::BufferKind::Add => &self.buf,
        };

        source.get(piece.range.clone()).unwrap_or_default()
    }

    #[inline]
    fn check_range(&self, start: usize, len: usize) -> crate::errors::ContentResult<usize> {
        let total = self.len();
        let end = start
            .checked_add(len)
            .ok_or_else(|| crate::errors::ContentError::out_of_range(start, total))?;

        if end > total {
            return Err(crate::errors::ContentError::out_of_range(end, total));
        }

        Ok(end)
    }
}

/*

=====================================
========= INSERT / DELETE  ==========
=====================================

*/

impl PieceTable {
    /// Extends the piece just before the insertion point when the new
    /// characters continue it in the add buffer.
    fn merge_or_continue(
        &mut self,
        idx: usize,
        offset: usize,
        range: &std::ops::Range<usize>,
    ) -> bool {
        let pieces_len = self.pieces.len();
        let prev_idx = if idx == pieces_len || offset == 0 {
            idx.checked_sub(1)
        } else if offset == self.pieces[idx].len() {
            Some(idx)
        } else {
            None
        };

        if let Some(prev) = prev_idx.and_then(|i| self.pieces.get_mut(i))
            && prev.buf_kind == crate::enums::BufferKind::Add
            && prev.range.end == range.start
        {
            prev.range.end = range.end;

            return false;
        }

        true
    }

    pub fn insert(&mut self, pos: usize, text: &str) -> crate::errors::ContentResult<()> {
        let total = self.len();

        if pos > total {
            return Err(crate::errors::ContentError::out_of_range(pos, total));
        }

        let start = self.buf.len();

        self.buf.extend(text.chars());

        let range = start..self.buf.len();

        if range.is_empty() {
            return Ok(());
        }

        let (idx, offset) = self.locate(pos);

        if !self.merge_or_continue(idx, offset, &range) {
            return Ok(());
        }

        let new_piece = crate::piece_table::piece::Piece {
            buf_kind: crate::enums::BufferKind::Add,
            range,
        };

        if idx == self.pieces.len() {
            self.pieces.push(new_piece);

            return Ok(());
        }

        if offset == 0 {
            self.pieces.insert(idx, new_piece);

            return Ok(());
        }

        let piece = self.pieces[idx].clone();
        let piece_len = piece.len();

        if offset == piece_len {
            self.pieces.insert(idx + 1, new_piece);

            return Ok(());
        }

        self.pieces.splice(
            idx..=idx,
            [
                piece.sub_piece(0, offset),
                new_piece,
                piece.sub_piece(offset, piece_len - offset),
            ],
        );

        Ok(())
    }

    pub fn delete(&mut self, pos: usize, len: usize) -> crate::errors::ContentResult<()> {
        let end = self.check_range(pos, len)?;

        if len == 0 {
            return Ok(());
        }

        let old_pieces = std::mem::take(&mut self.pieces);
        let mut piece_start = 0usize;

        self.pieces.reserve(old_pieces.len() + 1);

        for piece in old_pieces {
            let piece_end = piece_start + piece.len();

            if piece_end <= pos || piece_start >= end {
                self.pieces.push(piece);
            } else {
                // Keep whatever hangs out either side of the deleted span
                if piece_start < pos {
                    self.pieces.push(piece.sub_piece(0, pos - piece_start));
                }

                if piece_end > end {
                    self.pieces
                        .push(piece.sub_piece(end - piece_start, piece_end - end));
                }
            }

            piece_start = piece_end;
        }

        Ok(())
    }
}

/*

====================================
========== MISCELLANEOUS ===========
====================================

*/

impl PieceTable {
    pub fn char_at(&self, pos: usize) -> Option<char> {
        let mut remaining = pos;

        for piece in &self.pieces {
            let piece_len = piece.len();

            if remaining < piece_len {
                return self.slice_of(piece).get(remaining).copied();
            }

            remaining.sub_assign(piece_len);
        }

        None
    }

    /// Zero-copy slices covering characters `start..end`, in order.
    pub fn chunks(&self, start: usize, end: usize) -> impl Iterator<Item = &[char]> + '_ {
        let mut piece_start = 0usize;

        self.pieces.iter().filter_map(move |piece| {
            let piece_end = piece_start + piece.len();
            let from = start.max(piece_start);
            let to = end.min(piece_end);
            let chunk = (from < to)
                .then(|| self.slice_of(&piece.sub_piece(from - piece_start, to - from)));

            piece_start = piece_end;

            chunk
        })
    }

    /// Zero-copy slices of the whole text.
    pub fn iter_chunks(&self) -> impl Iterator<Item = &[char]> + '_ {
        self.pieces.iter().map(|piece| self.slice_of(piece))
    }

    pub fn chars_at(&self, start: usize, len: usize) -> crate::errors::ContentResult<Vec<char>> {
        let end = self.check_range(start, len)?;
        let mut res = Vec::with_capacity(len);

        for chunk in self.chunks(start, end) {
            res.extend_from_slice(chunk);
        }

        Ok(res)
    }

    pub fn text_range(&self, start: usize, len: usize) -> crate::errors::ContentResult<String> {
        let end = self.check_range(start, len)?;

        Ok(self.chunks(start, end).flatten().collect())
    }
}
