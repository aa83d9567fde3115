#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    pub buf_kind: crate::enums::BufferKind,
    pub range: std::ops::Range<usize>,
}

impl Piece {
    #[inline]
    pub fn len(&self) -> usize {
        self.range.end - self.range.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.range.start == self.range.end
    }

    /// The part of this piece starting `from` characters in and spanning
    /// `len` characters, clamped to the piece.
    #[inline]
    pub fn sub_piece(&self, from: usize, len: usize) -> Self {
        let start = self.range.start + from.min(self.len());
        let end = start.saturating_add(len).min(self.range.end);

        Self {
            buf_kind: self.buf_kind,
            range: start..end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_piece_clamps() {
        let piece = Piece {
            buf_kind: crate::enums::BufferKind::Add,
            range: 10..20,
        };

        assert_eq!(piece.sub_piece(2, 3).range, 12..15);
        assert_eq!(piece.sub_piece(8, 5).range, 18..20);
        assert!(piece.sub_piece(12, 1).is_empty());
    }
}
