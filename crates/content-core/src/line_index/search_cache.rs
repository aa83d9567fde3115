/// The last resolved (line, start offset) pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchCache {
    pub line_idx: usize,
    pub char_offset: usize,
}
