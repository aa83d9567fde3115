#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineSummary {
    pub line_count: usize,
    pub char_len: usize,
}

impl LineSummary {
    pub fn add(&mut self, other: &LineSummary) {
        self.line_count += other.line_count;
        self.char_len += other.char_len;
    }

    pub fn of_lengths(line_lengths: &[usize]) -> Self {
        Self {
            line_count: line_lengths.len(),
            char_len: line_lengths.iter().sum(),
        }
    }
}
