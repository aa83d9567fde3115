/// Settings fixed when a [`crate::content::TextContent`] is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContentConfig {
    /// Delimiter an editor should write when it inserts a new line.
    pub line_delimiter: crate::enums::LineDelimiter,
    /// Initial capacity, in chars, of the piece table's add buffer.
    pub add_buffer_capacity: usize,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            line_delimiter: crate::enums::LineDelimiter::platform(),
            add_buffer_capacity: crate::piece_table::BASELINE_CAPACITY,
        }
    }
}

impl ContentConfig {
    #[must_use]
    pub fn with_line_delimiter(mut self, line_delimiter: crate::enums::LineDelimiter) -> Self {
        self.line_delimiter = line_delimiter;
        self
    }

    #[must_use]
    pub fn with_add_buffer_capacity(mut self, add_buffer_capacity: usize) -> Self {
        self.add_buffer_capacity = add_buffer_capacity;
        self
    }
}
