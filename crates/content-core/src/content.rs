/// # Text content
///
/// - Offsets count characters (Unicode scalar values), never bytes.
/// - Reads take `&self`. Every mutation goes through `set_text` or
///   `replace_text_range`, which keep the piece table and the line index in
///   step and notify listeners.
/// - Listeners receive `&TextContent`, so they can query but never mutate
///   the buffer they are observing.
#[derive(Debug)]
pub struct TextContent {
    piece_table: crate::piece_table::table::PieceTable,
    line_index: crate::line_index::btree::BTreeLineIndex,
    listeners: crate::listener::ListenerRegistry,
    config: crate::config::ContentConfig,
}

impl Default for TextContent {
    fn default() -> Self {
        Self::new()
    }
}

/*

=========================
===== CREATION, SET =====
=========================

*/

impl TextContent {
    /// Creates an empty buffer holding a single empty line.
    pub fn new() -> Self {
        Self::with_config(crate::config::ContentConfig::default())
    }

    pub fn with_config(config: crate::config::ContentConfig) -> Self {
        Self {
            piece_table: crate::piece_table::table::PieceTable::new("", config.add_buffer_capacity),
            line_index: crate::line_index::btree::BTreeLineIndex::default(),
            listeners: crate::listener::ListenerRegistry::default(),
            config,
        }
    }

    /// Discards the current text and rebuilds both indexes from `text`.
    /// Listeners only receive `text_set`.
    pub fn set_text(&mut self, text: &str) {
        self.piece_table.reset(text);
        self.line_index = crate::line_index::btree::BTreeLineIndex::from_text(text);

        tracing::debug!(
            char_count = self.char_count(),
            line_count = self.line_count(),
            "text set"
        );

        for listener in self.listeners.iter() {
            listener.text_set(self);
        }
    }
}

/*

==========================
===== INLINE METHODS =====
==========================

*/

impl TextContent {
    #[inline]
    pub fn char_count(&self) -> usize {
        self.line_index.char_len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.char_count() == 0
    }

    /// Always at least 1; an empty buffer has one empty line.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_index.line_count()
    }

    /// The delimiter to write when inserting a new line.
    #[inline]
    pub fn line_delimiter(&self) -> crate::enums::LineDelimiter {
        self.config.line_delimiter
    }

    #[inline]
    pub fn config(&self) -> &crate::config::ContentConfig {
        &self.config
    }

    #[inline]
    fn line_span(&self, line_idx: usize) -> crate::errors::ContentResult<(usize, usize)> {
        let out_of_range = || crate::errors::ContentError::out_of_range(line_idx, self.line_count());
        let start = self
            .line_index
            .line_start(line_idx, false)
            .ok_or_else(out_of_range)?;
        let len = self.line_index.line_length(line_idx).ok_or_else(out_of_range)?;

        Ok((start, len))
    }
}

/*

===========================
========= GETTERS =========
===========================

*/

impl TextContent {
    pub fn text(&self) -> String {
        self.piece_table.iter_chunks().flatten().collect()
    }

    pub fn text_range(&self, start: usize, len: usize) -> crate::errors::ContentResult<String> {
        self.piece_table.text_range(start, len)
    }

    /// Text of a line without its delimiter.
    pub fn line(&self, line_idx: usize) -> crate::errors::ContentResult<String> {
        let mut line = self.full_line(line_idx)?;

        // Delimiters are ASCII, so their char length is their byte length
        if let Some(delimiter) = crate::delimiter::trailing_delimiter(&line) {
            line.truncate(line.len() - delimiter.len());
        }

        Ok(line)
    }

    /// Text of a line including its delimiter.
    pub fn full_line(&self, line_idx: usize) -> crate::errors::ContentResult<String> {
        let (start, len) = self.line_span(line_idx)?;

        self.piece_table.text_range(start, len)
    }

    /// The delimiter ending a line, `None` for the last line.
    pub fn line_delimiter_at(
        &self,
        line_idx: usize,
    ) -> crate::errors::ContentResult<Option<crate::enums::LineDelimiter>> {
        Ok(crate::delimiter::trailing_delimiter(
            &self.full_line(line_idx)?,
        ))
    }

    pub fn offset_at_line(&self, line_idx: usize) -> crate::errors::ContentResult<usize> {
        self.line_index
            .line_start(line_idx, false)
            .ok_or_else(|| crate::errors::ContentError::out_of_range(line_idx, self.line_count()))
    }

    /// The line containing `offset`. `char_count()` itself maps to the last
    /// line.
    pub fn line_at_offset(&self, offset: usize) -> crate::errors::ContentResult<usize> {
        self.line_index
            .line_at_offset(offset, false)
            .ok_or_else(|| crate::errors::ContentError::out_of_range(offset, self.char_count()))
    }

    /// Every line as `(line_idx, char_range)`, each range covering the
    /// line's delimiter.
    pub fn lines(&self) -> crate::line_index::line_iter::LineRangeIter<'_> {
        self.line_index.iter()
    }
}

/*

===========================
========= EDITING =========
===========================

*/

impl TextContent {
    /// Replaces `replace_length` characters at `start` with `new_text`.
    ///
    /// # Errors
    ///
    /// `OutOfRange` when the range runs past the end of the buffer and
    /// `InvalidEdit` when either end of the range falls between the `\r` and
    /// `\n` of a pair. Both are raised before any listener runs and leave the
    /// buffer untouched.
    pub fn replace_text_range(
        &mut self,
        start: usize,
        replace_length: usize,
        new_text: &str,
    ) -> crate::errors::ContentResult<()> {
        let char_count = self.char_count();
        let end = start
            .checked_add(replace_length)
            .filter(|&end| end <= char_count)
            .ok_or_else(|| {
                crate::errors::ContentError::out_of_range(
                    start.saturating_add(replace_length),
                    char_count,
                )
            })?;
        let replaced = self.piece_table.chars_at(start, replace_length)?;
        let scan = crate::delimiter::DelimiterScan::scan(
            start.checked_sub(1).and_then(|pos| self.piece_table.char_at(pos)),
            &replaced,
            self.piece_table.char_at(end),
        );

        if scan.splits_pair() {
            let offset = if scan.splits_start { start } else { end };

            tracing::debug!(start, replace_length, offset, "edit splits a \\r\\n delimiter");

            return Err(crate::errors::ContentError::InvalidEdit { offset });
        }

        let event = crate::listener::TextChangeEvent {
            start,
            replace_char_count: replace_length,
            new_char_count: new_text.chars().count(),
            replace_line_count: scan.count,
            new_line_count: crate::delimiter::count_delimiters_in_str(new_text),
            new_text,
        };

        let (first_line, last_line, line_lengths) = self.relineate(start, end, new_text)?;

        for listener in self.listeners.iter() {
            listener.text_changing(self, &event);
        }

        // The range and the window were validated above, so none of these fail
        self.piece_table.delete(start, replace_length)?;
        self.piece_table.insert(start, new_text)?;
        self.line_index.splice(first_line, last_line, &line_lengths)?;

        tracing::trace!(
            start,
            replace_length,
            new_char_count = event.new_char_count,
            replace_line_count = event.replace_line_count,
            new_line_count = event.new_line_count,
            "text replaced"
        );

        for listener in self.listeners.iter() {
            listener.text_changed(self, &event);
        }

        Ok(())
    }

    /// Works out which lines an edit touches and what they become. The
    /// window opens on the line before `start` so a `\r` there can pair with
    /// a leading `\n` of `new_text`, and closes after the delimiter of the
    /// line holding `end`.
    fn relineate(
        &self,
        start: usize,
        end: usize,
        new_text: &str,
    ) -> crate::errors::ContentResult<(usize, usize, Vec<usize>)> {
        let first_line = self.line_at_offset(start.saturating_sub(1))?;
        let last_line = self.line_at_offset(end)?;
        let window_start = self.offset_at_line(first_line)?;
        let (last_start, last_len) = self.line_span(last_line)?;
        let window_end = last_start + last_len;
        let mut window = self.text_range(window_start, start - window_start)?;

        window.push_str(new_text);
        window.push_str(&self.text_range(end, window_end - end)?);

        let mut line_lengths = crate::delimiter::line_lengths(&window);

        // The line after the window already starts where the last delimiter ends
        if last_line + 1 < self.line_count() {
            line_lengths.pop();
        }

        Ok((first_line, last_line, line_lengths))
    }
}

/*

=====================
===== LISTENERS =====
=====================

*/

impl TextContent {
    /// # Errors
    ///
    /// `InvalidArgument` when this listener is already registered.
    pub fn add_text_change_listener(
        &mut self,
        listener: std::rc::Rc<dyn crate::listener::TextChangeListener>,
    ) -> crate::errors::ContentResult<crate::listener::ListenerId> {
        let id = self.listeners.add(listener)?;

        tracing::trace!(?id, listeners = self.listeners.len(), "listener added");

        Ok(id)
    }

    /// # Errors
    ///
    /// `InvalidArgument` when this listener is not registered.
    pub fn remove_text_change_listener(
        &mut self,
        listener: &std::rc::Rc<dyn crate::listener::TextChangeListener>,
    ) -> crate::errors::ContentResult<()> {
        let id = self.listeners.remove(listener)?;

        tracing::trace!(?id, listeners = self.listeners.len(), "listener removed");

        Ok(())
    }

    pub fn remove_listener_by_id(
        &mut self,
        id: crate::listener::ListenerId,
    ) -> crate::errors::ContentResult<()> {
        self.listeners.remove_by_id(id)?;

        tracing::trace!(?id, listeners = self.listeners.len(), "listener removed");

        Ok(())
    }

    #[inline]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Display for TextContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for chunk in self.piece_table.iter_chunks() {
            for ch in chunk {
                std::fmt::Write::write_char(f, *ch)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod text_content_tests {
    use pretty_assertions::assert_eq;

    use crate::content::TextContent;

    fn content_of(text: &str) -> TextContent {
        let mut content = TextContent::new();

        content.set_text(text);

        content
    }

    fn all_lines(content: &TextContent) -> Vec<String> {
        (0..content.line_count())
            .map(|idx| content.line(idx).unwrap())
            .collect()
    }

    #[test]
    fn test_new_is_one_empty_line() {
        let content = TextContent::new();

        assert!(content.is_empty());
        assert_eq!(content.line_count(), 1);
        assert_eq!(content.line(0).unwrap(), "");
        assert_eq!(content.offset_at_line(0).unwrap(), 0);
        assert_eq!(content.line_at_offset(0).unwrap(), 0);
        assert_eq!(content.to_string(), "");
    }

    #[test]
    fn test_line_getters() {
        let content = content_of("one\r\ntwo\rthree\nfour");

        assert_eq!(all_lines(&content), vec!["one", "two", "three", "four"]);
        assert_eq!(content.full_line(0).unwrap(), "one\r\n");
        assert_eq!(content.full_line(3).unwrap(), "four");
        assert_eq!(
            content.line_delimiter_at(0).unwrap(),
            Some(crate::enums::LineDelimiter::CrLf)
        );
        assert_eq!(
            content.line_delimiter_at(1).unwrap(),
            Some(crate::enums::LineDelimiter::Cr)
        );
        assert_eq!(
            content.line_delimiter_at(2).unwrap(),
            Some(crate::enums::LineDelimiter::Lf)
        );
        assert_eq!(content.line_delimiter_at(3).unwrap(), None);
        assert!(content.line(4).is_err());
    }

    #[test]
    fn test_empty_last_line_after_delimiter() {
        for text in ["L1\n", "L1\r", "L1\r\n"] {
            let content = content_of(text);

            assert_eq!(content.line_count(), 2, "{text:?}");
            assert_eq!(content.line(0).unwrap(), "L1");
            assert_eq!(content.line(1).unwrap(), "", "{text:?}");
            assert_eq!(content.full_line(1).unwrap(), "");
            assert_eq!(content.line_delimiter_at(1).unwrap(), None, "{text:?}");
        }

        let content = content_of("\n");

        assert_eq!(all_lines(&content), vec!["", ""]);
        assert_eq!(
            content.line_delimiter_at(0).unwrap(),
            Some(crate::enums::LineDelimiter::Lf)
        );
    }

    #[test]
    fn test_offset_line_conversions() {
        let content = content_of("ab\r\ncd\n");

        assert_eq!(content.offset_at_line(1).unwrap(), 4);
        assert_eq!(content.offset_at_line(2).unwrap(), 7);
        assert_eq!(content.line_at_offset(3).unwrap(), 0);
        assert_eq!(content.line_at_offset(4).unwrap(), 1);
        assert_eq!(content.line_at_offset(7).unwrap(), 2);
        assert_eq!(
            content.line_at_offset(8),
            Err(crate::errors::ContentError::out_of_range(8, 7))
        );
        assert!(content.offset_at_line(3).is_err());
    }

    #[test]
    fn test_insert_splits_line() {
        let mut content = content_of("This\nis a test\r");

        content.replace_text_range(0, 0, "test\n ").unwrap();

        assert_eq!(content.text(), "test\n This\nis a test\r");
        assert_eq!(all_lines(&content), vec!["test", " This", "is a test", ""]);
    }

    #[test]
    fn test_leading_cr_before_crlf() {
        let mut content = content_of("Line 1\r\nLine 2");

        content.replace_text_range(0, 0, "\r").unwrap();

        assert_eq!(content.text(), "\rLine 1\r\nLine 2");
        assert_eq!(all_lines(&content), vec!["", "Line 1", "Line 2"]);
    }

    #[test]
    fn test_lf_completes_trailing_cr() {
        let mut content = content_of("L1\r");

        content.replace_text_range(3, 0, "\n").unwrap();

        assert_eq!(content.line_count(), 2);
        assert_eq!(content.full_line(0).unwrap(), "L1\r\n");
        assert_eq!(content.line(1).unwrap(), "");
    }

    #[test]
    fn test_cr_before_lf_merges() {
        let mut content = content_of("L1\n");

        content.replace_text_range(2, 0, "test\r\r\r").unwrap();

        assert_eq!(content.text(), "L1test\r\r\r\n");
        assert_eq!(all_lines(&content), vec!["L1test", "", "", ""]);
    }

    #[test]
    fn test_deletion_joins_cr_and_lf() {
        let mut content = content_of("a\rx\nb");

        content.replace_text_range(2, 1, "").unwrap();

        assert_eq!(all_lines(&content), vec!["a", "b"]);
        assert_eq!(
            content.line_delimiter_at(0).unwrap(),
            Some(crate::enums::LineDelimiter::CrLf)
        );
    }

    #[test]
    fn test_split_guard_leaves_buffer_untouched() {
        let mut content = content_of("L1\r\n");

        assert_eq!(
            content.replace_text_range(3, 1, "test\n"),
            Err(crate::errors::ContentError::InvalidEdit { offset: 3 })
        );
        assert_eq!(
            content.replace_text_range(2, 1, ""),
            Err(crate::errors::ContentError::InvalidEdit { offset: 3 })
        );
        assert_eq!(content.text(), "L1\r\n");
        assert_eq!(content.line_count(), 2);
    }

    #[test]
    fn test_out_of_range_edit() {
        let mut content = content_of("abc");

        assert_eq!(
            content.replace_text_range(2, 2, "x"),
            Err(crate::errors::ContentError::out_of_range(4, 3))
        );
        assert!(content.replace_text_range(usize::MAX, 1, "").is_err());
        assert_eq!(content.text(), "abc");
    }

    #[test]
    fn test_edit_inside_large_buffer() {
        let text = "line\n".repeat(500);
        let mut content = content_of(&text);

        content.replace_text_range(5 * 100 + 2, 5 * 200, "X\r\nY").unwrap();

        assert_eq!(content.line_count(), 501 - 200 + 1);
        assert_eq!(content.line(100).unwrap(), "liX");
        assert_eq!(content.line(101).unwrap(), "Yne");
        assert_eq!(content.offset_at_line(102).unwrap(), 5 * 100 + 5 + 4);
        assert_eq!(content.text().chars().count(), content.char_count());
    }

    #[test]
    fn test_display_and_config() {
        let mut content = TextContent::with_config(
            crate::config::ContentConfig::default()
                .with_line_delimiter(crate::enums::LineDelimiter::Cr),
        );

        content.set_text("héllo\nwörld");

        assert_eq!(content.to_string(), "héllo\nwörld");
        assert_eq!(content.char_count(), 11);
        assert_eq!(content.line_delimiter(), crate::enums::LineDelimiter::Cr);
        assert_eq!(content.lines().count(), 2);
    }
}
