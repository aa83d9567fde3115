/// Owned copy of a [`crate::listener::TextChangeEvent`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextChange {
    pub start: usize,
    pub replace_char_count: usize,
    pub new_char_count: usize,
    pub replace_line_count: usize,
    pub new_line_count: usize,
    pub new_text: String,
}

impl From<&crate::listener::TextChangeEvent<'_>> for TextChange {
    fn from(event: &crate::listener::TextChangeEvent<'_>) -> Self {
        Self {
            start: event.start,
            replace_char_count: event.replace_char_count,
            new_char_count: event.new_char_count,
            replace_line_count: event.replace_line_count,
            new_line_count: event.new_line_count,
            new_text: event.new_text.to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentNotification {
    Changing(TextChange),
    Changed(TextChange),
    Set { char_count: usize, line_count: usize },
}

/// Forwards every notification into a channel so it can be drained later.
#[derive(Debug)]
pub struct ChannelListener {
    sender: crossbeam_channel::Sender<ContentNotification>,
}

impl ChannelListener {
    pub fn new(sender: crossbeam_channel::Sender<ContentNotification>) -> Self {
        Self { sender }
    }

    pub fn unbounded() -> (
        std::rc::Rc<Self>,
        crossbeam_channel::Receiver<ContentNotification>,
    ) {
        let (sender, receiver) = crossbeam_channel::unbounded();

        (std::rc::Rc::new(Self::new(sender)), receiver)
    }

    fn forward(&self, notification: ContentNotification) {
        if self.sender.send(notification).is_err() {
            tracing::trace!("notification receiver dropped");
        }
    }
}

impl crate::listener::TextChangeListener for ChannelListener {
    fn text_changing(
        &self,
        _content: &crate::content::TextContent,
        event: &crate::listener::TextChangeEvent<'_>,
    ) {
        self.forward(ContentNotification::Changing(event.into()));
    }

    fn text_changed(
        &self,
        _content: &crate::content::TextContent,
        event: &crate::listener::TextChangeEvent<'_>,
    ) {
        self.forward(ContentNotification::Changed(event.into()));
    }

    fn text_set(&self, content: &crate::content::TextContent) {
        self.forward(ContentNotification::Set {
            char_count: content.char_count(),
            line_count: content.line_count(),
        });
    }
}
