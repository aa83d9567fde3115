//! # Change notifications.
//!
//! Listeners are called synchronously, in registration order, on the thread
//! that mutates the buffer. `text_changing` sees the buffer before the edit
//! and `text_changed` sees it after. A full reset only fires `text_set`.

/// Describes one `replace_text_range` call. Every offset refers to the
/// buffer as it was before the edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextChangeEvent<'text> {
    pub start: usize,
    pub replace_char_count: usize,
    pub new_char_count: usize,
    /// Delimiters inside the replaced run.
    pub replace_line_count: usize,
    /// Delimiters inside `new_text`.
    pub new_line_count: usize,
    pub new_text: &'text str,
}

pub trait TextChangeListener {
    fn text_changing(
        &self,
        _content: &crate::content::TextContent,
        _event: &TextChangeEvent<'_>,
    ) {
    }

    fn text_changed(
        &self,
        _content: &crate::content::TextContent,
        _event: &TextChangeEvent<'_>,
    ) {
    }

    fn text_set(&self, _content: &crate::content::TextContent) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Registered listeners, compared by pointer identity.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_id: u64,
    entries: Vec<(ListenerId, std::rc::Rc<dyn TextChangeListener>)>,
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(id, _)| id))
            .finish()
    }
}

#[inline]
fn same_listener(
    a: &std::rc::Rc<dyn TextChangeListener>,
    b: &std::rc::Rc<dyn TextChangeListener>,
) -> bool {
    std::ptr::addr_eq(std::rc::Rc::as_ptr(a), std::rc::Rc::as_ptr(b))
}

impl ListenerRegistry {
    pub fn add(
        &mut self,
        listener: std::rc::Rc<dyn TextChangeListener>,
    ) -> crate::errors::ContentResult<ListenerId> {
        if self.contains(&listener) {
            return Err(crate::errors::ContentError::InvalidArgument(
                "listener is already registered",
            ));
        }

        let id = ListenerId(self.next_id);

        self.next_id += 1;
        self.entries.push((id, listener));

        Ok(id)
    }

    pub fn remove(
        &mut self,
        listener: &std::rc::Rc<dyn TextChangeListener>,
    ) -> crate::errors::ContentResult<ListenerId> {
        let Some(position) = self
            .entries
            .iter()
            .position(|(_, registered)| same_listener(registered, listener))
        else {
            return Err(crate::errors::ContentError::InvalidArgument(
                "listener is not registered",
            ));
        };

        Ok(self.entries.remove(position).0)
    }

    pub fn remove_by_id(&mut self, id: ListenerId) -> crate::errors::ContentResult<()> {
        let Some(position) = self.entries.iter().position(|(entry_id, _)| *entry_id == id)
        else {
            return Err(crate::errors::ContentError::InvalidArgument(
                "listener id is not registered",
            ));
        };

        self.entries.remove(position);

        Ok(())
    }

    #[inline]
    pub fn contains(&self, listener: &std::rc::Rc<dyn TextChangeListener>) -> bool {
        self.entries
            .iter()
            .any(|(_, registered)| same_listener(registered, listener))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &std::rc::Rc<dyn TextChangeListener>> + '_ {
        self.entries.iter().map(|(_, listener)| listener)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Silent;

    impl TextChangeListener for Silent {}

    fn silent() -> std::rc::Rc<dyn TextChangeListener> {
        std::rc::Rc::new(Silent)
    }

    #[test]
    fn test_add_rejects_duplicates() {
        let mut registry = ListenerRegistry::default();
        let listener = silent();

        let id = registry.add(listener.clone()).unwrap();

        assert_eq!(
            registry.add(listener.clone()),
            Err(crate::errors::ContentError::InvalidArgument(
                "listener is already registered"
            ))
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.remove(&listener), Ok(id));
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_distinct_instances_are_distinct_listeners() {
        let mut registry = ListenerRegistry::default();
        let first = silent();
        let second = silent();

        let first_id = registry.add(first.clone()).unwrap();
        let second_id = registry.add(second.clone()).unwrap();

        assert_ne!(first_id, second_id);
        assert!(registry.contains(&second));
        assert_eq!(registry.remove(&first), Ok(first_id));
        assert!(!registry.contains(&first));
        assert!(registry.contains(&second));
    }

    #[test]
    fn test_remove_unknown_listener() {
        let mut registry = ListenerRegistry::default();

        assert!(registry.remove(&silent()).is_err());
    }

    #[test]
    fn test_remove_by_id() {
        let mut registry = ListenerRegistry::default();
        let id = registry.add(silent()).unwrap();

        assert_eq!(registry.remove_by_id(id), Ok(()));
        assert!(registry.remove_by_id(id).is_err());
    }
}
