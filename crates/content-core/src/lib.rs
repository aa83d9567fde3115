//! A mutable, line-indexed text buffer.
//!
//! Lines end at `\r`, `\n` or `\r\n`, mixed freely within one text. The
//! buffer keeps an offset to line index current across range replacements
//! and tells listeners how many lines each edit removes and adds.
pub mod channel;
pub mod config;
pub mod content;
pub mod delimiter;
pub mod enums;
pub mod errors;
pub mod line_index;
pub mod listener;
pub mod piece_table;

pub use channel::{ChannelListener, ContentNotification, TextChange};
pub use config::ContentConfig;
pub use content::TextContent;
pub use enums::LineDelimiter;
pub use errors::{ContentError, ContentResult};
pub use listener::{ListenerId, TextChangeEvent, TextChangeListener};
