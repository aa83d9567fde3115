/// # Piece Table Module.
///
/// Stores the buffer's characters as a sequence of pieces over two
/// buffers: the text handed to the last `set_text` and an append-only
/// buffer holding every inserted character since.
pub mod piece;
pub mod table;

/// Capacity the add buffer is returned to whenever the text is reset.
pub const BASELINE_CAPACITY: usize = 1024;
