//! Text buffer editing.

mod buffer;

pub use buffer::{Cursor, Direction, EditorBuffer};
