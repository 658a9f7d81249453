mod edges;
mod enums;
mod length;

pub use edges::Edges;
pub use enums::{Overflow, Position, Tag};
pub use length::{px, Length, LengthError};
