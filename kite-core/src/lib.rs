pub mod buffer;
pub mod chars;
pub mod coord;
pub mod cursor;
pub mod fatal;
pub mod rope;

pub use buffer::Buffer;
pub use coord::BufferCoord;
