pub mod cursor;
pub mod render;

pub use cursor::*;
pub use render::*;
