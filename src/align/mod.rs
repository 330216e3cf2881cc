pub mod builder;
pub mod differ;
pub mod interpolate;
pub mod remap;

pub use builder::*;
pub use differ::*;
pub use interpolate::*;
pub use remap::*;
