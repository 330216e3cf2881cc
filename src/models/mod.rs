pub mod annotation;
pub mod lineage;
pub mod segment;
pub mod token;

pub use annotation::*;
pub use lineage::*;
pub use segment::*;
pub use token::*;
