pub mod normalizer;
pub mod numbers;
pub mod tokenizer;

pub use normalizer::*;
pub use tokenizer::*;
