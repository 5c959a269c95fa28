pub mod macros;
pub mod parsing;

pub use parsing::*;
