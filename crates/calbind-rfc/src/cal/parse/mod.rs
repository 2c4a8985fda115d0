//! Wire text to component tree.

mod error;
pub mod lexer;
mod parser;

pub use error::{StructuralError, StructuralErrorKind};
pub use parser::{ParseOutcome, parse};
