//! Component tree to wire text.

pub mod escape;
pub mod fold;
mod serializer;

pub use serializer::{encode_value, serialize};
