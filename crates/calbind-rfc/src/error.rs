use calbind_core::error::CoreError;
use thiserror::Error;

use crate::cal::parse::StructuralError;

/// Umbrella over the codec's fallible entry points.
#[derive(Error, Debug)]
pub enum RfcError {
    #[error(transparent)]
    Structural(#[from] StructuralError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
