use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("component not found: {0}")]
    ComponentNotFound(u8),
    #[error("invalid argument:{0}")]
    InvalidArgument(String),
    #[error("allocation failed")]
    AllocationFailed(#[from] TryReserveError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
