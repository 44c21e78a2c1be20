// Domain errors
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FleetError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
