//! Error handling for the faxt CLI.

use thiserror::Error;

/// Top-level error for the `faxt` binary. [`Driver`](FaxtError::Driver)
/// wraps whatever `faxc-drv` rejected; everything else is CLI-surface
/// concerns the pipeline itself never raises.
#[derive(Error, Debug)]
pub enum FaxtError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Driver(#[from] faxc_drv::DriverError),
}

pub type Result<T> = std::result::Result<T, FaxtError>;
