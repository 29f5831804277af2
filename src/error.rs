use std::io;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OverlayError {
    #[error("invalid screen bounds {width}x{height}: both dimensions must be positive")]
    InvalidBounds { width: i32, height: i32 },
    #[error("invalid widget size {width}x{height}: both dimensions must be positive")]
    InvalidWidgetSize { width: i32, height: i32 },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type OverlayResult<T> = Result<T, OverlayError>;

impl From<OverlayError> for io::Error {
    fn from(err: OverlayError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, err)
    }
}
