use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackError {
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("no free region fits the requested rectangle")]
    OutOfSpace,
}

pub type Result<T> = std::result::Result<T, PackError>;
