//! Errors specific to composing resources or writing an object file.

use std::io::Error as IOError;
use std::string::String;

/// Error that can occur when reading and parsing bytes.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ReadError(pub String);

/// Errors that can occur when adding a resource to a resource set.
#[derive(Debug, thiserror::Error, Clone, Copy, Eq, PartialEq)]
pub enum ResourceError {
    #[error("ordinal identifier must not be zero")]
    ZeroId,
    #[error("string identifier must not be empty")]
    EmptyName,
    #[error("string identifier must not contain NUL char")]
    NameContainsNul,
}

/// Errors that can occur when writing a COFF object file.
#[derive(Debug, thiserror::Error)]
pub enum ObjectWriteError {
    #[error("unknown architecture")]
    UnknownArch,
    #[error("io error: {0}")]
    IOError(IOError),
}
impl From<IOError> for ObjectWriteError {
    fn from(error: IOError) -> Self { ObjectWriteError::IOError(error) }
}

/// Errors that can occur when loading an icon or cursor container.
#[derive(Debug, thiserror::Error)]
pub enum ImageLoadError {
    #[error("not a valid ICO file")]
    NotIco,
    #[error("not a valid CUR file")]
    NotCur,
    #[error("image size found in ICONDIRENTRY is too big (above 10 MB)")]
    ImageLengthTooBig,
    #[error("invalid bytes: {0}")]
    InvalidBytes(ReadError),
    #[error("io error: {0}")]
    IOError(IOError),
}
impl From<ReadError> for ImageLoadError {
    fn from(error: ReadError) -> Self { ImageLoadError::InvalidBytes(error) }
}
impl From<IOError> for ImageLoadError {
    fn from(error: IOError) -> Self { ImageLoadError::IOError(error) }
}

/// Errors that can occur when filling in version information strings.
#[derive(Debug, thiserror::Error, Clone, Copy, Eq, PartialEq)]
pub enum VersionError {
    #[error("empty key")]
    EmptyKey,
    #[error("invalid key contains NUL character")]
    KeyContainsNul,
    #[error("invalid value contains NUL character")]
    ValueContainsNul,
}
