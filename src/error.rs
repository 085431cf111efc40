use std::io;
use thiserror::Error;

//===========================================================================//

/// The result type used throughout this crate.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// An error produced while decoding an ICO/CUR container.
///
/// Note that truncation *after* the directory records is not an error at all:
/// entry processing simply stops there and every image decoded so far is
/// returned as a valid partial result.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// There were not enough bytes for the fixed-size directory header or for
    /// one of its entry records.  The whole call fails with no partial
    /// result.
    #[error("truncated icon directory")]
    TruncatedHeader,
    /// The directory records are structurally invalid (a nonzero reserved
    /// field or an unknown resource type).
    #[error("invalid icon directory: {0}")]
    InvalidDirectory(String),
    /// An embedded BMP or PNG stream could not be parsed.  The whole call
    /// fails; this is never downgraded to a partial result.
    #[error("unsupported embedded image: {0}")]
    Unsupported(String),
    /// The caller's [`CancelToken`](crate::CancelToken) was triggered.  No
    /// partial image is produced.
    #[error("decoding was cancelled")]
    Cancelled,
    /// Any other I/O failure from the underlying stream.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Maps a short read during directory parsing to `TruncatedHeader`.
pub(crate) fn header_read_error(error: io::Error) -> DecodeError {
    if error.kind() == io::ErrorKind::UnexpectedEof {
        DecodeError::TruncatedHeader
    } else {
        DecodeError::Io(error)
    }
}

//===========================================================================//
