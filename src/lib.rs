//! A library for decoding ICO and CUR icon files into multi-frame images.
//!
//! An icon container bundles several variants of one image, each entry
//! independently encoded either as a headerless BMP or as a complete PNG
//! stream.  [`IcoDecoder`] losslessly extracts all of them into a single
//! [`IconImage`] whose frames share one canvas size (the max over every
//! decoded entry), or probes sizes and metadata only via
//! [`IcoDecoder::identify`].
//!
//! A container truncated after its directory yields a shortened-but-valid
//! image rather than an error; see [`DecodeError`] for which conditions are
//! fatal.

#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod bmp;

mod cancel;
mod decoder;
mod error;
mod icondir;
mod image;
mod restype;

pub use crate::bmp::{BmpInfo, BmpOptions};
pub use crate::cancel::CancelToken;
pub use crate::decoder::IcoDecoder;
pub use crate::error::{DecodeError, DecodeResult};
pub use crate::icondir::{DirEntry, IconDir};
pub use crate::image::{
    FrameInfo, FrameKind, FrameMetadata, IconFrame, IconImage, IconInfo,
    PngColorType, PngMetadata,
};
pub use crate::restype::ResourceType;

use std::io::Cursor;

//===========================================================================//

/// Decodes an ICO/CUR container held entirely in memory.
pub fn decode_from_memory(bytes: &[u8]) -> DecodeResult<IconImage> {
    IcoDecoder::new().decode(Cursor::new(bytes), &CancelToken::new())
}

/// Reads sizes and metadata from an in-memory ICO/CUR container without
/// materializing any pixels.
pub fn identify_from_memory(bytes: &[u8]) -> DecodeResult<IconInfo> {
    IcoDecoder::new().identify(Cursor::new(bytes), &CancelToken::new())
}

//===========================================================================//
