//! The container decode pipeline: seek to each entry, sniff its signature,
//! dispatch to the matching embedded decoder, then reconcile everything onto
//! one canvas.

use crate::bmp::{self, BmpOptions};
use crate::cancel::CancelToken;
use crate::error::DecodeResult;
use crate::icondir::{DirEntry, IconDir};
use crate::image::{
    self, FrameInfo, FrameMetadata, IconImage, IconInfo, PngMetadata,
    SubImage,
};
use std::io::{Read, Seek, SeekFrom};

//===========================================================================//

// The signature that all PNG streams start with.  The per-entry sniff window
// is exactly this long.
const PNG_SIGNATURE: [u8; 8] =
    [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

//===========================================================================//

// The embedded decoder chosen for one classified entry, with its per-kind
// configuration.
enum EntryCodec {
    Bmp(BmpOptions),
    Png,
}

fn classify(window: &[u8; PNG_SIGNATURE.len()]) -> EntryCodec {
    if window == &PNG_SIGNATURE {
        EntryCodec::Png
    } else {
        EntryCodec::Bmp(BmpOptions::icon_embedding())
    }
}

// Seeks to an entry's data and peeks the signature window without consuming
// it.  Returns None when the stream ends at or before the window, which
// stops entry processing without failing the call; every entry handled so
// far stays in the result.
fn sniff_entry<R: Read + Seek>(
    reader: &mut R,
    base: u64,
    end: u64,
    entry: &DirEntry,
) -> DecodeResult<Option<EntryCodec>> {
    let start = base + entry.data_offset() as u64;
    if start >= end || end - start < PNG_SIGNATURE.len() as u64 {
        return Ok(None);
    }
    reader.seek(SeekFrom::Start(start))?;
    let mut window = [0u8; PNG_SIGNATURE.len()];
    reader.read_exact(&mut window)?;
    reader.seek(SeekFrom::Start(start))?;
    Ok(Some(classify(&window)))
}

//===========================================================================//

// Running componentwise max over decoded sub-image sizes; never shrinks.
struct Canvas {
    width: u32,
    height: u32,
}

impl Canvas {
    fn new() -> Canvas {
        Canvas { width: 0, height: 0 }
    }

    fn grow(&mut self, width: u32, height: u32) {
        self.width = self.width.max(width);
        self.height = self.height.max(height);
    }
}

//===========================================================================//

/// Decodes ICO/CUR containers into multi-frame images.
///
/// Entries are processed strictly in file order.  An entry whose data lies
/// beyond the end of the stream ends processing early with a partial result;
/// an entry whose data is present but malformed fails the whole call.
#[derive(Clone, Copy, Debug, Default)]
pub struct IcoDecoder;

impl IcoDecoder {
    /// Creates a decoder.
    pub fn new() -> IcoDecoder {
        IcoDecoder
    }

    /// Decodes every embedded image in the container into one multi-frame
    /// [`IconImage`].  `reader` may be positioned anywhere in the underlying
    /// medium; entry offsets are taken relative to its position at the time
    /// of this call.
    pub fn decode<R: Read + Seek>(
        &self,
        mut reader: R,
        cancel: &CancelToken,
    ) -> DecodeResult<IconImage> {
        let base = reader.stream_position()?;
        let dir = IconDir::read(&mut reader)?;
        let end = reader.seek(SeekFrom::End(0))?;

        // First pass: decode each sub-image, growing the canvas as sizes
        // come in.
        let mut canvas = Canvas::new();
        let mut container_png: Option<PngMetadata> = None;
        let mut decoded: Vec<(SubImage, FrameMetadata)> =
            Vec::with_capacity(dir.entries().len());
        for entry in dir.entries() {
            cancel.check()?;
            let codec = match sniff_entry(&mut reader, base, end, entry)? {
                Some(codec) => codec,
                None => break,
            };
            let (sub, meta) = match codec {
                EntryCodec::Bmp(options) => {
                    let (info, rgba) =
                        bmp::read_image(&mut reader, &options, cancel)?;
                    let sub = SubImage {
                        width: info.width,
                        height: info.height,
                        rgba,
                    };
                    let meta = FrameMetadata::for_bmp(
                        info.bits_per_pixel,
                        entry.cursor_hotspot(),
                    );
                    (sub, meta)
                }
                EntryCodec::Png => {
                    let limited =
                        (&mut reader).take(entry.data_size() as u64);
                    let (sub, png_meta) = image::read_png(limited, cancel)?;
                    let meta = FrameMetadata::for_png(
                        png_meta,
                        entry.cursor_hotspot(),
                    );
                    (sub, meta)
                }
            };
            canvas.grow(sub.width, sub.height);
            if container_png.is_none() {
                container_png = meta.png_metadata().copied();
            }
            decoded.push((sub, meta));
        }

        // Second pass: pad every sub-image out to the final canvas.  Each
        // sub-image buffer is dropped as soon as its rows are copied.
        let mut frames = Vec::with_capacity(decoded.len());
        for (sub, meta) in decoded {
            frames.push(image::compose(sub, canvas.width, canvas.height, meta));
        }
        Ok(IconImage::new(
            dir.resource_type(),
            canvas.width,
            canvas.height,
            frames,
            container_png,
        ))
    }

    /// Reads sizes and metadata for every embedded image without
    /// materializing any pixels.  Frame count and canvas size match what
    /// [`decode`](IcoDecoder::decode) would produce for the same input.
    pub fn identify<R: Read + Seek>(
        &self,
        mut reader: R,
        cancel: &CancelToken,
    ) -> DecodeResult<IconInfo> {
        let base = reader.stream_position()?;
        let dir = IconDir::read(&mut reader)?;
        let end = reader.seek(SeekFrom::End(0))?;

        let mut canvas = Canvas::new();
        let mut container_png: Option<PngMetadata> = None;
        let mut frames = Vec::with_capacity(dir.entries().len());
        for entry in dir.entries() {
            cancel.check()?;
            let codec = match sniff_entry(&mut reader, base, end, entry)? {
                Some(codec) => codec,
                None => break,
            };
            let (width, height, meta) = match codec {
                EntryCodec::Bmp(options) => {
                    let info = bmp::read_info(&mut reader, &options)?;
                    let meta = FrameMetadata::for_bmp(
                        info.bits_per_pixel,
                        entry.cursor_hotspot(),
                    );
                    (info.width, info.height, meta)
                }
                EntryCodec::Png => {
                    let limited =
                        (&mut reader).take(entry.data_size() as u64);
                    let png_reader = image::read_png_info(limited)?;
                    let info = png_reader.info();
                    let meta = FrameMetadata::for_png(
                        image::png_metadata(info),
                        entry.cursor_hotspot(),
                    );
                    (info.width, info.height, meta)
                }
            };
            canvas.grow(width, height);
            if container_png.is_none() {
                container_png = meta.png_metadata().copied();
            }
            frames.push(FrameInfo::new(width, height, meta));
        }
        Ok(IconInfo::new(
            dir.resource_type(),
            canvas.width,
            canvas.height,
            frames,
            container_png,
        ))
    }
}

//===========================================================================//


//===========================================================================//
