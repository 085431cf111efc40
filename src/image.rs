use crate::cancel::CancelToken;
use crate::error::DecodeResult;
use crate::restype::ResourceType;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::io::Read;

//===========================================================================//

// Size limits for embedded PNG streams:
const MIN_WIDTH: u32 = 1;
const MIN_HEIGHT: u32 = 1;

//===========================================================================//

/// The compression kind detected for one embedded image.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum FrameKind {
    /// A raw device bitmap (headerless BMP embedding).
    Bmp,
    /// A complete PNG stream.
    Png,
}

//===========================================================================//

/// The color layout of an embedded PNG stream.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum PngColorType {
    /// One luminance sample per pixel.
    Grayscale,
    /// Red, green and blue samples per pixel.
    Rgb,
    /// One palette index per pixel.
    Indexed,
    /// Luminance and alpha samples per pixel.
    GrayscaleAlpha,
    /// Red, green, blue and alpha samples per pixel.
    Rgba,
}

impl PngColorType {
    fn samples(&self) -> u16 {
        match *self {
            PngColorType::Grayscale => 1,
            PngColorType::Rgb => 3,
            PngColorType::Indexed => 1,
            PngColorType::GrayscaleAlpha => 2,
            PngColorType::Rgba => 4,
        }
    }
}

/// Metadata copied from an embedded PNG stream's header.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct PngMetadata {
    /// The stream's color layout.
    pub color_type: PngColorType,
    /// Bits per sample (not per pixel).
    pub bit_depth: u8,
}

//===========================================================================//

/// Metadata for a single frame of a decoded icon.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct FrameMetadata {
    kind: FrameKind,
    bits_per_pixel: u16,
    hotspot: Option<(u16, u16)>,
    png: Option<PngMetadata>,
}

impl FrameMetadata {
    pub(crate) fn for_bmp(
        bits_per_pixel: u16,
        hotspot: Option<(u16, u16)>,
    ) -> FrameMetadata {
        FrameMetadata { kind: FrameKind::Bmp, bits_per_pixel, hotspot, png: None }
    }

    pub(crate) fn for_png(
        png: PngMetadata,
        hotspot: Option<(u16, u16)>,
    ) -> FrameMetadata {
        let bits_per_pixel = png.color_type.samples() * (png.bit_depth as u16);
        FrameMetadata {
            kind: FrameKind::Png,
            bits_per_pixel,
            hotspot,
            png: Some(png),
        }
    }

    /// Returns how this frame's data was compressed in the container.
    pub fn kind(&self) -> FrameKind {
        self.kind
    }

    /// Returns the color depth reported by the embedded decoder: the bitmap
    /// header's bits-per-pixel for BMP frames, or samples × bit depth for
    /// PNG frames.
    pub fn bits_per_pixel(&self) -> u16 {
        self.bits_per_pixel
    }

    /// Returns the coordinates of the cursor hotspot (pixels right from the
    /// left edge of the image, and pixels down from the top edge), or `None`
    /// for icon containers.
    pub fn cursor_hotspot(&self) -> Option<(u16, u16)> {
        self.hotspot
    }

    /// Returns the PNG header metadata for PNG frames, or `None` for BMP
    /// frames.
    pub fn png_metadata(&self) -> Option<&PngMetadata> {
        self.png.as_ref()
    }
}

//===========================================================================//

/// One frame of a decoded icon, sized to the shared canvas.
#[derive(Clone)]
pub struct IconFrame {
    width: u32,
    height: u32,
    rgba_data: Vec<u8>,
    meta: FrameMetadata,
}

impl IconFrame {
    /// Returns the width of the frame in pixels; every frame of an image
    /// spans the full canvas.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the frame in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the RGBA data for this frame, in row-major order from top to
    /// bottom.  The decoded sub-image sits at the top-left origin; any
    /// canvas area beyond it is fully transparent.
    pub fn rgba_data(&self) -> &[u8] {
        &self.rgba_data
    }

    /// Consumes the frame and returns its RGBA data.
    pub fn into_rgba_data(self) -> Vec<u8> {
        self.rgba_data
    }

    /// Returns this frame's metadata.
    pub fn metadata(&self) -> &FrameMetadata {
        &self.meta
    }
}

//===========================================================================//

/// A decoded multi-frame icon image.
///
/// Frames appear in container file order with no gaps; a truncated container
/// just has fewer frames.  Every frame is padded to the same canvas size,
/// the componentwise max over all decoded sub-image sizes.
pub struct IconImage {
    restype: ResourceType,
    width: u32,
    height: u32,
    frames: Vec<IconFrame>,
    png: Option<PngMetadata>,
}

impl IconImage {
    pub(crate) fn new(
        restype: ResourceType,
        width: u32,
        height: u32,
        frames: Vec<IconFrame>,
        png: Option<PngMetadata>,
    ) -> IconImage {
        IconImage { restype, width, height, frames, png }
    }

    /// Returns the type of resource this image was decoded from, either
    /// icons or cursors.
    pub fn resource_type(&self) -> ResourceType {
        self.restype
    }

    /// Returns the canvas width shared by all frames, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the canvas height shared by all frames, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the decoded frames, in container file order.
    pub fn frames(&self) -> &[IconFrame] {
        &self.frames
    }

    /// Returns the container-level PNG metadata: the header metadata of the
    /// first PNG-compressed frame in file order, or `None` if every frame is
    /// a bitmap.
    pub fn png_metadata(&self) -> Option<&PngMetadata> {
        self.png.as_ref()
    }
}

//===========================================================================//

/// Size and metadata for one frame, as reported by the identify path.
#[derive(Clone, Copy, Debug)]
pub struct FrameInfo {
    width: u32,
    height: u32,
    meta: FrameMetadata,
}

impl FrameInfo {
    pub(crate) fn new(width: u32, height: u32, meta: FrameMetadata) -> FrameInfo {
        FrameInfo { width, height, meta }
    }

    /// Returns the decoded width this frame's sub-image would have, in
    /// pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the decoded height this frame's sub-image would have, in
    /// pixels (already halved for doubled-height bitmap storage).
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns this frame's metadata.
    pub fn metadata(&self) -> &FrameMetadata {
        &self.meta
    }
}

/// Sizes and metadata for a container, gathered without materializing any
/// pixels.
///
/// For any given input, the canvas size and frame count here match exactly
/// what [`IcoDecoder::decode`](crate::IcoDecoder::decode) would produce.
pub struct IconInfo {
    restype: ResourceType,
    width: u32,
    height: u32,
    frames: Vec<FrameInfo>,
    png: Option<PngMetadata>,
}

impl IconInfo {
    pub(crate) fn new(
        restype: ResourceType,
        width: u32,
        height: u32,
        frames: Vec<FrameInfo>,
        png: Option<PngMetadata>,
    ) -> IconInfo {
        IconInfo { restype, width, height, frames, png }
    }

    /// Returns the type of resource stored in the container.
    pub fn resource_type(&self) -> ResourceType {
        self.restype
    }

    /// Returns the canvas width a decode of the same input would use.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the canvas height a decode of the same input would use.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns per-frame sizes and metadata, in container file order.
    pub fn frames(&self) -> &[FrameInfo] {
        &self.frames
    }

    /// Returns the container-level PNG metadata, if any frame is
    /// PNG-compressed.
    pub fn png_metadata(&self) -> Option<&PngMetadata> {
        self.png.as_ref()
    }
}

//===========================================================================//

// One decoded sub-image, owned exclusively until it is copied into a
// canvas-sized frame.
pub(crate) struct SubImage {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) rgba: Vec<u8>,
}

/// Copies a sub-image into a fresh zeroed frame buffer spanning the canvas,
/// row by row (strides differ), with the sub-image at the top-left origin.
/// The sub-image buffer is consumed and dropped as soon as the copy is done.
pub(crate) fn compose(
    sub: SubImage,
    canvas_width: u32,
    canvas_height: u32,
    meta: FrameMetadata,
) -> IconFrame {
    debug_assert!(sub.width <= canvas_width);
    debug_assert!(sub.height <= canvas_height);
    let mut rgba_data =
        vec![0u8; (canvas_width as usize) * (canvas_height as usize) * 4];
    let src_stride = (sub.width as usize) * 4;
    let dst_stride = (canvas_width as usize) * 4;
    for row in 0..(sub.height as usize) {
        let src = row * src_stride;
        let dst = row * dst_stride;
        rgba_data[dst..dst + src_stride]
            .copy_from_slice(&sub.rgba[src..src + src_stride]);
    }
    IconFrame { width: canvas_width, height: canvas_height, rgba_data, meta }
}

//===========================================================================//

pub(crate) fn read_png_info<R: Read>(reader: R) -> DecodeResult<png::Reader<R>> {
    let decoder = png::Decoder::new(reader);
    let png_reader = match decoder.read_info() {
        Ok(png_reader) => png_reader,
        Err(error) => unsupported!("Malformed PNG data: {}", error),
    };
    validate_png_info(png_reader.info())?;
    Ok(png_reader)
}

fn validate_png_info(info: &png::Info) -> DecodeResult<()> {
    if info.width < MIN_WIDTH {
        unsupported!(
            "Invalid PNG width (was {}, but must be at least {})",
            info.width,
            MIN_WIDTH
        );
    }
    if info.height < MIN_HEIGHT {
        unsupported!(
            "Invalid PNG height (was {}, but must be at least {})",
            info.height,
            MIN_HEIGHT
        );
    }
    if info.bit_depth != png::BitDepth::Eight {
        unsupported!("Unsupported PNG bit depth: {:?}", info.bit_depth);
    }
    Ok(())
}

pub(crate) fn png_metadata(info: &png::Info) -> PngMetadata {
    let color_type = match info.color_type {
        png::ColorType::Grayscale => PngColorType::Grayscale,
        png::ColorType::Rgb => PngColorType::Rgb,
        png::ColorType::Indexed => PngColorType::Indexed,
        png::ColorType::GrayscaleAlpha => PngColorType::GrayscaleAlpha,
        png::ColorType::Rgba => PngColorType::Rgba,
    };
    let bit_depth = match info.bit_depth {
        png::BitDepth::One => 1,
        png::BitDepth::Two => 2,
        png::BitDepth::Four => 4,
        png::BitDepth::Eight => 8,
        png::BitDepth::Sixteen => 16,
    };
    PngMetadata { color_type, bit_depth }
}

/// Decodes a PNG stream into an RGBA sub-image plus its header metadata.
pub(crate) fn read_png<R: Read>(
    reader: R,
    cancel: &CancelToken,
) -> DecodeResult<(SubImage, PngMetadata)> {
    let mut png_reader = read_png_info(reader)?;
    let meta = png_metadata(png_reader.info());
    cancel.check()?;
    let mut buffer = vec![0u8; png_reader.output_buffer_size()];
    match png_reader.next_frame(&mut buffer) {
        Ok(_) => {}
        Err(error) => unsupported!("Malformed PNG data: {}", error),
    }
    let rgba = match png_reader.info().color_type {
        png::ColorType::Rgba => buffer,
        png::ColorType::Rgb => {
            let num_pixels = buffer.len() / 3;
            let mut rgba = Vec::with_capacity(num_pixels * 4);
            for i in 0..num_pixels {
                rgba.extend_from_slice(&buffer[(3 * i)..][..3]);
                rgba.push(u8::MAX);
            }
            rgba
        }
        png::ColorType::GrayscaleAlpha => {
            let num_pixels = buffer.len() / 2;
            let mut rgba = Vec::with_capacity(num_pixels * 4);
            for i in 0..num_pixels {
                let gray = buffer[2 * i];
                let alpha = buffer[2 * i + 1];
                rgba.push(gray);
                rgba.push(gray);
                rgba.push(gray);
                rgba.push(alpha);
            }
            rgba
        }
        png::ColorType::Grayscale => {
            let mut rgba = Vec::with_capacity(buffer.len() * 4);
            for value in buffer.into_iter() {
                rgba.push(value);
                rgba.push(value);
                rgba.push(value);
                rgba.push(u8::MAX);
            }
            rgba
        }
        png::ColorType::Indexed => {
            unsupported!(
                "Unsupported PNG color type: {:?}",
                png_reader.info().color_type
            );
        }
    };
    let sub = SubImage {
        width: png_reader.info().width,
        height: png_reader.info().height,
        rgba,
    };
    Ok((sub, meta))
}

//===========================================================================//


//===========================================================================//
