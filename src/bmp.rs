//! The embedded raw-bitmap decoder.
//!
//! Icon containers store bitmaps as a bare `BITMAPINFOHEADER` (no
//! `BITMAPFILEHEADER`), with the height field doubled to cover both the XOR
//! color rows and the trailing 1-bit AND opacity mask.  [`BmpOptions`]
//! captures those quirks so the same reader also handles standalone `.bmp`
//! streams.

use crate::cancel::CancelToken;
use crate::error::DecodeResult;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Read;

//===========================================================================//

// The size of a BITMAPINFOHEADER struct, in bytes.
const INFO_HEADER_LEN: u32 = 40;

// The "BM" magic at the start of a standalone BMP file.
const FILE_MAGIC: u16 = 0x4d42;

// Size limits for embedded bitmaps:
const MIN_WIDTH: u32 = 1;
const MIN_HEIGHT: u32 = 1;

//===========================================================================//

/// Configuration for decoding one embedded bitmap stream.
#[derive(Clone, Copy, Debug)]
pub struct BmpOptions {
    /// If true, the stream has no standalone `BITMAPFILEHEADER` and parsing
    /// starts directly at the info header.  Icon containers embed bitmaps
    /// this way.
    pub skip_file_header: bool,
    /// If true, the stored height field counts both the color rows and the
    /// mask rows, and the true image height is half of it.
    pub double_height: bool,
    /// If true, the trailing 1-bit AND mask is folded into the alpha
    /// channel of the decoded pixels (skipped at 32 bpp, where alpha is
    /// already explicit).
    pub synthesize_alpha_mask: bool,
}

impl BmpOptions {
    /// The configuration for bitmaps embedded in ICO/CUR containers.
    pub fn icon_embedding() -> BmpOptions {
        BmpOptions {
            skip_file_header: true,
            double_height: true,
            synthesize_alpha_mask: true,
        }
    }

    /// The configuration for standalone `.bmp` streams.
    pub fn standalone() -> BmpOptions {
        BmpOptions {
            skip_file_header: false,
            double_height: false,
            synthesize_alpha_mask: false,
        }
    }
}

//===========================================================================//

/// Size and color depth reported by a bitmap header.
#[derive(Clone, Copy, Debug)]
pub struct BmpInfo {
    /// Width of the image, in pixels.
    pub width: u32,
    /// True height of the image, in pixels.  If the stream uses doubled
    /// height storage, this is already halved.
    pub height: u32,
    /// Color depth of the stored pixel data.
    pub bits_per_pixel: u16,
}

//===========================================================================//

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum BmpDepth {
    One,
    Four,
    Eight,
    Sixteen,
    TwentyFour,
    ThirtyTwo,
}

impl BmpDepth {
    fn from_bits_per_pixel(bits_per_pixel: u16) -> Option<BmpDepth> {
        match bits_per_pixel {
            1 => Some(BmpDepth::One),
            4 => Some(BmpDepth::Four),
            8 => Some(BmpDepth::Eight),
            16 => Some(BmpDepth::Sixteen),
            24 => Some(BmpDepth::TwentyFour),
            32 => Some(BmpDepth::ThirtyTwo),
            _ => None,
        }
    }

    fn bits_per_pixel(&self) -> u16 {
        match *self {
            BmpDepth::One => 1,
            BmpDepth::Four => 4,
            BmpDepth::Eight => 8,
            BmpDepth::Sixteen => 16,
            BmpDepth::TwentyFour => 24,
            BmpDepth::ThirtyTwo => 32,
        }
    }

    fn num_colors(&self) -> usize {
        match *self {
            BmpDepth::One => 2,
            BmpDepth::Four => 16,
            BmpDepth::Eight => 256,
            _ => 0,
        }
    }
}

//===========================================================================//

fn read_file_header<R: Read>(reader: &mut R) -> DecodeResult<()> {
    let magic = reader.read_u16::<LittleEndian>()?;
    if magic != FILE_MAGIC {
        unsupported!(
            "Invalid BMP file magic (was {:#06x}, but must be {:#06x})",
            magic,
            FILE_MAGIC
        );
    }
    let _file_size = reader.read_u32::<LittleEndian>()?;
    let _reserved = reader.read_u32::<LittleEndian>()?;
    let _pixel_data_offset = reader.read_u32::<LittleEndian>()?;
    Ok(())
}

/// Reads just enough of a bitmap stream to report its size and color depth,
/// leaving `reader` positioned right after the bits-per-pixel field.
///
/// The reported height obeys `options.double_height`, so a size probe and a
/// full decode of the same stream always agree.
pub fn read_info<R: Read>(
    reader: &mut R,
    options: &BmpOptions,
) -> DecodeResult<BmpInfo> {
    if !options.skip_file_header {
        read_file_header(reader)?;
    }
    let header_size = reader.read_u32::<LittleEndian>()?;
    if header_size != INFO_HEADER_LEN {
        unsupported!(
            "Invalid BMP header size (was {}, but must be {})",
            header_size,
            INFO_HEADER_LEN
        );
    }
    let width = reader.read_i32::<LittleEndian>()?;
    if width < (MIN_WIDTH as i32) {
        unsupported!(
            "Invalid BMP width (was {}, but must be at least {})",
            width,
            MIN_WIDTH
        );
    }
    let width = width as u32;
    let mut height = reader.read_i32::<LittleEndian>()?;
    if options.double_height {
        // The stored height covers the color rows plus the mask rows.
        if height % 2 != 0 {
            unsupported!(
                "Invalid height field in BMP header \
                 (was {}, but must be divisible by 2)",
                height
            );
        }
        height /= 2;
    }
    if height < (MIN_HEIGHT as i32) {
        unsupported!(
            "Invalid BMP height (was {}, but must be at least {})",
            height,
            MIN_HEIGHT
        );
    }
    let height = height as u32;
    let _planes = reader.read_u16::<LittleEndian>()?;
    let bits_per_pixel = reader.read_u16::<LittleEndian>()?;
    Ok(BmpInfo { width, height, bits_per_pixel })
}

/// Decodes a bitmap stream into RGBA pixel data in row-major order from top
/// to bottom.
pub fn read_image<R: Read>(
    mut reader: R,
    options: &BmpOptions,
    cancel: &CancelToken,
) -> DecodeResult<(BmpInfo, Vec<u8>)> {
    let info = read_info(&mut reader, options)?;
    let _compression = reader.read_u32::<LittleEndian>()?;
    let _image_size = reader.read_u32::<LittleEndian>()?;
    let _horz_ppm = reader.read_i32::<LittleEndian>()?;
    let _vert_ppm = reader.read_i32::<LittleEndian>()?;
    let _colors_used = reader.read_u32::<LittleEndian>()?;
    let _colors_important = reader.read_u32::<LittleEndian>()?;

    let depth = match BmpDepth::from_bits_per_pixel(info.bits_per_pixel) {
        Some(depth) => depth,
        None => {
            unsupported!(
                "Unsupported BMP bits-per-pixel ({})",
                info.bits_per_pixel
            );
        }
    };

    // The color table size is fixed by the depth; the colors-used field is
    // ignored, matching how icon bitmaps are written in practice.
    let num_colors = depth.num_colors();
    let mut color_table = Vec::<(u8, u8, u8)>::with_capacity(num_colors);
    for _ in 0..num_colors {
        let blue = reader.read_u8()?;
        let green = reader.read_u8()?;
        let red = reader.read_u8()?;
        let _reserved = reader.read_u8()?;
        color_table.push((red, green, blue));
    }

    cancel.check()?;
    let num_pixels = match info.width.checked_mul(info.height) {
        Some(num) => num as usize,
        None => unsupported!("Width * Height is too large"),
    };
    let mut rgba = vec![u8::MAX; num_pixels * 4];

    // Color rows are stored bottom-up, each padded to a multiple of four
    // bytes.
    let row_data_size = (info.width * (info.bits_per_pixel as u32) + 7) / 8;
    let row_padding_size = ((row_data_size + 3) / 4) * 4 - row_data_size;
    let mut row_padding = vec![0u8; row_padding_size as usize];
    for row in 0..info.height {
        let mut start = (4 * (info.height - row - 1) * info.width) as usize;
        match depth {
            BmpDepth::One | BmpDepth::Four => {
                let bits = depth.bits_per_pixel() as u8;
                let mask = (1u8 << bits) - 1;
                let per_byte = (8 / bits) as u32;
                let mut col = 0;
                'packed: for _ in 0..row_data_size {
                    let byte = reader.read_u8()?;
                    for chunk in 0..per_byte {
                        let shift = 8 - bits * (chunk as u8 + 1);
                        let index = ((byte >> shift) & mask) as usize;
                        let (red, green, blue) = color_table[index];
                        rgba[start] = red;
                        rgba[start + 1] = green;
                        rgba[start + 2] = blue;
                        col += 1;
                        if col == info.width {
                            break 'packed;
                        }
                        start += 4;
                    }
                }
            }
            BmpDepth::Eight => {
                for _ in 0..info.width {
                    let index = reader.read_u8()? as usize;
                    let (red, green, blue) = color_table[index];
                    rgba[start] = red;
                    rgba[start + 1] = green;
                    rgba[start + 2] = blue;
                    start += 4;
                }
            }
            BmpDepth::Sixteen => {
                for _ in 0..info.width {
                    let color = reader.read_u16::<LittleEndian>()?;
                    let red = (color >> 10) & 0x1f;
                    let green = (color >> 5) & 0x1f;
                    let blue = color & 0x1f;
                    rgba[start] = ((red * 255 + 15) / 31) as u8;
                    rgba[start + 1] = ((green * 255 + 15) / 31) as u8;
                    rgba[start + 2] = ((blue * 255 + 15) / 31) as u8;
                    start += 4;
                }
            }
            BmpDepth::TwentyFour => {
                for _ in 0..info.width {
                    let blue = reader.read_u8()?;
                    let green = reader.read_u8()?;
                    let red = reader.read_u8()?;
                    rgba[start] = red;
                    rgba[start + 1] = green;
                    rgba[start + 2] = blue;
                    start += 4;
                }
            }
            BmpDepth::ThirtyTwo => {
                for _ in 0..info.width {
                    let blue = reader.read_u8()?;
                    let green = reader.read_u8()?;
                    let red = reader.read_u8()?;
                    let alpha = reader.read_u8()?;
                    rgba[start] = red;
                    rgba[start + 1] = green;
                    rgba[start + 2] = blue;
                    rgba[start + 3] = alpha;
                    start += 4;
                }
            }
        }
        reader.read_exact(&mut row_padding)?;
    }

    // The AND mask (1 bit per pixel) follows the color rows, again stored
    // bottom-up with four-byte row padding.  At 32 bpp the alpha channel is
    // authoritative and the mask is ignored.
    if options.synthesize_alpha_mask && depth != BmpDepth::ThirtyTwo {
        let row_mask_size = (info.width + 7) / 8;
        let row_padding_size = ((row_mask_size + 3) / 4) * 4 - row_mask_size;
        let mut row_padding = vec![0u8; row_padding_size as usize];
        for row in 0..info.height {
            let mut start =
                (4 * (info.height - row - 1) * info.width) as usize;
            let mut col = 0;
            'mask: for _ in 0..row_mask_size {
                let byte = reader.read_u8()?;
                for bit in 0..8 {
                    if ((byte >> (7 - bit)) & 0x1) == 1 {
                        rgba[start + 3] = 0;
                    }
                    col += 1;
                    if col == info.width {
                        break 'mask;
                    }
                    start += 4;
                }
            }
            reader.read_exact(&mut row_padding)?;
        }
    }

    Ok((info, rgba))
}

//===========================================================================//


//===========================================================================//
