#![allow(dead_code)]

//===========================================================================//

/// One entry to place in a hand-assembled container.
pub struct Entry {
    pub width: u8,
    pub height: u8,
    pub num_colors: u8,
    pub planes_or_x: u16,
    pub bpp_or_y: u16,
    pub data: Vec<u8>,
}

impl Entry {
    pub fn new(width: u8, height: u8, data: Vec<u8>) -> Entry {
        Entry {
            width,
            height,
            num_colors: 0,
            planes_or_x: 1,
            bpp_or_y: 0,
            data,
        }
    }
}

/// Assembles an ICO/CUR byte stream: 6-byte header, 16-byte entry records
/// with offsets laid out back to back, then the data blobs in entry order.
pub fn build_container(restype: u16, entries: &[Entry]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&restype.to_le_bytes());
    out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    let mut offset = 6 + 16 * entries.len() as u32;
    for entry in entries.iter() {
        out.push(entry.width);
        out.push(entry.height);
        out.push(entry.num_colors);
        out.push(0); // reserved
        out.extend_from_slice(&entry.planes_or_x.to_le_bytes());
        out.extend_from_slice(&entry.bpp_or_y.to_le_bytes());
        out.extend_from_slice(&(entry.data.len() as u32).to_le_bytes());
        out.extend_from_slice(&offset.to_le_bytes());
        offset += entry.data.len() as u32;
    }
    for entry in entries.iter() {
        out.extend_from_slice(&entry.data);
    }
    out
}

/// Returns the offset of entry `index`'s data blob within a container built
/// by [`build_container`].
pub fn data_offset(entries: &[Entry], index: usize) -> usize {
    let mut offset = 6 + 16 * entries.len();
    for entry in entries[..index].iter() {
        offset += entry.data.len();
    }
    offset
}

//===========================================================================//

/// A 2x2 1-bpp icon bitmap (doubled height, two-color table, one corner
/// punched transparent by the AND mask).
pub const BMP_2X2_1BPP: &[u8] = b"\
    \x28\x00\x00\x00\x02\x00\x00\x00\x04\x00\x00\x00\
    \x01\x00\x01\x00\x00\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00\x00\
    \x55\x00\x55\x00\xff\xff\xff\x00\
    \xc0\x00\x00\x00\
    \x40\x00\x00\x00\
    \x40\x00\x00\x00\
    \x00\x00\x00\x00";

/// RGBA pixels of [`BMP_2X2_1BPP`] after decoding.
pub const BMP_2X2_RGBA: &[u8] = b"\
    \x55\x00\x55\xff\xff\xff\xff\xff\
    \xff\xff\xff\xff\xff\xff\xff\x00";

/// A 5x3 4-bpp icon bitmap.
pub const BMP_5X3_4BPP: &[u8] = b"\
    \x28\x00\x00\x00\x05\x00\x00\x00\x06\x00\x00\x00\
    \x01\x00\x04\x00\x00\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00\x00\x00\
    \x00\x00\x00\x00\x00\x00\x00\x00\
    \x00\x00\x7f\x00\x00\x00\xff\x00\
    \x00\x7f\x00\x00\x00\xff\x00\x00\
    \x00\x7f\x7f\x00\x00\xff\xff\x00\
    \x7f\x00\x00\x00\xff\x00\x00\x00\
    \x7f\x00\x7f\x00\xff\x00\xff\x00\
    \x7f\x7f\x00\x00\xff\xff\x00\x00\
    \x7f\x7f\x7f\x00\xff\xff\xff\x00\
    \x0f\x35\x00\x00\
    \xf3\x59\x10\x00\
    \x05\x91\x00\x00\
    \x88\x00\x00\x00\
    \x00\x00\x00\x00\
    \x88\x00\x00\x00";

/// RGBA pixels of [`BMP_5X3_4BPP`] after decoding.
pub const BMP_5X3_RGBA: &[u8] = b"\
    \x00\x00\x00\x00\x00\xff\x00\xff\x00\x00\xff\xff\
    \x00\x00\x00\xff\x00\x00\x00\x00\
    \xff\xff\xff\xff\xff\x00\x00\xff\x00\xff\x00\xff\
    \x00\x00\xff\xff\x00\x00\x00\xff\
    \x00\x00\x00\x00\xff\xff\xff\xff\xff\x00\x00\xff\
    \x00\xff\x00\xff\x00\x00\x00\x00";

/// A complete 2x2 8-bit grayscale PNG stream.
pub const PNG_2X2_GRAY: &[u8] = b"\
    \x89\x50\x4e\x47\x0d\x0a\x1a\x0a\x00\x00\x00\x0d\x49\x48\x44\x52\
    \x00\x00\x00\x02\x00\x00\x00\x02\x08\x00\x00\x00\x00\x57\xdd\x52\
    \xf8\x00\x00\x00\x0e\x49\x44\x41\x54\x78\x9c\x63\xb4\x77\x60\xdc\
    \xef\x00\x00\x04\x08\x01\x81\x86\x2e\xc9\x8d\x00\x00\x00\x00\x49\
    \x45\x4e\x44\xae\x42\x60\x82";

/// RGBA pixels of [`PNG_2X2_GRAY`] after decoding.
pub const PNG_2X2_RGBA: &[u8] = b"\
    \x3f\x3f\x3f\xff\x7f\x7f\x7f\xff\
    \xbf\xbf\xbf\xff\xff\xff\xff\xff";

//===========================================================================//
