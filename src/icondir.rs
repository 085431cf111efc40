use crate::error::{header_read_error, DecodeResult};
use crate::restype::ResourceType;
use byteorder::{LittleEndian, ReadBytesExt};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::io::Read;

//===========================================================================//

// The one-byte width/height fields top out at 256, with 0 standing in for
// 256 itself.
pub(crate) const MAX_NOMINAL_SIZE: u32 = 256;

//===========================================================================//

/// The parsed directory of an ICO or CUR container: the fixed-size header
/// plus one record per embedded image.
///
/// Reading the directory does not touch any entry's image data; entry
/// offsets stay relative to wherever the stream was positioned when
/// [`IconDir::read`] was called.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct IconDir {
    restype: ResourceType,
    entries: Vec<DirEntry>,
    nominal_width: u32,
    nominal_height: u32,
}

impl IconDir {
    /// Reads the directory header and all entry records from `reader`, which
    /// must be positioned at the start of the container (not necessarily the
    /// start of the underlying medium).  Fails with
    /// [`DecodeError::TruncatedHeader`](crate::DecodeError::TruncatedHeader)
    /// if the stream ends before the header or any entry record is complete.
    pub fn read<R: Read>(reader: &mut R) -> DecodeResult<IconDir> {
        let reserved =
            reader.read_u16::<LittleEndian>().map_err(header_read_error)?;
        if reserved != 0 {
            invalid_directory!(
                "Invalid reserved field value in ICONDIR \
                 (was {}, but must be 0)",
                reserved
            );
        }
        let restype =
            reader.read_u16::<LittleEndian>().map_err(header_read_error)?;
        let restype = match ResourceType::from_number(restype) {
            Some(restype) => restype,
            None => invalid_directory!("Invalid resource type ({})", restype),
        };
        let num_entries = reader
            .read_u16::<LittleEndian>()
            .map_err(header_read_error)? as usize;
        let mut entries = Vec::<DirEntry>::with_capacity(num_entries);
        for _ in 0..num_entries {
            entries.push(DirEntry::read(reader, restype)?);
        }
        // The nominal container size is the max over all entries' size
        // fields.  Since 256 is the ceiling those fields can express, the
        // scan can end as soon as both axes reach it.
        let mut nominal_width = 0;
        let mut nominal_height = 0;
        for entry in entries.iter() {
            nominal_width = nominal_width.max(entry.width());
            nominal_height = nominal_height.max(entry.height());
            if nominal_width >= MAX_NOMINAL_SIZE
                && nominal_height >= MAX_NOMINAL_SIZE
            {
                break;
            }
        }
        Ok(IconDir { restype, entries, nominal_width, nominal_height })
    }

    /// Returns the type of resource stored in this container, either icons
    /// or cursors.
    pub fn resource_type(&self) -> ResourceType {
        self.restype
    }

    /// Returns the entry records, in file order.
    pub fn entries(&self) -> &[DirEntry] {
        &self.entries
    }

    /// Returns the container size claimed by the directory, the max over all
    /// entries' width/height fields (with the zero-means-256 quirk applied).
    /// The actual canvas size of a decoded image comes from the embedded
    /// image data instead, since these one-byte fields may be stale or
    /// clamped.
    pub fn nominal_size(&self) -> (u32, u32) {
        (self.nominal_width, self.nominal_height)
    }
}

//===========================================================================//

/// One 16-byte directory record describing an embedded image.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct DirEntry {
    restype: ResourceType,
    width: u32,
    height: u32,
    num_colors: u8,
    color_planes: u16,
    bits_per_pixel: u16,
    data_size: u32,
    data_offset: u32,
}

impl DirEntry {
    fn read<R: Read>(
        reader: &mut R,
        restype: ResourceType,
    ) -> DecodeResult<DirEntry> {
        let width_byte = reader.read_u8().map_err(header_read_error)?;
        let height_byte = reader.read_u8().map_err(header_read_error)?;
        let num_colors = reader.read_u8().map_err(header_read_error)?;
        let reserved = reader.read_u8().map_err(header_read_error)?;
        if reserved != 0 {
            invalid_directory!(
                "Invalid reserved field value in ICONDIRENTRY \
                 (was {}, but must be 0)",
                reserved
            );
        }
        let color_planes =
            reader.read_u16::<LittleEndian>().map_err(header_read_error)?;
        let bits_per_pixel =
            reader.read_u16::<LittleEndian>().map_err(header_read_error)?;
        let data_size =
            reader.read_u32::<LittleEndian>().map_err(header_read_error)?;
        let data_offset =
            reader.read_u32::<LittleEndian>().map_err(header_read_error)?;
        // A single byte cannot represent 256, so 0 is overloaded to mean the
        // maximum.
        let width = if width_byte == 0 {
            MAX_NOMINAL_SIZE
        } else {
            width_byte as u32
        };
        let height = if height_byte == 0 {
            MAX_NOMINAL_SIZE
        } else {
            height_byte as u32
        };
        Ok(DirEntry {
            restype,
            width,
            height,
            num_colors,
            color_planes,
            bits_per_pixel,
            data_size,
            data_offset,
        })
    }

    /// Returns the width claimed by this record, in pixels (a stored byte of
    /// 0 reads back as 256).
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height claimed by this record, in pixels (a stored byte
    /// of 0 reads back as 256).
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the number of colors in the embedded image's palette, or zero
    /// if it has none.
    pub fn num_colors(&self) -> u8 {
        self.num_colors
    }

    /// Returns the bits-per-pixel (color depth) field.  Returns zero for
    /// cursor containers, which store hotspot coordinates in place of this
    /// field.
    pub fn bits_per_pixel(&self) -> u16 {
        if self.restype == ResourceType::Cursor {
            0
        } else {
            self.bits_per_pixel
        }
    }

    /// Returns the coordinates of the cursor hotspot (pixels right from the
    /// left edge of the image, and pixels down from the top edge), or `None`
    /// for icon containers.
    pub fn cursor_hotspot(&self) -> Option<(u16, u16)> {
        if self.restype == ResourceType::Cursor {
            Some((self.color_planes, self.bits_per_pixel))
        } else {
            None
        }
    }

    /// Returns the byte length of the embedded image data.
    pub fn data_size(&self) -> u32 {
        self.data_size
    }

    /// Returns the offset of the embedded image data, relative to the stream
    /// position at the moment the directory was read.
    pub fn data_offset(&self) -> u32 {
        self.data_offset
    }
}

//===========================================================================//


//===========================================================================//
