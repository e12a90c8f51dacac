//! Icon and cursor containers.
//!
//! Parses `.ico` and `.cur` container files and composes the group resources
//! (`RT_GROUP_ICON`, `RT_GROUP_CURSOR`) referencing their images. Image data
//! is carried through opaquely, whether DIB or PNG encoded.

use std::{io::Read, vec::Vec};

use debug_ignore::DebugIgnore;
use zerocopy::IntoBytes;

use crate::{errors::*, types::*, util::*};

/// Upper bound for a single image, larger sizes are treated as corrupt input.
const MAX_IMAGE_BYTES: u32 = 10 * 1024 * 1024;

fn parse_directory<'a>(
    data: &'a [u8], expected_type: u16, mismatch: fn() -> ImageLoadError,
) -> Result<Vec<(IconDirEntry, &'a [u8])>, ImageLoadError> {
    let directory = read::<IconDirectory>(data)?;
    if directory.reserved != 0 || directory.type_ != expected_type || directory.count < 1 {
        return Err(mismatch());
    }
    let mut images = Vec::with_capacity(directory.count as usize);
    for index in 0..directory.count as usize {
        if data.len() < 6 + (index + 1) * 16 {
            return Err(ReadError("image directory is truncated".into()).into());
        }
        let entry = read::<IconDirEntry>(&data[6 + index * 16..])?;
        if entry.bytes > MAX_IMAGE_BYTES {
            return Err(ImageLoadError::ImageLengthTooBig);
        }
        let offset = entry.offset as usize;
        let size = entry.bytes as usize;
        if offset.checked_add(size).map_or(true, |end| end > data.len()) {
            return Err(ReadError("image data is truncated".into()).into());
        }
        images.push((entry, &data[offset..offset + size]));
    }
    Ok(images)
}

/// Planes and bit count of a DIB encoded image, taken from its
/// BITMAPINFOHEADER. PNG encoded images report 1 plane at 32 bits.
fn dib_planes_bit_count(data: &[u8]) -> (u16, u16) {
    if data.len() >= 16 && read::<u32>(data).is_ok_and(|size| size == 40) {
        let planes = read::<u16>(&data[12..]).unwrap_or(1);
        let bit_count = read::<u16>(&data[14..]).unwrap_or(32);
        return (planes, bit_count);
    }
    (1, 32)
}

/// A single image of an icon.
#[derive(Debug, Clone)]
pub struct IconImage {
    width:       u8,
    height:      u8,
    color_count: u8,
    planes:      u16,
    bit_count:   u16,
    data:        DebugIgnore<Vec<u8>>,
}

impl IconImage {
    /// Raw image data, DIB or PNG encoded.
    pub fn data(&self) -> &[u8] { &self.data }

    /// Image width in pixels. A stored width of 0 means 256.
    pub fn width(&self) -> u16 {
        if self.width == 0 { 256 } else { self.width as u16 }
    }

    /// Image height in pixels. A stored height of 0 means 256.
    pub fn height(&self) -> u16 {
        if self.height == 0 { 256 } else { self.height as u16 }
    }

    fn group_entry(&self, id: u16) -> GroupIconDirEntry {
        GroupIconDirEntry {
            width: self.width,
            height: self.height,
            color_count: self.color_count,
            reserved: 0,
            planes: self.planes,
            bit_count: self.bit_count,
            bytes: self.data.len() as u32,
            id,
        }
    }
}

/// An icon as a set of images in different resolutions.
///
/// Load one from an ICO file with [`from_ico`](Icon::from_ico) or
/// [`load_ico`](Icon::load_ico), then add it to a resource set with
/// [`set_icon`](crate::ResourceSet::set_icon).
#[derive(Debug, Clone, Default)]
pub struct Icon {
    images: Vec<IconImage>,
}

impl Icon {
    /// Parse an icon from the bytes of an ICO file.
    ///
    /// # Returns
    /// Returns an error if the data is not a valid ICO file, or an image
    /// exceeds the 10 MB size bound.
    pub fn from_ico(data: &[u8]) -> Result<Self, ImageLoadError> {
        let images = parse_directory(data, 1, || ImageLoadError::NotIco)?
            .into_iter()
            .map(|(entry, data)| IconImage {
                width:       entry.width,
                height:      entry.height,
                color_count: entry.color_count,
                planes:      entry.planes,
                bit_count:   entry.bit_count,
                data:        data.to_vec().into(),
            })
            .collect();
        Ok(Self { images })
    }

    /// Parse an icon from a reader containing an ICO file.
    ///
    /// See [`from_ico`](Icon::from_ico).
    pub fn load_ico<R: Read>(reader: &mut R) -> Result<Self, ImageLoadError> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_ico(&data)
    }

    /// Returns the images of the icon.
    pub fn images(&self) -> &[IconImage] { &self.images }

    /// Build the `RT_GROUP_ICON` directory referencing the images by
    /// consecutive ids starting at `first_id`.
    pub(crate) fn group_data(&self, first_id: u16) -> Vec<u8> {
        let mut data = Vec::with_capacity(6 + self.images.len() * 14);
        let directory = IconDirectory {
            reserved: 0,
            type_:    1,
            count:    self.images.len() as u16,
        };
        data.extend_from_slice(directory.as_bytes());
        for (index, image) in self.images.iter().enumerate() {
            let entry = image.group_entry(first_id.wrapping_add(index as u16));
            data.extend_from_slice(entry.as_bytes());
        }
        data
    }
}

/// A single image of a cursor.
#[derive(Debug, Clone)]
pub struct CursorImage {
    width:     u8,
    height:    u8,
    hotspot:   CursorHotspot,
    planes:    u16,
    bit_count: u16,
    data:      DebugIgnore<Vec<u8>>,
}

impl CursorImage {
    /// Raw image data, DIB or PNG encoded.
    pub fn data(&self) -> &[u8] { &self.data }

    /// Hotspot coordinates of the cursor image.
    pub fn hotspot(&self) -> (u16, u16) { (self.hotspot.x, self.hotspot.y) }

    /// The `RT_CURSOR` resource payload: the hotspot header followed by the
    /// image data.
    pub(crate) fn payload(&self) -> Vec<u8> {
        let mut payload = Vec::with_capacity(4 + self.data.len());
        payload.extend_from_slice(self.hotspot.as_bytes());
        payload.extend_from_slice(&self.data);
        payload
    }

    fn group_entry(&self, id: u16) -> GroupCursorDirEntry {
        let width = if self.width == 0 { 256 } else { self.width as u16 };
        let height = if self.height == 0 { 256 } else { self.height as u16 };
        GroupCursorDirEntry {
            width,
            height: height * 2,
            planes: self.planes,
            bit_count: self.bit_count,
            bytes: self.data.len() as u32 + 4,
            id,
        }
    }
}

/// A cursor as a set of images, each with a hotspot.
///
/// Load one from a CUR file with [`from_cur`](Cursor::from_cur) or
/// [`load_cur`](Cursor::load_cur), then add it to a resource set with
/// [`set_cursor`](crate::ResourceSet::set_cursor).
#[derive(Debug, Clone, Default)]
pub struct Cursor {
    images: Vec<CursorImage>,
}

impl Cursor {
    /// Parse a cursor from the bytes of a CUR file.
    ///
    /// In a CUR file the two words following the image dimensions hold the
    /// hotspot coordinates. Planes and bit count of each image are taken
    /// from its bitmap header instead.
    ///
    /// # Returns
    /// Returns an error if the data is not a valid CUR file, or an image
    /// exceeds the 10 MB size bound.
    pub fn from_cur(data: &[u8]) -> Result<Self, ImageLoadError> {
        let images = parse_directory(data, 2, || ImageLoadError::NotCur)?
            .into_iter()
            .map(|(entry, data)| {
                let (planes, bit_count) = dib_planes_bit_count(data);
                CursorImage {
                    width: entry.width,
                    height: entry.height,
                    hotspot: CursorHotspot { x: entry.planes, y: entry.bit_count },
                    planes,
                    bit_count,
                    data: data.to_vec().into(),
                }
            })
            .collect();
        Ok(Self { images })
    }

    /// Parse a cursor from a reader containing a CUR file.
    ///
    /// See [`from_cur`](Cursor::from_cur).
    pub fn load_cur<R: Read>(reader: &mut R) -> Result<Self, ImageLoadError> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_cur(&data)
    }

    /// Returns the images of the cursor.
    pub fn images(&self) -> &[CursorImage] { &self.images }

    /// Build the `RT_GROUP_CURSOR` directory referencing the images by
    /// consecutive ids starting at `first_id`.
    pub(crate) fn group_data(&self, first_id: u16) -> Vec<u8> {
        let mut data = Vec::with_capacity(6 + self.images.len() * 14);
        let directory = IconDirectory {
            reserved: 0,
            type_:    2,
            count:    self.images.len() as u16,
        };
        data.extend_from_slice(directory.as_bytes());
        for (index, image) in self.images.iter().enumerate() {
            let entry = image.group_entry(first_id.wrapping_add(index as u16));
            data.extend_from_slice(entry.as_bytes());
        }
        data
    }
}
