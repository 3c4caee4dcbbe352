use crate::error::BitmapError;
use crate::platform::Size;

/// `BITMAPFILEHEADER` size.
pub const FILE_HEADER_SIZE: usize = 14;
/// `BITMAPINFOHEADER` size.
pub const INFO_HEADER_SIZE: usize = 40;
/// Pixel data follows the two fixed-size headers.
pub const PIXEL_DATA_OFFSET: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE;

#[inline]
fn read_i32(data: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

#[inline]
fn read_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

/// Non-owning view over raw BMP file bytes.
///
/// Only width, height (sign = row order) and bit count are read; header and pixels are borrowed
/// from the caller's buffer.
#[derive(Debug, Clone, Copy)]
pub struct BitmapView<'a> {
    info_header: &'a [u8],
    pixels: &'a [u8],
    width: i32,
    height: i32,
    bit_count: u16,
}

impl<'a> BitmapView<'a> {
    /// Locate the info header and pixel data inside `data`.
    pub fn parse(data: &'a [u8]) -> Result<Self, BitmapError> {
        if data.len() < PIXEL_DATA_OFFSET {
            return Err(BitmapError::Truncated { len: data.len() });
        }
        if &data[0..2] != b"BM" {
            return Err(BitmapError::BadSignature);
        }

        let info_header = &data[FILE_HEADER_SIZE..PIXEL_DATA_OFFSET];
        let width = read_i32(info_header, 4);
        let height = read_i32(info_header, 8);
        let bit_count = read_u16(info_header, 14);

        // Palette formats put a color table between the header and the pixels.
        if !matches!(bit_count, 16 | 24 | 32) {
            return Err(BitmapError::UnsupportedBitCount(bit_count));
        }
        if width <= 0 || height == 0 || height == i32::MIN {
            return Err(BitmapError::InvalidDimensions { width, height });
        }

        let view = Self {
            info_header,
            pixels: &data[PIXEL_DATA_OFFSET..],
            width,
            height,
            bit_count,
        };
        if view.pixels.len() < view.stride() * height.unsigned_abs() as usize {
            return Err(BitmapError::Truncated { len: data.len() });
        }
        Ok(view)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Signed height: negative for top-down rows, positive for bottom-up.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn is_top_down(&self) -> bool {
        self.height < 0
    }

    /// Natural size in pixels.
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height.abs())
    }

    #[inline]
    pub fn bit_count(&self) -> u16 {
        self.bit_count
    }

    /// Row size in bytes, 4-byte aligned.
    #[inline]
    pub fn stride(&self) -> usize {
        (self.width as usize * self.bit_count as usize).div_ceil(32) * 4
    }

    /// Raw `BITMAPINFOHEADER` bytes.
    #[inline]
    pub fn info_header(&self) -> &'a [u8] {
        self.info_header
    }

    #[inline]
    pub fn pixels(&self) -> &'a [u8] {
        self.pixels
    }
}

/// Build BMP file bytes (top-down) around packed pixel rows.
///
/// `pixels` must hold `height` rows of `stride` bytes each.
pub fn encode_top_down(width: i32, height: i32, bit_count: u16, pixels: &[u8]) -> Vec<u8> {
    let image_size = pixels.len() as u32;
    let file_size = PIXEL_DATA_OFFSET as u32 + image_size;
    let mut bmp = Vec::with_capacity(file_size as usize);

    // BMP file header (14 bytes).
    bmp.extend_from_slice(b"BM");
    bmp.extend_from_slice(&file_size.to_le_bytes());
    bmp.extend_from_slice(&[0u8; 4]);
    bmp.extend_from_slice(&(PIXEL_DATA_OFFSET as u32).to_le_bytes());

    // BITMAPINFOHEADER (40 bytes).
    bmp.extend_from_slice(&(INFO_HEADER_SIZE as u32).to_le_bytes());
    bmp.extend_from_slice(&width.to_le_bytes());
    bmp.extend_from_slice(&(-height).to_le_bytes());
    bmp.extend_from_slice(&1u16.to_le_bytes());
    bmp.extend_from_slice(&bit_count.to_le_bytes());
    bmp.extend_from_slice(&0u32.to_le_bytes()); // BI_RGB
    bmp.extend_from_slice(&image_size.to_le_bytes());
    bmp.extend_from_slice(&[0u8; 16]);

    bmp.extend_from_slice(pixels);
    bmp
}
