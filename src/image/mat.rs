use super::bmp;

/// Element layout of a [`Mat`]. Only packed 8-bit BGR is produced by capture.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatType {
    #[default]
    CV_8UC3,
}

impl MatType {
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            MatType::CV_8UC3 => 3,
        }
    }
}

/// Owned, densely packed image buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mat {
    rows: i32,
    cols: i32,
    typ: MatType,
    data: Vec<u8>,
}

impl Mat {
    /// Allocate a zeroed matrix.
    pub fn new(rows: i32, cols: i32, typ: MatType) -> Self {
        let mut mat = Self::default();
        mat.create(rows, cols, typ);
        mat
    }

    /// Resize to `rows × cols`. Existing storage is kept when the shape already matches.
    pub fn create(&mut self, rows: i32, cols: i32, typ: MatType) {
        let rows = rows.max(0);
        let cols = cols.max(0);
        if self.rows == rows && self.cols == cols && self.typ == typ {
            return;
        }
        self.rows = rows;
        self.cols = cols;
        self.typ = typ;
        self.data = vec![0; rows as usize * cols as usize * typ.channels()];
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    #[inline]
    pub fn typ(&self) -> MatType {
        self.typ
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.typ.channels()
    }

    #[inline]
    pub fn empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Top-down 24-bit BMP bytes, ready for a bitmap window.
    pub fn to_bmp(&self) -> Vec<u8> {
        let row = self.cols as usize * self.channels();
        let stride = row.div_ceil(4) * 4;
        let mut pixels = Vec::with_capacity(stride * self.rows as usize);
        for line in self.data.chunks_exact(row.max(1)).take(self.rows as usize) {
            pixels.extend_from_slice(line);
            pixels.resize(pixels.len() + (stride - row), 0);
        }
        bmp::encode_top_down(self.cols, self.rows, 24, &pixels)
    }
}
