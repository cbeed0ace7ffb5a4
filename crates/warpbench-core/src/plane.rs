//! Single-channel 8-bit pixel plane.

/// A single 8-bit channel stored row-major with no row padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane {
    /// Plane width in pixels.
    pub width: u32,
    /// Plane height in pixels.
    pub height: u32,
    /// Sample data, `width * height` bytes.
    pub data: Vec<u8>,
}

impl Plane {
    /// Create a plane from existing sample data.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize),
            "Plane buffer size mismatch"
        );
        Self {
            width,
            height,
            data,
        }
    }

    /// Create a plane with every sample set to `value`.
    pub fn filled(width: u32, height: u32, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; (width as usize) * (height as usize)],
        }
    }

    /// Sample at `(x, y)`, or `None` outside the plane.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> Option<u8> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(self.data[y as usize * self.width as usize + x as usize])
    }

    /// Row `y` as a slice.
    pub fn row(&self, y: u32) -> &[u8] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.data[start..start + w]
    }

    /// Dimensions as `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.data.is_empty()
    }
}
