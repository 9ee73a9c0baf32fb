use crate::error::{PanoError, PanoResult};

/// Canonical dimensions every input image is normalized to before compositing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

/// The background-art size this tool was built around.
pub const DEFAULT_CANVAS: Canvas = Canvas {
    width: 960,
    height: 640,
};

impl Canvas {
    pub fn new(width: u32, height: u32) -> PanoResult<Self> {
        let canvas = Self { width, height };
        canvas.validate()?;
        Ok(canvas)
    }

    pub fn validate(&self) -> PanoResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PanoError::invalid_configuration(
                "canvas width/height must be > 0",
            ));
        }
        Ok(())
    }
}

/// Straight (non-premultiplied) RGBA8 raster, row-major, tightly packed.
///
/// Straight alpha is deliberate: the output must reproduce input pixels
/// byte-for-byte outside the junction strips, and a premultiply round trip
/// would not.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Frame {
    /// Fully transparent frame of the given size.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width as usize * height as usize * 4],
        }
    }

    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> PanoResult<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(PanoError::dimension_mismatch(format!(
                "rgba8 buffer is {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn size_matches(&self, canvas: Canvas) -> bool {
        self.width == canvas.width && self.height == canvas.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.byte_offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    fn byte_offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    fn ensure_well_formed(&self) -> PanoResult<()> {
        let expected = self.width as usize * self.height as usize * 4;
        if self.data.len() != expected {
            return Err(PanoError::dimension_mismatch(format!(
                "frame buffer is {} bytes, expected {expected} for {}x{}",
                self.data.len(),
                self.width,
                self.height
            )));
        }
        Ok(())
    }

    /// Copy out the full-height strip covering columns `[x, x + count)`.
    pub fn column_strip(&self, x: u32, count: u32) -> PanoResult<Frame> {
        self.ensure_well_formed()?;
        if x.checked_add(count).is_none_or(|end| end > self.width) {
            return Err(PanoError::dimension_mismatch(format!(
                "column strip [{x}, {x}+{count}) exceeds frame width {}",
                self.width
            )));
        }

        let mut strip = Frame::transparent(count, self.height);
        strip.paste_columns(0, self, x, count)?;
        Ok(strip)
    }

    /// Copy `count` columns from `src` (starting at `src_x`) into this frame
    /// starting at `dst_x`. Heights must agree exactly.
    pub fn paste_columns(
        &mut self,
        dst_x: u32,
        src: &Frame,
        src_x: u32,
        count: u32,
    ) -> PanoResult<()> {
        self.ensure_well_formed()?;
        src.ensure_well_formed()?;
        if src.height != self.height {
            return Err(PanoError::dimension_mismatch(format!(
                "paste source height {} does not match destination height {}",
                src.height, self.height
            )));
        }
        if src_x.checked_add(count).is_none_or(|end| end > src.width) {
            return Err(PanoError::dimension_mismatch(format!(
                "paste source columns [{src_x}, {src_x}+{count}) exceed source width {}",
                src.width
            )));
        }
        if dst_x.checked_add(count).is_none_or(|end| end > self.width) {
            return Err(PanoError::dimension_mismatch(format!(
                "paste destination columns [{dst_x}, {dst_x}+{count}) exceed frame width {}",
                self.width
            )));
        }

        if count == 0 {
            return Ok(());
        }

        let span = count as usize * 4;
        for y in 0..self.height {
            let s = src.byte_offset(src_x, y);
            let d = self.byte_offset(dst_x, y);
            self.data[d..d + span].copy_from_slice(&src.data[s..s + span]);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_frame(width: u32, height: u32) -> Frame {
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[x as u8, y as u8, (x + y) as u8, 255]);
            }
        }
        Frame::from_rgba8(width, height, data).unwrap()
    }

    #[test]
    fn canvas_rejects_zero_dimensions() {
        assert!(Canvas::new(0, 640).is_err());
        assert!(Canvas::new(960, 0).is_err());
        assert_eq!(Canvas::new(960, 640).unwrap(), DEFAULT_CANVAS);
    }

    #[test]
    fn from_rgba8_rejects_wrong_length() {
        assert!(Frame::from_rgba8(2, 2, vec![0u8; 15]).is_err());
        assert!(Frame::from_rgba8(2, 2, vec![0u8; 16]).is_ok());
    }

    #[test]
    fn transparent_frame_is_all_zero() {
        let f = Frame::transparent(3, 2);
        assert_eq!(f.data.len(), 24);
        assert!(f.data.iter().all(|&b| b == 0));
    }

    #[test]
    fn column_strip_roundtrips_through_paste() {
        let src = numbered_frame(6, 3);
        let strip = src.column_strip(2, 3).unwrap();
        assert_eq!(strip.width, 3);
        assert_eq!(strip.height, 3);
        assert_eq!(strip.pixel(0, 1), src.pixel(2, 1));

        let mut dst = Frame::transparent(6, 3);
        dst.paste_columns(1, &strip, 0, 3).unwrap();
        assert_eq!(dst.pixel(1, 2), src.pixel(2, 2));
        assert_eq!(dst.pixel(3, 0), src.pixel(4, 0));
        assert_eq!(dst.pixel(0, 0), [0, 0, 0, 0]);
        assert_eq!(dst.pixel(4, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn paste_columns_rejects_out_of_bounds() {
        let src = numbered_frame(4, 2);
        let mut dst = Frame::transparent(4, 2);
        assert!(dst.paste_columns(2, &src, 0, 3).is_err());
        assert!(dst.paste_columns(0, &src, 3, 2).is_err());

        let tall = numbered_frame(4, 3);
        assert!(dst.paste_columns(0, &tall, 0, 1).is_err());
    }

    #[test]
    fn paste_zero_columns_is_a_noop() {
        let src = numbered_frame(4, 2);
        let mut dst = Frame::transparent(4, 2);
        dst.paste_columns(0, &src, 0, 0).unwrap();
        assert!(dst.data.iter().all(|&b| b == 0));
    }
}
