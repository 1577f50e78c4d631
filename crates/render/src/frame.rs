/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear interpolation from `self` (t = 0) to `other` (t = 1), floored
    /// per channel. `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).floor() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

/// A CPU-side RGB image, row-major, origin top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Frame {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Packed `RGBRGB...` bytes, ready for an image encoder.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| [p.r, p.g, p.b]).collect()
    }

    pub fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Write one pixel; out-of-bounds writes are dropped.
    pub fn put(&mut self, x: i64, y: i64, color: Rgb) {
        if x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64 {
            let idx = y as usize * self.width as usize + x as usize;
            self.pixels[idx] = color;
        }
    }

    /// Mix `color` over the existing pixel with opacity `alpha`.
    pub fn blend(&mut self, x: i64, y: i64, color: Rgb, alpha: f32) {
        if let Some(under) = self.get_signed(x, y) {
            let a = alpha.clamp(0.0, 1.0);
            let mix = |u: u8, c: u8| (u as f32 * (1.0 - a) + c as f32 * a).round() as u8;
            self.put(x, y, Rgb::new(mix(under.r, color.r), mix(under.g, color.g), mix(under.b, color.b)));
        }
    }

    fn get_signed(&self, x: i64, y: i64) -> Option<Rgb> {
        if x < 0 || y < 0 {
            return None;
        }
        self.get(u32::try_from(x).ok()?, u32::try_from(y).ok()?)
    }

    /// Pixel span covered by `[start, start + len)` on an axis of size `limit`.
    fn span(start: f32, len: f32, limit: u32) -> std::ops::Range<i64> {
        let a = start.round().max(0.0) as i64;
        let b = ((start + len).round() as i64).min(limit as i64);
        a..b.max(a)
    }

    /// Fill an axis-aligned rectangle, clipped to the frame.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        self.fill_rect_where(x, y, w, h, color, |_| true);
    }

    /// Fill a rectangle, but only in columns for which `column_visible` holds.
    pub fn fill_rect_where(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Rgb,
        column_visible: impl Fn(usize) -> bool,
    ) {
        let rows = Self::span(y, h, self.height);
        for col in Self::span(x, w, self.width) {
            if !column_visible(col as usize) {
                continue;
            }
            for row in rows.clone() {
                self.put(col, row, color);
            }
        }
    }

    /// Blend a rectangle over the frame.
    pub fn blend_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb, alpha: f32) {
        let rows = Self::span(y, h, self.height);
        for col in Self::span(x, w, self.width) {
            for row in rows.clone() {
                self.blend(col, row, color, alpha);
            }
        }
    }

    /// Vertical line in column `x` from `y0` (inclusive) to `y1` (exclusive).
    pub fn vline(&mut self, x: u32, y0: f32, y1: f32, color: Rgb) {
        self.fill_rect(x as f32, y0, 1.0, y1 - y0, color);
    }

    /// Filled disc centered on `(cx, cy)`.
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb, alpha: f32) {
        let r2 = radius * radius;
        let x0 = (cx - radius).floor() as i64;
        let x1 = (cx + radius).ceil() as i64;
        let y0 = (cy - radius).floor() as i64;
        let y1 = (cy + radius).ceil() as i64;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.blend(x, y, color, alpha);
                }
            }
        }
    }

    /// One-pixel line by uniform sampling along the segment.
    pub fn line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgb, alpha: f32) {
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as u32;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = x0 + (x1 - x0) * t;
            let y = y0 + (y1 - y0) * t;
            self.blend(x.floor() as i64, y.floor() as i64, color, alpha);
        }
    }

    /// Fill rows `y0..y1` with a vertical gradient from `top` to `bottom`.
    pub fn vertical_gradient(&mut self, y0: u32, y1: u32, top: Rgb, bottom: Rgb) {
        let y1 = y1.min(self.height);
        let span = y1.saturating_sub(y0).max(1) as f32;
        for y in y0..y1 {
            let color = top.lerp(bottom, (y - y0) as f32 / span);
            let start = (y * self.width) as usize;
            self.pixels[start..start + self.width as usize].fill(color);
        }
    }
}
