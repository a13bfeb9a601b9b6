//=========================================================================
// Frame Buffer
//=========================================================================
//
// Software Canvas backed by a Vec of RGBA pixels.
//
// Used by the logic thread as the render target of the state stack and
// by tests to observe what states actually drew. Fills and blits are
// clipped to the output; texture blits use nearest-neighbour scaling and
// skip fully transparent texels.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{Canvas, Color, FRect, Texture};

//=== FrameBuffer =========================================================

/// Software render target.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    draw_color: Color,
    pixels: Vec<Color>,
}

impl FrameBuffer {
    /// Creates a black frame buffer of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            draw_color: Color::BLACK,
            pixels: vec![Color::BLACK; width as usize * height as usize],
        }
    }

    /// Resizes the buffer, discarding its contents.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![Color::BLACK; width as usize * height as usize];
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn draw_color(&self) -> Color {
        self.draw_color
    }

    //--- Internal Helpers -------------------------------------------------

    /// Clips `rect` to the output and returns pixel bounds
    /// `(x0, y0, x1, y1)`, end-exclusive.
    fn clip(&self, rect: FRect) -> Option<(u32, u32, u32, u32)> {
        let bounds = FRect::new(0.0, 0.0, self.width as f32, self.height as f32);
        let clipped = rect.intersection(&bounds)?;

        let x0 = clipped.x.floor() as u32;
        let y0 = clipped.y.floor() as u32;
        let x1 = ((clipped.x + clipped.w).ceil() as u32).min(self.width);
        let y1 = ((clipped.y + clipped.h).ceil() as u32).min(self.height);

        (x1 > x0 && y1 > y0).then_some((x0, y0, x1, y1))
    }

    fn put(&mut self, x: u32, y: u32, color: Color) {
        let index = (y * self.width + x) as usize;
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
    }
}

//=== Canvas Implementation ===============================================

impl Canvas for FrameBuffer {
    fn output_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_draw_color(&mut self, color: Color) {
        self.draw_color = color;
    }

    fn clear(&mut self) {
        self.pixels.fill(self.draw_color);
    }

    fn fill_rect(&mut self, rect: FRect) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };

        let color = self.draw_color;
        for y in y0..y1 {
            for x in x0..x1 {
                self.put(x, y, color);
            }
        }
    }

    fn draw_texture(&mut self, texture: &Texture, dst: FRect) {
        if texture.width() == 0 || texture.height() == 0 || dst.w <= 0.0 || dst.h <= 0.0 {
            return;
        }
        let Some((x0, y0, x1, y1)) = self.clip(dst) else {
            return;
        };

        let scale_x = texture.width() as f32 / dst.w;
        let scale_y = texture.height() as f32 / dst.h;

        for y in y0..y1 {
            let v = (((y as f32 + 0.5) - dst.y) * scale_y) as u32;
            for x in x0..x1 {
                let u = (((x as f32 + 0.5) - dst.x) * scale_x) as u32;
                let texel = texture
                    .pixel(u.min(texture.width() - 1), v.min(texture.height() - 1))
                    .unwrap_or(Color::TRANSPARENT);

                if texel.a != 0 {
                    self.put(x, y, texel);
                }
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
