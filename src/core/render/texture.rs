//=========================================================================
// Texture
//=========================================================================
//
// Owned RGBA pixel buffer. Created and filled by the core (entities,
// states), drawn through a Canvas, released when its owner drops it.
//
//=========================================================================

use super::Color;

/// Owned RGBA pixel buffer, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Texture {
    /// Creates a fully transparent texture.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Color::TRANSPARENT)
    }

    /// Creates a texture where every pixel is `color`.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Overwrites every pixel with `color`.
    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the texture.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_replaces_every_pixel() {
        let mut texture = Texture::new(4, 2);
        assert!(texture.pixels().iter().all(|&p| p == Color::TRANSPARENT));

        texture.fill(Color::WHITE);

        assert_eq!(texture.pixels().len(), 8);
        assert!(texture.pixels().iter().all(|&p| p == Color::WHITE));
    }

    #[test]
    fn pixel_out_of_bounds_is_none() {
        let texture = Texture::filled(2, 2, Color::BLACK);
        assert_eq!(texture.pixel(1, 1), Some(Color::BLACK));
        assert_eq!(texture.pixel(2, 0), None);
        assert_eq!(texture.pixel(0, 2), None);
    }
}
