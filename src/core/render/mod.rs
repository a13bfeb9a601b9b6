//=========================================================================
// Render Boundary
//=========================================================================
//
// The narrow contract between states/entities and a rendering backend.
//
// The core only ever asks a backend to: set a draw color, fill a rect,
// clear, and draw a texture. Textures are plain owned pixel buffers that
// the core creates, fills, and drops together with their owner.
//
// Architecture:
//   State::render(&mut dyn Canvas)
//     ├─ Canvas::fill_rect()     (level backgrounds)
//     └─ Canvas::draw_texture()  (entity sprites)
//
//=========================================================================

//=== Module Declarations =================================================

mod frame_buffer;
mod texture;

//=== Public API ==========================================================

pub use frame_buffer::FrameBuffer;
pub use texture::Texture;

//=== Color ===============================================================

/// RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Creates an opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

//=== FRect ===============================================================

/// Floating point rectangle in output (pixel) space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl FRect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Returns the overlap of two rectangles, or `None` when the
    /// intersection has no area.
    pub fn intersection(&self, other: &FRect) -> Option<FRect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = (self.x + self.w).min(other.x + other.w);
        let bottom = (self.y + self.h).min(other.y + other.h);

        if right > left && bottom > top {
            Some(FRect::new(left, top, right - left, bottom - top))
        } else {
            None
        }
    }
}

//=== Canvas ==============================================================

/// Rendering backend seen by states and entities.
///
/// Object-safe so the state stack can hand `&mut dyn Canvas` to every
/// layer without being generic over the backend.
pub trait Canvas {
    /// Output size in pixels as `(width, height)`.
    fn output_size(&self) -> (u32, u32);

    /// Sets the color used by [`Canvas::clear`] and [`Canvas::fill_rect`].
    fn set_draw_color(&mut self, color: Color);

    /// Fills the whole output with the current draw color.
    fn clear(&mut self);

    /// Fills `rect` with the current draw color.
    fn fill_rect(&mut self, rect: FRect);

    /// Draws `texture` scaled into `dst`.
    fn draw_texture(&mut self, texture: &Texture, dst: FRect);
}

//=========================================================================
// Unit Tests
//=========================================================================
