//! Drawable sprite component and the draw contract.
//!
//! Sprig does not render anything itself. A host supplies a [`SpriteBatch`]
//! and the scene walks its entities, handing over every visible sprite along
//! with the source rectangle to sample from the sprite sheet.

use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentKind, TickContext};
use crate::math::Vec2;
use crate::shape::Rectangle;

/// Opaque handle to a texture owned by the host renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureHandle(pub u32);

/// Host-side drawing surface.
pub trait SpriteBatch {
    /// Draw `source` from the sprite's sheet at `sprite.position()`.
    fn draw_sprite(&mut self, sprite: &Sprite, source: Rectangle);
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub texture: TextureHandle,
    /// Size of one frame on the sheet, in pixels.
    pub frame_size: (u32, u32),
    /// Column/row of the frame to draw.
    pub frame: (u32, u32),
    /// Pixel offset of the frame grid inside the sheet.
    pub offset: Vec2,
    /// Multiplicative tint applied to the sampled texture color.
    pub tint: [f32; 4],
    pub scale: f32,
    pub visible: bool,
    position: Vec2,
}

impl Sprite {
    pub fn new(texture: TextureHandle, frame_size: (u32, u32)) -> Self {
        Self {
            texture,
            frame_size,
            frame: (0, 0),
            offset: Vec2::ZERO,
            tint: [1.0, 1.0, 1.0, 1.0],
            scale: 1.0,
            visible: true,
            position: Vec2::ZERO,
        }
    }

    #[must_use]
    pub fn with_frame(mut self, column: u32, row: u32) -> Self {
        self.frame = (column, row);
        self
    }

    #[must_use]
    pub fn with_tint(mut self, r: f32, g: f32, b: f32, a: f32) -> Self {
        self.tint = [r, g, b, a];
        self
    }

    /// World position, synced from the owning entity on every update.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Region of the sheet holding the current frame.
    pub fn source_rect(&self) -> Rectangle {
        let (w, h) = (self.frame_size.0 as f32, self.frame_size.1 as f32);
        Rectangle::new(
            w * self.frame.0 as f32 + self.offset.x,
            h * self.frame.1 as f32 + self.offset.y,
            w,
            h,
        )
    }

    /// Hand the sprite to the batch unless it is hidden.
    pub fn draw(&self, batch: &mut dyn SpriteBatch) {
        if self.visible {
            batch.draw_sprite(self, self.source_rect());
        }
    }
}

impl Component for Sprite {
    const KIND: ComponentKind = ComponentKind::Sprite;

    fn update(&mut self, ctx: &mut TickContext<'_>) {
        self.position = *ctx.location;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_rect_uses_frame_grid() {
        let mut sprite = Sprite::new(TextureHandle(1), (16, 32)).with_frame(2, 1);
        sprite.offset = Vec2::new(4.0, 0.0);
        assert_eq!(sprite.source_rect(), Rectangle::new(36.0, 32.0, 16.0, 32.0));
    }

    #[test]
    fn test_hidden_sprite_is_not_drawn() {
        struct Counter(usize);
        impl SpriteBatch for Counter {
            fn draw_sprite(&mut self, _sprite: &Sprite, _source: Rectangle) {
                self.0 += 1;
            }
        }

        let mut sprite = Sprite::new(TextureHandle(0), (8, 8));
        let mut batch = Counter(0);
        sprite.draw(&mut batch);
        sprite.visible = false;
        sprite.draw(&mut batch);
        assert_eq!(batch.0, 1);
    }
}
