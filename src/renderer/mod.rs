//! Rendering surface
//!
//! The simulation never talks to a graphics API. It describes a frame as a
//! sequence of draw calls on a `RenderSurface`; a backend turns those into
//! pixels. `DrawList` just records them, which is what tests and the
//! headless runner use.

pub mod scene;

use glam::Vec2;

use crate::sim::EntityKind;

pub use scene::{render_background_only, render_everything};

/// Text overlay colour (ARGB)
pub const HUD_COLOUR: u32 = 0xff00_ffff;

/// Font size buckets the text renderer supports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSize {
    Small,
    Medium,
    Large,
}

impl FontSize {
    /// Approximate glyph advance in pixels
    pub fn advance(self) -> i32 {
        match self {
            FontSize::Small => 8,
            FontSize::Medium => 12,
            FontSize::Large => 20,
        }
    }
}

/// One entity's visual
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub kind: EntityKind,
    pub pos: Vec2,
    /// Radians, 0 = up
    pub heading: f32,
    /// World-space size (collision radius or explosion scale)
    pub radius: f32,
}

/// Draw-call sink provided by the graphics backend
pub trait RenderSurface {
    /// Clear and draw the playfield backdrop
    fn draw_background(&mut self, half_extents: Vec2);

    fn draw_sprite(&mut self, sprite: &Sprite);

    /// Draw text with its top-left at screen pixel `(x, y)`
    fn draw_text(&mut self, text: &str, x: i32, y: i32, colour: u32, font: FontSize);

    /// Width of `text` in pixels
    fn text_width(&self, text: &str, font: FontSize) -> i32 {
        i32::try_from(text.chars().count()).unwrap_or(i32::MAX) * font.advance()
    }
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Background {
        half_extents: Vec2,
    },
    Sprite(Sprite),
    Text {
        text: String,
        x: i32,
        y: i32,
        colour: u32,
        font: FontSize,
    },
}

/// Surface that records every draw call in order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Recorded text strings, in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of sprites recorded for an entity kind
    pub fn sprite_count(&self, kind: EntityKind) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite(s) if s.kind == kind))
            .count()
    }
}

impl RenderSurface for DrawList {
    fn draw_background(&mut self, half_extents: Vec2) {
        self.commands.push(DrawCommand::Background { half_extents });
    }

    fn draw_sprite(&mut self, sprite: &Sprite) {
        self.commands.push(DrawCommand::Sprite(*sprite));
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, colour: u32, font: FontSize) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            colour,
            font,
        });
    }
}
