//! Minimal drawing contract shared by both windows.

use crate::Color;

/// Something that can be painted once per render tick.
pub trait Surface {
    fn fill(&mut self, color: Color);
    fn draw_circle(&mut self, x: f32, y: f32, r: f32, color: Color);
}

pub trait Drawable {
    fn draw(&self, surface: &mut dyn Surface);
}

/// Surface backed by the current macroquad window.
#[derive(Debug, Default)]
pub struct Canvas;

impl Canvas {
    fn to_macroquad(color: Color) -> macroquad::color::Color {
        macroquad::color::Color::from_rgba(color.0, color.1, color.2, 255)
    }
}

impl Surface for Canvas {
    fn fill(&mut self, color: Color) {
        macroquad::window::clear_background(Self::to_macroquad(color));
    }

    fn draw_circle(&mut self, x: f32, y: f32, r: f32, color: Color) {
        macroquad::shapes::draw_circle(x, y, r, Self::to_macroquad(color));
    }
}

/// Records draw calls; used to check render order without a window.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Fill(Color),
    Circle { x: f32, y: f32, r: f32, color: Color },
}

impl Surface for RecordingSurface {
    fn fill(&mut self, color: Color) {
        self.calls.push(DrawCall::Fill(color));
    }

    fn draw_circle(&mut self, x: f32, y: f32, r: f32, color: Color) {
        self.calls.push(DrawCall::Circle { x, y, r, color });
    }
}
