use std::collections::HashMap;

use common::games::snake::{InputEvent, InputSource, Position, Renderer, Rgb};
use egui::{Color32, Painter, Pos2, Rect, Stroke, StrokeKind, vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Paint {
    Cell { fill: Rgb, border: Rgb },
    Disc { center: (f32, f32), radius: f32, fill: Rgb, outline: Rgb },
}

pub fn color(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

/// Retained board for an immediate-mode UI. Draw calls land in the back
/// buffer; `present` publishes it to the front buffer painted every frame.
pub struct Canvas {
    cell_size: i32,
    background: Rgb,
    back: HashMap<Position, Paint>,
    front: HashMap<Position, Paint>,
    events: Vec<InputEvent>,
    pending_title: Option<String>,
}

impl Canvas {
    pub fn new(cell_size: i32, background: Rgb) -> Self {
        Self {
            cell_size,
            background,
            back: HashMap::new(),
            front: HashMap::new(),
            events: Vec::new(),
            pending_title: None,
        }
    }

    pub fn push_events(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        self.events.extend(events);
    }

    pub fn take_title(&mut self) -> Option<String> {
        self.pending_title.take()
    }

    pub fn background(&self) -> Color32 {
        color(self.background)
    }

    pub fn paint(&self, painter: &Painter, origin: Pos2) {
        let size = vec2(self.cell_size as f32, self.cell_size as f32);
        for (position, paint) in &self.front {
            match *paint {
                Paint::Cell { fill, border } => {
                    let min = origin + vec2(position.x as f32, position.y as f32);
                    let rect = Rect::from_min_size(min, size);
                    painter.rect_filled(rect, 0.0, color(fill));
                    painter.rect_stroke(
                        rect,
                        0.0,
                        Stroke::new(1.0, color(border)),
                        StrokeKind::Inside,
                    );
                }
                Paint::Disc {
                    center,
                    radius,
                    fill,
                    outline,
                } => {
                    let center = origin + vec2(center.0, center.1);
                    let stroke = Stroke::new(1.0, color(outline));
                    painter.circle(center, radius, color(fill), stroke);
                }
            }
        }
    }

    #[cfg(test)]
    fn presented(&self, position: Position) -> Option<Paint> {
        self.front.get(&position).copied()
    }
}

impl Renderer for Canvas {
    fn draw_cell(&mut self, position: Position, fill: Rgb, border: Rgb) {
        self.back.insert(position, Paint::Cell { fill, border });
    }

    fn draw_circle_with_outline(
        &mut self,
        center: (f32, f32),
        radius: f32,
        fill: Rgb,
        outline: Rgb,
    ) {
        let cell = Position::new((center.0 - radius) as i32, (center.1 - radius) as i32);
        self.back.insert(
            cell,
            Paint::Disc {
                center,
                radius,
                fill,
                outline,
            },
        );
    }

    fn erase_cell(&mut self, position: Position) {
        self.back.remove(&position);
    }

    fn present(&mut self) {
        self.front.clone_from(&self.back);
    }

    fn set_window_title(&mut self, title: &str) {
        self.pending_title = Some(title.to_string());
    }
}

impl InputSource for Canvas {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }
}
