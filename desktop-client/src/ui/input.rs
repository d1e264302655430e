use common::games::snake::{InputEvent, Key};
use eframe::egui;

pub fn map_key(key: egui::Key) -> Key {
    match key {
        egui::Key::ArrowUp | egui::Key::W => Key::Up,
        egui::Key::ArrowDown | egui::Key::S => Key::Down,
        egui::Key::ArrowLeft | egui::Key::A => Key::Left,
        egui::Key::ArrowRight | egui::Key::D => Key::Right,
        egui::Key::Equals | egui::Key::Plus => Key::SpeedUp,
        egui::Key::Minus => Key::SlowDown,
        egui::Key::Escape => Key::Escape,
        _ => Key::Other,
    }
}

/// Key presses in arrival order. Repeats count, so holding `=` keeps speeding up.
pub fn translate(events: &[egui::Event]) -> Vec<InputEvent> {
    events
        .iter()
        .filter_map(|event| match event {
            egui::Event::Key {
                key, pressed: true, ..
            } => Some(InputEvent::KeyDown(map_key(*key))),
            _ => None,
        })
        .collect()
}
