use std::collections::HashSet;

use glam::Vec2;

use crate::events::Event;

/// Polled keyboard and mouse state for one window.
///
/// Fed from the same events the [`EventHandler`](crate::events::EventHandler)
/// sees; query it from anywhere in the frame instead of tracking state in
/// callbacks.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    focused: bool,
    mouse: Vec2,
    keys_down: HashSet<i32>,
    buttons_down: HashSet<i32>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &Event) {
        match event {
            Event::KeyPressed(e) => {
                self.keys_down.insert(e.key_code());
            }
            Event::KeyReleased(e) => {
                self.keys_down.remove(&e.key_code());
            }
            Event::MouseButtonPressed(e) => {
                self.buttons_down.insert(e.button());
            }
            Event::MouseButtonReleased(e) => {
                self.buttons_down.remove(&e.button());
            }
            Event::MouseMoved(e) => self.mouse = e.position(),
            Event::WindowFocus(_) => self.focused = true,
            Event::WindowLostFocus(_) => {
                // Releases that happen while unfocused never arrive.
                self.focused = false;
                self.keys_down.clear();
                self.buttons_down.clear();
            }
            _ => {}
        }
    }

    pub fn is_key_pressed(&self, key_code: i32) -> bool {
        self.keys_down.contains(&key_code)
    }

    pub fn is_mouse_button_pressed(&self, button: i32) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn mouse_position(&self) -> Vec2 {
        self.mouse
    }

    pub fn mouse_x(&self) -> f32 {
        self.mouse.x
    }

    pub fn mouse_y(&self) -> f32 {
        self.mouse.y
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }
}
