use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::events::{
    Event, EventHandler, KeyPressedEvent, KeyReleasedEvent, KeyTypedEvent, MouseButtonPressedEvent,
    MouseButtonReleasedEvent, MouseMovedEvent, MouseScrolledEvent, WindowCloseEvent,
    WindowFocusEvent, WindowLostFocusEvent, WindowMovedEvent, WindowResizeEvent,
};
use crate::input::key_codes::*;

/// Translates a winit `WindowEvent` into engine events.
///
/// Most events map to zero or one engine event. A key press also yields one
/// `KeyTyped` per printable character it produced.
pub fn translate(event: &WindowEvent) -> Vec<Event> {
    match event {
        WindowEvent::CloseRequested => vec![WindowCloseEvent::new().into()],

        WindowEvent::Resized(size) => vec![WindowResizeEvent::new(size.width, size.height).into()],

        WindowEvent::Focused(true) => vec![WindowFocusEvent::new().into()],
        WindowEvent::Focused(false) => vec![WindowLostFocusEvent::new().into()],

        WindowEvent::Moved(pos) => vec![WindowMovedEvent::new(pos.x, pos.y).into()],

        WindowEvent::KeyboardInput { event, .. } => key_events(
            map_key(event.physical_key),
            event.state,
            event.repeat,
            event.text.as_deref(),
        ),

        WindowEvent::MouseInput { state, button, .. } => {
            let button = map_mouse_button(*button);
            match state {
                ElementState::Pressed => vec![MouseButtonPressedEvent::new(button).into()],
                ElementState::Released => vec![MouseButtonReleasedEvent::new(button).into()],
            }
        }

        WindowEvent::CursorMoved { position, .. } => {
            vec![MouseMovedEvent::new(position.x as f32, position.y as f32).into()]
        }

        WindowEvent::MouseWheel { delta, .. } => {
            let (x, y) = match delta {
                MouseScrollDelta::LineDelta(x, y) => (*x, *y),
                MouseScrollDelta::PixelDelta(p) => (p.x as f32, p.y as f32),
            };
            vec![MouseScrolledEvent::new(x, y).into()]
        }

        _ => Vec::new(),
    }
}

/// Key press or release for `code`. A press also yields one `KeyTyped` per
/// printable character in `text`.
fn key_events(code: i32, state: ElementState, repeat: bool, text: Option<&str>) -> Vec<Event> {
    match state {
        ElementState::Pressed => {
            let mut out = vec![Event::from(KeyPressedEvent::new(code, repeat))];
            out.extend(
                text.unwrap_or_default()
                    .chars()
                    .filter(|c| !c.is_control())
                    .map(|c| Event::from(KeyTypedEvent::new(c))),
            );
            out
        }
        ElementState::Released => vec![KeyReleasedEvent::new(code).into()],
    }
}

/// Translates `event` and dispatches each result through `handler`.
///
/// Returns true if any produced event ended up handled.
pub fn dispatch_window_event(handler: &mut EventHandler, event: &WindowEvent) -> bool {
    translate(event)
        .into_iter()
        .fold(false, |handled, mut ev| handler.dispatch(&mut ev) | handled)
}

pub fn map_mouse_button(button: MouseButton) -> i32 {
    match button {
        MouseButton::Left => MOUSE_BUTTON_LEFT,
        MouseButton::Right => MOUSE_BUTTON_RIGHT,
        MouseButton::Middle => MOUSE_BUTTON_MIDDLE,
        MouseButton::Back => MOUSE_BUTTON_4,
        MouseButton::Forward => MOUSE_BUTTON_5,
        MouseButton::Other(v) => i32::from(v).min(MOUSE_BUTTON_LAST),
    }
}

/// Physical key to the [`key_codes`](crate::input::key_codes) value.
pub fn map_key(key: PhysicalKey) -> i32 {
    let PhysicalKey::Code(code) = key else {
        return KEY_UNKNOWN;
    };
    match code {
        KeyCode::Space => KEY_SPACE,
        KeyCode::Quote => KEY_APOSTROPHE,
        KeyCode::Comma => KEY_COMMA,
        KeyCode::Minus => KEY_MINUS,
        KeyCode::Period => KEY_PERIOD,
        KeyCode::Slash => KEY_SLASH,
        KeyCode::Semicolon => KEY_SEMICOLON,
        KeyCode::Equal => KEY_EQUAL,
        KeyCode::BracketLeft => KEY_LEFT_BRACKET,
        KeyCode::Backslash => KEY_BACKSLASH,
        KeyCode::BracketRight => KEY_RIGHT_BRACKET,
        KeyCode::Backquote => KEY_GRAVE_ACCENT,

        KeyCode::Digit0 => KEY_0,
        KeyCode::Digit1 => KEY_1,
        KeyCode::Digit2 => KEY_2,
        KeyCode::Digit3 => KEY_3,
        KeyCode::Digit4 => KEY_4,
        KeyCode::Digit5 => KEY_5,
        KeyCode::Digit6 => KEY_6,
        KeyCode::Digit7 => KEY_7,
        KeyCode::Digit8 => KEY_8,
        KeyCode::Digit9 => KEY_9,

        KeyCode::KeyA => KEY_A,
        KeyCode::KeyB => KEY_B,
        KeyCode::KeyC => KEY_C,
        KeyCode::KeyD => KEY_D,
        KeyCode::KeyE => KEY_E,
        KeyCode::KeyF => KEY_F,
        KeyCode::KeyG => KEY_G,
        KeyCode::KeyH => KEY_H,
        KeyCode::KeyI => KEY_I,
        KeyCode::KeyJ => KEY_J,
        KeyCode::KeyK => KEY_K,
        KeyCode::KeyL => KEY_L,
        KeyCode::KeyM => KEY_M,
        KeyCode::KeyN => KEY_N,
        KeyCode::KeyO => KEY_O,
        KeyCode::KeyP => KEY_P,
        KeyCode::KeyQ => KEY_Q,
        KeyCode::KeyR => KEY_R,
        KeyCode::KeyS => KEY_S,
        KeyCode::KeyT => KEY_T,
        KeyCode::KeyU => KEY_U,
        KeyCode::KeyV => KEY_V,
        KeyCode::KeyW => KEY_W,
        KeyCode::KeyX => KEY_X,
        KeyCode::KeyY => KEY_Y,
        KeyCode::KeyZ => KEY_Z,

        KeyCode::Escape => KEY_ESCAPE,
        KeyCode::Enter => KEY_ENTER,
        KeyCode::Tab => KEY_TAB,
        KeyCode::Backspace => KEY_BACKSPACE,
        KeyCode::Insert => KEY_INSERT,
        KeyCode::Delete => KEY_DELETE,
        KeyCode::ArrowRight => KEY_RIGHT,
        KeyCode::ArrowLeft => KEY_LEFT,
        KeyCode::ArrowDown => KEY_DOWN,
        KeyCode::ArrowUp => KEY_UP,
        KeyCode::PageUp => KEY_PAGE_UP,
        KeyCode::PageDown => KEY_PAGE_DOWN,
        KeyCode::Home => KEY_HOME,
        KeyCode::End => KEY_END,
        KeyCode::CapsLock => KEY_CAPS_LOCK,
        KeyCode::ScrollLock => KEY_SCROLL_LOCK,
        KeyCode::NumLock => KEY_NUM_LOCK,
        KeyCode::PrintScreen => KEY_PRINT_SCREEN,
        KeyCode::Pause => KEY_PAUSE,

        KeyCode::F1 => KEY_F1,
        KeyCode::F2 => KEY_F2,
        KeyCode::F3 => KEY_F3,
        KeyCode::F4 => KEY_F4,
        KeyCode::F5 => KEY_F5,
        KeyCode::F6 => KEY_F6,
        KeyCode::F7 => KEY_F7,
        KeyCode::F8 => KEY_F8,
        KeyCode::F9 => KEY_F9,
        KeyCode::F10 => KEY_F10,
        KeyCode::F11 => KEY_F11,
        KeyCode::F12 => KEY_F12,

        KeyCode::Numpad0 => KEY_KP_0,
        KeyCode::Numpad1 => KEY_KP_1,
        KeyCode::Numpad2 => KEY_KP_2,
        KeyCode::Numpad3 => KEY_KP_3,
        KeyCode::Numpad4 => KEY_KP_4,
        KeyCode::Numpad5 => KEY_KP_5,
        KeyCode::Numpad6 => KEY_KP_6,
        KeyCode::Numpad7 => KEY_KP_7,
        KeyCode::Numpad8 => KEY_KP_8,
        KeyCode::Numpad9 => KEY_KP_9,
        KeyCode::NumpadDecimal => KEY_KP_DECIMAL,
        KeyCode::NumpadDivide => KEY_KP_DIVIDE,
        KeyCode::NumpadMultiply => KEY_KP_MULTIPLY,
        KeyCode::NumpadSubtract => KEY_KP_SUBTRACT,
        KeyCode::NumpadAdd => KEY_KP_ADD,
        KeyCode::NumpadEnter => KEY_KP_ENTER,
        KeyCode::NumpadEqual => KEY_KP_EQUAL,

        KeyCode::ShiftLeft => KEY_LEFT_SHIFT,
        KeyCode::ControlLeft => KEY_LEFT_CONTROL,
        KeyCode::AltLeft => KEY_LEFT_ALT,
        KeyCode::SuperLeft => KEY_LEFT_SUPER,
        KeyCode::ShiftRight => KEY_RIGHT_SHIFT,
        KeyCode::ControlRight => KEY_RIGHT_CONTROL,
        KeyCode::AltRight => KEY_RIGHT_ALT,
        KeyCode::SuperRight => KEY_RIGHT_SUPER,
        KeyCode::ContextMenu => KEY_MENU,

        _ => KEY_UNKNOWN,
    }
}
