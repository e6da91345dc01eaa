use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use glam::{IVec2, UVec2, Vec2};

/// The twelve event kinds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EventType {
    WindowClose,
    WindowResize,
    WindowFocus,
    WindowLostFocus,
    WindowMoved,
    KeyPressed,
    KeyReleased,
    KeyTyped,
    MouseButtonPressed,
    MouseButtonReleased,
    MouseMoved,
    MouseScrolled,
}

impl EventType {
    pub const ALL: [EventType; 12] = [
        Self::WindowClose,
        Self::WindowResize,
        Self::WindowFocus,
        Self::WindowLostFocus,
        Self::WindowMoved,
        Self::KeyPressed,
        Self::KeyReleased,
        Self::KeyTyped,
        Self::MouseButtonPressed,
        Self::MouseButtonReleased,
        Self::MouseMoved,
        Self::MouseScrolled,
    ];
}

/// Category bitmask. Combine with `|`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct EventCategory(u32);

impl EventCategory {
    pub const NONE: Self = Self(0);
    pub const WINDOW: Self = Self(1);
    pub const INPUT: Self = Self(1 << 1);
    pub const KEYBOARD: Self = Self(1 << 2);
    pub const MOUSE: Self = Self(1 << 3);
    pub const MOUSE_BUTTON: Self = Self(1 << 4);

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True if every bit of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for EventCategory {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for EventCategory {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Implemented by every concrete event; ties it to its [`Event`] variant.
pub trait TypedEvent: fmt::Debug + Sized + 'static {
    const TYPE: EventType;
    const CATEGORY: EventCategory;

    fn handled(&self) -> bool;
    fn handle(&mut self, handled: bool);

    fn event_type(&self) -> EventType {
        Self::TYPE
    }

    fn category(&self) -> EventCategory {
        Self::CATEGORY
    }

    fn is_in_category(&self, category: EventCategory) -> bool {
        Self::CATEGORY.contains(category)
    }

    fn from_event_mut(event: &mut Event) -> Option<&mut Self>;
    fn into_event(self) -> Event;
}

macro_rules! typed_event {
    ($name:ident, $variant:ident, $category:expr) => {
        impl TypedEvent for $name {
            const TYPE: EventType = EventType::$variant;
            const CATEGORY: EventCategory = $category;

            fn handled(&self) -> bool {
                self.handled
            }

            fn handle(&mut self, handled: bool) {
                self.handled = handled;
            }

            fn from_event_mut(event: &mut Event) -> Option<&mut Self> {
                match event {
                    Event::$variant(e) => Some(e),
                    _ => None,
                }
            }

            fn into_event(self) -> Event {
                Event::$variant(self)
            }
        }

        impl From<$name> for Event {
            fn from(e: $name) -> Self {
                Event::$variant(e)
            }
        }
    };
}

const WINDOW: EventCategory = EventCategory::WINDOW;
const KEYBOARD: EventCategory = EventCategory(EventCategory::KEYBOARD.0 | EventCategory::INPUT.0);
const MOUSE: EventCategory = EventCategory(EventCategory::MOUSE.0 | EventCategory::INPUT.0);
const MOUSE_BUTTON: EventCategory = EventCategory(MOUSE.0 | EventCategory::MOUSE_BUTTON.0);

// ── window ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindowCloseEvent {
    handled: bool,
}

impl WindowCloseEvent {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowResizeEvent {
    width: u32,
    height: u32,
    handled: bool,
}

impl WindowResizeEvent {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            handled: false,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindowFocusEvent {
    handled: bool,
}

impl WindowFocusEvent {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindowLostFocusEvent {
    handled: bool,
}

impl WindowLostFocusEvent {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Window position in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowMovedEvent {
    x: i32,
    y: i32,
    handled: bool,
}

impl WindowMovedEvent {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y, handled: false }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn position(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }
}

typed_event!(WindowCloseEvent, WindowClose, WINDOW);
typed_event!(WindowResizeEvent, WindowResize, WINDOW);
typed_event!(WindowFocusEvent, WindowFocus, WINDOW);
typed_event!(WindowLostFocusEvent, WindowLostFocus, WINDOW);
typed_event!(WindowMovedEvent, WindowMoved, WINDOW);

// ── keyboard ──────────────────────────────────────────────────────────────

/// Key codes are the values in [`crate::input::key_codes`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyPressedEvent {
    key_code: i32,
    repeat: bool,
    handled: bool,
}

impl KeyPressedEvent {
    pub fn new(key_code: i32, repeat: bool) -> Self {
        Self {
            key_code,
            repeat,
            handled: false,
        }
    }

    pub fn key_code(&self) -> i32 {
        self.key_code
    }

    pub fn is_repeat(&self) -> bool {
        self.repeat
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyReleasedEvent {
    key_code: i32,
    handled: bool,
}

impl KeyReleasedEvent {
    pub fn new(key_code: i32) -> Self {
        Self {
            key_code,
            handled: false,
        }
    }

    pub fn key_code(&self) -> i32 {
        self.key_code
    }
}

/// A character produced by the keyboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyTypedEvent {
    character: char,
    handled: bool,
}

impl KeyTypedEvent {
    pub fn new(character: char) -> Self {
        Self {
            character,
            handled: false,
        }
    }

    pub fn character(&self) -> char {
        self.character
    }
}

typed_event!(KeyPressedEvent, KeyPressed, KEYBOARD);
typed_event!(KeyReleasedEvent, KeyReleased, KEYBOARD);
typed_event!(KeyTypedEvent, KeyTyped, KEYBOARD);

// ── mouse ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseButtonPressedEvent {
    button: i32,
    handled: bool,
}

impl MouseButtonPressedEvent {
    pub fn new(button: i32) -> Self {
        Self {
            button,
            handled: false,
        }
    }

    pub fn button(&self) -> i32 {
        self.button
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseButtonReleasedEvent {
    button: i32,
    handled: bool,
}

impl MouseButtonReleasedEvent {
    pub fn new(button: i32) -> Self {
        Self {
            button,
            handled: false,
        }
    }

    pub fn button(&self) -> i32 {
        self.button
    }
}

/// Cursor position in window pixels, Y down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseMovedEvent {
    x: f32,
    y: f32,
    handled: bool,
}

impl MouseMovedEvent {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, handled: false }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseScrolledEvent {
    x_offset: f32,
    y_offset: f32,
    handled: bool,
}

impl MouseScrolledEvent {
    pub fn new(x_offset: f32, y_offset: f32) -> Self {
        Self {
            x_offset,
            y_offset,
            handled: false,
        }
    }

    pub fn x_offset(&self) -> f32 {
        self.x_offset
    }

    pub fn y_offset(&self) -> f32 {
        self.y_offset
    }

    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.x_offset, self.y_offset)
    }
}

typed_event!(MouseButtonPressedEvent, MouseButtonPressed, MOUSE_BUTTON);
typed_event!(MouseButtonReleasedEvent, MouseButtonReleased, MOUSE_BUTTON);
typed_event!(MouseMovedEvent, MouseMoved, MOUSE);
typed_event!(MouseScrolledEvent, MouseScrolled, MOUSE);

// ── erased ────────────────────────────────────────────────────────────────

/// Any one of the concrete events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    WindowClose(WindowCloseEvent),
    WindowResize(WindowResizeEvent),
    WindowFocus(WindowFocusEvent),
    WindowLostFocus(WindowLostFocusEvent),
    WindowMoved(WindowMovedEvent),
    KeyPressed(KeyPressedEvent),
    KeyReleased(KeyReleasedEvent),
    KeyTyped(KeyTypedEvent),
    MouseButtonPressed(MouseButtonPressedEvent),
    MouseButtonReleased(MouseButtonReleasedEvent),
    MouseMoved(MouseMovedEvent),
    MouseScrolled(MouseScrolledEvent),
}

macro_rules! each_event {
    ($self:expr, $e:ident => $body:expr) => {
        match $self {
            Event::WindowClose($e) => $body,
            Event::WindowResize($e) => $body,
            Event::WindowFocus($e) => $body,
            Event::WindowLostFocus($e) => $body,
            Event::WindowMoved($e) => $body,
            Event::KeyPressed($e) => $body,
            Event::KeyReleased($e) => $body,
            Event::KeyTyped($e) => $body,
            Event::MouseButtonPressed($e) => $body,
            Event::MouseButtonReleased($e) => $body,
            Event::MouseMoved($e) => $body,
            Event::MouseScrolled($e) => $body,
        }
    };
}

impl Event {
    pub fn event_type(&self) -> EventType {
        each_event!(self, e => e.event_type())
    }

    pub fn category(&self) -> EventCategory {
        each_event!(self, e => e.category())
    }

    pub fn is_in_category(&self, category: EventCategory) -> bool {
        self.category().contains(category)
    }

    pub fn handled(&self) -> bool {
        each_event!(self, e => e.handled())
    }

    pub fn handle(&mut self, handled: bool) {
        each_event!(self, e => e.handle(handled))
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::WindowResize(e) => write!(f, "WindowResize: {}, {}", e.width, e.height),
            Event::WindowMoved(e) => write!(f, "WindowMoved: {}, {}", e.x, e.y),
            Event::KeyPressed(e) => write!(f, "KeyPressed: {} (repeat = {})", e.key_code, e.repeat),
            Event::KeyReleased(e) => write!(f, "KeyReleased: {}", e.key_code),
            Event::KeyTyped(e) => write!(f, "KeyTyped: {:?}", e.character),
            Event::MouseButtonPressed(e) => write!(f, "MouseButtonPressed: {}", e.button),
            Event::MouseButtonReleased(e) => write!(f, "MouseButtonReleased: {}", e.button),
            Event::MouseMoved(e) => write!(f, "MouseMoved: {}, {}", e.x, e.y),
            Event::MouseScrolled(e) => write!(f, "MouseScrolled: {}, {}", e.x_offset, e.y_offset),
            other => write!(f, "{:?}", other.event_type()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── payloads ──────────────────────────────────────────────────────────

    #[test]
    fn window_resize_round_trip() {
        let e = WindowResizeEvent::new(800, 600);
        assert_eq!(e.width(), 800);
        assert_eq!(e.height(), 600);
        assert_eq!(e.size(), UVec2::new(800, 600));
        assert_eq!(e.category(), EventCategory::WINDOW);
        assert!(e.is_in_category(EventCategory::WINDOW));
        assert!(!e.is_in_category(EventCategory::INPUT));
        assert_eq!(e.event_type(), WindowResizeEvent::TYPE);
        assert_eq!(e.event_type(), EventType::WindowResize);
    }

    #[test]
    fn erased_event_matches_concrete() {
        let mut ev: Event = KeyPressedEvent::new(65, true).into();
        assert_eq!(ev.event_type(), EventType::KeyPressed);
        assert!(ev.is_in_category(EventCategory::KEYBOARD));
        assert!(ev.is_in_category(EventCategory::INPUT));
        assert!(!ev.is_in_category(EventCategory::MOUSE));

        let key = KeyPressedEvent::from_event_mut(&mut ev).unwrap();
        assert_eq!(key.key_code(), 65);
        assert!(key.is_repeat());
        assert!(KeyReleasedEvent::from_event_mut(&mut ev).is_none());
    }

    #[test]
    fn mouse_button_categories() {
        let ev = Event::from(MouseButtonPressedEvent::new(0));
        assert!(ev.is_in_category(EventCategory::MOUSE_BUTTON));
        assert!(ev.is_in_category(EventCategory::MOUSE));
        assert!(ev.is_in_category(EventCategory::INPUT));
        assert!(!ev.is_in_category(EventCategory::WINDOW));

        let moved = Event::from(MouseMovedEvent::new(1.0, 2.0));
        assert!(!moved.is_in_category(EventCategory::MOUSE_BUTTON));
    }

    // ── handled flag ──────────────────────────────────────────────────────

    #[test]
    fn handled_starts_false_and_is_settable() {
        let mut ev = Event::from(WindowCloseEvent::new());
        assert!(!ev.handled());
        ev.handle(true);
        assert!(ev.handled());
        ev.handle(false);
        assert!(!ev.handled());
    }

    #[test]
    fn display_includes_payload() {
        let ev = Event::from(WindowResizeEvent::new(800, 600));
        assert_eq!(ev.to_string(), "WindowResize: 800, 600");
        assert_eq!(Event::from(WindowCloseEvent::new()).to_string(), "WindowClose");
    }
}
