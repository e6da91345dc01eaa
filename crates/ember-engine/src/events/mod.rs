//! Typed window and input events and the callback table they are dispatched through.

mod event;
mod handler;

pub use event::{
    Event, EventCategory, EventType, KeyPressedEvent, KeyReleasedEvent, KeyTypedEvent,
    MouseButtonPressedEvent, MouseButtonReleasedEvent, MouseMovedEvent, MouseScrolledEvent,
    TypedEvent, WindowCloseEvent, WindowFocusEvent, WindowLostFocusEvent, WindowMovedEvent,
    WindowResizeEvent,
};
pub use handler::{EventCallback, EventHandler};
