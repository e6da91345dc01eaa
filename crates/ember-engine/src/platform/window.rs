use winit::dpi::LogicalSize;
use winit::window::{Fullscreen, WindowAttributes};

/// Window creation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowProperties {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Borderless fullscreen on the current monitor.
    pub fullscreen: bool,
    /// Applied by whoever creates the GL context; winit has no swap interval.
    pub vsync: bool,
}

impl Default for WindowProperties {
    fn default() -> Self {
        Self {
            title: "My Window".to_string(),
            width: 800,
            height: 600,
            fullscreen: false,
            vsync: true,
        }
    }
}

impl WindowProperties {
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            ..Self::default()
        }
    }

    pub fn attributes(&self) -> WindowAttributes {
        let attrs = WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(self.width, self.height));
        if self.fullscreen {
            attrs.with_fullscreen(Some(Fullscreen::Borderless(None)))
        } else {
            attrs
        }
    }
}

impl From<&WindowProperties> for WindowAttributes {
    fn from(props: &WindowProperties) -> Self {
        props.attributes()
    }
}
