use std::rc::Rc;

use crate::config::HEADER_SCROLL_THRESHOLD_PX;
use crate::dom::surface::Surface;
use crate::dom::web::{listen, WebSurface};
use crate::error::LandingError;

pub const HEADER_SELECTOR: &str = ".header";

pub fn is_scrolled(scroll_y: f64) -> bool {
    scroll_y > HEADER_SCROLL_THRESHOLD_PX
}

/// Solid background and drop shadow once the page leaves the top.
///
/// There is no hysteresis, so the header can flicker when the page rests
/// exactly on the threshold.
pub struct HeaderBackdrop<S: Surface> {
    surface: S,
    header: S::Node,
}

impl<S: Surface> HeaderBackdrop<S> {
    pub fn new(surface: S) -> Result<Self, LandingError> {
        let header = surface
            .query(HEADER_SELECTOR)
            .ok_or_else(|| LandingError::MissingElement(HEADER_SELECTOR.to_string()))?;
        Ok(Self { surface, header })
    }

    pub fn on_scroll(&self) {
        let (background, shadow) = if is_scrolled(self.surface.scroll_y()) {
            ("rgba(255, 255, 255, 0.98)", "0 2px 20px rgba(0,0,0,0.1)")
        } else {
            ("rgba(255, 255, 255, 0.95)", "none")
        };
        self.surface.set_style(&self.header, "background", background);
        self.surface.set_style(&self.header, "box-shadow", shadow);
    }
}

pub fn bind(surface: &WebSurface) -> Result<(), LandingError> {
    let header = Rc::new(HeaderBackdrop::new(surface.clone())?);
    listen(surface.window(), "scroll", move |_| header.on_scroll());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::fake::FakeSurface;

    #[test]
    fn threshold_is_strict() {
        assert!(!is_scrolled(0.0));
        assert!(!is_scrolled(50.0));
        assert!(is_scrolled(50.5));
        assert!(is_scrolled(900.0));
    }

    #[test]
    fn scroll_switches_between_two_states() {
        let surface = FakeSurface::new(800.0);
        let node = surface.add_matching(HEADER_SELECTOR);
        let header = HeaderBackdrop::new(surface.clone()).unwrap();

        surface.set_scroll_y(120.0);
        header.on_scroll();
        assert_eq!(surface.style(node, "background").as_deref(), Some("rgba(255, 255, 255, 0.98)"));
        assert_eq!(surface.style(node, "box-shadow").as_deref(), Some("0 2px 20px rgba(0,0,0,0.1)"));

        surface.set_scroll_y(50.0);
        header.on_scroll();
        assert_eq!(surface.style(node, "background").as_deref(), Some("rgba(255, 255, 255, 0.95)"));
        assert_eq!(surface.style(node, "box-shadow").as_deref(), Some("none"));
    }
}
