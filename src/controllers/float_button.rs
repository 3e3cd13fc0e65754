use std::cell::RefCell;
use std::rc::Rc;

use crate::config::{FLOAT_HIDE_THRESHOLD_PX, PULSE_DELAY_MS};
use crate::dom::surface::Surface;
use crate::dom::web::{listen, WebSurface};
use crate::error::LandingError;

pub const FLOAT_SELECTOR: &str = ".whatsapp-float";
const PULSE_ANIMATION: &str = "float 3s ease-in-out infinite, pulse 2s infinite";

/// Floating WhatsApp button: slides away while the reader scrolls down and
/// comes back on the way up.
pub struct FloatButton<S: Surface> {
    surface: S,
    button: S::Node,
    last_scroll_y: f64,
}

impl<S: Surface> FloatButton<S> {
    pub fn new(surface: S) -> Result<Self, LandingError> {
        let button = surface
            .query(FLOAT_SELECTOR)
            .ok_or_else(|| LandingError::MissingElement(FLOAT_SELECTOR.to_string()))?;
        let last_scroll_y = surface.scroll_y();
        Ok(Self {
            surface,
            button,
            last_scroll_y,
        })
    }

    pub fn start_pulse(&self) {
        self.surface.set_style(&self.button, "animation", PULSE_ANIMATION);
    }

    pub fn on_scroll(&mut self) {
        let current = self.surface.scroll_y();
        if current > FLOAT_HIDE_THRESHOLD_PX {
            let transform = if current > self.last_scroll_y {
                "translateX(100px)"
            } else {
                "translateX(0)"
            };
            self.surface.set_style(&self.button, "transform", transform);
        }
        self.last_scroll_y = current;
    }
}

pub fn bind(surface: &WebSurface) -> Result<(), LandingError> {
    let button = Rc::new(RefCell::new(FloatButton::new(surface.clone())?));

    {
        let button = button.clone();
        surface.schedule(
            PULSE_DELAY_MS,
            Box::new(move || button.borrow().start_pulse()),
        );
    }
    listen(surface.window(), "scroll", move |_| button.borrow_mut().on_scroll());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::fake::FakeSurface;

    fn setup() -> (FakeSurface, usize, FloatButton<FakeSurface>) {
        let surface = FakeSurface::new(800.0);
        let node = surface.add_matching(FLOAT_SELECTOR);
        let button = FloatButton::new(surface.clone()).unwrap();
        (surface, node, button)
    }

    fn scroll(surface: &FakeSurface, button: &mut FloatButton<FakeSurface>, y: f64) {
        surface.set_scroll_y(y);
        button.on_scroll();
    }

    #[test]
    fn hides_scrolling_down_and_returns_scrolling_up() {
        let (surface, node, mut button) = setup();

        scroll(&surface, &mut button, 150.0);
        assert_eq!(surface.style(node, "transform").as_deref(), Some("translateX(100px)"));

        scroll(&surface, &mut button, 130.0);
        assert_eq!(surface.style(node, "transform").as_deref(), Some("translateX(0)"));
    }

    #[test]
    fn near_the_top_nothing_moves() {
        let (surface, node, mut button) = setup();

        scroll(&surface, &mut button, 40.0);
        scroll(&surface, &mut button, 100.0);
        assert_eq!(surface.style(node, "transform"), None);
    }

    #[test]
    fn last_position_tracks_every_event() {
        let (surface, node, mut button) = setup();

        // a dip under the threshold still counts as the previous position
        scroll(&surface, &mut button, 300.0);
        scroll(&surface, &mut button, 250.0);
        assert_eq!(surface.style(node, "transform").as_deref(), Some("translateX(0)"));
        scroll(&surface, &mut button, 50.0);
        scroll(&surface, &mut button, 120.0);
        assert_eq!(surface.style(node, "transform").as_deref(), Some("translateX(100px)"));
    }

    #[test]
    fn pulse_sets_animation() {
        let (surface, node, button) = setup();
        button.start_pulse();
        assert_eq!(surface.style(node, "animation").as_deref(), Some(PULSE_ANIMATION));
    }
}
