use std::rc::Rc;

use log::debug;

use crate::config::ANCHOR_PADDING_PX;
use crate::controllers::header::HEADER_SELECTOR;
use crate::dom::surface::Surface;
use crate::dom::web::{listen, WebSurface};
use crate::error::LandingError;

pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

/// In-page links that glide to their section, stopping just below the
/// fixed header. The header is measured on every click; a page without one
/// scrolls as if it were zero high.
pub struct AnchorScroller<S: Surface> {
    surface: S,
}

impl<S: Surface> AnchorScroller<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    pub fn target_top(&self, href: &str) -> Option<f64> {
        let target = self.surface.query(href)?;
        let header_height = self
            .surface
            .query(HEADER_SELECTOR)
            .map(|header| self.surface.offset_height(&header))
            .unwrap_or(0.0);
        Some(self.surface.offset_top(&target) - header_height - ANCHOR_PADDING_PX)
    }

    /// Returns whether a scroll was started.
    pub fn follow(&self, href: &str) -> bool {
        match self.target_top(href) {
            Some(top) => {
                self.surface.scroll_to_smooth(top);
                true
            }
            None => {
                debug!("No anchor target for {}", href);
                false
            }
        }
    }
}

pub fn bind(surface: &WebSurface) -> Result<(), LandingError> {
    let scroller = Rc::new(AnchorScroller::new(surface.clone()));

    for anchor in surface.query_all(ANCHOR_SELECTOR) {
        let scroller = scroller.clone();
        let surface = surface.clone();
        let link = anchor.clone();
        listen(&anchor, "click", move |event| {
            event.prevent_default();
            if let Some(href) = surface.attribute(&link, "href") {
                scroller.follow(&href);
            }
        });
    }
    Ok(())
}
