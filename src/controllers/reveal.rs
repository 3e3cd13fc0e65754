use std::rc::Rc;

use crate::config::{REVEAL_ROOT_MARGIN, REVEAL_THRESHOLD};
use crate::dom::surface::Surface;
use crate::dom::web::{listen, observe_intersections, ObserveOptions, WebSurface};
use crate::error::LandingError;

pub const REVEAL_SELECTOR: &str = ".plan-card, .benefit-card, .testimonial-card";
pub const PLAN_CARD_SELECTOR: &str = ".plan-card";
const FEATURED_CLASS: &str = "featured";

/// Fade-and-rise entrance for cards, plus the plan card hover lift.
pub struct Reveal<S: Surface> {
    surface: S,
}

impl<S: Surface> Reveal<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    /// Hides every revealable card and returns them for observation.
    pub fn prepare(&self) -> Vec<S::Node> {
        let cards = self.surface.query_all(REVEAL_SELECTOR);
        for card in &cards {
            self.surface.set_style(card, "opacity", "0");
            self.surface.set_style(card, "transform", "translateY(30px)");
            self.surface
                .set_style(card, "transition", "opacity 0.6s ease, transform 0.6s ease");
        }
        cards
    }

    /// Always done after the first reveal.
    pub fn reveal(&self, card: &S::Node) -> bool {
        self.surface.set_style(card, "opacity", "1");
        self.surface.set_style(card, "transform", "translateY(0)");
        true
    }

    pub fn hover_in(&self, card: &S::Node) {
        self.surface
            .set_style(card, "transform", "translateY(-10px) scale(1.02)");
    }

    pub fn hover_out(&self, card: &S::Node) {
        let transform = if self.surface.has_class(card, FEATURED_CLASS) {
            "scale(1.05)"
        } else {
            "translateY(0) scale(1)"
        };
        self.surface.set_style(card, "transform", transform);
    }
}

pub fn bind(surface: &WebSurface) -> Result<(), LandingError> {
    let reveal = Rc::new(Reveal::new(surface.clone()));

    for card in surface.query_all(PLAN_CARD_SELECTOR) {
        {
            let reveal = reveal.clone();
            let target = card.clone();
            listen(&card, "mouseenter", move |_| reveal.hover_in(&target));
        }
        let reveal = reveal.clone();
        let target = card.clone();
        listen(&card, "mouseleave", move |_| reveal.hover_out(&target));
    }

    let cards = reveal.prepare();
    let options = ObserveOptions {
        threshold: REVEAL_THRESHOLD,
        root_margin: REVEAL_ROOT_MARGIN,
    };
    observe_intersections(&cards, Some(options), move |card| reveal.reveal(card))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::fake::FakeSurface;

    #[test]
    fn prepare_hides_all_card_kinds() {
        let surface = FakeSurface::new(800.0);
        let plan = surface.add_matching(".plan-card");
        let benefit = surface.add_matching(".benefit-card");
        let testimonial = surface.add_matching(".testimonial-card");
        let other = surface.add_matching(".footer");

        let cards = Reveal::new(surface.clone()).prepare();
        assert_eq!(cards, vec![plan, benefit, testimonial]);
        for card in cards {
            assert_eq!(surface.style(card, "opacity").as_deref(), Some("0"));
            assert_eq!(surface.style(card, "transform").as_deref(), Some("translateY(30px)"));
        }
        assert_eq!(surface.style(other, "opacity"), None);
    }

    #[test]
    fn reveal_is_final() {
        let surface = FakeSurface::new(800.0);
        let card = surface.add_matching(".benefit-card");
        let reveal = Reveal::new(surface.clone());
        reveal.prepare();

        assert!(reveal.reveal(&card));
        assert_eq!(surface.style(card, "opacity").as_deref(), Some("1"));
        assert_eq!(surface.style(card, "transform").as_deref(), Some("translateY(0)"));
    }

    #[test]
    fn featured_card_keeps_its_scale_after_hover() {
        let surface = FakeSurface::new(800.0);
        let plain = surface.add_matching(".plan-card");
        let featured = surface.add_matching(".plan-card");
        surface.add_class(&featured, "featured");
        let reveal = Reveal::new(surface.clone());

        reveal.hover_in(&plain);
        assert_eq!(surface.style(plain, "transform").as_deref(), Some("translateY(-10px) scale(1.02)"));
        reveal.hover_out(&plain);
        assert_eq!(surface.style(plain, "transform").as_deref(), Some("translateY(0) scale(1)"));

        reveal.hover_in(&featured);
        reveal.hover_out(&featured);
        assert_eq!(surface.style(featured, "transform").as_deref(), Some("scale(1.05)"));
    }
}
