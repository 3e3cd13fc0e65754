use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::JsCast;
use web_sys::TouchEvent;

use crate::config::{CARD_STRIDE_PX, MEDIUM_VIEWPORT_PX, SMALL_VIEWPORT_PX, SWIPE_THRESHOLD_PX};
use crate::dom::surface::Surface;
use crate::dom::web::{listen, listen_active, WebSurface};
use crate::error::LandingError;

pub const TRACK_ID: &str = "mobile-plans-container";
pub const PREV_BUTTON_ID: &str = "prev-btn";
pub const NEXT_BUTTON_ID: &str = "next-btn";

/// How many plan cards fit side by side at this viewport width.
pub fn visible_cards_for(viewport_width: f64) -> usize {
    if viewport_width < SMALL_VIEWPORT_PX {
        1
    } else if viewport_width < MEDIUM_VIEWPORT_PX {
        2
    } else {
        3
    }
}

pub fn max_index(total_cards: usize, visible_cards: usize) -> usize {
    total_cards.saturating_sub(visible_cards)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    Next,
    Prev,
}

/// Direction of a horizontal drag from `start_x` to `end_x`, if it travelled
/// far enough to count.
pub fn swipe_direction(start_x: f64, end_x: f64) -> Option<Swipe> {
    let diff = start_x - end_x;
    if diff.abs() <= SWIPE_THRESHOLD_PX {
        None
    } else if diff > 0.0 {
        Some(Swipe::Next)
    } else {
        Some(Swipe::Prev)
    }
}

pub struct Carousel<S: Surface> {
    surface: S,
    track: S::Node,
    prev_btn: S::Node,
    next_btn: S::Node,
    current_index: usize,
    visible_cards: usize,
    drag_start_x: Option<f64>,
}

impl<S: Surface> Carousel<S> {
    pub fn new(surface: S) -> Result<Self, LandingError> {
        let track = surface.by_id(TRACK_ID)?;
        let prev_btn = surface.by_id(PREV_BUTTON_ID)?;
        let next_btn = surface.by_id(NEXT_BUTTON_ID)?;
        let visible_cards = visible_cards_for(surface.viewport_width());

        let carousel = Self {
            surface,
            track,
            prev_btn,
            next_btn,
            current_index: 0,
            visible_cards,
            drag_start_x: None,
        };
        carousel.render();
        Ok(carousel)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn visible_cards(&self) -> usize {
        self.visible_cards
    }

    /// The card count is read live from the track on every call.
    pub fn max_index(&self) -> usize {
        max_index(self.surface.child_count(&self.track), self.visible_cards)
    }

    pub fn next(&mut self) {
        self.current_index = (self.current_index + 1).min(self.max_index());
        debug!("Carousel next -> {}", self.current_index);
        self.render();
    }

    pub fn prev(&mut self) {
        self.current_index = self.current_index.saturating_sub(1);
        debug!("Carousel prev -> {}", self.current_index);
        self.render();
    }

    pub fn resize(&mut self) {
        self.visible_cards = visible_cards_for(self.surface.viewport_width());
        self.current_index = self.current_index.min(self.max_index());
        debug!(
            "Carousel resized: {} visible, index {}",
            self.visible_cards(),
            self.current_index()
        );
        self.render();
    }

    pub fn touch_start(&mut self, x: f64) {
        self.drag_start_x = Some(x);
    }

    /// Whether the native pan should be suppressed.
    pub fn touch_move(&self) -> bool {
        self.drag_start_x.is_some()
    }

    pub fn touch_end(&mut self, x: f64) {
        let Some(start_x) = self.drag_start_x.take() else {
            return;
        };
        match swipe_direction(start_x, x) {
            Some(Swipe::Next) => self.next(),
            Some(Swipe::Prev) => self.prev(),
            None => debug!("Swipe of {}px ignored", (start_x - x).abs()),
        }
    }

    fn render(&self) {
        let translate_x = -(self.current_index as i64) * CARD_STRIDE_PX;
        self.surface
            .set_style(&self.track, "transform", &format!("translateX({}px)", translate_x));

        let max_index = self.max_index();
        self.set_button(&self.prev_btn, self.current_index == 0);
        self.set_button(&self.next_btn, self.current_index == max_index);
    }

    fn set_button(&self, button: &S::Node, disabled: bool) {
        self.surface.set_disabled(button, disabled);
        self.surface
            .set_style(button, "opacity", if disabled { "0.5" } else { "1" });
    }
}

fn touch_x(event: &TouchEvent, changed: bool) -> Option<f64> {
    let touches = if changed {
        event.changed_touches()
    } else {
        event.touches()
    };
    touches.get(0).map(|touch| touch.client_x() as f64)
}

pub fn bind(surface: &WebSurface) -> Result<(), LandingError> {
    let carousel = Rc::new(RefCell::new(Carousel::new(surface.clone())?));
    let track = surface.by_id(TRACK_ID)?;
    let prev_btn = surface.by_id(PREV_BUTTON_ID)?;
    let next_btn = surface.by_id(NEXT_BUTTON_ID)?;

    {
        let carousel = carousel.clone();
        listen(&prev_btn, "click", move |_| carousel.borrow_mut().prev());
    }
    {
        let carousel = carousel.clone();
        listen(&next_btn, "click", move |_| carousel.borrow_mut().next());
    }
    {
        let carousel = carousel.clone();
        listen(&track, "touchstart", move |event| {
            if let Some(x) = event.dyn_ref::<TouchEvent>().and_then(|e| touch_x(e, false)) {
                carousel.borrow_mut().touch_start(x);
            }
        });
    }
    {
        let carousel = carousel.clone();
        listen_active(&track, "touchmove", move |event| {
            if carousel.borrow().touch_move() {
                event.prevent_default();
            }
        });
    }
    {
        let carousel = carousel.clone();
        listen(&track, "touchend", move |event| {
            if let Some(x) = event.dyn_ref::<TouchEvent>().and_then(|e| touch_x(e, true)) {
                carousel.borrow_mut().touch_end(x);
            }
        });
    }
    listen(surface.window(), "resize", move |_| carousel.borrow_mut().resize());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::fake::FakeSurface;

    struct Page {
        surface: FakeSurface,
        track: usize,
        prev: usize,
        next: usize,
    }

    fn page(width: f64, cards: usize) -> Page {
        let surface = FakeSurface::new(width);
        let track = surface.add_with_id(TRACK_ID);
        surface.with_node(track, |n| n.children = cards);
        let prev = surface.add_with_id(PREV_BUTTON_ID);
        let next = surface.add_with_id(NEXT_BUTTON_ID);
        Page { surface, track, prev, next }
    }

    #[test]
    fn visible_cards_follow_breakpoints() {
        assert_eq!(visible_cards_for(320.0), 1);
        assert_eq!(visible_cards_for(639.0), 1);
        assert_eq!(visible_cards_for(640.0), 2);
        assert_eq!(visible_cards_for(1023.0), 2);
        assert_eq!(visible_cards_for(1024.0), 3);
        assert_eq!(visible_cards_for(1920.0), 3);
    }

    #[test]
    fn max_index_never_goes_negative() {
        assert_eq!(max_index(5, 3), 2);
        assert_eq!(max_index(3, 3), 0);
        assert_eq!(max_index(2, 3), 0);
        assert_eq!(max_index(0, 1), 0);
    }

    #[test]
    fn starts_at_zero_with_prev_disabled() {
        let p = page(400.0, 4);
        let carousel = Carousel::new(p.surface.clone()).unwrap();

        assert_eq!(carousel.current_index(), 0);
        assert_eq!(p.surface.style(p.track, "transform").as_deref(), Some("translateX(0px)"));
        assert!(p.surface.node(p.prev).attributes.contains_key("disabled"));
        assert_eq!(p.surface.style(p.prev, "opacity").as_deref(), Some("0.5"));
        assert!(!p.surface.node(p.next).attributes.contains_key("disabled"));
        assert_eq!(p.surface.style(p.next, "opacity").as_deref(), Some("1"));
    }

    #[test]
    fn next_translates_by_one_stride_and_clamps() {
        let p = page(400.0, 3);
        let mut carousel = Carousel::new(p.surface.clone()).unwrap();

        carousel.next();
        assert_eq!(carousel.current_index(), 1);
        assert_eq!(p.surface.style(p.track, "transform").as_deref(), Some("translateX(-320px)"));

        carousel.next();
        carousel.next();
        carousel.next();
        assert_eq!(carousel.current_index(), 2);
        assert_eq!(p.surface.style(p.track, "transform").as_deref(), Some("translateX(-640px)"));
        assert!(p.surface.node(p.next).attributes.contains_key("disabled"));
        assert!(!p.surface.node(p.prev).attributes.contains_key("disabled"));
    }

    #[test]
    fn prev_at_zero_stays_at_zero() {
        let p = page(400.0, 3);
        let mut carousel = Carousel::new(p.surface.clone()).unwrap();
        carousel.prev();
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn next_then_prev_is_reversible_away_from_boundaries() {
        let p = page(400.0, 6);
        let mut carousel = Carousel::new(p.surface.clone()).unwrap();
        let max = carousel.max_index();

        for start in 0..=max {
            while carousel.current_index() > start {
                carousel.prev();
            }
            while carousel.current_index() < start {
                carousel.next();
            }
            if start < max {
                carousel.next();
                carousel.prev();
                assert_eq!(carousel.current_index(), start);
            }
            if start > 0 {
                carousel.prev();
                carousel.next();
                assert_eq!(carousel.current_index(), start);
            }
        }
    }

    #[test]
    fn fewer_cards_than_slots_disables_both_buttons() {
        let p = page(1280.0, 2);
        let mut carousel = Carousel::new(p.surface.clone()).unwrap();
        carousel.next();

        assert_eq!(carousel.current_index(), 0);
        assert!(p.surface.node(p.prev).attributes.contains_key("disabled"));
        assert!(p.surface.node(p.next).attributes.contains_key("disabled"));
    }

    #[test]
    fn resize_reclamps_index() {
        let p = page(400.0, 5);
        let mut carousel = Carousel::new(p.surface.clone()).unwrap();
        for _ in 0..4 {
            carousel.next();
        }
        assert_eq!(carousel.current_index(), 4);

        p.surface.set_viewport_width(1200.0);
        carousel.resize();
        assert_eq!(carousel.visible_cards(), 3);
        assert_eq!(carousel.current_index(), 2);
        assert_eq!(p.surface.style(p.track, "transform").as_deref(), Some("translateX(-640px)"));
        assert!(p.surface.node(p.next).attributes.contains_key("disabled"));
    }

    #[test]
    fn index_stays_in_bounds_across_resize_sequences() {
        let widths = [300.0, 1500.0, 700.0, 500.0, 1024.0, 639.0, 640.0, 2000.0, 320.0];
        for cards in 0..7 {
            let p = page(300.0, cards);
            let mut carousel = Carousel::new(p.surface.clone()).unwrap();
            for (step, width) in widths.iter().enumerate() {
                for _ in 0..step {
                    carousel.next();
                }
                p.surface.set_viewport_width(*width);
                carousel.resize();
                let bound = cards.saturating_sub(visible_cards_for(*width));
                assert!(carousel.current_index() <= bound);
            }
        }
    }

    #[test]
    fn swipe_threshold_is_exclusive() {
        assert_eq!(swipe_direction(200.0, 151.0), None);
        assert_eq!(swipe_direction(200.0, 150.0), None);
        assert_eq!(swipe_direction(200.0, 149.0), Some(Swipe::Next));
        assert_eq!(swipe_direction(100.0, 151.0), Some(Swipe::Prev));
        assert_eq!(swipe_direction(100.0, 149.0), None);
    }

    #[test]
    fn short_drag_does_not_move() {
        let p = page(400.0, 4);
        let mut carousel = Carousel::new(p.surface.clone()).unwrap();

        carousel.touch_start(300.0);
        assert!(carousel.touch_move());
        carousel.touch_end(251.0);
        assert_eq!(carousel.current_index(), 0);
        assert!(!carousel.touch_move());
    }

    #[test]
    fn long_drag_steps_exactly_once() {
        let p = page(400.0, 4);
        let mut carousel = Carousel::new(p.surface.clone()).unwrap();

        carousel.touch_start(300.0);
        carousel.touch_end(249.0);
        assert_eq!(carousel.current_index(), 1);

        carousel.touch_start(100.0);
        carousel.touch_end(151.0);
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn touch_end_without_start_is_ignored() {
        let p = page(400.0, 4);
        let mut carousel = Carousel::new(p.surface.clone()).unwrap();

        assert!(!carousel.touch_move());
        carousel.touch_end(0.0);
        assert_eq!(carousel.current_index(), 0);
    }
}
