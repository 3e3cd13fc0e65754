use std::rc::Rc;

use log::debug;

use crate::dom::surface::Surface;
use crate::dom::web::{listen, WebSurface};
use crate::error::LandingError;

pub const NAV_TOGGLE_ID: &str = "nav-toggle";
pub const NAV_MENU_ID: &str = "nav-menu";
pub const NAV_LINK_SELECTOR: &str = ".nav-link";
const OPEN_CLASS: &str = "active";

/// Mobile menu panel, opened by the burger toggle and closed by any nav link.
pub struct NavMenu<S: Surface> {
    surface: S,
    menu: S::Node,
}

impl<S: Surface> NavMenu<S> {
    pub fn new(surface: S) -> Result<Self, LandingError> {
        let menu = surface.by_id(NAV_MENU_ID)?;
        Ok(Self { surface, menu })
    }

    pub fn toggle(&self) {
        self.surface.toggle_class(&self.menu, OPEN_CLASS);
        debug!("Nav menu open: {}", self.is_open());
    }

    pub fn close(&self) {
        self.surface.remove_class(&self.menu, OPEN_CLASS);
    }

    pub fn is_open(&self) -> bool {
        self.surface.has_class(&self.menu, OPEN_CLASS)
    }
}

pub fn bind(surface: &WebSurface) -> Result<(), LandingError> {
    let toggle = surface.by_id(NAV_TOGGLE_ID)?;
    let nav = Rc::new(NavMenu::new(surface.clone())?);

    {
        let nav = nav.clone();
        listen(&toggle, "click", move |_| nav.toggle());
    }
    for link in surface.query_all(NAV_LINK_SELECTOR) {
        let nav = nav.clone();
        listen(&link, "click", move |_| nav.close());
    }
    Ok(())
}
