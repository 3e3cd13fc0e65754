use log::{debug, warn};

use crate::config::CRITICAL_IMAGES;
use crate::dom::surface::Surface;
use crate::dom::web::{observe_intersections, WebSurface};
use crate::error::LandingError;

pub const DEFERRED_SRC_ATTR: &str = "data-src";
pub const DEFERRED_IMAGE_SELECTOR: &str = "img[data-src]";

pub struct LazyImages<S: Surface> {
    surface: S,
}

impl<S: Surface> LazyImages<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    pub fn pending(&self) -> Vec<S::Node> {
        self.surface.query_all(DEFERRED_IMAGE_SELECTOR)
    }

    /// Moves `data-src` into `src`. Returns `true` once the image no longer
    /// needs watching.
    pub fn load(&self, image: &S::Node) -> bool {
        if let Some(src) = self.surface.attribute(image, DEFERRED_SRC_ATTR) {
            debug!("Loading deferred image {}", src);
            self.surface.set_attribute(image, "src", &src);
            self.surface.remove_attribute(image, DEFERRED_SRC_ATTR);
        }
        true
    }

    pub fn preload(&self, sources: &[&str]) {
        for src in sources {
            if let Err(err) = self.surface.preload_image(src) {
                warn!("Failed to preload {}: {}", src, err);
            }
        }
    }
}

pub fn bind(surface: &WebSurface) -> Result<(), LandingError> {
    let images = LazyImages::new(surface.clone());
    images.preload(CRITICAL_IMAGES);

    let pending = images.pending();
    observe_intersections(&pending, None, move |image| images.load(image))
}
