use log::{error, info};

mod config;
mod error;
mod dom {
    pub mod surface;
    pub mod web;
    #[cfg(test)]
    pub mod fake;
}
mod controllers {
    pub mod anchors;
    pub mod carousel;
    pub mod coverage_form;
    pub mod float_button;
    pub mod header;
    pub mod lazy_images;
    pub mod nav;
    pub mod reveal;
}
mod components {
    pub mod success_banner;
}

use controllers::{anchors, carousel, coverage_form, float_button, header, lazy_images, nav, reveal};
use dom::surface::Surface;
use dom::web::{log_uncaught_errors, on_ready, WebSurface};
use error::LandingError;

type Starter<S> = (&'static str, fn(&S) -> Result<(), LandingError>);

const CONTROLLERS: &[Starter<WebSurface>] = &[
    ("navigation", nav::bind),
    ("anchor scrolling", anchors::bind),
    ("plans carousel", carousel::bind),
    ("coverage form", coverage_form::bind),
    ("header", header::bind),
    ("card animations", reveal::bind),
    ("whatsapp button", float_button::bind),
    ("lazy images", lazy_images::bind),
];

/// Starts every controller in order. One that fails is logged and the rest
/// still start. Returns the names of those that started.
fn start_all<S: Surface>(surface: &S, controllers: &[Starter<S>]) -> Vec<&'static str> {
    let mut started = Vec::new();
    for (name, start) in controllers {
        match start(surface) {
            Ok(()) => {
                info!("Started {}", name);
                started.push(*name);
            }
            Err(err) => error!("Could not start {}: {}", name, err),
        }
    }

    match surface.body() {
        Ok(body) => surface.add_class(&body, "loaded"),
        Err(err) => error!("{}", err),
    }
    info!("WI-FI CONECTA+ website initialized successfully!");
    started
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    console_log::init_with_level(config::log_level()).expect("error initializing log");

    let surface = match WebSurface::new() {
        Ok(surface) => surface,
        Err(err) => {
            error!("Landing page not started: {}", err);
            return;
        }
    };
    log_uncaught_errors(&surface);

    let ready = surface.clone();
    on_ready(&surface, move || {
        start_all(&ready, CONTROLLERS);
    });
}
