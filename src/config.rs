use log::Level;

/// WhatsApp number that receives coverage requests.
pub const WHATSAPP_NUMBER: &str = "553190733964";

// Carousel: 300px card + 20px gap
pub const CARD_STRIDE_PX: i64 = 320;
pub const SMALL_VIEWPORT_PX: f64 = 640.0;
pub const MEDIUM_VIEWPORT_PX: f64 = 1024.0;
pub const SWIPE_THRESHOLD_PX: f64 = 50.0;

pub const HEADER_SCROLL_THRESHOLD_PX: f64 = 50.0;
pub const FLOAT_HIDE_THRESHOLD_PX: f64 = 100.0;
pub const ANCHOR_PADDING_PX: f64 = 20.0;

pub const SUBMIT_DELAY_MS: u32 = 1_000;
pub const BANNER_LIFETIME_MS: u32 = 3_000;
pub const PULSE_DELAY_MS: u32 = 2_000;

pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

/// Images fetched with `<link rel="preload">` as soon as the page starts.
pub const CRITICAL_IMAGES: &[&str] = &[];

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}
