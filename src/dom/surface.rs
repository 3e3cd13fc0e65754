use std::fmt::Debug;

use serde::de::DeserializeOwned;

use crate::error::LandingError;

/// Everything the page controllers are allowed to do to the page.
///
/// Controllers never touch `web_sys` directly; they receive a `Surface` and
/// express their effects through it. The browser implementation lives in
/// [`crate::dom::web::WebSurface`].
pub trait Surface: Clone + 'static {
    type Node: Clone + PartialEq + Debug + 'static;
    /// Handle to a mounted success banner, consumed by `dismiss_banner`.
    type Banner: 'static;

    fn by_id(&self, id: &str) -> Result<Self::Node, LandingError>;
    /// First match for `selector`. Invalid selectors match nothing.
    fn query(&self, selector: &str) -> Option<Self::Node>;
    fn query_in(&self, root: &Self::Node, selector: &str) -> Option<Self::Node>;
    /// All matches for `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;
    fn body(&self) -> Result<Self::Node, LandingError>;

    fn set_style(&self, node: &Self::Node, property: &str, value: &str);
    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);
    fn toggle_class(&self, node: &Self::Node, class: &str);
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);
    fn remove_attribute(&self, node: &Self::Node, name: &str);

    fn set_disabled(&self, node: &Self::Node, disabled: bool) {
        if disabled {
            self.set_attribute(node, "disabled", "");
        } else {
            self.remove_attribute(node, "disabled");
        }
    }

    fn child_count(&self, node: &Self::Node) -> usize;
    fn offset_top(&self, node: &Self::Node) -> f64;
    fn offset_height(&self, node: &Self::Node) -> f64;

    /// Current text of an input element.
    fn value(&self, input: &Self::Node) -> String;
    fn set_value(&self, input: &Self::Node, value: &str);
    fn inner_html(&self, node: &Self::Node) -> String;
    fn set_inner_html(&self, node: &Self::Node, html: &str);

    /// Named fields of a form, deserialized into `T`.
    fn form_data<T: DeserializeOwned>(&self, form: &Self::Node) -> Result<T, LandingError>;
    fn reset_form(&self, form: &Self::Node);

    fn viewport_width(&self) -> f64;
    fn scroll_y(&self) -> f64;
    fn scroll_to_smooth(&self, top: f64);
    fn open_in_new_tab(&self, url: &str) -> Result<(), LandingError>;
    fn preload_image(&self, href: &str) -> Result<(), LandingError>;

    /// Runs `task` once after `delay_ms`. Scheduled tasks cannot be cancelled.
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>);

    fn mount_banner(&self, message: &str) -> Result<Self::Banner, LandingError>;
    fn dismiss_banner(&self, banner: Self::Banner);
}
