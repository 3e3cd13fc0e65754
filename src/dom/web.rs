use gloo_timers::callback::Timeout;
use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Array, Object};
use web_sys::{
    window, AddEventListenerOptions, Document, Element, ErrorEvent, Event, EventTarget, FormData,
    HtmlElement, HtmlFormElement, HtmlInputElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior, ScrollToOptions, Window,
};
use yew::virtual_dom::AttrValue;
use yew::AppHandle;

use crate::components::success_banner::{SuccessBanner, SuccessBannerProps};
use crate::dom::surface::Surface;
use crate::error::LandingError;

/// The real page, reached through `web_sys`.
#[derive(Clone)]
pub struct WebSurface {
    window: Window,
    document: Document,
}

pub struct WebBanner {
    handle: AppHandle<SuccessBanner>,
    container: Element,
}

impl WebSurface {
    pub fn new() -> Result<Self, LandingError> {
        let window = window().ok_or(LandingError::NoWindow)?;
        let document = window.document().ok_or(LandingError::NoDocument)?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn form<'a>(&self, node: &'a HtmlElement) -> Result<&'a HtmlFormElement, LandingError> {
        node.dyn_ref::<HtmlFormElement>()
            .ok_or_else(|| LandingError::WrongElement(node.id(), "form"))
    }
}

impl Surface for WebSurface {
    type Node = HtmlElement;
    type Banner = WebBanner;

    fn by_id(&self, id: &str) -> Result<HtmlElement, LandingError> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| LandingError::MissingElement(format!("#{}", id)))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| LandingError::WrongElement(format!("#{}", id), "HTML element"))
    }

    fn query(&self, selector: &str) -> Option<HtmlElement> {
        self.document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    fn query_in(&self, root: &HtmlElement, selector: &str) -> Option<HtmlElement> {
        root.query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    fn query_all(&self, selector: &str) -> Vec<HtmlElement> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(err) => {
                warn!("Invalid selector {}: {:?}", selector, err);
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect()
    }

    fn body(&self) -> Result<HtmlElement, LandingError> {
        self.document
            .body()
            .ok_or_else(|| LandingError::MissingElement("body".to_string()))
    }

    fn set_style(&self, node: &HtmlElement, property: &str, value: &str) {
        let _ = node.style().set_property(property, value);
    }

    fn add_class(&self, node: &HtmlElement, class: &str) {
        let _ = node.class_list().add_1(class);
    }

    fn remove_class(&self, node: &HtmlElement, class: &str) {
        let _ = node.class_list().remove_1(class);
    }

    fn toggle_class(&self, node: &HtmlElement, class: &str) {
        let _ = node.class_list().toggle(class);
    }

    fn has_class(&self, node: &HtmlElement, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn attribute(&self, node: &HtmlElement, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &HtmlElement, name: &str, value: &str) {
        let _ = node.set_attribute(name, value);
    }

    fn remove_attribute(&self, node: &HtmlElement, name: &str) {
        let _ = node.remove_attribute(name);
    }

    fn child_count(&self, node: &HtmlElement) -> usize {
        node.child_element_count() as usize
    }

    fn offset_top(&self, node: &HtmlElement) -> f64 {
        node.offset_top() as f64
    }

    fn offset_height(&self, node: &HtmlElement) -> f64 {
        node.offset_height() as f64
    }

    fn value(&self, input: &HtmlElement) -> String {
        input
            .dyn_ref::<HtmlInputElement>()
            .map(|input| input.value())
            .unwrap_or_default()
    }

    fn set_value(&self, input: &HtmlElement, value: &str) {
        if let Some(input) = input.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        }
    }

    fn inner_html(&self, node: &HtmlElement) -> String {
        node.inner_html()
    }

    fn set_inner_html(&self, node: &HtmlElement, html: &str) {
        node.set_inner_html(html);
    }

    fn form_data<T: DeserializeOwned>(&self, form: &HtmlElement) -> Result<T, LandingError> {
        let form = self.form(form)?;
        let data = FormData::new_with_form(form)?;
        let entries = Object::from_entries(&data)?;
        serde_wasm_bindgen::from_value(entries.into())
            .map_err(|err| LandingError::FormData(form.id(), err.to_string()))
    }

    fn reset_form(&self, form: &HtmlElement) {
        if let Ok(form) = self.form(form) {
            form.reset();
        }
    }

    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .unwrap_or(0.0)
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_to_smooth(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn open_in_new_tab(&self, url: &str) -> Result<(), LandingError> {
        self.window.open_with_url_and_target(url, "_blank")?;
        Ok(())
    }

    fn preload_image(&self, href: &str) -> Result<(), LandingError> {
        let link = self.document.create_element("link")?;
        link.set_attribute("rel", "preload")?;
        link.set_attribute("as", "image")?;
        link.set_attribute("href", href)?;
        let head = self
            .document
            .head()
            .ok_or_else(|| LandingError::MissingElement("head".to_string()))?;
        head.append_child(&link)?;
        Ok(())
    }

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        Timeout::new(delay_ms, task).forget();
    }

    fn mount_banner(&self, message: &str) -> Result<WebBanner, LandingError> {
        let container = self.document.create_element("div")?;
        container.set_class_name("success-message");
        self.body()?.append_child(&container)?;

        let props = SuccessBannerProps {
            message: AttrValue::from(message.to_string()),
        };
        let handle =
            yew::Renderer::<SuccessBanner>::with_root_and_props(container.clone(), props).render();
        Ok(WebBanner { handle, container })
    }

    fn dismiss_banner(&self, banner: WebBanner) {
        banner.handle.destroy();
        banner.container.remove();
    }
}

/// Registers `handler` for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F)
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    if let Err(err) = target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
        warn!("Failed to add {} listener: {:?}", event, err);
    }
    callback.forget();
}

/// Like [`listen`], but non-passive so the handler may call `prevent_default`
/// on touch events.
pub fn listen_active<F>(target: &EventTarget, event: &str, handler: F)
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    let options = AddEventListenerOptions::new();
    options.set_passive(false);
    if let Err(err) = target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        callback.as_ref().unchecked_ref(),
        &options,
    ) {
        warn!("Failed to add {} listener: {:?}", event, err);
    }
    callback.forget();
}

pub struct ObserveOptions {
    pub threshold: f64,
    pub root_margin: &'static str,
}

/// Calls `on_visible` for each target entering the viewport. Targets for which
/// it returns `true` are no longer observed.
pub fn observe_intersections<F>(
    targets: &[HtmlElement],
    options: Option<ObserveOptions>,
    mut on_visible: F,
) -> Result<(), LandingError>
where
    F: FnMut(&HtmlElement) -> bool + 'static,
{
    let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let entry: IntersectionObserverEntry = entry.unchecked_into();
            if !entry.is_intersecting() {
                continue;
            }
            if let Ok(target) = entry.target().dyn_into::<HtmlElement>() {
                if on_visible(&target) {
                    observer.unobserve(&target);
                }
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let observer = match options {
        Some(options) => {
            let init = IntersectionObserverInit::new();
            init.set_threshold(&JsValue::from_f64(options.threshold));
            init.set_root_margin(options.root_margin);
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?
        }
        None => IntersectionObserver::new(callback.as_ref().unchecked_ref())?,
    };
    for target in targets {
        observer.observe(target);
    }
    debug!("Observing {} elements", targets.len());
    callback.forget();
    Ok(())
}

/// Logs uncaught page errors. Nothing is reported anywhere else.
pub fn log_uncaught_errors(surface: &WebSurface) {
    listen(surface.window(), "error", |event| match event.dyn_into::<ErrorEvent>() {
        Ok(event) => error!("JavaScript Error: {:?}", event.error()),
        Err(event) => error!("JavaScript Error: {:?}", event),
    });
}

/// Runs `start` once the DOM is parsed.
pub fn on_ready<F>(surface: &WebSurface, start: F)
where
    F: FnOnce() + 'static,
{
    if surface.document().ready_state() != "loading" {
        start();
        return;
    }
    let mut start = Some(start);
    listen(surface.document(), "DOMContentLoaded", move |_| {
        if let Some(start) = start.take() {
            start();
        }
    });
}
