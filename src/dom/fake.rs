//! In-memory page used by the controller tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;

use serde::de::DeserializeOwned;

use crate::dom::surface::Surface;
use crate::error::LandingError;

#[derive(Debug, Default, Clone)]
pub struct FakeNode {
    pub id: Option<String>,
    pub parent: Option<usize>,
    pub selectors: Vec<String>,
    pub classes: BTreeSet<String>,
    pub styles: HashMap<String, String>,
    pub attributes: HashMap<String, String>,
    pub children: usize,
    pub value: String,
    pub inner_html: String,
    pub fields: BTreeMap<String, String>,
    pub offset_top: f64,
    pub offset_height: f64,
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub nodes: Vec<FakeNode>,
    pub viewport_width: f64,
    pub scroll_y: f64,
    pub scrolled_to: Vec<f64>,
    pub opened: Vec<String>,
    pub preloaded: Vec<String>,
    pub banners: Vec<Option<String>>,
    pub resets: Vec<usize>,
}

type Task = Box<dyn FnOnce()>;

#[derive(Clone, Default)]
pub struct FakeSurface {
    state: Rc<RefCell<FakeState>>,
    clock_ms: Rc<Cell<u64>>,
    timers: Rc<RefCell<Vec<(u64, Task)>>>,
}

impl FakeSurface {
    pub fn new(viewport_width: f64) -> Self {
        let surface = Self::default();
        surface.state.borrow_mut().viewport_width = viewport_width;
        // node 0 is always <body>
        surface.add(FakeNode {
            selectors: vec!["body".to_string()],
            ..FakeNode::default()
        });
        surface
    }

    pub fn add(&self, node: FakeNode) -> usize {
        let mut state = self.state.borrow_mut();
        state.nodes.push(node);
        state.nodes.len() - 1
    }

    pub fn add_with_id(&self, id: &str) -> usize {
        self.add(FakeNode {
            id: Some(id.to_string()),
            ..FakeNode::default()
        })
    }

    pub fn add_matching(&self, selector: &str) -> usize {
        self.add(FakeNode {
            selectors: vec![selector.to_string()],
            ..FakeNode::default()
        })
    }

    pub fn node(&self, index: usize) -> FakeNode {
        self.state.borrow().nodes[index].clone()
    }

    pub fn with_node(&self, index: usize, edit: impl FnOnce(&mut FakeNode)) {
        edit(&mut self.state.borrow_mut().nodes[index]);
    }

    pub fn style(&self, index: usize, property: &str) -> Option<String> {
        self.state.borrow().nodes[index].styles.get(property).cloned()
    }

    pub fn set_viewport_width(&self, width: f64) {
        self.state.borrow_mut().viewport_width = width;
    }

    pub fn set_scroll_y(&self, y: f64) {
        self.state.borrow_mut().scroll_y = y;
    }

    /// Moves the clock forward, running every task that falls due on the way
    /// in due order, including tasks scheduled by those tasks.
    pub fn advance(&self, ms: u64) {
        let target = self.clock_ms.get() + ms;
        loop {
            let next = {
                let mut timers = self.timers.borrow_mut();
                let due = timers
                    .iter()
                    .enumerate()
                    .filter(|(_, (at, _))| *at <= target)
                    .min_by_key(|(_, (at, _))| *at)
                    .map(|(i, _)| i);
                due.map(|i| timers.remove(i))
            };
            match next {
                Some((at, task)) => {
                    self.clock_ms.set(at);
                    task();
                }
                None => break,
            }
        }
        self.clock_ms.set(target);
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    pub fn state(&self) -> std::cell::Ref<'_, FakeState> {
        self.state.borrow()
    }

    fn matches(node: &FakeNode, selector: &str) -> bool {
        selector
            .split(',')
            .map(str::trim)
            .any(|part| node.selectors.iter().any(|s| s == part))
    }
}

impl Surface for FakeSurface {
    type Node = usize;
    type Banner = usize;

    fn by_id(&self, id: &str) -> Result<usize, LandingError> {
        self.state
            .borrow()
            .nodes
            .iter()
            .position(|node| node.id.as_deref() == Some(id))
            .ok_or_else(|| LandingError::MissingElement(format!("#{}", id)))
    }

    fn query(&self, selector: &str) -> Option<usize> {
        self.query_all(selector).into_iter().next()
    }

    fn query_in(&self, root: &usize, selector: &str) -> Option<usize> {
        self.state
            .borrow()
            .nodes
            .iter()
            .position(|node| node.parent == Some(*root) && Self::matches(node, selector))
    }

    fn query_all(&self, selector: &str) -> Vec<usize> {
        let state = self.state.borrow();
        (0..state.nodes.len())
            .filter(|&i| Self::matches(&state.nodes[i], selector))
            .collect()
    }

    fn body(&self) -> Result<usize, LandingError> {
        Ok(0)
    }

    fn set_style(&self, node: &usize, property: &str, value: &str) {
        self.with_node(*node, |n| {
            n.styles.insert(property.to_string(), value.to_string());
        });
    }

    fn add_class(&self, node: &usize, class: &str) {
        self.with_node(*node, |n| {
            n.classes.insert(class.to_string());
        });
    }

    fn remove_class(&self, node: &usize, class: &str) {
        self.with_node(*node, |n| {
            n.classes.remove(class);
        });
    }

    fn toggle_class(&self, node: &usize, class: &str) {
        self.with_node(*node, |n| {
            if !n.classes.remove(class) {
                n.classes.insert(class.to_string());
            }
        });
    }

    fn has_class(&self, node: &usize, class: &str) -> bool {
        self.state.borrow().nodes[*node].classes.contains(class)
    }

    fn attribute(&self, node: &usize, name: &str) -> Option<String> {
        self.state.borrow().nodes[*node].attributes.get(name).cloned()
    }

    fn set_attribute(&self, node: &usize, name: &str, value: &str) {
        self.with_node(*node, |n| {
            n.attributes.insert(name.to_string(), value.to_string());
        });
    }

    fn remove_attribute(&self, node: &usize, name: &str) {
        self.with_node(*node, |n| {
            n.attributes.remove(name);
        });
    }

    fn child_count(&self, node: &usize) -> usize {
        self.state.borrow().nodes[*node].children
    }

    fn offset_top(&self, node: &usize) -> f64 {
        self.state.borrow().nodes[*node].offset_top
    }

    fn offset_height(&self, node: &usize) -> f64 {
        self.state.borrow().nodes[*node].offset_height
    }

    fn value(&self, input: &usize) -> String {
        self.state.borrow().nodes[*input].value.clone()
    }

    fn set_value(&self, input: &usize, value: &str) {
        self.with_node(*input, |n| n.value = value.to_string());
    }

    fn inner_html(&self, node: &usize) -> String {
        self.state.borrow().nodes[*node].inner_html.clone()
    }

    fn set_inner_html(&self, node: &usize, html: &str) {
        self.with_node(*node, |n| n.inner_html = html.to_string());
    }

    fn form_data<T: DeserializeOwned>(&self, form: &usize) -> Result<T, LandingError> {
        let fields = self.state.borrow().nodes[*form].fields.clone();
        let value = serde_json::to_value(fields)
            .map_err(|err| LandingError::FormData(form.to_string(), err.to_string()))?;
        serde_json::from_value(value)
            .map_err(|err| LandingError::FormData(form.to_string(), err.to_string()))
    }

    fn reset_form(&self, form: &usize) {
        let mut state = self.state.borrow_mut();
        state.nodes[*form].fields.clear();
        state.resets.push(*form);
    }

    fn viewport_width(&self) -> f64 {
        self.state.borrow().viewport_width
    }

    fn scroll_y(&self) -> f64 {
        self.state.borrow().scroll_y
    }

    fn scroll_to_smooth(&self, top: f64) {
        self.state.borrow_mut().scrolled_to.push(top);
    }

    fn open_in_new_tab(&self, url: &str) -> Result<(), LandingError> {
        self.state.borrow_mut().opened.push(url.to_string());
        Ok(())
    }

    fn preload_image(&self, href: &str) -> Result<(), LandingError> {
        self.state.borrow_mut().preloaded.push(href.to_string());
        Ok(())
    }

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        let at = self.clock_ms.get() + u64::from(delay_ms);
        self.timers.borrow_mut().push((at, task));
    }

    fn mount_banner(&self, message: &str) -> Result<usize, LandingError> {
        let mut state = self.state.borrow_mut();
        state.banners.push(Some(message.to_string()));
        Ok(state.banners.len() - 1)
    }

    fn dismiss_banner(&self, banner: usize) {
        self.state.borrow_mut().banners[banner] = None;
    }
}
