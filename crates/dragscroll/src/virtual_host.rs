//! In-memory host for tests and trace replay
//!
//! Behaves like a browser scroll container: offsets are clamped to the
//! scrollable range, inline styles shadow computed defaults, and window
//! events are dispatched synchronously to subscribers.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::host::{
    ContainerRef, EventBus, PointerEvent, ScrollContainer, StyleProperty, StyleTarget,
    SubscriptionId, WindowEvent, WindowEventHandler, WindowEventKind,
};
use crate::scroll::{Axis, Extents};

fn default_computed(property: StyleProperty) -> &'static str {
    match property {
        StyleProperty::Cursor => "auto",
        StyleProperty::Transform => "none",
        StyleProperty::Transition => "none",
        StyleProperty::OverflowX | StyleProperty::OverflowY => "auto",
    }
}

#[derive(Debug, Default)]
struct Element {
    inline: HashMap<StyleProperty, String>,
    click_suppressed: bool,
}

impl Element {
    fn computed(&self, property: StyleProperty) -> String {
        self.inline
            .get(&property)
            .cloned()
            .unwrap_or_else(|| default_computed(property).to_string())
    }

    fn set(&mut self, property: StyleProperty, value: &str) {
        if value.is_empty() {
            self.inline.remove(&property);
        } else {
            self.inline.insert(property, value.to_string());
        }
    }
}

#[derive(Debug, Default)]
struct ContainerState {
    extents: Extents,
    offset_x: f64,
    offset_y: f64,
    wrapper: Element,
    children: Vec<Element>,
    /// Offsets after every scroll write
    scroll_log: Vec<(f64, f64)>,
}

/// Scroll container held entirely in memory
#[derive(Debug, Default)]
pub struct VirtualContainer {
    state: RefCell<ContainerState>,
}

/// Cursor, transform and transition as currently computed
pub type ComputedStyles = (String, String, String);

impl VirtualContainer {
    pub fn new(extents: Extents, children: usize) -> Self {
        let container = Self::default();
        {
            let mut state = container.state.borrow_mut();
            state.extents = extents;
            state.children.resize_with(children, Element::default);
        }
        container
    }

    pub fn set_extents(&self, extents: Extents) {
        let mut state = self.state.borrow_mut();
        state.extents = extents;
        state.offset_x = state.offset_x.min(extents.max_scroll(Axis::X));
        state.offset_y = state.offset_y.min(extents.max_scroll(Axis::Y));
    }

    pub fn set_child_count(&self, children: usize) {
        self.state
            .borrow_mut()
            .children
            .resize_with(children, Element::default);
    }

    /// Host-initiated scroll; not recorded as a controller write
    pub fn scroll_to(&self, x: f64, y: f64) {
        let mut state = self.state.borrow_mut();
        state.offset_x = x.clamp(0.0, state.extents.max_scroll(Axis::X));
        state.offset_y = y.clamp(0.0, state.extents.max_scroll(Axis::Y));
    }

    pub fn is_click_suppressed(&self, child: usize) -> bool {
        self.state
            .borrow()
            .children
            .get(child)
            .is_some_and(|c| c.click_suppressed)
    }

    pub fn scroll_writes(&self) -> usize {
        self.state.borrow().scroll_log.len()
    }

    pub fn scroll_log(&self) -> Vec<(f64, f64)> {
        self.state.borrow().scroll_log.clone()
    }

    /// Computed styles of the container followed by every child
    pub fn style_dump(&self) -> Vec<ComputedStyles> {
        let state = self.state.borrow();
        std::iter::once(&state.wrapper)
            .chain(state.children.iter())
            .map(|element| {
                (
                    element.computed(StyleProperty::Cursor),
                    element.computed(StyleProperty::Transform),
                    element.computed(StyleProperty::Transition),
                )
            })
            .collect()
    }
}

impl ScrollContainer for VirtualContainer {
    fn computed_style(&self, target: StyleTarget, property: StyleProperty) -> String {
        let state = self.state.borrow();
        match target {
            StyleTarget::Container => state.wrapper.computed(property),
            StyleTarget::Child(index) => state
                .children
                .get(index)
                .map(|child| child.computed(property))
                .unwrap_or_else(|| default_computed(property).to_string()),
        }
    }

    fn set_style(&self, target: StyleTarget, property: StyleProperty, value: &str) {
        let mut state = self.state.borrow_mut();
        match target {
            StyleTarget::Container => state.wrapper.set(property, value),
            StyleTarget::Child(index) => {
                if let Some(child) = state.children.get_mut(index) {
                    child.set(property, value);
                }
            }
        }
    }

    fn scroll_offset(&self, axis: Axis) -> f64 {
        let state = self.state.borrow();
        match axis {
            Axis::X => state.offset_x,
            Axis::Y => state.offset_y,
        }
    }

    fn set_scroll_offset(&self, axis: Axis, value: f64) {
        let mut state = self.state.borrow_mut();
        let clamped = value.clamp(0.0, state.extents.max_scroll(axis));
        match axis {
            Axis::X => state.offset_x = clamped,
            Axis::Y => state.offset_y = clamped,
        }
        let entry = (state.offset_x, state.offset_y);
        state.scroll_log.push(entry);
    }

    fn extents(&self) -> Extents {
        self.state.borrow().extents
    }

    fn child_count(&self) -> usize {
        self.state.borrow().children.len()
    }

    fn set_click_suppressed(&self, child: usize, suppressed: bool) {
        if let Some(child) = self.state.borrow_mut().children.get_mut(child) {
            child.click_suppressed = suppressed;
        }
    }
}

/// Synchronous window event dispatcher
#[derive(Default)]
pub struct VirtualEventBus {
    next_id: Cell<u64>,
    handlers: RefCell<Vec<(SubscriptionId, WindowEventKind, WindowEventHandler)>>,
}

impl VirtualEventBus {
    /// Deliver an event to every subscriber of its kind and hand it back
    pub fn dispatch(&self, mut event: WindowEvent) -> WindowEvent {
        let kind = event.kind();
        // Handlers may subscribe or unsubscribe while running
        let matching: Vec<WindowEventHandler> = self
            .handlers
            .borrow()
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .map(|(_, _, handler)| handler.clone())
            .collect();
        for handler in matching {
            handler(&mut event);
        }
        event
    }

    pub fn subscription_count(&self) -> usize {
        self.handlers.borrow().len()
    }
}

impl EventBus for VirtualEventBus {
    fn subscribe(&self, kind: WindowEventKind, handler: WindowEventHandler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.handlers.borrow_mut().push((id, kind, handler));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.handlers.borrow_mut().retain(|(sub, _, _)| *sub != id);
    }
}

/// Container, event bus and container handle wired together
pub struct VirtualHost {
    pub container: Rc<VirtualContainer>,
    pub bus: Rc<VirtualEventBus>,
    container_ref: ContainerRef,
}

impl VirtualHost {
    pub fn new(extents: Extents, children: usize) -> Self {
        let container = Rc::new(VirtualContainer::new(extents, children));
        let container_ref = ContainerRef::new();
        container_ref.attach(container.clone());
        Self {
            container,
            bus: Rc::new(VirtualEventBus::default()),
            container_ref,
        }
    }

    pub fn container_ref(&self) -> ContainerRef {
        self.container_ref.clone()
    }

    pub fn event_bus(&self) -> Rc<dyn EventBus> {
        self.bus.clone()
    }

    /// Dispatch a pointer move; returns whether the default action was suppressed
    pub fn pointer_move(&self, x: f64, y: f64) -> bool {
        match self
            .bus
            .dispatch(WindowEvent::PointerMove(PointerEvent::new(x, y, 0)))
        {
            WindowEvent::PointerMove(event) => event.is_default_prevented(),
            _ => false,
        }
    }

    pub fn pointer_up(&self, x: f64, y: f64) {
        self.bus
            .dispatch(WindowEvent::PointerUp(PointerEvent::new(x, y, 0)));
    }

    /// Change the viewport size and notify subscribers
    pub fn resize(&self, visible_width: f64, visible_height: f64) {
        let mut extents = self.container.extents();
        extents.visible_width = visible_width;
        extents.visible_height = visible_height;
        self.container.set_extents(extents);
        self.bus.dispatch(WindowEvent::Resize);
    }
}
