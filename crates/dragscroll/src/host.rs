//! Host collaborators: the container, its styles, and window events
//!
//! The controller never touches a real UI toolkit. A host (a DOM binding, a
//! native widget layer, or [`crate::VirtualHost`] in tests) implements these
//! traits and forwards pointer events.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::scroll::{Axis, Extents};

/// Element a style read or write targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleTarget {
    Container,
    /// Child element by position in the container's child list
    Child(usize),
}

/// Style properties the controller reads or writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    Cursor,
    Transform,
    Transition,
    OverflowX,
    OverflowY,
}

/// Style and scroll access for a mounted scroll container
///
/// Methods take `&self`; hosts are expected to use interior mutability the way
/// DOM handles do.
pub trait ScrollContainer {
    /// Computed value of `property` on `target`
    fn computed_style(&self, target: StyleTarget, property: StyleProperty) -> String;

    /// Write an inline style; an empty `value` removes the inline declaration
    fn set_style(&self, target: StyleTarget, property: StyleProperty, value: &str);

    fn scroll_offset(&self, axis: Axis) -> f64;

    /// Write a scroll offset; the host clamps it to its own range
    fn set_scroll_offset(&self, axis: Axis, value: f64);

    fn extents(&self) -> Extents;

    fn child_count(&self) -> usize;

    /// Install or remove a capturing click handler on a child that swallows the
    /// click synthesized after a drag
    fn set_click_suppressed(&self, child: usize, suppressed: bool);
}

/// Shared handle to "the current container, if mounted"
///
/// The host attaches and detaches the container as it mounts and unmounts;
/// the controller reads it on every operation.
#[derive(Clone, Default)]
pub struct ContainerRef(Rc<RefCell<Option<Rc<dyn ScrollContainer>>>>);

impl ContainerRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, container: Rc<dyn ScrollContainer>) {
        *self.0.borrow_mut() = Some(container);
    }

    pub fn detach(&self) {
        self.0.borrow_mut().take();
    }

    pub fn get(&self) -> Option<Rc<dyn ScrollContainer>> {
        self.0.borrow().clone()
    }

    pub fn is_attached(&self) -> bool {
        self.0.borrow().is_some()
    }
}

impl fmt::Debug for ContainerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerRef")
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// Pointer event delivered by the host
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    /// Pressed-buttons bitmask (1 = left, 2 = right, 4 = middle)
    pub buttons: u16,
    default_prevented: bool,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64, buttons: u16) -> Self {
        Self {
            x,
            y,
            buttons,
            default_prevented: false,
        }
    }

    /// Suppress the host's default action (text selection, native drag)
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Window-scoped event kinds the controller subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowEventKind {
    PointerMove,
    PointerUp,
    Resize,
}

/// Window-scoped event
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    PointerMove(PointerEvent),
    PointerUp(PointerEvent),
    Resize,
}

impl WindowEvent {
    pub fn kind(&self) -> WindowEventKind {
        match self {
            WindowEvent::PointerMove(_) => WindowEventKind::PointerMove,
            WindowEvent::PointerUp(_) => WindowEventKind::PointerUp,
            WindowEvent::Resize => WindowEventKind::Resize,
        }
    }
}

pub type WindowEventHandler = Rc<dyn Fn(&mut WindowEvent)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Event subscription service for window-scoped events
pub trait EventBus {
    fn subscribe(&self, kind: WindowEventKind, handler: WindowEventHandler) -> SubscriptionId;

    fn unsubscribe(&self, id: SubscriptionId);
}
