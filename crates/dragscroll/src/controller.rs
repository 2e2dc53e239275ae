//! Drag-scroll controller
//!
//! Ties pointer tracking, live scrolling, momentum and the rubber-band effect
//! to a host container. Momentum and snap-back run as `tokio` tasks spawned
//! with [`tokio::task::spawn_local`], so the controller must be driven from
//! inside a [`tokio::task::LocalSet`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tracing::{debug, trace};

use dragscroll_core::Result;

use crate::host::{
    ContainerRef, EventBus, PointerEvent, ScrollContainer, StyleProperty, StyleTarget,
    SubscriptionId, WindowEvent, WindowEventHandler, WindowEventKind,
};
use crate::scroll::{
    rubber_band, timing, Axis, ContainerGeometry, DragScrollConfig, DragScrollConfigExt,
    Momentum, StopReason, TickOutcome,
};
use crate::snapshot::StyleSnapshot;
use crate::state::DragState;

/// Running timer tasks
#[derive(Default)]
struct Timers {
    momentum_x: Option<JoinHandle<()>>,
    momentum_y: Option<JoinHandle<()>>,
    snap_back: Option<JoinHandle<()>>,
}

impl Timers {
    fn momentum_mut(&mut self, axis: Axis) -> &mut Option<JoinHandle<()>> {
        match axis {
            Axis::X => &mut self.momentum_x,
            Axis::Y => &mut self.momentum_y,
        }
    }

    fn is_momentum_active(&self, axis: Axis) -> bool {
        let handle = match axis {
            Axis::X => &self.momentum_x,
            Axis::Y => &self.momentum_y,
        };
        handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    fn cancel_momentum(&mut self, axis: Axis) {
        if let Some(handle) = self.momentum_mut(axis).take() {
            handle.abort();
        }
    }

    /// Abort every task; returns whether a snap-back was still pending
    fn cancel_all(&mut self) -> bool {
        self.cancel_momentum(Axis::X);
        self.cancel_momentum(Axis::Y);
        match self.snap_back.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }
}

struct Shared {
    container: ContainerRef,
    events: Rc<dyn EventBus>,
    config: DragScrollConfig,
    tick_period: f64,
    momentum: Momentum,
    state: RefCell<DragState>,
    geometry: Cell<ContainerGeometry>,
    snapshot: RefCell<StyleSnapshot>,
    timers: RefCell<Timers>,
    subscriptions: RefCell<Vec<SubscriptionId>>,
    mounted: Cell<bool>,
}

impl Shared {
    fn mount(self: &Rc<Self>) {
        // Mid-interaction styles are transient and must not become the baseline
        if self.is_interacting() {
            debug!("Interaction in progress, keeping captured styles");
        } else {
            self.capture_styles();
        }
        self.recompute_geometry();

        if self.mounted.replace(true) {
            return;
        }

        let weak = Rc::downgrade(self);
        let handler: WindowEventHandler = Rc::new(move |event: &mut WindowEvent| {
            if let Some(shared) = weak.upgrade() {
                shared.handle_window_event(event);
            }
        });
        let ids: Vec<SubscriptionId> = [
            WindowEventKind::PointerMove,
            WindowEventKind::PointerUp,
            WindowEventKind::Resize,
        ]
        .into_iter()
        .map(|kind| self.events.subscribe(kind, handler.clone()))
        .collect();
        *self.subscriptions.borrow_mut() = ids;

        debug!(geometry = ?self.geometry.get(), "Drag scroll mounted");
    }

    /// Teardown: drop subscriptions, cancel timers, undo transient styles
    fn unmount(&self) {
        if !self.mounted.replace(false) {
            return;
        }

        let ids = std::mem::take(&mut *self.subscriptions.borrow_mut());
        for id in ids {
            self.events.unsubscribe(id);
        }

        let snap_back_pending = self.timers.borrow_mut().cancel_all();

        let (was_down, displaced) = {
            let mut state = self.state.borrow_mut();
            let was_down = state.is_pointer_down;
            let displaced = state.rubber_band_applied;
            state.release();
            state.clear_dragging();
            state.scroll_speed_x = 0.0;
            state.scroll_speed_y = 0.0;
            (was_down, displaced)
        };

        if let Some(container) = self.container.get() {
            let snapshot = self.snapshot.borrow();
            if was_down {
                snapshot.restore_cursors(&*container);
            }
            if snap_back_pending || (was_down && displaced) {
                snapshot.restore_child_transforms(&*container);
            }
        }

        debug!("Drag scroll unmounted");
    }

    /// Pointer held or children still settling after a stretch
    fn is_interacting(&self) -> bool {
        self.state.borrow().is_pointer_down
            || self
                .timers
                .borrow()
                .snap_back
                .as_ref()
                .is_some_and(|h| !h.is_finished())
    }

    fn capture_styles(&self) {
        if let Some(container) = self.container.get() {
            *self.snapshot.borrow_mut() = StyleSnapshot::capture(&*container);
        }
    }

    fn recompute_geometry(&self) {
        if let Some(container) = self.container.get() {
            let geometry = ContainerGeometry::from_parts(
                &container.computed_style(StyleTarget::Container, StyleProperty::OverflowX),
                &container.computed_style(StyleTarget::Container, StyleProperty::OverflowY),
                container.extents(),
            );
            trace!(?geometry, "Geometry recomputed");
            self.geometry.set(geometry);
        }
    }

    fn handle_window_event(self: &Rc<Self>, event: &mut WindowEvent) {
        match event {
            WindowEvent::PointerMove(pointer) => self.on_pointer_move(pointer),
            WindowEvent::PointerUp(pointer) => self.on_pointer_up(pointer),
            WindowEvent::Resize => self.recompute_geometry(),
        }
    }

    fn on_pointer_down(&self, event: &PointerEvent) {
        if !self.mounted.get() {
            return;
        }
        if event.buttons != self.config.active_mouse_button.mask() {
            trace!(buttons = event.buttons, "Ignoring press with inactive button");
            return;
        }

        // A new press cuts a running snap-back short
        let pending = self.timers.borrow_mut().snap_back.take();
        if let Some(handle) = pending {
            handle.abort();
            if let Some(container) = self.container.get() {
                self.snapshot.borrow().restore_child_transforms(&*container);
            }
        }

        self.state.borrow_mut().press(event.x, event.y);
        debug!(x = event.x, y = event.y, "Pointer down");
    }

    fn on_pointer_move(&self, event: &mut PointerEvent) {
        let previous = {
            let mut state = self.state.borrow_mut();
            if !state.is_pointer_down {
                return;
            }
            let previous = (state.last_pointer_x, state.last_pointer_y);
            let dx = state.last_pointer_x - event.x;
            let dy = state.last_pointer_y - event.y;
            state.last_pointer_x = event.x;
            state.last_pointer_y = event.y;
            state.scroll_speed_x = timing::speed_from_delta(dx, self.tick_period);
            state.scroll_speed_y = timing::speed_from_delta(dy, self.tick_period);
            state.is_dragging_x = true;
            state.is_dragging_y = true;
            previous
        };

        event.prevent_default();

        let Some(container) = self.container.get() else {
            return;
        };
        self.set_grab_cursor(&*container);
        self.apply_scroll(&*container);

        if self.config.apply_rubber_band_effect {
            self.apply_rubber_band(&*container, previous, (event.x, event.y));
        }
    }

    fn on_pointer_up(self: &Rc<Self>, event: &PointerEvent) {
        let Some(container) = self.container.get() else {
            return;
        };

        let (was_down, confirmed) = {
            let state = self.state.borrow();
            let (travel_x, travel_y) = state.travel(event.x, event.y);
            let safe = self.config.safe_displacement;
            let confirmed = state.is_pointer_down
                && state.is_dragging()
                && (travel_x.abs() > safe || travel_y.abs() > safe);
            (state.is_pointer_down, confirmed)
        };

        for child in 0..container.child_count() {
            container.set_click_suppressed(child, confirmed);
        }
        self.snapshot.borrow().restore_cursors(&*container);

        if !was_down {
            return;
        }

        let displaced = {
            let mut state = self.state.borrow_mut();
            let displaced = state.rubber_band_applied;
            state.release();
            if !confirmed {
                state.clear_dragging();
                state.scroll_speed_x = 0.0;
                state.scroll_speed_y = 0.0;
            }
            displaced
        };
        debug!(confirmed, "Pointer up");

        if confirmed {
            self.start_momentum(&*container, displaced);
        } else if displaced {
            self.start_snap_back(&*container);
        }
    }

    fn set_grab_cursor(&self, container: &dyn ScrollContainer) {
        let cursor = self.config.grab_cursor.as_str();
        container.set_style(StyleTarget::Container, StyleProperty::Cursor, cursor);
        for child in 0..container.child_count() {
            container.set_style(StyleTarget::Child(child), StyleProperty::Cursor, cursor);
        }
    }

    /// Advance both axes by one tick of their current speed
    fn apply_scroll(&self, container: &dyn ScrollContainer) {
        for axis in Axis::BOTH {
            self.apply_scroll_axis(container, axis);
        }
    }

    fn apply_scroll_axis(&self, container: &dyn ScrollContainer, axis: Axis) {
        let speed = self.state.borrow().speed(axis);
        let offset =
            container.scroll_offset(axis) + timing::distance_per_tick(speed, self.tick_period);
        container.set_scroll_offset(axis, offset);
        self.state.borrow_mut().set_last_scroll(axis, offset);
    }

    fn apply_rubber_band(
        &self,
        container: &dyn ScrollContainer,
        previous: (f64, f64),
        pointer: (f64, f64),
    ) {
        let geometry = self.geometry.get();
        let samples = [
            (Axis::X, pointer.0, previous.0),
            (Axis::Y, pointer.1, previous.1),
        ];

        let mut deltas = [0.0; 2];
        {
            let mut state = self.state.borrow_mut();
            for (slot, (axis, now, before)) in samples.into_iter().enumerate() {
                let origin = state.rubber_band_origin_mut(axis);
                if geometry.is_at_edge(axis, container.scroll_offset(axis)) {
                    let start = *origin.get_or_insert(before);
                    deltas[slot] = now - start;
                } else {
                    *origin = None;
                }
            }
            // Once displaced, keep writing so leaving the edge settles children at zero
            let displaced = deltas.iter().any(|d| *d != 0.0);
            if !displaced && !state.rubber_band_applied {
                return;
            }
            state.rubber_band_applied = true;
        }

        let extents = container.extents();
        let (dx, dy) = rubber_band::compute_rubber_band_displacement(
            deltas[0],
            deltas[1],
            extents.visible_width,
            extents.visible_height,
            &geometry,
        );
        let transform = rubber_band::translate3d(dx, dy);
        for child in 0..container.child_count() {
            let target = StyleTarget::Child(child);
            container.set_style(target, StyleProperty::Transform, &transform);
            container.set_style(
                target,
                StyleProperty::Transition,
                rubber_band::IMMEDIATE_TRANSITION,
            );
        }
        trace!(dx, dy, "Rubber-band displacement");
    }

    fn start_momentum(self: &Rc<Self>, container: &dyn ScrollContainer, displaced: bool) {
        let speeds = {
            let mut state = self.state.borrow_mut();
            state.clear_dragging();
            [state.scroll_speed_x, state.scroll_speed_y]
        };

        if self.config.apply_rubber_band_effect && displaced {
            self.start_snap_back(container);
        }

        for (axis, speed) in Axis::BOTH.into_iter().zip(speeds) {
            let mut timers = self.timers.borrow_mut();
            timers.cancel_momentum(axis);
            if speed == 0.0 {
                continue;
            }
            debug!(
                ?axis,
                speed,
                max_ticks = timing::ticks_until_rest(
                    speed,
                    self.momentum.decay_rate,
                    self.momentum.min_speed
                ),
                "Momentum started"
            );
            *timers.momentum_mut(axis) = Some(self.spawn_momentum(axis));
        }
    }

    fn spawn_momentum(self: &Rc<Self>, axis: Axis) -> JoinHandle<()> {
        let weak = Rc::downgrade(self);
        let period = self.config.tick_duration();

        tokio::task::spawn_local(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(shared) = weak.upgrade() else {
                    break;
                };
                if let TickOutcome::Stop(reason) = shared.momentum_tick(axis) {
                    debug!(?axis, ?reason, "Momentum stopped");
                    shared.timers.borrow_mut().momentum_mut(axis).take();
                    break;
                }
            }
        })
    }

    /// decay -> edge check -> apply -> stop decision
    fn momentum_tick(&self, axis: Axis) -> TickOutcome {
        let Some(container) = self.container.get() else {
            self.state.borrow_mut().set_speed(axis, 0.0);
            return TickOutcome::Stop(StopReason::Detached);
        };

        let (speed, pointer_down) = {
            let mut state = self.state.borrow_mut();
            let speed = self.momentum.next_speed(state.speed(axis));
            state.set_speed(axis, speed);
            (speed, state.is_pointer_down)
        };

        let at_edge = self
            .geometry
            .get()
            .is_at_edge(axis, container.scroll_offset(axis));
        self.apply_scroll_axis(&*container, axis);

        let outcome = self.momentum.evaluate(speed, pointer_down, at_edge);
        if let TickOutcome::Stop(_) = outcome {
            self.state.borrow_mut().set_speed(axis, 0.0);
        }
        trace!(?axis, speed, at_edge, "Momentum tick");
        outcome
    }

    /// Ease children back to rest, then restore their captured transforms
    fn start_snap_back(self: &Rc<Self>, container: &dyn ScrollContainer) {
        let transition = self.config.snap_back_transition();
        for child in 0..container.child_count() {
            let target = StyleTarget::Child(child);
            container.set_style(target, StyleProperty::Transform, rubber_band::NEUTRAL_TRANSFORM);
            container.set_style(target, StyleProperty::Transition, &transition);
        }

        let weak = Rc::downgrade(self);
        let delay = self.config.snap_back_duration();
        let handle = tokio::task::spawn_local(async move {
            sleep(delay).await;
            if let Some(shared) = weak.upgrade() {
                shared.timers.borrow_mut().snap_back.take();
                if let Some(container) = shared.container.get() {
                    shared.snapshot.borrow().restore_child_transforms(&*container);
                }
                debug!("Snap-back finished");
            }
        });

        if let Some(previous) = self.timers.borrow_mut().snap_back.replace(handle) {
            previous.abort();
        }
    }
}

/// Drag-to-scroll behavior for one container
///
/// Window events are subscribed while mounted; the host only forwards presses
/// on the container to [`DragScrollController::on_pointer_down`]. Dropping the
/// controller runs the same teardown as [`DragScrollController::unmount`].
pub struct DragScrollController {
    shared: Rc<Shared>,
}

impl DragScrollController {
    /// Create a controller; mounts immediately when `config.is_mounted` is set
    pub fn new(
        container: ContainerRef,
        events: Rc<dyn EventBus>,
        config: DragScrollConfig,
    ) -> Result<Self> {
        config.validate()?;

        let shared = Rc::new(Shared {
            container,
            events,
            tick_period: config.tick_period(),
            momentum: Momentum::new(config.decay_rate, config.min_momentum_speed),
            config,
            state: RefCell::new(DragState::default()),
            geometry: Cell::new(ContainerGeometry::default()),
            snapshot: RefCell::new(StyleSnapshot::default()),
            timers: RefCell::new(Timers::default()),
            subscriptions: RefCell::new(Vec::new()),
            mounted: Cell::new(false),
        });

        if shared.config.is_mounted {
            shared.mount();
        }

        Ok(Self { shared })
    }

    pub fn config(&self) -> &DragScrollConfig {
        &self.shared.config
    }

    /// Subscribe to window events, or re-capture styles and geometry if
    /// already mounted (call after the host swaps the container)
    pub fn mount(&self) {
        self.shared.mount();
    }

    /// Remove subscriptions and cancel every timer
    pub fn unmount(&self) {
        self.shared.unmount();
    }

    /// Mount or unmount; mounting an already mounted controller is a no-op
    pub fn set_mounted(&self, mounted: bool) {
        if mounted {
            if !self.shared.mounted.get() {
                self.shared.mount();
            }
        } else {
            self.shared.unmount();
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.shared.mounted.get()
    }

    /// Press handler for the container
    pub fn on_pointer_down(&self, event: &PointerEvent) {
        self.shared.on_pointer_down(event);
    }

    /// Press handler that does not keep the controller alive
    pub fn pointer_down_handler(&self) -> impl Fn(&PointerEvent) + 'static {
        let weak = Rc::downgrade(&self.shared);
        move |event: &PointerEvent| {
            if let Some(shared) = weak.upgrade() {
                shared.on_pointer_down(event);
            }
        }
    }

    pub fn recompute_geometry(&self) {
        self.shared.recompute_geometry();
    }

    pub fn state(&self) -> DragState {
        self.shared.state.borrow().clone()
    }

    pub fn geometry(&self) -> ContainerGeometry {
        self.shared.geometry.get()
    }

    pub fn snapshot(&self) -> StyleSnapshot {
        self.shared.snapshot.borrow().clone()
    }

    pub fn is_momentum_active(&self, axis: Axis) -> bool {
        self.shared.timers.borrow().is_momentum_active(axis)
    }

    pub fn is_snap_back_pending(&self) -> bool {
        self.shared
            .timers
            .borrow()
            .snap_back
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }
}

impl Drop for DragScrollController {
    fn drop(&mut self) {
        self.shared.unmount();
    }
}
