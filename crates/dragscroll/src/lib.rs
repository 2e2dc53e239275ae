pub mod controller;
pub mod host;
pub mod scroll;
pub mod snapshot;
pub mod state;
pub mod virtual_host;

pub use controller::DragScrollController;
pub use host::{ContainerRef, EventBus, PointerEvent, ScrollContainer, WindowEvent};
pub use scroll::{Axis, ContainerGeometry, DragScrollConfig, Extents, MouseButton};
pub use snapshot::StyleSnapshot;
pub use state::DragState;
pub use virtual_host::{VirtualContainer, VirtualEventBus, VirtualHost};
