use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tokio::time::{sleep, sleep_until, Instant};
use tracing::{debug, info};

use dragscroll::host::ScrollContainer;
use dragscroll::{Axis, DragScrollController, Extents, MouseButton, PointerEvent, VirtualHost};
use dragscroll_core::AppConfig;

/// Command-line overrides for a replay
pub struct Options {
    pub trace: PathBuf,
    pub content: Option<(f64, f64)>,
    pub viewport: Option<(f64, f64)>,
    pub children: Option<usize>,
    pub rubber_band: bool,
    pub button: Option<MouseButton>,
}

/// One recorded input, `at_ms` after the start of the trace
#[derive(Debug, Clone, Deserialize)]
pub struct TraceEntry {
    pub at_ms: u64,
    #[serde(flatten)]
    pub action: TraceAction,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TraceAction {
    Down {
        x: f64,
        y: f64,
        /// Defaults to the configured drag button
        #[serde(default)]
        buttons: Option<u16>,
    },
    Move {
        x: f64,
        y: f64,
    },
    Up {
        x: f64,
        y: f64,
    },
    Resize {
        width: f64,
        height: f64,
    },
}

/// Read a trace and order it by time
pub fn load_trace(path: &Path) -> Result<Vec<TraceEntry>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read trace {}", path.display()))?;
    let mut entries: Vec<TraceEntry> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid trace {}", path.display()))?;
    entries.sort_by_key(|entry| entry.at_ms);
    Ok(entries)
}

pub async fn run(config: &AppConfig, options: Options) -> Result<()> {
    let entries = load_trace(&options.trace)?;

    let mut drag = config.drag_scroll.clone();
    drag.is_mounted = true;
    if options.rubber_band {
        drag.apply_rubber_band_effect = true;
    }
    if let Some(button) = options.button {
        drag.active_mouse_button = button;
    }

    let sim = &config.simulation;
    let (content_width, content_height) = options
        .content
        .unwrap_or((sim.content_width, sim.content_height));
    let (visible_width, visible_height) = options
        .viewport
        .unwrap_or((sim.viewport_width, sim.viewport_height));
    let children = options.children.unwrap_or(sim.children);

    let host = VirtualHost::new(
        Extents {
            content_width,
            content_height,
            visible_width,
            visible_height,
        },
        children,
    );
    let default_buttons = drag.active_mouse_button.mask();
    let controller = DragScrollController::new(host.container_ref(), host.event_bus(), drag)?;
    let before = host.container.style_dump();

    info!(
        events = entries.len(),
        content = %format!("{content_width}x{content_height}"),
        viewport = %format!("{visible_width}x{visible_height}"),
        children,
        "Replaying trace"
    );

    let start = Instant::now();
    for entry in &entries {
        sleep_until(start + Duration::from_millis(entry.at_ms)).await;
        debug!(at_ms = entry.at_ms, action = ?entry.action, "Trace event");
        match entry.action {
            TraceAction::Down { x, y, buttons } => {
                controller.on_pointer_down(&PointerEvent::new(
                    x,
                    y,
                    buttons.unwrap_or(default_buttons),
                ));
            }
            TraceAction::Move { x, y } => {
                host.pointer_move(x, y);
            }
            TraceAction::Up { x, y } => host.pointer_up(x, y),
            TraceAction::Resize { width, height } => host.resize(width, height),
        }
    }

    sleep(Duration::from_millis(sim.settle_ms)).await;
    let still_moving =
        controller.is_momentum_active(Axis::X) || controller.is_momentum_active(Axis::Y);
    let restored = host.container.style_dump() == before;
    let suppressed = (0..children)
        .filter(|child| host.container.is_click_suppressed(*child))
        .count();
    controller.unmount();

    println!("{:>6}  {:>10}  {:>10}", "write", "x", "y");
    for (index, (x, y)) in host.container.scroll_log().iter().enumerate() {
        println!("{:>6}  {:>10.2}  {:>10.2}", index + 1, x, y);
    }
    println!();
    println!(
        "Final offset: ({:.2}, {:.2})",
        host.container.scroll_offset(Axis::X),
        host.container.scroll_offset(Axis::Y)
    );
    println!("Scroll writes: {}", host.container.scroll_writes());
    println!("Click-suppressed children: {suppressed}/{children}");
    println!("Styles restored: {}", if restored { "yes" } else { "no" });
    if still_moving {
        println!(
            "Momentum still running after {}ms, raise simulation.settle_ms",
            sim.settle_ms
        );
    }

    Ok(())
}
