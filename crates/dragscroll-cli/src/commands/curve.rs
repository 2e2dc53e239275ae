use anyhow::{bail, Result};

use dragscroll::scroll::{rubber_band, DragScrollConfigExt, EasingType, EasingTypeExt};
use dragscroll_core::AppConfig;

pub fn run(
    config: &AppConfig,
    size: Option<f64>,
    max_delta: Option<f64>,
    step: Option<f64>,
    easing: Option<EasingType>,
) -> Result<()> {
    let size = size.unwrap_or(config.simulation.viewport_width);
    let max_delta = max_delta.unwrap_or(size);
    let step = step.unwrap_or(max_delta / 10.0);
    if size <= 0.0 || max_delta <= 0.0 || step <= 0.0 {
        bail!("size, max-delta and step must be positive");
    }

    println!("Rubber-band displacement (size {size}px)\n");
    println!("{:>10}  {:>12}  {:>8}", "pull", "shift", "ratio");

    let mut delta = step;
    while delta <= max_delta + f64::EPSILON {
        let shift = rubber_band::displacement(delta, size);
        println!("{:>10.1}  {:>12.3}  {:>8.3}", delta, shift, shift / delta);
        delta += step;
    }

    let drag = &config.drag_scroll;
    let easing = easing.unwrap_or(drag.snap_back_easing);
    let start = rubber_band::displacement(max_delta, size);
    let duration = drag.snap_back_duration().as_secs_f64();
    let frames = (duration / drag.tick_period()).ceil().max(1.0) as u32;

    println!(
        "\nSnap-back from {start:.3}px over {}ms ({})\n",
        drag.snap_back_duration_ms,
        easing.css_timing_function()
    );
    println!("{:>6}  {:>9}  {:>10}", "frame", "t (ms)", "offset");
    for frame in 0..=frames {
        let t = frame as f64 / frames as f64;
        let offset = start * (1.0 - easing.apply(t));
        println!("{:>6}  {:>9.1}  {:>10.3}", frame, t * duration * 1000.0, offset);
    }

    Ok(())
}
