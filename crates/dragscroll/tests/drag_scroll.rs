use std::future::Future;
use std::time::Duration;

use tokio::task::LocalSet;
use tokio::time::sleep;

use dragscroll::host::{ScrollContainer, StyleProperty, StyleTarget};
use dragscroll::scroll::rubber_band::NEUTRAL_TRANSFORM;
use dragscroll::{
    Axis, DragScrollConfig, DragScrollController, Extents, MouseButton, PointerEvent, VirtualHost,
};

const CHILDREN: usize = 4;

async fn local<F: Future>(future: F) -> F::Output {
    LocalSet::new().run_until(future).await
}

fn approx(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

/// 2000 x 400 content in a 400 x 400 viewport, horizontal scrolling only
fn host() -> VirtualHost {
    let host = VirtualHost::new(
        Extents {
            content_width: 2000.0,
            content_height: 400.0,
            visible_width: 400.0,
            visible_height: 400.0,
        },
        CHILDREN,
    );
    host.container
        .set_style(StyleTarget::Container, StyleProperty::OverflowY, "hidden");
    host
}

fn controller(host: &VirtualHost, config: DragScrollConfig) -> DragScrollController {
    DragScrollController::new(host.container_ref(), host.event_bus(), config).unwrap()
}

fn press(controller: &DragScrollController, x: f64, y: f64) {
    controller.on_pointer_down(&PointerEvent::new(x, y, MouseButton::Left.mask()));
}

fn offset_x(host: &VirtualHost) -> f64 {
    host.container.scroll_offset(Axis::X)
}

fn rubber_band_config() -> DragScrollConfig {
    DragScrollConfig {
        apply_rubber_band_effect: true,
        ..Default::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_drag_scrolls_by_pointer_delta() {
    local(async {
        let host = host();
        host.container.scroll_to(500.0, 0.0);
        let controller = controller(&host, DragScrollConfig::default());

        press(&controller, 300.0, 200.0);
        assert!(host.pointer_move(280.0, 200.0));
        approx(offset_x(&host), 520.0);

        host.pointer_move(250.0, 210.0);
        approx(offset_x(&host), 550.0);
        // vertical travel is written but the host clamps it
        assert_eq!(host.container.scroll_offset(Axis::Y), 0.0);

        let state = controller.state();
        approx(state.scroll_speed_x, 30.0 * 60.0);
        approx(state.scroll_speed_y, -10.0 * 60.0);
        approx(state.last_scroll_x, 550.0);
        assert!(state.is_dragging_x && state.is_dragging_y);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_move_without_press_is_ignored() {
    local(async {
        let host = host();
        let _controller = controller(&host, DragScrollConfig::default());

        assert!(!host.pointer_move(100.0, 100.0));
        assert_eq!(host.container.scroll_writes(), 0);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_inactive_button_is_ignored() {
    local(async {
        let host = host();
        host.container.scroll_to(500.0, 0.0);
        let controller = controller(
            &host,
            DragScrollConfig {
                active_mouse_button: MouseButton::Middle,
                ..Default::default()
            },
        );

        press(&controller, 300.0, 200.0);
        host.pointer_move(250.0, 200.0);
        assert_eq!(host.container.scroll_writes(), 0);

        controller.on_pointer_down(&PointerEvent::new(300.0, 200.0, 4));
        host.pointer_move(250.0, 200.0);
        approx(offset_x(&host), 550.0);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_cursor_is_grabbing_then_restored() {
    local(async {
        let host = host();
        host.container
            .set_style(StyleTarget::Container, StyleProperty::Cursor, "grab");
        host.container
            .set_style(StyleTarget::Child(2), StyleProperty::Cursor, "pointer");
        let before = host.container.style_dump();
        let controller = controller(&host, DragScrollConfig::default());

        press(&controller, 300.0, 200.0);
        host.pointer_move(298.0, 200.0);
        for (cursor, _, _) in host.container.style_dump() {
            assert_eq!(cursor, "grabbing");
        }

        // unconfirmed release still restores
        host.pointer_up(298.0, 200.0);
        assert_eq!(host.container.style_dump(), before);

        press(&controller, 300.0, 200.0);
        host.pointer_move(200.0, 200.0);
        host.pointer_up(200.0, 200.0);
        assert_eq!(host.container.style_dump(), before);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_small_release_is_a_click() {
    local(async {
        let host = host();
        host.container.scroll_to(500.0, 0.0);
        let controller = controller(&host, DragScrollConfig::default());

        press(&controller, 100.0, 100.0);
        host.pointer_move(95.0, 104.0);
        host.pointer_up(92.0, 108.0);

        assert!(!controller.is_momentum_active(Axis::X));
        assert!(!controller.is_momentum_active(Axis::Y));
        for child in 0..CHILDREN {
            assert!(!host.container.is_click_suppressed(child));
        }
        let state = controller.state();
        assert!(!state.is_pointer_down);
        assert!(!state.is_dragging());
        assert_eq!(state.scroll_speed_x, 0.0);

        let writes = host.container.scroll_writes();
        sleep(Duration::from_millis(500)).await;
        assert_eq!(host.container.scroll_writes(), writes);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_confirmed_drag_suppresses_clicks_and_glides() {
    local(async {
        let host = host();
        host.container.scroll_to(500.0, 0.0);
        let controller = controller(&host, DragScrollConfig::default());

        press(&controller, 300.0, 200.0);
        host.pointer_move(290.0, 200.0);
        host.pointer_move(280.0, 200.0);
        host.pointer_move(270.0, 200.0);
        host.pointer_up(270.0, 200.0);
        approx(offset_x(&host), 530.0);

        for child in 0..CHILDREN {
            assert!(host.container.is_click_suppressed(child));
        }
        assert!(controller.is_momentum_active(Axis::X));
        assert!(!controller.is_momentum_active(Axis::Y));
        assert!(!controller.state().is_dragging());

        // three ticks land before 58ms
        sleep(Duration::from_millis(58)).await;
        approx(controller.state().scroll_speed_x, 600.0 * 0.95_f64.powi(3));
        assert!(offset_x(&host) > 530.0);

        sleep(Duration::from_secs(5)).await;
        assert!(!controller.is_momentum_active(Axis::X));
        assert_eq!(controller.state().scroll_speed_x, 0.0);
        // 530 + 10 * sum(0.95^k) over the glide
        let glide = offset_x(&host) - 530.0;
        assert!((glide - 190.0).abs() < 0.5, "glide was {glide}");
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_next_click_removes_suppressor() {
    local(async {
        let host = host();
        host.container.scroll_to(500.0, 0.0);
        let controller = controller(&host, DragScrollConfig::default());

        press(&controller, 300.0, 200.0);
        host.pointer_move(250.0, 200.0);
        host.pointer_up(250.0, 200.0);
        assert!(host.container.is_click_suppressed(0));

        sleep(Duration::from_secs(5)).await;
        press(&controller, 300.0, 200.0);
        host.pointer_up(300.0, 200.0);
        for child in 0..CHILDREN {
            assert!(!host.container.is_click_suppressed(child));
        }
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_momentum_stops_at_edge() {
    local(async {
        let host = host();
        host.container.scroll_to(1500.0, 0.0);
        let controller = controller(&host, DragScrollConfig::default());

        press(&controller, 300.0, 200.0);
        host.pointer_move(280.0, 200.0);
        host.pointer_move(260.0, 200.0);
        host.pointer_move(240.0, 200.0);
        host.pointer_up(240.0, 200.0);
        let writes = host.container.scroll_writes();

        sleep(Duration::from_secs(1)).await;
        assert!(!controller.is_momentum_active(Axis::X));
        assert_eq!(offset_x(&host), 1600.0);
        assert_eq!(controller.state().scroll_speed_x, 0.0);
        // 1579, 1597.05, 1600 (clamped), then the edge tick
        assert_eq!(host.container.scroll_writes() - writes, 4);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_press_during_momentum_stops_it() {
    local(async {
        let host = host();
        host.container.scroll_to(200.0, 0.0);
        let controller = controller(&host, DragScrollConfig::default());

        press(&controller, 300.0, 200.0);
        host.pointer_move(280.0, 200.0);
        host.pointer_up(280.0, 200.0);
        sleep(Duration::from_millis(40)).await;
        assert!(controller.is_momentum_active(Axis::X));

        press(&controller, 280.0, 200.0);
        sleep(Duration::from_millis(40)).await;
        assert!(!controller.is_momentum_active(Axis::X));
        assert_eq!(controller.state().scroll_speed_x, 0.0);
        assert!(controller.state().is_pointer_down);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_rubber_band_round_trip() {
    local(async {
        let host = host();
        host.container
            .set_style(StyleTarget::Child(1), StyleProperty::Transform, "rotate(3deg)");
        host.container
            .set_style(StyleTarget::Child(2), StyleProperty::Transition, "opacity 1s");
        let before = host.container.style_dump();
        let controller = controller(&host, rubber_band_config());

        // already at the left edge; pulling right stretches the children
        press(&controller, 100.0, 100.0);
        host.pointer_move(130.0, 100.0);
        assert_eq!(offset_x(&host), 0.0);
        let first = host
            .container
            .computed_style(StyleTarget::Child(0), StyleProperty::Transform);
        assert!(first.starts_with("translate3d(1.9"), "{first}");
        assert_eq!(
            host.container
                .computed_style(StyleTarget::Child(3), StyleProperty::Transition),
            "transform 0s"
        );

        host.pointer_move(160.0, 100.0);
        host.pointer_up(160.0, 100.0);
        assert!(controller.state().rubber_band_applied);
        assert!(controller.is_snap_back_pending());
        assert_eq!(
            host.container
                .computed_style(StyleTarget::Child(1), StyleProperty::Transform),
            NEUTRAL_TRANSFORM
        );
        assert_eq!(
            host.container
                .computed_style(StyleTarget::Child(1), StyleProperty::Transition),
            "transform 250ms cubic-bezier(0.33, 1, 0.68, 1)"
        );

        sleep(Duration::from_millis(100)).await;
        assert!(controller.is_snap_back_pending());

        sleep(Duration::from_millis(200)).await;
        assert!(!controller.is_snap_back_pending());
        assert_eq!(host.container.style_dump(), before);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_rubber_band_grows_with_pull() {
    local(async {
        let host = host();
        let controller = controller(&host, rubber_band_config());
        let shift = |host: &VirtualHost| {
            let transform = host
                .container
                .computed_style(StyleTarget::Child(0), StyleProperty::Transform);
            transform
                .trim_start_matches("translate3d(")
                .split("px")
                .next()
                .unwrap()
                .parse::<f64>()
                .unwrap()
        };

        press(&controller, 100.0, 100.0);
        host.pointer_move(150.0, 100.0);
        let small = shift(&host);
        host.pointer_move(600.0, 100.0);
        let large = shift(&host);
        assert!(small > 0.0);
        assert!(large > small);
        // ten times the pull, well under ten times the shift
        assert!(large < 10.0 * small);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_rubber_band_off_leaves_transforms_alone() {
    local(async {
        let host = host();
        let before = host.container.style_dump();
        let controller = controller(&host, DragScrollConfig::default());

        press(&controller, 100.0, 100.0);
        host.pointer_move(160.0, 100.0);
        for (_, transform, _) in host.container.style_dump() {
            assert_eq!(transform, "none");
        }
        host.pointer_up(160.0, 100.0);
        assert!(!controller.is_snap_back_pending());
        sleep(Duration::from_millis(300)).await;
        assert_eq!(host.container.style_dump(), before);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_unconfirmed_stretch_still_snaps_back() {
    local(async {
        let host = host();
        let before = host.container.style_dump();
        let controller = controller(&host, rubber_band_config());

        press(&controller, 100.0, 100.0);
        host.pointer_move(106.0, 100.0);
        host.pointer_up(106.0, 100.0);
        assert!(!controller.is_momentum_active(Axis::X));
        assert!(controller.is_snap_back_pending());

        sleep(Duration::from_millis(300)).await;
        assert_eq!(host.container.style_dump(), before);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_no_snap_back_without_stretch() {
    local(async {
        let host = host();
        host.container.scroll_to(800.0, 0.0);
        let controller = controller(&host, rubber_band_config());

        press(&controller, 300.0, 100.0);
        host.pointer_move(250.0, 100.0);
        host.pointer_up(250.0, 100.0);
        assert!(controller.is_momentum_active(Axis::X));
        assert!(!controller.is_snap_back_pending());
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_resize_refreshes_edges() {
    local(async {
        let host = host();
        let controller = controller(&host, DragScrollConfig::default());
        assert_eq!(controller.geometry().max_scroll_x, 1600.0);

        host.resize(1000.0, 400.0);
        assert_eq!(controller.geometry().max_scroll_x, 1000.0);

        host.container.scroll_to(990.0, 0.0);
        press(&controller, 300.0, 200.0);
        host.pointer_move(280.0, 200.0);
        host.pointer_up(280.0, 200.0);
        assert_eq!(offset_x(&host), 1000.0);
        let writes = host.container.scroll_writes();

        sleep(Duration::from_millis(200)).await;
        assert!(!controller.is_momentum_active(Axis::X));
        assert_eq!(host.container.scroll_writes() - writes, 1);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_unmount_cancels_momentum() {
    local(async {
        let host = host();
        host.container.scroll_to(200.0, 0.0);
        let controller = controller(&host, DragScrollConfig::default());
        assert_eq!(host.bus.subscription_count(), 3);

        press(&controller, 300.0, 200.0);
        host.pointer_move(260.0, 200.0);
        host.pointer_up(260.0, 200.0);
        sleep(Duration::from_millis(50)).await;
        assert!(controller.is_momentum_active(Axis::X));

        controller.unmount();
        let writes = host.container.scroll_writes();
        assert!(!controller.is_momentum_active(Axis::X));
        assert_eq!(host.bus.subscription_count(), 0);

        sleep(Duration::from_secs(3)).await;
        assert_eq!(host.container.scroll_writes(), writes);

        // unmounted controllers ignore presses
        press(&controller, 300.0, 200.0);
        assert!(!controller.state().is_pointer_down);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_drop_cancels_momentum_and_snap_back() {
    local(async {
        let host = host();
        let before = host.container.style_dump();
        let controller = controller(&host, rubber_band_config());

        press(&controller, 100.0, 100.0);
        host.pointer_move(160.0, 100.0);
        host.pointer_move(40.0, 100.0);
        host.pointer_up(40.0, 100.0);
        sleep(Duration::from_millis(20)).await;
        assert!(controller.is_momentum_active(Axis::X));
        assert!(controller.is_snap_back_pending());

        drop(controller);
        let writes = host.container.scroll_writes();
        assert_eq!(host.bus.subscription_count(), 0);
        assert_eq!(host.container.style_dump(), before);

        sleep(Duration::from_secs(3)).await;
        assert_eq!(host.container.scroll_writes(), writes);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_detached_container_stops_everything() {
    local(async {
        let host = host();
        host.container.scroll_to(200.0, 0.0);
        let container = host.container_ref();
        let controller = controller(&host, DragScrollConfig::default());

        press(&controller, 300.0, 200.0);
        host.pointer_move(260.0, 200.0);
        host.pointer_up(260.0, 200.0);
        assert!(controller.is_momentum_active(Axis::X));

        container.detach();
        let writes = host.container.scroll_writes();
        sleep(Duration::from_millis(100)).await;
        assert!(!controller.is_momentum_active(Axis::X));
        assert_eq!(controller.state().scroll_speed_x, 0.0);
        assert_eq!(host.container.scroll_writes(), writes);

        // interaction without a container is a no-op
        press(&controller, 300.0, 200.0);
        host.pointer_move(200.0, 200.0);
        host.pointer_up(200.0, 200.0);
        assert_eq!(host.container.scroll_writes(), writes);
    })
    .await;
}

/// 2000 x 2000 content in a 400 x 400 viewport, scrollable on both axes
fn open_host() -> VirtualHost {
    VirtualHost::new(
        Extents {
            content_width: 2000.0,
            content_height: 2000.0,
            visible_width: 400.0,
            visible_height: 400.0,
        },
        CHILDREN,
    )
}

#[tokio::test(start_paused = true)]
async fn test_axes_decay_independently() {
    local(async {
        let host = open_host();
        host.container.scroll_to(500.0, 1580.0);
        let controller = controller(&host, DragScrollConfig::default());

        press(&controller, 300.0, 300.0);
        host.pointer_move(280.0, 280.0);
        host.pointer_up(280.0, 280.0);
        assert_eq!(host.container.scroll_offset(Axis::Y), 1600.0);
        assert!(controller.is_momentum_active(Axis::X));
        assert!(controller.is_momentum_active(Axis::Y));

        sleep(Duration::from_millis(100)).await;
        // Y stopped at its edge on the first tick, X keeps gliding
        assert!(controller.is_momentum_active(Axis::X));
        assert!(!controller.is_momentum_active(Axis::Y));
        assert_eq!(controller.state().scroll_speed_y, 0.0);
        assert!(controller.state().scroll_speed_x > 0.0);
        assert!(offset_x(&host) > 520.0);
        assert_eq!(host.container.scroll_offset(Axis::Y), 1600.0);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_unmount_cancels_both_axes() {
    local(async {
        let host = open_host();
        host.container.scroll_to(500.0, 500.0);
        let controller = controller(&host, DragScrollConfig::default());

        press(&controller, 300.0, 300.0);
        host.pointer_move(270.0, 260.0);
        host.pointer_up(270.0, 260.0);
        sleep(Duration::from_millis(50)).await;
        assert!(controller.is_momentum_active(Axis::X));
        assert!(controller.is_momentum_active(Axis::Y));

        controller.unmount();
        let writes = host.container.scroll_writes();
        let offsets = (offset_x(&host), host.container.scroll_offset(Axis::Y));
        assert!(!controller.is_momentum_active(Axis::X));
        assert!(!controller.is_momentum_active(Axis::Y));

        sleep(Duration::from_secs(3)).await;
        assert_eq!(host.container.scroll_writes(), writes);
        assert_eq!(
            (offset_x(&host), host.container.scroll_offset(Axis::Y)),
            offsets
        );
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_remount_during_drag_keeps_original_cursor() {
    local(async {
        let host = host();
        host.container.scroll_to(500.0, 0.0);
        let before = host.container.style_dump();
        let controller = controller(&host, DragScrollConfig::default());

        press(&controller, 300.0, 200.0);
        host.pointer_move(260.0, 200.0);
        controller.set_mounted(true);
        controller.mount();
        assert_eq!(host.bus.subscription_count(), 3);
        host.pointer_up(260.0, 200.0);

        assert_eq!(host.container.style_dump(), before);
        assert_eq!(controller.snapshot().wrapper_cursor, "auto");
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_remount_during_snap_back_keeps_original_transforms() {
    local(async {
        let host = host();
        let before = host.container.style_dump();
        let controller = controller(&host, rubber_band_config());

        press(&controller, 100.0, 100.0);
        host.pointer_move(160.0, 100.0);
        host.pointer_up(160.0, 100.0);
        assert!(controller.is_snap_back_pending());

        controller.mount();
        sleep(Duration::from_millis(400)).await;
        assert!(!controller.is_snap_back_pending());
        assert_eq!(host.container.style_dump(), before);

        // once idle, a remount captures again
        host.container
            .set_style(StyleTarget::Child(0), StyleProperty::Transform, "scale(2)");
        controller.mount();
        assert_eq!(controller.snapshot().children[0].transform, "scale(2)");
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_mount_gating() {
    local(async {
        let host = host();
        let controller = controller(
            &host,
            DragScrollConfig {
                is_mounted: false,
                ..Default::default()
            },
        );
        assert!(!controller.is_mounted());
        assert_eq!(host.bus.subscription_count(), 0);

        press(&controller, 300.0, 200.0);
        host.pointer_move(250.0, 200.0);
        assert_eq!(host.container.scroll_writes(), 0);

        controller.set_mounted(true);
        assert_eq!(host.bus.subscription_count(), 3);
        assert_eq!(controller.snapshot().children.len(), CHILDREN);

        let handler = controller.pointer_down_handler();
        handler(&PointerEvent::new(300.0, 200.0, 1));
        host.pointer_move(250.0, 200.0);
        approx(offset_x(&host), 50.0);
    })
    .await;
}

#[test]
fn test_invalid_config_is_rejected() {
    let host = host();
    let result = DragScrollController::new(
        host.container_ref(),
        host.event_bus(),
        DragScrollConfig {
            decay_rate: 1.0,
            ..Default::default()
        },
    );
    assert!(result.is_err());
}
