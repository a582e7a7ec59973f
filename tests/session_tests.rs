// SPDX-License-Identifier: GPL-3.0-only

//! End-to-end session tests against the virtual camera
//!
//! Every test runs with tokio's clock paused, so timers fire exactly when
//! `sleep` moves time past them.

use camera_coordinator::app::{
    CameraHealth, CaptureRejection, MenuState, PopupOwner, ScreenLayout, SessionEvent,
    SessionHandle,
};
use camera_coordinator::backends::camera::{BackendError, DeviceDescriptor};
use camera_coordinator::backends::virtual_camera::{CaptureOutcome, VirtualCamera, VirtualHaptics};
use camera_coordinator::errors::{AppError, CaptureError};
use camera_coordinator::flash::{FlashFeedback, FlashMode};
use camera_coordinator::Config;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::sleep;

/// A point on the preview, clear of every control
const PREVIEW: (f64, f64) = (195.0, 300.0);

struct Harness {
    camera: Arc<VirtualCamera>,
    haptics: Arc<VirtualHaptics>,
    session: SessionHandle,
    events: UnboundedReceiver<SessionEvent>,
}

impl Harness {
    fn start() -> Self {
        Self::with_camera(VirtualCamera::default())
    }

    fn with_camera(camera: VirtualCamera) -> Self {
        let camera = Arc::new(camera);
        let haptics = Arc::new(VirtualHaptics::default());
        let (session, events) = SessionHandle::spawn(
            camera.clone(),
            haptics.clone(),
            Config::default(),
            ScreenLayout::default(),
        );
        Self {
            camera,
            haptics,
            session,
            events,
        }
    }

    fn drain(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }

    fn pinch(&self, scale: f64) {
        self.session.pinch_begin();
        self.session.pinch_update(scale);
        self.session.pinch_end();
    }
}

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ===== Zoom =====

#[tokio::test(start_paused = true)]
async fn test_pinch_near_neutral_snaps_back() {
    let h = Harness::start();
    h.pinch(1.1);

    let snapshot = h.session.snapshot().await.unwrap();
    assert_eq!(snapshot.zoom_actual, 2.0);
    assert_eq!(snapshot.zoom_label, "1.0x");
    assert_eq!(snapshot.popup.owner, Some(PopupOwner::Zoom));
    assert_eq!(snapshot.popup.value, "1.0x");
    assert_eq!(h.camera.zoom(), 2.0);
    assert_eq!(h.haptics.pulses(), 1);

    // Device saw 2.2 before the snap put it back
    let history = h.camera.zoom_history();
    let tail = &history[history.len() - 2..];
    assert!(approx(tail[0], 2.2));
    assert_eq!(tail[1], 2.0);

    sleep(ms(2_010)).await;
    let snapshot = h.session.snapshot().await.unwrap();
    assert!(!snapshot.popup.visible);
}

#[tokio::test(start_paused = true)]
async fn test_pinch_far_from_neutral_sticks() {
    let h = Harness::start();
    h.pinch(1.5);

    let snapshot = h.session.snapshot().await.unwrap();
    assert_eq!(snapshot.zoom_actual, 3.0);
    assert_eq!(snapshot.zoom_label, "2.1x");
    assert_eq!(h.camera.zoom(), 3.0);
    assert_eq!(h.haptics.pulses(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_zoom_presets() {
    let h = Harness::start();

    h.session.zoom_preset(0.5);
    let snapshot = h.session.snapshot().await.unwrap();
    assert_eq!(snapshot.zoom_actual, 1.0);
    assert_eq!(snapshot.zoom_label, "0.5x");
    assert_eq!(snapshot.popup.value, "0.5x");

    h.session.zoom_reset();
    let snapshot = h.session.snapshot().await.unwrap();
    assert_eq!(snapshot.zoom_actual, 2.0);
    assert_eq!(h.camera.zoom(), 2.0);

    h.session.zoom_preset(f64::NAN);
    let snapshot = h.session.snapshot().await.unwrap();
    assert_eq!(snapshot.zoom_actual, 2.0);
}

// ===== Popup arbitration =====

#[tokio::test(start_paused = true)]
async fn test_flash_cycles_with_period_three() {
    let h = Harness::start();

    for expected in [FlashMode::On, FlashMode::Off, FlashMode::Auto] {
        h.session.flash_toggle();
        let snapshot = h.session.snapshot().await.unwrap();
        assert_eq!(snapshot.flash_mode, expected);
        assert_eq!(snapshot.flash_icon, expected.icon_name());
        assert_eq!(snapshot.popup.owner, Some(PopupOwner::Flash));
        assert_eq!(snapshot.popup.value, expected.label());
    }
}

#[tokio::test(start_paused = true)]
async fn test_flash_popup_release_restarts_on_toggle() {
    let h = Harness::start();

    h.session.flash_toggle();
    sleep(ms(1_500)).await;
    h.session.flash_toggle();
    sleep(ms(1_500)).await;
    // First timer would have fired at 2.0s
    let snapshot = h.session.snapshot().await.unwrap();
    assert!(snapshot.popup.visible);
    assert_eq!(snapshot.popup.value, "Flash Off");

    sleep(ms(600)).await;
    let snapshot = h.session.snapshot().await.unwrap();
    assert!(!snapshot.popup.visible);
}

#[tokio::test(start_paused = true)]
async fn test_zoom_does_not_take_flash_popup() {
    let h = Harness::start();
    h.pinch(1.5);
    h.session.flash_toggle();

    h.session.pinch_begin();
    assert!(h.session.pinch_update(1.2));
    let snapshot = h.session.snapshot().await.unwrap();
    // Zoom still changes, the popup keeps showing flash
    assert!(approx(snapshot.zoom_actual, 3.6));
    assert_eq!(snapshot.popup.owner, Some(PopupOwner::Flash));
    assert_eq!(snapshot.popup.value, "Flash On");
    h.session.pinch_end();

    sleep(ms(2_100)).await;
    let snapshot = h.session.snapshot().await.unwrap();
    assert!(!snapshot.popup.visible);
}

#[tokio::test(start_paused = true)]
async fn test_superseded_zoom_release_is_ignored() {
    let h = Harness::start();
    h.pinch(1.5);

    sleep(ms(1_500)).await;
    h.pinch(1.2);

    sleep(ms(600)).await;
    let snapshot = h.session.snapshot().await.unwrap();
    assert!(snapshot.popup.visible, "first release timer must not hide the popup");

    sleep(ms(1_500)).await;
    let snapshot = h.session.snapshot().await.unwrap();
    assert!(!snapshot.popup.visible);
}

#[tokio::test(start_paused = true)]
async fn test_stale_pinch_end_leaves_new_pinch_popup() {
    let h = Harness::start();
    h.pinch(1.5);
    // Second pinch starts before the first end reaches the control loop
    h.session.pinch_begin();

    sleep(ms(2_500)).await;
    let snapshot = h.session.snapshot().await.unwrap();
    assert_eq!(snapshot.zoom_actual, 3.0);
    assert!(snapshot.popup.visible, "held pinch keeps its popup");

    h.session.pinch_end();
    sleep(ms(2_100)).await;
    let snapshot = h.session.snapshot().await.unwrap();
    assert!(!snapshot.popup.visible);
}

#[tokio::test(start_paused = true)]
async fn test_failing_haptics_do_not_block_snap() {
    let h = Harness::start();
    h.haptics.set_failing(true);
    h.pinch(1.1);

    let snapshot = h.session.snapshot().await.unwrap();
    assert_eq!(snapshot.zoom_actual, 2.0);
    assert_eq!(h.camera.zoom(), 2.0);
    assert_eq!(h.haptics.pulses(), 1);

    h.session.flash_toggle();
    let snapshot = h.session.snapshot().await.unwrap();
    assert_eq!(snapshot.flash_mode, FlashMode::On);
}

// ===== Menu =====

#[tokio::test(start_paused = true)]
async fn test_menu_and_exposure_panel() {
    let h = Harness::start();

    h.session.exposure_toggle();
    let snapshot = h.session.snapshot().await.unwrap();
    assert_eq!(snapshot.menu, MenuState::Collapsed);

    h.session.menu_toggle();
    h.session.exposure_toggle();
    let snapshot = h.session.snapshot().await.unwrap();
    assert_eq!(snapshot.menu, MenuState::ExposureOpen);
    assert_eq!(snapshot.menu_expansion, 1.0);
    assert_eq!(snapshot.exposure_panel, 1.0);

    h.session.tap_away();
    let snapshot = h.session.snapshot().await.unwrap();
    assert_eq!(snapshot.menu, MenuState::Collapsed);
    assert_eq!(snapshot.menu_expansion, 0.0);
    assert_eq!(snapshot.exposure_panel, 0.0);
}

// ===== Exposure and focus =====

#[tokio::test(start_paused = true)]
async fn test_focus_resets_exposure() {
    let h = Harness::start();
    h.session.menu_toggle();
    h.session.exposure_toggle();
    assert!(h.session.exposure_drag(0.8));

    let snapshot = h.session.snapshot().await.unwrap();
    assert_eq!(snapshot.exposure_slider, 0.8);
    assert!(approx(snapshot.exposure_offset, 1.6));
    assert!(approx(h.camera.exposure_offset(), 1.6));

    h.session.focus_tap(PREVIEW.0, PREVIEW.1);
    let snapshot = h.session.snapshot().await.unwrap();
    assert_eq!(snapshot.exposure_slider, 0.0);
    assert_eq!(snapshot.exposure_offset, 0.0);
    assert_eq!(h.camera.exposure_offset(), 0.0);
    assert!(snapshot.focus_ring.visible);

    sleep(ms(1)).await;
    assert_eq!(h.camera.focus_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_small_exposure_drag_snaps_to_zero() {
    let h = Harness::start();
    assert!(h.session.exposure_drag(-0.15));
    assert!(!h.session.exposure_drag(f64::NAN));

    let snapshot = h.session.snapshot().await.unwrap();
    assert_eq!(snapshot.exposure_slider, 0.0);
    assert_eq!(h.camera.exposure_offset(), 0.0);
}

#[tokio::test(start_paused = true)]
async fn test_taps_on_controls_do_not_focus() {
    let h = Harness::start();
    let layout = ScreenLayout::default();
    let panel = layout.exposure_panel;
    let panel_y = panel.y + panel.height / 2.0;

    // Bottom bar
    h.session.focus_tap(195.0, layout.height - 10.0);
    // Exposure panel while open
    h.session.menu_toggle();
    h.session.exposure_toggle();
    h.session.focus_tap(195.0, panel_y);

    let snapshot = h.session.snapshot().await.unwrap();
    assert!(!snapshot.focus_ring.visible);
    sleep(ms(1)).await;
    assert_eq!(h.camera.focus_calls(), 0);

    // Same spot is preview again once the panel is closed
    h.session.tap_away();
    h.session.focus_tap(195.0, panel_y);
    let snapshot = h.session.snapshot().await.unwrap();
    assert!(snapshot.focus_ring.visible);
}

#[tokio::test(start_paused = true)]
async fn test_focus_ring_superseded_by_new_tap() {
    let h = Harness::start();

    h.session.focus_tap(100.0, 200.0);
    sleep(ms(1_500)).await;
    h.session.focus_tap(250.0, 400.0);

    sleep(ms(600)).await;
    let snapshot = h.session.snapshot().await.unwrap();
    assert!(snapshot.focus_ring.visible);
    let position = snapshot.focus_ring.position.unwrap();
    assert_eq!((position.x, position.y), (250.0, 400.0));

    sleep(ms(1_500)).await;
    let snapshot = h.session.snapshot().await.unwrap();
    assert!(!snapshot.focus_ring.visible);
    assert_eq!(snapshot.focus_ring.position, None);
}

#[tokio::test(start_paused = true)]
async fn test_focus_press_needs_minimum_hold() {
    let h = Harness::start();

    h.session.focus_press(PREVIEW.0, PREVIEW.1);
    assert!(!h.session.focus_release());

    h.session.focus_press(PREVIEW.0, PREVIEW.1);
    sleep(ms(200)).await;
    assert!(h.session.focus_poll());
    // Recognized once per touch
    assert!(!h.session.focus_poll());
    assert!(!h.session.focus_release());

    let snapshot = h.session.snapshot().await.unwrap();
    assert!(snapshot.focus_ring.visible);

    // Dragging turns the touch into something else
    h.session.focus_press(PREVIEW.0, PREVIEW.1);
    h.session.focus_move(PREVIEW.0 + 40.0, PREVIEW.1);
    sleep(ms(200)).await;
    assert!(!h.session.focus_release());
}

#[tokio::test(start_paused = true)]
async fn test_focus_failure_reported() {
    let mut h = Harness::start();
    h.camera.set_focus_error(Some(BackendError::Busy));

    h.session.focus_tap(PREVIEW.0, PREVIEW.1);
    sleep(ms(1)).await;
    let snapshot = h.session.snapshot().await.unwrap();
    assert_eq!(snapshot.health, CameraHealth::Active);
    assert_eq!(h.drain(), vec![SessionEvent::FocusFailed(BackendError::Busy)]);
}

#[tokio::test(start_paused = true)]
async fn test_superseded_focus_failure_not_reported() {
    let mut h = Harness::start();
    h.camera.set_focus_latency(ms(100));
    h.camera.set_focus_error(Some(BackendError::Busy));

    h.session.focus_tap(PREVIEW.0, PREVIEW.1);
    sleep(ms(10)).await;
    h.session.focus_tap(PREVIEW.0 + 20.0, PREVIEW.1);
    sleep(ms(200)).await;
    h.session.snapshot().await.unwrap();

    assert_eq!(h.camera.focus_calls(), 2);
    assert_eq!(h.drain(), vec![SessionEvent::FocusFailed(BackendError::Busy)]);
}

#[tokio::test(start_paused = true)]
async fn test_focus_fault_starts_recovery() {
    let mut h = Harness::start();
    let fault = BackendError::Other("camera-in-use".into());
    h.camera.set_focus_error(Some(fault.clone()));

    h.session.focus_tap(PREVIEW.0, PREVIEW.1);
    sleep(ms(1)).await;
    let snapshot = h.session.snapshot().await.unwrap();
    assert_eq!(snapshot.health, CameraHealth::Recovering);
    assert!(!h.camera.is_active());
    assert_eq!(
        h.drain(),
        vec![SessionEvent::FocusFailed(fault), SessionEvent::RecoveryStarted]
    );
}

#[tokio::test(start_paused = true)]
async fn test_focus_ignored_without_focus_support() {
    let camera = VirtualCamera::new(DeviceDescriptor {
        supports_focus: false,
        ..DeviceDescriptor::default()
    });
    let h = Harness::with_camera(camera);

    h.session.focus_tap(PREVIEW.0, PREVIEW.1);
    let snapshot = h.session.snapshot().await.unwrap();
    assert!(!snapshot.focus_ring.visible);
    sleep(ms(1)).await;
    assert_eq!(h.camera.focus_calls(), 0);
}

// ===== Capture =====

#[tokio::test(start_paused = true)]
async fn test_no_double_capture() {
    let mut h = Harness::start();

    h.session.capture();
    h.session.capture();
    let snapshot = h.session.snapshot().await.unwrap();
    assert!(snapshot.capture_in_flight);
    assert_eq!(snapshot.flash_feedback, FlashFeedback::Dim);
    assert_eq!(
        h.drain(),
        vec![SessionEvent::CaptureRejected(CaptureRejection::InFlight)]
    );

    sleep(ms(200)).await;
    let snapshot = h.session.snapshot().await.unwrap();
    assert!(!snapshot.capture_in_flight);
    assert_eq!(snapshot.flash_feedback, FlashFeedback::None);
    assert_eq!(h.camera.capture_calls(), 1);

    let events = h.drain();
    assert_eq!(events.len(), 1);
    match &events[0] {
        SessionEvent::PhotoCaptured(photo) => {
            let name = photo.path.file_name().unwrap().to_string_lossy();
            assert!(name.starts_with("photo_") && name.ends_with(".jpg"));
        }
        other => panic!("unexpected event {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_capture_uses_flash_feedback_of_current_mode() {
    let h = Harness::start();
    h.session.flash_toggle();
    h.session.capture();

    let snapshot = h.session.snapshot().await.unwrap();
    assert_eq!(snapshot.flash_mode, FlashMode::On);
    assert_eq!(snapshot.flash_feedback, FlashFeedback::Full);
}

#[tokio::test(start_paused = true)]
async fn test_slow_capture_times_out() {
    let mut h = Harness::start();
    h.camera
        .push_capture_outcome(CaptureOutcome::Succeed(Duration::from_secs(6)));

    h.session.capture();
    sleep(ms(4_900)).await;
    assert!(h.session.snapshot().await.unwrap().capture_in_flight);

    sleep(ms(200)).await;
    let snapshot = h.session.snapshot().await.unwrap();
    assert!(!snapshot.capture_in_flight);
    assert_eq!(snapshot.health, CameraHealth::Active);
    assert_eq!(
        h.drain(),
        vec![SessionEvent::CaptureFailed {
            error: CaptureError::Timeout,
            retryable: true,
        }]
    );

    // The next capture goes through normally
    h.session.capture();
    sleep(ms(200)).await;
    assert!(matches!(
        h.drain().as_slice(),
        [SessionEvent::PhotoCaptured(_)]
    ));
}

#[tokio::test(start_paused = true)]
async fn test_hung_capture_released_on_timeout() {
    let mut h = Harness::start();
    h.camera.push_capture_outcome(CaptureOutcome::Hang);

    h.session.capture();
    sleep(ms(1)).await;
    assert_eq!(h.camera.captures_running(), 1);

    sleep(ms(5_100)).await;
    assert_eq!(h.camera.captures_running(), 0);
    assert!(!h.session.snapshot().await.unwrap().capture_in_flight);
    assert_eq!(
        h.drain(),
        vec![SessionEvent::CaptureFailed {
            error: CaptureError::Timeout,
            retryable: true,
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn test_capture_fault_starts_recovery() {
    let mut h = Harness::start();
    h.camera.push_capture_outcome(CaptureOutcome::Fail(
        ms(10),
        BackendError::Other("Error: camera-has-been-disconnected".into()),
    ));

    h.session.capture();
    sleep(ms(20)).await;
    let snapshot = h.session.snapshot().await.unwrap();
    assert_eq!(snapshot.health, CameraHealth::Recovering);
    assert!(!h.camera.is_active());

    let events = h.drain();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], SessionEvent::RecoveryStarted);
    assert!(matches!(
        &events[1],
        SessionEvent::CaptureFailed {
            error: CaptureError::HardwareFault(_),
            retryable: true,
        }
    ));

    h.session.capture();
    h.session.snapshot().await.unwrap();
    assert_eq!(
        h.drain(),
        vec![SessionEvent::CaptureRejected(CaptureRejection::Recovering)]
    );
}

// ===== Recovery =====

#[tokio::test(start_paused = true)]
async fn test_faults_during_recovery_coalesce() {
    let mut h = Harness::start();
    h.camera.set_zoom_error(Some(BackendError::Disconnected));

    h.session.pinch_begin();
    assert!(h.session.pinch_update(1.5));
    let snapshot = h.session.snapshot().await.unwrap();
    assert_eq!(snapshot.health, CameraHealth::Recovering);

    sleep(ms(500)).await;
    assert!(h.session.pinch_update(1.6));
    let snapshot = h.session.snapshot().await.unwrap();
    assert_eq!(snapshot.health, CameraHealth::Recovering);
    h.session.pinch_end();
    h.camera.set_zoom_error(None);

    // Cooldown counts from the first fault
    sleep(ms(1_600)).await;
    let snapshot = h.session.snapshot().await.unwrap();
    assert_eq!(snapshot.health, CameraHealth::Active);
    assert_eq!(snapshot.zoom_actual, 2.0);
    assert_eq!(h.camera.zoom(), 2.0);
    assert_eq!(h.camera.activation_history(), vec![false, true]);
    assert_eq!(
        h.drain(),
        vec![SessionEvent::RecoveryStarted, SessionEvent::RecoveryFinished]
    );
}

#[tokio::test(start_paused = true)]
async fn test_recovery_refreshes_zoom_popup() {
    let h = Harness::start();
    h.camera.set_zoom_error(Some(BackendError::Disconnected));

    h.session.pinch_begin();
    h.session.pinch_update(1.5);
    let snapshot = h.session.snapshot().await.unwrap();
    assert_eq!(snapshot.health, CameraHealth::Recovering);
    assert_eq!(snapshot.popup.owner, Some(PopupOwner::Zoom));
    assert_ne!(snapshot.popup.value, "1.0x");
    h.camera.set_zoom_error(None);

    sleep(ms(500)).await;
    h.session.pinch_end();

    // Cooldown ends at 2.0s, the zoom release at 2.5s
    sleep(ms(1_600)).await;
    let snapshot = h.session.snapshot().await.unwrap();
    assert_eq!(snapshot.health, CameraHealth::Active);
    assert_eq!(snapshot.zoom_label, "1.0x");
    assert!(snapshot.popup.visible);
    assert_eq!(snapshot.popup.value, "1.0x");

    // Release armed by the pinch end still applies
    sleep(ms(500)).await;
    let snapshot = h.session.snapshot().await.unwrap();
    assert!(!snapshot.popup.visible);
}

#[tokio::test(start_paused = true)]
async fn test_focus_ignored_while_recovering() {
    let h = Harness::start();
    h.camera.set_zoom_error(Some(BackendError::Crashed("camera daemon".into())));
    h.pinch(1.5);
    h.session.snapshot().await.unwrap();
    h.camera.set_zoom_error(None);

    h.session.focus_tap(PREVIEW.0, PREVIEW.1);
    let snapshot = h.session.snapshot().await.unwrap();
    assert_eq!(snapshot.health, CameraHealth::Recovering);
    assert!(!snapshot.focus_ring.visible);
}

// ===== Device lifecycle =====

#[tokio::test(start_paused = true)]
async fn test_device_change_resets_session() {
    let mut h = Harness::start();
    h.camera.push_capture_outcome(CaptureOutcome::Succeed(ms(1_000)));
    h.pinch(1.5);
    h.session.flash_toggle();
    h.session.exposure_drag(0.8);
    h.session.focus_tap(PREVIEW.0, PREVIEW.1);
    h.session.capture();
    h.session.snapshot().await.unwrap();

    let telephoto = DeviceDescriptor {
        min_zoom: 1.0,
        neutral_zoom: 1.0,
        max_zoom: 8.0,
        ..DeviceDescriptor::default()
    };
    h.session.set_device(telephoto);
    let snapshot = h.session.snapshot().await.unwrap();
    assert_eq!(snapshot.zoom_actual, 1.0);
    assert_eq!(snapshot.zoom_label, "1.0x");
    assert!(!snapshot.popup.visible);
    assert!(!snapshot.focus_ring.visible);
    assert_eq!(snapshot.flash_mode, FlashMode::Auto);
    assert_eq!(snapshot.exposure_slider, 0.0);
    assert!(!snapshot.capture_in_flight);
    assert_eq!(h.camera.zoom(), 1.0);

    // The aborted capture never reports back
    sleep(ms(1_500)).await;
    h.session.snapshot().await.unwrap();
    assert!(h.drain().iter().all(|event| !matches!(
        event,
        SessionEvent::PhotoCaptured(_) | SessionEvent::CaptureFailed { .. }
    )));
}

#[tokio::test(start_paused = true)]
async fn test_device_change_aborts_hung_capture() {
    let h = Harness::start();
    h.camera.push_capture_outcome(CaptureOutcome::Hang);

    h.session.capture();
    sleep(ms(1)).await;
    assert_eq!(h.camera.captures_running(), 1);

    h.session.set_device(DeviceDescriptor::default());
    sleep(ms(1)).await;
    assert_eq!(h.camera.captures_running(), 0);
    assert!(!h.session.snapshot().await.unwrap().capture_in_flight);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_aborts_hung_capture() {
    let h = Harness::start();
    h.camera.push_capture_outcome(CaptureOutcome::Hang);

    h.session.capture();
    sleep(ms(1)).await;
    h.session.shutdown();
    sleep(ms(1)).await;
    assert_eq!(h.camera.captures_running(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_stops_session() {
    let h = Harness::start();
    h.session.flash_toggle();
    h.session.shutdown();
    sleep(ms(1)).await;

    assert!(!h.camera.is_active());
    assert!(matches!(
        h.session.snapshot().await,
        Err(AppError::SessionClosed)
    ));
}

#[tokio::test(start_paused = true)]
async fn test_dropping_last_handle_stops_session() {
    let h = Harness::start();
    let camera = h.camera.clone();
    let extra = h.session.clone();

    drop(h);
    sleep(ms(1)).await;
    assert!(camera.is_active(), "a clone is still alive");

    drop(extra);
    sleep(ms(1)).await;
    assert!(!camera.is_active());
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_see_published_snapshots() {
    let h = Harness::start();
    let mut snapshots = h.session.subscribe();
    let _ = snapshots.borrow_and_update();

    h.session.flash_toggle();
    snapshots.changed().await.unwrap();
    assert_eq!(snapshots.borrow().flash_mode, FlashMode::On);
    assert_eq!(h.session.current().flash_mode, FlashMode::On);
}
