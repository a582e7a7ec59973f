// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for the coordinator
//!
//! This module provides command-line functionality for:
//! - Running a scripted session against the virtual camera
//! - Inspecting the effective configuration
//! - Printing the logical zoom mapping of a device

use camera_coordinator::app::params::{ZoomRange, format_zoom_label, zoom_to_logical};
use camera_coordinator::app::{
    CameraHealth, ControlSnapshot, ScreenLayout, SessionEvent, SessionHandle,
};
use camera_coordinator::backends::camera::{BackendError, DeviceDescriptor};
use camera_coordinator::backends::virtual_camera::{CaptureOutcome, VirtualCamera, VirtualHaptics};
use camera_coordinator::config::Config;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

/// Flat, printable form of a snapshot
#[derive(Debug, Serialize)]
struct SnapshotRecord<'a> {
    step: &'a str,
    zoom_actual: f64,
    zoom_label: String,
    popup_visible: bool,
    popup_value: String,
    popup_owner: Option<String>,
    focus_ring_visible: bool,
    menu: String,
    exposure_slider: f64,
    exposure_offset: f64,
    flash_mode: String,
    capture_in_flight: bool,
    health: String,
}

impl<'a> SnapshotRecord<'a> {
    fn new(step: &'a str, snapshot: &ControlSnapshot) -> Self {
        Self {
            step,
            zoom_actual: snapshot.zoom_actual,
            zoom_label: snapshot.zoom_label.clone(),
            popup_visible: snapshot.popup.visible,
            popup_value: snapshot.popup.value.clone(),
            popup_owner: snapshot.popup.owner.map(|owner| format!("{:?}", owner)),
            focus_ring_visible: snapshot.focus_ring.visible,
            menu: format!("{:?}", snapshot.menu),
            exposure_slider: snapshot.exposure_slider,
            exposure_offset: snapshot.exposure_offset,
            flash_mode: snapshot.flash_mode.label().to_string(),
            capture_in_flight: snapshot.capture_in_flight,
            health: format!("{:?}", snapshot.health),
        }
    }
}

/// Run a scripted interaction session on the virtual camera
pub fn simulate(
    fail_capture: Option<String>,
    latency_ms: u64,
    config_path: Option<PathBuf>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = match config_path {
        Some(path) => Config::load_from(&path)?,
        None => Config::load(),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let latency = Duration::from_millis(latency_ms);
        let camera = Arc::new(VirtualCamera::default());
        camera.set_default_latency(latency);
        if let Some(message) = fail_capture {
            camera.push_capture_outcome(CaptureOutcome::Fail(latency, BackendError::Other(message)));
        }

        let cooldown = config.recovery_cooldown();
        let popup_release = config.popup_release();
        let layout = ScreenLayout::default();
        let (session, mut events) = SessionHandle::spawn(
            camera.clone(),
            Arc::new(VirtualHaptics::default()),
            config,
            layout,
        );
        let printer = Printer { json };

        printer.step("start", &session.snapshot().await?)?;

        session.pinch_begin();
        session.pinch_update(1.1);
        session.pinch_end();
        printer.step("pinch to 2.2x and release", &session.snapshot().await?)?;

        session.pinch_begin();
        session.pinch_update(1.5);
        session.pinch_end();
        printer.step("pinch to 3.0x and release", &session.snapshot().await?)?;

        session.flash_toggle();
        printer.step("toggle flash", &session.snapshot().await?)?;

        session.menu_toggle();
        session.exposure_toggle();
        session.exposure_drag(0.8);
        printer.step("open exposure panel and drag", &session.snapshot().await?)?;

        session.tap_away();
        session.focus_tap(layout.width / 2.0, layout.height / 3.0);
        printer.step("tap away, then tap to focus", &session.snapshot().await?)?;

        session.capture();
        session.capture();
        printer.step("capture twice", &session.snapshot().await?)?;

        tokio::time::sleep(latency + Duration::from_millis(50)).await;
        printer.step("capture settled", &session.snapshot().await?)?;
        printer.events(&mut events);

        if session.snapshot().await?.health == CameraHealth::Recovering {
            tokio::time::sleep(cooldown + Duration::from_millis(50)).await;
            printer.step("recovery cooldown elapsed", &session.snapshot().await?)?;
            printer.events(&mut events);

            session.capture();
            tokio::time::sleep(latency + Duration::from_millis(50)).await;
            printer.step("capture retried", &session.snapshot().await?)?;
        }

        tokio::time::sleep(popup_release).await;
        printer.step("popups released", &session.snapshot().await?)?;
        printer.events(&mut events);

        session.shutdown();
        println!(
            "Virtual camera: {} capture call(s), {} focus call(s)",
            camera.capture_calls(),
            camera.focus_calls()
        );
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

struct Printer {
    json: bool,
}

impl Printer {
    fn step(&self, step: &str, snapshot: &ControlSnapshot) -> Result<(), serde_json::Error> {
        let record = SnapshotRecord::new(step, snapshot);
        if self.json {
            println!("{}", serde_json::to_string(&record)?);
        } else {
            println!("== {}", step);
            println!(
                "   zoom {} ({:.2}), popup {}, flash {}, exposure {:.2}, health {}",
                record.zoom_label,
                record.zoom_actual,
                if record.popup_visible {
                    record.popup_value.as_str()
                } else {
                    "hidden"
                },
                record.flash_mode,
                record.exposure_slider,
                record.health,
            );
            if record.capture_in_flight {
                println!("   capture in flight");
            }
            if record.focus_ring_visible {
                println!("   focus ring visible");
            }
        }
        Ok(())
    }

    fn events(&self, events: &mut UnboundedReceiver<SessionEvent>) {
        while let Ok(event) = events.try_recv() {
            match event {
                SessionEvent::PhotoCaptured(photo) => {
                    println!("   event: photo saved as {}", photo.path.display())
                }
                SessionEvent::CaptureFailed { error, retryable } => {
                    println!("   event: capture failed: {} (retryable: {})", error, retryable)
                }
                other => println!("   event: {:?}", other),
            }
        }
    }
}

/// Print the effective configuration as JSON
pub fn print_config(write_default: bool) -> Result<(), Box<dyn std::error::Error>> {
    let path = Config::default_path();
    if write_default {
        let path = path.ok_or("No config directory available")?;
        Config::default().save_to(&path)?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    match &path {
        Some(path) => println!("# {}", path.display()),
        None => println!("# no config directory, using defaults"),
    }
    println!("{}", serde_json::to_string_pretty(&Config::load())?);
    Ok(())
}

/// Print how hardware zoom factors map onto displayed levels
pub fn map_zoom(
    min: f64,
    neutral: f64,
    max: f64,
    steps: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let descriptor = DeviceDescriptor {
        min_zoom: min,
        neutral_zoom: neutral,
        max_zoom: max,
        ..DeviceDescriptor::default()
    };
    let range = ZoomRange::from_descriptor(&descriptor);
    let steps = steps.max(2);

    println!(
        "Device zoom {:.2} .. {:.2} (neutral {:.2}, pinch cap {:.2})",
        range.min,
        range.max,
        range.neutral,
        range.pinch_max()
    );
    println!();
    println!("  {:>8}  {:>8}  {:>6}", "actual", "logical", "label");
    for i in 0..steps {
        let t = i as f64 / (steps - 1) as f64;
        let actual = range.min + (range.max - range.min) * t;
        let logical = zoom_to_logical(actual, &range);
        println!(
            "  {:>8.3}  {:>8.3}  {:>6}",
            actual,
            logical,
            format_zoom_label(logical)
        );
    }
    Ok(())
}
