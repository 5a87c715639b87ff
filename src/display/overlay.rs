//! One-shot status overlays.
//!
//! Used during startup and on configuration errors only.  Stateless: they
//! ignore the rotation cadence and leave `DisplayState` alone, so the next
//! rotation simply paints over them.

use super::{RenderBatch, RenderCommand};

/// "Smart Irrigation / Initializing..." shown while peripherals come up.
pub fn boot_splash() -> RenderBatch {
    let mut batch = RenderBatch::new();
    let _ = batch.push(RenderCommand::Clear);
    let _ = batch.push(RenderCommand::print(0, 0, "Smart Irrigation"));
    let _ = batch.push(RenderCommand::print(0, 1, "Initializing..."));
    batch
}

/// Wi-Fi link state on the top line.
pub fn wifi_status(connected: bool) -> RenderBatch {
    let mut batch = RenderBatch::new();
    let _ = batch.push(RenderCommand::Clear);
    let _ = batch.push(RenderCommand::print(0, 0, "WiFi:"));
    let _ = batch.push(RenderCommand::print(
        6,
        0,
        if connected { "Connected" } else { "Connecting" },
    ));
    batch
}

/// Remote-store state on the bottom line, drawn under [`wifi_status`].
pub fn cloud_status(reachable: bool) -> RenderBatch {
    let mut batch = RenderBatch::new();
    let _ = batch.push(RenderCommand::print(0, 1, "Cloud:"));
    let _ = batch.push(RenderCommand::print(7, 1, if reachable { "OK" } else { "..." }));
    batch
}

/// "ERROR:" with the message on the second line.
pub fn error(message: &str) -> RenderBatch {
    let mut batch = RenderBatch::new();
    let _ = batch.push(RenderCommand::Clear);
    let _ = batch.push(RenderCommand::print(0, 0, "ERROR:"));
    let _ = batch.push(RenderCommand::print(0, 1, message));
    batch
}
