//! Simulated tracking collaborator
//!
//! Emits anchor found/lost signals over a channel, either from a built-in
//! script or from a JSON-lines file (one `RawAnchorSignal` per line).
//! Lines that fail to parse travel down the channel as errors so the
//! consumer can count them.

use std::path::Path;
use std::time::Duration;

use anchor_layout::{LayoutError, Point3D, RawAnchorEvent, RawAnchorSignal};
use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{debug, warn};

fn found(x: f32, y: f32, z: f32) -> RawAnchorSignal {
    RawAnchorSignal::Found(RawAnchorEvent {
        position: Some(Point3D::new(x, y, z)),
        scale_width: Some(0.6),
        scale_height: Some(0.9),
        ..RawAnchorEvent::default()
    })
}

/// Image target seen, occluded, re-acquired elsewhere, then a dropped frame
pub fn scripted_signals() -> Vec<RawAnchorSignal> {
    vec![
        found(0.0, 1.2, -2.0),
        RawAnchorSignal::Lost,
        found(0.4, 1.1, -1.5),
        found(0.4, 1.1, -1.5),
        // Tracker glitch: detection without a pose
        RawAnchorSignal::Found(RawAnchorEvent::default()),
        RawAnchorSignal::Lost,
        found(-0.8, 1.3, -2.5),
    ]
}

/// One tracker reading: a parsed signal or the reason it could not be parsed
pub type TrackerItem = Result<RawAnchorSignal, LayoutError>;

/// Read signals from a JSON-lines file.
///
/// Blank lines and lines starting with `#` are ignored. Lines that fail to
/// parse are kept as errors, tagged with their line number.
pub fn read_signals(path: &Path) -> anyhow::Result<Vec<TrackerItem>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading event feed {}", path.display()))?;

    let mut signals = Vec::new();
    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let item = RawAnchorSignal::from_json(line).map_err(|e| {
            warn!("{}:{}: unparseable signal: {}", path.display(), number + 1, e);
            LayoutError::MalformedEvent(format!("line {}: {}", number + 1, e))
        });
        signals.push(item);
    }
    Ok(signals)
}

/// Send every item, pausing `interval` between them
pub async fn feed(signals: Vec<TrackerItem>, tx: mpsc::Sender<TrackerItem>, interval: Duration) {
    for signal in signals {
        debug!(?signal, "Tracker emitting signal");
        if tx.send(signal).await.is_err() {
            warn!("Placement consumer stopped; dropping remaining signals");
            return;
        }
        if !interval.is_zero() {
            tokio::time::sleep(interval).await;
        }
    }
}
