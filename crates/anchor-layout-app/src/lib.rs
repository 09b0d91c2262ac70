//! anchor-layout-app: drive a placement session from a simulated tracker
//!
//! The tracker and the placement consumer run concurrently on one task:
//! the tracker pushes signals into a bounded channel and the consumer
//! applies them to an in-memory scene one at a time.

pub mod report;
pub mod tracker;

use std::path::PathBuf;
use std::time::Duration;

use anchor_layout::{
    DetectionOutcome, LayoutConfig, LayoutError, MemoryScene, PlacementSession, RawAnchorSignal,
};
use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{debug, info};
use tracker::TrackerItem;

const CHANNEL_CAPACITY: usize = 16;

/// Where the tracker's signals come from
#[derive(Debug, Clone, PartialEq)]
pub enum Feed {
    /// Built-in found/lost/found script
    Scripted,
    /// JSON-lines file of raw signals
    File(PathBuf),
}

impl Feed {
    pub fn signals(&self) -> anyhow::Result<Vec<TrackerItem>> {
        match self {
            Feed::Scripted => Ok(tracker::scripted_signals().into_iter().map(Ok).collect()),
            Feed::File(path) => tracker::read_signals(path),
        }
    }
}

/// Counters collected while consuming the feed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedStats {
    pub spawned: usize,
    pub repositioned: usize,
    pub lost: usize,
    pub rejected: usize,
}

/// Result of a demo run
#[derive(Debug)]
pub struct DemoRun {
    pub session: PlacementSession,
    pub scene: MemoryScene,
    pub stats: FeedStats,
}

/// Run one session against `feed`, pausing `interval` between signals
pub async fn run(config: LayoutConfig, feed: &Feed, interval: Duration) -> anyhow::Result<DemoRun> {
    run_in_scene(config, feed, interval, MemoryScene::new()).await
}

/// Like [`run`], on a caller-provided scene
pub async fn run_in_scene(
    config: LayoutConfig,
    feed: &Feed,
    interval: Duration,
    mut scene: MemoryScene,
) -> anyhow::Result<DemoRun> {
    let signals = feed.signals()?;
    info!(signals = signals.len(), ?feed, "Starting placement demo");

    let mut session = PlacementSession::new(config).context("invalid layout configuration")?;
    let mut stats = FeedStats::default();

    let (tx, mut rx) = mpsc::channel(CHANNEL_CAPACITY);
    let producer = tracker::feed(signals, tx, interval);
    let consumer = async {
        while let Some(item) = rx.recv().await {
            let raw = match item {
                Ok(raw) => raw,
                Err(_) => {
                    stats.rejected += 1;
                    continue;
                }
            };
            let lost = matches!(raw, RawAnchorSignal::Lost);
            match session.handle_raw(&mut scene, raw) {
                Ok(Some(DetectionOutcome::Spawned { .. })) => stats.spawned += 1,
                Ok(Some(DetectionOutcome::Repositioned { .. })) => stats.repositioned += 1,
                Ok(None) if lost => stats.lost += 1,
                Ok(None) => {}
                Err(LayoutError::MalformedEvent(_)) => stats.rejected += 1,
                Err(e) => {
                    // Unblock a producer waiting on a full channel
                    rx.close();
                    return Err(e);
                }
            }
            debug!(state = ?session.state(), "Signal applied");
        }
        Ok(())
    };

    let ((), consumed) = futures::join!(producer, consumer);
    consumed.context("placement session failed")?;

    info!(
        spawned = stats.spawned,
        repositioned = stats.repositioned,
        lost = stats.lost,
        rejected = stats.rejected,
        entities = scene.len(),
        "Feed exhausted"
    );
    Ok(DemoRun { session, scene, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_layout::{LayoutState, Preset};
    use std::io::Write;

    #[tokio::test]
    async fn test_scripted_orbit_run() {
        let config = LayoutConfig::preset(Preset::Orbit);
        let run = run(config, &Feed::Scripted, Duration::ZERO).await.unwrap();

        assert_eq!(
            run.stats,
            FeedStats {
                spawned: 1,
                repositioned: 3,
                lost: 2,
                rejected: 1,
            }
        );
        assert_eq!(run.session.state(), LayoutState::Active);
        // 10 markers, 10 connectors, ground line
        assert_eq!(run.scene.len(), 21);
        assert_eq!(run.session.entities().len(), 21);
    }

    #[tokio::test]
    async fn test_panel_run_creates_only_backdrop() {
        let config = LayoutConfig::preset(Preset::Panel);
        let run = run(config, &Feed::Scripted, Duration::ZERO).await.unwrap();
        assert_eq!(run.scene.len(), 1);
        assert!(run.session.slots().is_empty());
        assert!(run.session.auxiliary().is_some());
    }

    #[tokio::test]
    async fn test_file_feed_lost_first() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"type":"lost"}}"#).unwrap();
        writeln!(file, r#"{{"type":"found","position":{{"x":1.0,"y":0.0,"z":0.0}}}}"#).unwrap();
        writeln!(file, r#"{{"type":"found","position":"#).unwrap();

        let feed = Feed::File(file.path().to_path_buf());
        let run = run(LayoutConfig::default(), &feed, Duration::ZERO).await.unwrap();

        assert_eq!(run.stats.spawned, 1);
        // Loss before the first detection changes nothing
        assert_eq!(run.stats.lost, 1);
        assert_eq!(run.stats.rejected, 1);
        assert_eq!(run.session.state(), LayoutState::Active);
    }

    #[tokio::test]
    async fn test_scene_failure_with_backlog_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for i in 0..(CHANNEL_CAPACITY * 3) {
            writeln!(
                file,
                r#"{{"type":"found","position":{{"x":{i}.0,"y":0.0,"z":0.0}}}}"#
            )
            .unwrap();
        }
        let feed = Feed::File(file.path().to_path_buf());
        let scene = MemoryScene::new().with_creation_limit(0);

        let result = run_in_scene(LayoutConfig::default(), &feed, Duration::ZERO, scene).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_invalid_config_fails() {
        let mut config = LayoutConfig::default();
        config.layout.radius = -1.0;
        assert!(run(config, &Feed::Scripted, Duration::ZERO).await.is_err());
    }
}
