pub mod history;
pub mod simulator;

pub use history::{HistoryBuffer, DEFAULT_CAPACITY};
pub use simulator::Simulator;

use agro_core::{RawPoint, SensorReading, SourceSnapshot};
use chrono::Utc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time;
use tracing::{debug, info};

/// Default tick cadence of the simulated sensors.
pub const DEFAULT_INTERVAL_MS: u64 = 3_000;

/// The simulated sensor station: produces readings and owns the history.
#[derive(Debug)]
pub struct SampleSource {
    simulator: Simulator,
    history:   HistoryBuffer,
}

impl SampleSource {
    pub fn new(simulator: Simulator, capacity: usize) -> Self {
        Self {
            simulator,
            history: HistoryBuffer::new(capacity),
        }
    }

    /// Advance the simulation one step and record the result at
    /// `timestamp_ms`. Returns the appended point.
    pub fn tick(&mut self, timestamp_ms: i64) -> RawPoint {
        let reading = self.simulator.step();
        let point = RawPoint::from_reading(timestamp_ms, &reading);
        self.history.push(point);
        point
    }

    pub fn current_reading(&self) -> SensorReading {
        self.simulator.reading()
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// Immutable copy of the current reading and history.
    pub fn snapshot(&self) -> SourceSnapshot {
        SourceSnapshot {
            reading: self.current_reading(),
            history: self.history.snapshot(),
            version: self.history.version(),
        }
    }
}

/// Spawn a background Tokio task that ticks `source` every `interval_ms`
/// milliseconds and forwards [`SourceSnapshot`]s through the returned channel.
///
/// The first tick fires immediately. The task stops automatically when the
/// receiver is dropped.
pub fn spawn_feed(mut source: SampleSource, interval_ms: u64) -> mpsc::Receiver<SourceSnapshot> {
    let (tx, rx) = mpsc::channel(4);
    let interval = Duration::from_millis(interval_ms.max(1));

    tokio::spawn(async move {
        let mut ticker = time::interval(interval);
        info!(interval_ms, capacity = source.history().capacity(), "sample feed started");

        loop {
            ticker.tick().await;
            let point = source.tick(Utc::now().timestamp_millis());
            debug!(ts = point.timestamp, temperature = point.temperature, "sampled");

            if tx.send(source.snapshot()).await.is_err() {
                break; // all receivers dropped
            }
        }

        info!("sample feed stopped");
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(capacity: usize) -> SampleSource {
        SampleSource::new(Simulator::new(SensorReading::default(), Some(11)), capacity)
    }

    #[test]
    fn tick_appends_current_reading() {
        let mut src = source(10);
        let point = src.tick(1_000);
        let reading = src.current_reading();

        assert_eq!(point.timestamp, 1_000);
        assert_eq!(point.temperature, reading.temperature);
        assert_eq!(point.battery, reading.battery);
        assert_eq!(src.history().latest(), Some(&point));
    }

    #[test]
    fn snapshot_tracks_version_and_capacity() {
        let mut src = source(3);
        for ts in 0..5 {
            src.tick(ts);
        }
        let snap = src.snapshot();
        assert_eq!(snap.version, 5);
        assert_eq!(snap.history.len(), 3);
        assert_eq!(snap.history[0].timestamp, 2);
        assert_eq!(snap.reading, src.current_reading());
    }

    #[tokio::test]
    async fn feed_sends_growing_snapshots() {
        let mut rx = spawn_feed(source(500), 10);

        let first = rx.recv().await.expect("first snapshot");
        let second = rx.recv().await.expect("second snapshot");

        assert_eq!(first.history.len(), 1);
        assert_eq!(second.history.len(), 2);
        assert!(second.version > first.version);
        assert!(second.history[1].timestamp >= second.history[0].timestamp);
    }
}
