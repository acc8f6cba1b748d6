use agro_core::RawPoint;
use std::collections::VecDeque;

/// Default number of samples kept in the history.
pub const DEFAULT_CAPACITY: usize = 500;

/// Rolling history of raw samples — the input to the trend charts.
///
/// Points are kept in insertion order; once `capacity` is reached each push
/// evicts the oldest point.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    points:   VecDeque<RawPoint>,
    capacity: usize,
    version:  u64,
}

impl HistoryBuffer {
    /// A buffer holding at most `capacity` points (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
            version: 0,
        }
    }

    /// Push a new point, evicting the oldest if at capacity.
    pub fn push(&mut self, point: RawPoint) {
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
        self.version += 1;
    }

    /// Copy of the buffer, oldest point first.
    pub fn snapshot(&self) -> Vec<RawPoint> {
        self.points.iter().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RawPoint> {
        self.points.iter()
    }

    pub fn latest(&self) -> Option<&RawPoint> {
        self.points.back()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of pushes so far; changes whenever the contents change.
    pub fn version(&self) -> u64 {
        self.version
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
