use std::sync::Mutex;

/// Counters shared between the CLI run and the HTTP bridge.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub analyses: usize,
    pub pairs: u64,
    pub errors: usize,
}

#[derive(Default)]
struct Metrics {
    analyses: usize,
    pairs: u64,
    errors: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_analysis(&self, pairs: u64) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.analyses += 1;
            metrics.pairs += pairs;
        }
    }

    pub fn record_error(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.errors += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        if let Ok(metrics) = self.inner.lock() {
            MetricsSnapshot {
                analyses: metrics.analyses,
                pairs: metrics.pairs,
                errors: metrics.errors,
            }
        } else {
            MetricsSnapshot::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let metrics = MetricsRecorder::new();
        metrics.record_analysis(9);
        metrics.record_analysis(16);
        metrics.record_error();
        assert_eq!(
            metrics.snapshot(),
            MetricsSnapshot {
                analyses: 2,
                pairs: 25,
                errors: 1
            }
        );
    }
}
