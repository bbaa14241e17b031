// Turns a raw pointer trace into a gesture
//
// filter the jitter -> classify every segment -> squash repeats.
// "down, down, down, right, right" is just "DR".

use super::direction::{classify, Symbol};
use super::geometry::{filter, Point};
use super::gesture::Gesture;
use crate::config::{RecognizerConfig, SegmentMode};
use crate::error::{GestureError, Result};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct GestureRecognizer {
    config: RecognizerConfig,
}

impl GestureRecognizer {
    pub fn new(config: RecognizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    // Recognize using the configured drop_unrecognized setting
    pub fn recognize(&self, points: &[Point]) -> Result<Gesture> {
        self.recognize_with(points, self.config.drop_unrecognized)
    }

    /// Recognize a trace, overriding whether ambiguous segments are dropped.
    ///
    /// Fails with `InvalidInput` when fewer than two points are supplied, or
    /// when fewer than two survive jitter filtering. The result can still be
    /// empty, e.g. a trace made only of perfect diagonals.
    pub fn recognize_with(&self, points: &[Point], drop_unrecognized: bool) -> Result<Gesture> {
        if points.len() < 2 {
            return Err(GestureError::InvalidInput(format!(
                "trace must contain at least 2 points, got {}",
                points.len()
            )));
        }

        let filtered = filter(points, self.config.min_delta)?;
        if filtered.len() < 2 {
            return Err(GestureError::InvalidInput(
                "trace has no movement beyond the jitter threshold".to_string(),
            ));
        }

        let segments = match self.config.segment_mode {
            SegmentMode::AllSegments => filtered.len() - 1,
            // the final segment is never classified
            SegmentMode::Legacy => filtered.len() - 2,
        };

        let mut gesture = Gesture::default();
        for pair in filtered.windows(2).take(segments) {
            let symbol = classify(pair[0], pair[1]);

            if drop_unrecognized && symbol == Symbol::Unrecognized {
                continue;
            }
            gesture.push_collapsed(symbol);
        }

        debug!(
            raw = points.len(),
            filtered = filtered.len(),
            gesture = %gesture,
            "recognized trace"
        );

        Ok(gesture)
    }
}
