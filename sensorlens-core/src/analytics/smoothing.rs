//! Moving-average smoothing
//!
//! Windows are contiguous and advance by one sample. A series of `n`
//! values smoothed with window `w` yields `max(0, n - w + 1)` means, each
//! the plain arithmetic mean of its window rounded to two decimals.

use alloc::vec::Vec;

use crate::{
    config::SmoothingConfig,
    constants::analytics::REPORT_DECIMALS,
    stats::{mean, round_to},
};

/// Sliding-window moving average
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Smoother {
    window: usize,
}

impl Default for Smoother {
    fn default() -> Self {
        Self::from_config(&SmoothingConfig::default())
    }
}

impl Smoother {
    /// Smoother over `window` samples
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    /// Smoother using the configured default window
    pub fn from_config(config: &SmoothingConfig) -> Self {
        Self::new(config.default_window)
    }

    /// Window length in samples
    pub fn window(&self) -> usize {
        self.window
    }

    /// Rolling means of `values`
    ///
    /// Returns an empty sequence when `values` is shorter than the window,
    /// and for a zero window.
    pub fn smooth(&self, values: &[f64]) -> Vec<f64> {
        if self.window == 0 || values.len() < self.window {
            log_debug!(
                "smoothing skipped: {} samples, window {}",
                values.len(),
                self.window
            );
            return Vec::new();
        }

        values
            .windows(self.window)
            .filter_map(mean)
            .map(|m| round_to(m, REPORT_DECIMALS))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_of_three() {
        let smoother = Smoother::new(3);
        assert_eq!(smoother.smooth(&[10.0, 12.0, 11.0, 13.0, 12.0]), [11.0, 12.0, 12.0]);
    }

    #[test]
    fn rounds_each_mean() {
        let smoother = Smoother::new(3);
        // (1 + 2 + 2) / 3 = 1.666..
        assert_eq!(smoother.smooth(&[1.0, 2.0, 2.0, 2.0]), [1.67, 2.0]);
    }

    #[test]
    fn exact_halves_round_to_even() {
        let smoother = Smoother::new(2);
        // 10.125 and 10.375 are exact in binary
        assert_eq!(smoother.smooth(&[10.25, 10.0, 10.75]), [10.12, 10.38]);
    }

    #[test]
    fn short_input_is_empty_not_error() {
        assert!(Smoother::new(5).smooth(&[1.0, 2.0]).is_empty());
        assert!(Smoother::new(1).smooth(&[]).is_empty());
    }

    #[test]
    fn window_equal_to_length_gives_one_point() {
        assert_eq!(Smoother::new(4).smooth(&[1.0, 2.0, 3.0, 4.0]), [2.5]);
    }

    #[test]
    fn zero_window_is_empty() {
        assert!(Smoother::new(0).smooth(&[1.0, 2.0, 3.0]).is_empty());
    }

    #[test]
    fn default_window_from_config() {
        assert_eq!(Smoother::default().window(), 10);
    }
}
