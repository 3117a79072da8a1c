//! Equal-width histogram of the reference score distribution.

/// Smallest allowed bin count.
pub const MIN_BINS: usize = 2;

/// Largest allowed bin count.
pub const MAX_BINS: usize = 100;

/// Bin count used before the user touches the control.
pub const DEFAULT_BINS: usize = 20;

/// Binned counts plus the position of a highlighted value.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Lower edge of the first bin
    pub min: f64,
    /// Upper edge of the last bin
    pub max: f64,
    /// Count per bin
    pub counts: Vec<u32>,
    /// Value drawn as the marker
    pub marker: f64,
    /// Bin holding `marker`, if it lies inside `[min, max]`
    pub marker_bin: Option<usize>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width buckets and place `marker`.
    ///
    /// `bins` is clamped into `MIN_BINS..=MAX_BINS`. Non-finite values are
    /// skipped. The last bin is closed on the right.
    #[must_use]
    pub fn build(values: &[f64], bins: usize, marker: f64) -> Self {
        let bins = clamp_bins(bins);

        let (mut min, mut max) = values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if min > max {
            min = 0.0;
            max = 100.0;
        } else if min == max {
            min -= 0.5;
            max += 0.5;
        }

        let mut hist = Self {
            min,
            max,
            counts: vec![0; bins],
            marker,
            marker_bin: None,
        };

        for value in values.iter().copied().filter(|v| v.is_finite()) {
            if let Some(bin) = hist.bin_of(value) {
                hist.counts[bin] += 1;
            }
        }
        hist.marker_bin = hist.bin_of(marker);
        hist
    }

    #[must_use]
    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn bin_width(&self) -> f64 {
        (self.max - self.min) / self.bins() as f64
    }

    /// Lower and upper edge of a bin.
    #[must_use]
    pub fn bin_edges(&self, bin: usize) -> (f64, f64) {
        let width = self.bin_width();
        let lo = self.min + width * bin as f64;
        (lo, lo + width)
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    fn bin_of(&self, value: f64) -> Option<usize> {
        if !value.is_finite() || value < self.min || value > self.max {
            return None;
        }
        let idx = ((value - self.min) / self.bin_width()).floor() as usize;
        Some(idx.min(self.bins() - 1))
    }
}

/// Clamp a requested bin count into the supported range.
#[must_use]
pub fn clamp_bins(bins: usize) -> usize {
    bins.clamp(MIN_BINS, MAX_BINS)
}
