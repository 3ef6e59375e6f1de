//! Percentile estimation with linear interpolation between closest ranks.
//!
//! Two strategies produce identical results:
//! - 8/16-bit unsigned bands are counted into a 65536-bucket histogram and
//!   the order statistics are read from the cumulative counts.
//! - Everything else sorts a copy of the finite samples.
//!
//! Non-finite samples never take part in the ranking.

use crate::raster::Band;

const NUM_BUCKETS: usize = 65536;

/// Interpolate between two neighbouring order statistics.
///
/// Uses `b - (b - a) * (1 - t)` for the upper half so the result matches the
/// reference numeric library bit for bit.
#[inline]
pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let diff = b - a;
    if t >= 0.5 {
        b - diff * (1.0 - t)
    } else {
        a + diff * t
    }
}

/// Resolve `percent` against `n` ranked values, `nth(rank)` returning the
/// value at a zero-based rank in ascending order.
fn at_percent<F>(n: usize, percent: f64, mut nth: F) -> f64
where
    F: FnMut(usize) -> f64,
{
    let virtual_index = (n - 1) as f64 * (percent / 100.0);
    let previous = virtual_index.floor();
    let t = virtual_index - previous;

    let previous = (previous as usize).min(n - 1);
    let next = (previous + 1).min(n - 1);
    lerp(nth(previous), nth(next), t)
}

/// Percentile of the finite values in `values`. Returns `None` when there are
/// none.
pub fn percentile(values: &[f64], percent: f64) -> Option<f64> {
    let sorted = sorted_finite(values);
    if sorted.is_empty() {
        return None;
    }
    Some(at_percent(sorted.len(), percent, |rank| sorted[rank]))
}

/// Lower and upper percentile of a band, picking the histogram strategy when
/// the sample format allows it.
pub fn band_percentiles(band: &Band, lower: f64, upper: f64) -> Option<(f64, f64)> {
    if band.sample_format.fits_u16_histogram() {
        if let Some(histogram) = RankHistogram::build(&band.data) {
            return histogram.percentiles(lower, upper);
        }
    }

    let sorted = sorted_finite(&band.data);
    if sorted.is_empty() {
        return None;
    }
    let n = sorted.len();
    Some((
        at_percent(n, lower, |rank| sorted[rank]),
        at_percent(n, upper, |rank| sorted[rank]),
    ))
}

fn sorted_finite(values: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_unstable_by(f64::total_cmp);
    sorted
}

/// Counts of integer samples in 0..=65535.
struct RankHistogram {
    counts: Vec<u64>,
    total: usize,
}

impl RankHistogram {
    /// Returns `None` if any sample is not an integer in range, in which case
    /// the caller falls back to sorting.
    fn build(data: &[f64]) -> Option<Self> {
        let mut counts = vec![0u64; NUM_BUCKETS];
        for &value in data {
            if !(0.0..=(NUM_BUCKETS - 1) as f64).contains(&value) || value.fract() != 0.0 {
                return None;
            }
            counts[value as usize] += 1;
        }
        Some(Self {
            counts,
            total: data.len(),
        })
    }

    fn percentiles(&self, lower: f64, upper: f64) -> Option<(f64, f64)> {
        if self.total == 0 {
            return None;
        }
        Some((
            at_percent(self.total, lower, |rank| self.nth(rank)),
            at_percent(self.total, upper, |rank| self.nth(rank)),
        ))
    }

    /// Value at a zero-based ascending rank.
    fn nth(&self, rank: usize) -> f64 {
        let mut seen = 0u64;
        for (value, &count) in self.counts.iter().enumerate() {
            seen += count;
            if seen > rank as u64 {
                return value as f64;
            }
        }
        (NUM_BUCKETS - 1) as f64
    }
}
