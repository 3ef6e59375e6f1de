//! Percentile contrast stretch from wide samples to 8-bit.
//!
//! Each band is stretched on its own:
//! 1. `low`/`high` = lower/upper percentile of the finite samples
//! 2. `v' = (v - low) * 255 / (high - low)`, clipped to [0, 255]
//! 3. if gamma != 1: `v'' = (v' / 255) ^ (1 / gamma) * 255`
//! 4. truncate to `u8`
//!
//! A gamma above 1 brightens midtones: the exponent is `1 / gamma`.

mod percentile;


pub use percentile::{band_percentiles, percentile};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StretchError};
use crate::raster::Band;

/// Output value for every sample of a band under [`DegeneratePolicy::MidGray`].
pub const MID_GRAY: u8 = 128;

/// Parameters of the percentile stretch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StretchParams {
    /// Percentile mapped to 0
    pub lower_percent: f64,
    /// Percentile mapped to 255
    pub upper_percent: f64,
    /// Gamma, applied as exponent `1 / gamma`
    pub gamma: f64,
}

impl Default for StretchParams {
    fn default() -> Self {
        Self {
            lower_percent: 2.0,
            upper_percent: 98.0,
            gamma: 1.0,
        }
    }
}

impl StretchParams {
    pub fn with_gamma(gamma: f64) -> Self {
        Self {
            gamma,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("lower percentile", self.lower_percent),
            ("upper percentile", self.upper_percent),
        ] {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(StretchError::InvalidParameters(format!(
                    "{} must be within [0, 100], got {}",
                    name, value
                )));
            }
        }

        if self.lower_percent >= self.upper_percent {
            return Err(StretchError::InvalidParameters(format!(
                "lower percentile {} must be below upper percentile {}",
                self.lower_percent, self.upper_percent
            )));
        }

        if !self.gamma.is_finite() || self.gamma <= 0.0 {
            return Err(StretchError::InvalidParameters(format!(
                "gamma must be a positive number, got {}",
                self.gamma
            )));
        }

        Ok(())
    }
}

/// What to output when a band has no usable range (`high <= low`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DegeneratePolicy {
    /// Samples above `low` become 255, all others 0
    #[default]
    Threshold,

    /// Every sample becomes 0
    Black,

    /// Every sample becomes [`MID_GRAY`]
    MidGray,
}

impl std::str::FromStr for DegeneratePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "threshold" => Ok(DegeneratePolicy::Threshold),
            "black" | "zero" => Ok(DegeneratePolicy::Black),
            "mid-gray" | "midgray" | "mid-grey" | "gray" | "grey" => Ok(DegeneratePolicy::MidGray),
            _ => Err(format!(
                "Unknown degenerate policy '{}' (expected threshold, black or mid-gray)",
                s
            )),
        }
    }
}

/// An 8-bit band produced by the stretch.
#[derive(Debug, Clone)]
pub struct StretchedBand {
    /// One-based index of the source band
    pub index: usize,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    /// Value mapped to 0
    pub low: f64,
    /// Value mapped to 255
    pub high: f64,
    /// True when `high <= low` and the [`DegeneratePolicy`] was applied
    pub degenerate: bool,
}

/// Stretch with the default degenerate policy.
pub fn stretch_uint16_to_uint8(band: &Band, params: &StretchParams) -> Result<StretchedBand> {
    stretch_band(band, params, DegeneratePolicy::default())
}

/// Stretch one band to 8-bit. The input is left untouched.
pub fn stretch_band(
    band: &Band,
    params: &StretchParams,
    policy: DegeneratePolicy,
) -> Result<StretchedBand> {
    params.validate()?;

    let Some((low, high)) = band_percentiles(band, params.lower_percent, params.upper_percent)
    else {
        warn!("Band {} has no finite samples; writing zeros", band.index);
        return Ok(StretchedBand {
            index: band.index,
            width: band.width,
            height: band.height,
            data: vec![0; band.data.len()],
            low: 0.0,
            high: 0.0,
            degenerate: true,
        });
    };

    debug!(
        "Band {}: p{}={} p{}={}",
        band.index, params.lower_percent, low, params.upper_percent, high
    );

    let (data, degenerate) = if high > low {
        let inv_gamma = (params.gamma != 1.0).then(|| 1.0 / params.gamma);
        let data = band
            .data
            .iter()
            .map(|&v| stretch_sample(v, low, high, inv_gamma))
            .collect();
        (data, false)
    } else {
        warn!(
            "Band {} has no contrast between p{} and p{} (value {}); applying {:?} policy",
            band.index, params.lower_percent, params.upper_percent, low, policy
        );
        (degenerate_band(&band.data, low, policy), true)
    };

    Ok(StretchedBand {
        index: band.index,
        width: band.width,
        height: band.height,
        data,
        low,
        high,
        degenerate,
    })
}

/// Rescale, clip, gamma-correct and truncate one sample.
#[inline]
fn stretch_sample(value: f64, low: f64, high: f64, inv_gamma: Option<f64>) -> u8 {
    if !value.is_finite() {
        return 0;
    }

    let scaled = ((value - low) * 255.0 / (high - low)).clamp(0.0, 255.0);
    let corrected = match inv_gamma {
        Some(exponent) => (scaled / 255.0).powf(exponent) * 255.0,
        None => scaled,
    };

    // `as` truncates toward zero
    corrected as u8
}

fn degenerate_band(data: &[f64], low: f64, policy: DegeneratePolicy) -> Vec<u8> {
    match policy {
        DegeneratePolicy::Threshold => data
            .iter()
            .map(|&v| if v.is_finite() && v > low { 255 } else { 0 })
            .collect(),
        DegeneratePolicy::Black => vec![0; data.len()],
        DegeneratePolicy::MidGray => vec![MID_GRAY; data.len()],
    }
}
