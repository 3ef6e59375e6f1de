//! Default conversion values and their sanitization.

use serde::{Deserialize, Serialize};

use crate::composite::ChannelLayout;
use crate::options::{ConvertOptions, DEFAULT_BANDS, DEFAULT_GAMMA};
use crate::stretch::{DegeneratePolicy, StretchParams};

/// `defaults:` section of the config file. Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertDefaults {
    pub lower_percent: f64,
    pub upper_percent: f64,
    pub gamma: f64,
    pub bands: [usize; 3],
    pub degenerate: DegeneratePolicy,
    pub channel_layout: ChannelLayout,
}

impl Default for ConvertDefaults {
    fn default() -> Self {
        let stretch = StretchParams::default();
        Self {
            lower_percent: stretch.lower_percent,
            upper_percent: stretch.upper_percent,
            gamma: DEFAULT_GAMMA,
            bands: DEFAULT_BANDS,
            degenerate: DegeneratePolicy::default(),
            channel_layout: ChannelLayout::default(),
        }
    }
}

impl ConvertDefaults {
    /// Replace out-of-range values, returning one warning per correction.
    pub(crate) fn sanitize(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();
        let builtin = Self::default();

        for (name, value) in [
            ("lower_percent", &mut self.lower_percent),
            ("upper_percent", &mut self.upper_percent),
        ] {
            if value.is_nan() {
                warnings.push(format!("{} is not a number; using built-in default", name));
                *value = if name == "lower_percent" {
                    builtin.lower_percent
                } else {
                    builtin.upper_percent
                };
            } else if !(0.0..=100.0).contains(&*value) {
                let clamped = (*value).clamp(0.0, 100.0);
                warnings.push(format!("{} {} clamped to {}", name, value, clamped));
                *value = clamped;
            }
        }

        if self.lower_percent >= self.upper_percent {
            warnings.push(format!(
                "lower_percent {} is not below upper_percent {}; using {} and {}",
                self.lower_percent, self.upper_percent, builtin.lower_percent, builtin.upper_percent
            ));
            self.lower_percent = builtin.lower_percent;
            self.upper_percent = builtin.upper_percent;
        }

        if !self.gamma.is_finite() || self.gamma <= 0.0 {
            warnings.push(format!(
                "gamma {} must be positive; using {}",
                self.gamma, builtin.gamma
            ));
            self.gamma = builtin.gamma;
        }

        if self.bands.contains(&0) {
            warnings.push(format!(
                "bands {:?} are one-based; using {:?}",
                self.bands, builtin.bands
            ));
            self.bands = builtin.bands;
        }

        warnings
    }

    pub fn to_options(&self) -> ConvertOptions {
        ConvertOptions {
            bands: self.bands,
            stretch: StretchParams {
                lower_percent: self.lower_percent,
                upper_percent: self.upper_percent,
                gamma: self.gamma,
            },
            degenerate: self.degenerate,
            channel_layout: self.channel_layout,
        }
    }
}
