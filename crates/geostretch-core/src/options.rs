//! Options for one conversion run.

use serde::{Deserialize, Serialize};

use crate::composite::ChannelLayout;
use crate::stretch::{DegeneratePolicy, StretchParams};

/// Gamma used by the converter unless configured otherwise
pub const DEFAULT_GAMMA: f64 = 1.2;

/// One-based source bands read into channels 0, 1, 2
pub const DEFAULT_BANDS: [usize; 3] = [1, 2, 3];

/// Everything the pipeline needs besides the input and output paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// One-based band indices, in channel order
    pub bands: [usize; 3],

    /// Stretch applied to every band
    pub stretch: StretchParams,

    /// Output for bands with no usable range
    pub degenerate: DegeneratePolicy,

    /// How the writer interprets channel order
    pub channel_layout: ChannelLayout,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            bands: DEFAULT_BANDS,
            stretch: StretchParams::with_gamma(DEFAULT_GAMMA),
            degenerate: DegeneratePolicy::default(),
            channel_layout: ChannelLayout::default(),
        }
    }
}
