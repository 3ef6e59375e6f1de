//! Turn CLI arguments and config defaults into conversion options.

use geostretch_core::config::ConvertDefaults;
use geostretch_core::ConvertOptions;

use crate::args::StretchArgs;

/// CLI flags win over config values, which already fall back to built-ins.
pub fn build_convert_options(defaults: &ConvertDefaults, args: &StretchArgs) -> ConvertOptions {
    let mut options = defaults.to_options();

    if let Some(lower) = args.lower_percent {
        options.stretch.lower_percent = lower;
    }
    if let Some(upper) = args.upper_percent {
        options.stretch.upper_percent = upper;
    }
    if let Some(gamma) = args.gamma {
        options.stretch.gamma = gamma;
    }
    if let Some(bands) = args.bands {
        options.bands = bands;
    }
    if let Some(policy) = args.degenerate {
        options.degenerate = policy;
    }
    if let Some(layout) = args.channel_layout {
        options.channel_layout = layout;
    }

    options
}
