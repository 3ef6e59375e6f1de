//! Shared pieces of the geostretch CLI
//!
//! Argument definitions, parsers and command implementations live here so
//! they can be tested without spawning the binary.

pub mod args;
pub mod builders;
pub mod commands;
pub mod parsers;
pub mod report;

// Re-export commonly used items at the crate root for convenience
pub use args::{Cli, StretchArgs};
pub use builders::build_convert_options;
pub use commands::{cmd_convert, run_convert};
pub use parsers::{parse_band_indices, parse_gamma, parse_percent};
