//! Command implementations for the geostretch CLI.

mod convert;

pub use convert::{cmd_convert, run_convert};
