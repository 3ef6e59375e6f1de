//! `geostretch` conversion command

use geostretch_core::config::load_config;
use geostretch_core::{ConversionReport, StretchError};
use log::debug;

use crate::args::Cli;
use crate::builders::build_convert_options;
use crate::report::{format_report, format_report_json};

/// Resolve options and run the conversion, without printing anything.
pub fn run_convert(cli: &Cli) -> Result<ConversionReport, StretchError> {
    let handle = load_config(cli.config.as_deref())?;
    handle.log_usage();

    let options = build_convert_options(&handle.config.defaults, &cli.stretch);
    debug!("Conversion options: {:?}", options);

    geostretch_core::convert(&cli.input, &cli.output, &options)
}

/// Execute the conversion and print its diagnostics to stdout.
///
/// # Returns
/// Returns `Ok(())` on success, or an error message describing the failure.
pub fn cmd_convert(cli: &Cli) -> Result<(), String> {
    let report = run_convert(cli).map_err(|e| e.to_string())?;

    if cli.json {
        println!("{}", format_report_json(&report)?);
    } else {
        println!("{}", format_report(&report));
    }

    Ok(())
}
