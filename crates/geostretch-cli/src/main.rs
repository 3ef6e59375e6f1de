use clap::Parser;
use geostretch_cli::{cmd_convert, Cli};

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = cmd_convert(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
