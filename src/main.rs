mod app;
mod cli;
mod config;
mod error;
mod output;
mod usage;
mod utils;

use clap::Parser;

use cli::Cli;
use config::Config;
use utils::set_debug;

fn main() {
    let cli = Cli::parse();

    // Config values only fill in what the command line left unset
    let config = Config::load(cli.config.as_deref(), cli.debug);
    let cli = cli.with_config(&config);
    set_debug(cli.debug);

    if let Err(e) = app::run(&cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
