mod benefits;
mod claims;
mod cli;
mod diagnostics;
mod error;
mod fmt;
mod loader;
mod logging;
mod models;
mod pipeline;
mod profile;
mod ratio;
mod schema;
mod settings;
mod summary;
mod workbook;

use clap::Parser;

use cli::{Cli, Commands, ConfigCommands};

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Process {
            inputs,
            name,
            output_dir,
        } => cli::process::run(&inputs, name, output_dir),
        Commands::Preview { inputs, rows } => cli::preview::run(&inputs, rows),
        Commands::Profiles => cli::profiles::list(),
        Commands::Config { command } => match command {
            ConfigCommands::Show => cli::config::show(),
            ConfigCommands::Set {
                output_dir,
                name,
                profile,
                layout,
                clear_layout,
            } => cli::config::set(output_dir, name, profile, layout, clear_layout),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
