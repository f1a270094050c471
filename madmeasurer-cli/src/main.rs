// madmeasurer-cli/src/main.rs
//
// Entry point of the madmeasurer binary: parses the command line, sets up
// logging and dispatches to the subcommand. Any error is printed in red and
// turns into exit code 1.

use clap::Parser;
use std::process;

use madmeasurer_cli::{
    Cli, Commands, logging, run_analyse, run_copy, run_describe, run_find, run_measure, terminal,
};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Find(args) => run_find(args),
        Commands::Measure(args) => run_measure(args),
        Commands::Copy(args) => run_copy(args),
        Commands::Analyse(args) => run_analyse(args),
        Commands::Describe(args) => run_describe(args),
    };

    if let Err(e) = result {
        terminal::print_error(&e.to_string());
        process::exit(1);
    }
}
