use std::process::ExitCode;

use clap::Parser;

use pigment::cli::{self, CliArgs};

fn main() -> ExitCode {
    pigment::logger::init();
    cli::run(CliArgs::parse())
}
