use clap::Parser;
use fearcross::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
