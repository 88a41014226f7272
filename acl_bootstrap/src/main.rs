use anyhow::Result;
use clap::Parser;
use cli::{Cli, CommandTrait};

pub mod build;
pub mod cli;
pub mod setup;

fn main() -> Result<()> {
    let mut args = Cli::parse();

    env_logger::builder()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_target(false)
        .format_timestamp(None)
        .format_file(false)
        .format_line_number(false)
        .init();

    args.command.execute(())
}
