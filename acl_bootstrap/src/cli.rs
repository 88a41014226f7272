use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::{build::Build, setup::Setup};

#[derive(Parser)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Configure and compile the ACL compiler
    Build(Build),
    /// Install the standard library into the home directory
    Setup(Setup),
}

pub trait CommandTrait {
    type In;
    type Out;

    fn execute(&mut self, input: Self::In) -> Result<Self::Out>;
}

impl CommandTrait for Commands {
    type In = ();
    type Out = ();

    fn execute(&mut self, _: ()) -> Result<()> {
        match self {
            Commands::Build(b) => b.execute(()),
            Commands::Setup(s) => s.execute(()),
        }
    }
}
