use crate::commands;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "lintshift",
    about = "move package.json lint setups onto @applint/spec",
    version,
    color = clap::ColorChoice::Auto
)]
pub struct Cli {
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rewrite manifests in place (or print them with --dry-run)
    Migrate(commands::migrate::MigrateArgs),
    /// Report manifests that still need migrating
    Check(commands::check::CheckArgs),
}
