mod cli;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use tonesmith::config::Config;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Gui) {
        Commands::Gui => tonesmith::app::run(config),
        Commands::Tone(args) => cli::tone(args, &config),
        Commands::Library(args) => cli::library(args, &config),
        Commands::Resynth(args) => cli::resynth(args, &config),
        Commands::FadeDemo { output } => cli::fade_demo(output),
        Commands::Config => {
            println!("{}", config.to_json_pretty()?);
            Ok(())
        }
    }
}
