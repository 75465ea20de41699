//! SkillMod - Entry Point
//!
//! Interactive chat session against the command router. Each line is a
//! slash command exactly as it would be typed in chat.

use clap::Parser;
use skillmod::bot::{CommandRouter, User};
use skillmod::core::config::BotConfig;
use skillmod::core::error::Result;

use std::io::{self, Write};
use std::path::PathBuf;

/// SkillMod chat session
#[derive(Parser, Debug)]
#[command(name = "skillmod")]
#[command(about = "Calculate joiner hero SkillMod from the terminal")]
struct Args {
    /// Identity presets are stored under
    #[arg(long, default_value = "local")]
    user: String,

    /// Name shown in analysis titles (defaults to --user)
    #[arg(long)]
    name: Option<String>,

    /// Config file; missing file means defaults
    #[arg(long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Run one command and exit
    #[arg(long, short = 'c')]
    command: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = BotConfig::load(&args.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(config.log_filter.as_str())
        .init();

    let router = CommandRouter::from_config(config)?;
    tracing::info!("SkillMod ready with {} heroes", router.catalog().len());

    let display_name = args.name.clone().unwrap_or_else(|| args.user.clone());
    let user = User::new(args.user, display_name);

    if let Some(line) = args.command {
        println!("{}", router.handle_line(&user, &line));
        return Ok(());
    }

    println!("\n=== SKILLMOD ===");
    println!("Type /help_skillmod for commands, quit / q to exit.");
    println!();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        println!();
        println!("{}", router.handle_line(&user, input));
        println!();
    }

    println!("\nGoodbye!");
    Ok(())
}
