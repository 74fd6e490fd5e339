use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::Command;

use super::AppContext;
use crate::config::Config;

fn config_file(ctx: &AppContext) -> Result<PathBuf> {
    match &ctx.config.path {
        Some(path) => Ok(path.clone()),
        None => Config::config_file(),
    }
}

pub async fn show_config(ctx: &AppContext) -> Result<()> {
    let mut shown = ctx.config.clone();
    if shown.is_authenticated() {
        shown.auth.token = "********".to_string();
    }
    let config_str = toml::to_string_pretty(&shown)?;

    println!("Current Configuration ({})", config_file(ctx)?.display());
    println!("────────────────────────────────");
    println!();
    println!("{}", config_str);

    Ok(())
}

pub async fn edit_config(ctx: &AppContext) -> Result<()> {
    let config_file = config_file(ctx)?;

    if !config_file.exists() {
        ctx.config.save()?;
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vim".to_string());

    Command::new(&editor)
        .arg(&config_file)
        .status()
        .with_context(|| format!("Failed to launch editor '{}'", editor))?;

    // Reject edits that no longer parse
    Config::load_from(&config_file)?.calendar.week_start()?;

    println!("✓ Configuration saved!");

    Ok(())
}

pub async fn init_config(ctx: &AppContext, force: bool) -> Result<()> {
    let config_file = config_file(ctx)?;

    if config_file.exists() && !force {
        println!(
            "Configuration file already exists at: {}",
            config_file.display()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let config = Config {
        path: Some(config_file.clone()),
        ..Config::default()
    };
    config.save()?;

    println!("✓ Configuration initialized at: {}", config_file.display());
    println!();
    println!("You can edit it with: muscle-log config edit");

    Ok(())
}
