use anyhow::Result;
use colored::Colorize;

use super::AppContext;

pub async fn list_exercises(ctx: &AppContext) -> Result<()> {
    ctx.require_login()?;

    let exercises = ctx.client.list_exercises().await?;

    println!("Exercises");
    println!("────────────────────────────────");

    if exercises.is_empty() {
        println!("No exercises yet. Add one with 'muscle-log exercise add <name>'.");
        return Ok(());
    }

    for exercise in exercises {
        println!("{:>6}  {}", exercise.id, exercise.name);
    }

    Ok(())
}

pub async fn add_exercise(ctx: &AppContext, name: &str) -> Result<()> {
    ctx.require_login()?;

    let name = name.trim();
    if name.is_empty() {
        return Err(anyhow::anyhow!("Exercise name cannot be empty"));
    }

    let exercise = ctx.client.create_exercise(name).await?;

    println!(
        "{} Added exercise {} (id:{})",
        "✓".green(),
        exercise.name,
        exercise.id
    );

    Ok(())
}
