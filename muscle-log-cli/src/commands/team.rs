use anyhow::Result;
use colored::Colorize;

use super::AppContext;
use crate::chart;

pub async fn list_teams(ctx: &AppContext) -> Result<()> {
    ctx.require_login()?;

    let teams = ctx.client.my_teams().await?;

    println!("My Teams");
    println!("────────────────────────────────");

    if teams.is_empty() {
        println!("You are not in a team yet.");
        return Ok(());
    }

    for team in teams {
        match &team.invite_code {
            Some(code) => println!("  {}  invite: {}", team, code),
            None => println!("  {}", team),
        }
    }

    Ok(())
}

pub async fn create_team(ctx: &AppContext, name: &str) -> Result<()> {
    ctx.require_login()?;

    let team = ctx.client.create_team(name).await?;

    println!("{} Created {}", "✓".green(), team);
    if let Some(code) = &team.invite_code {
        println!("Share this invite code: {}", code.bold());
    }

    Ok(())
}

pub async fn join_team(ctx: &AppContext, code: &str) -> Result<()> {
    ctx.require_login()?;

    let joined = ctx.client.join_team(code.trim()).await?;

    match joined.team_id {
        Some(id) => println!("{} Joined team {}", "✓".green(), id),
        None => println!("{} Joined team", "✓".green()),
    }

    Ok(())
}

/// Print every member's series for one metric on a shared axis
pub async fn chart(ctx: &AppContext, team_id: i64, metric: &str) -> Result<()> {
    ctx.require_login()?;

    let series = ctx.client.team_series(team_id, metric).await?;
    let data = chart::align(&series.series);

    println!("{}", serde_json::to_string_pretty(&data)?);

    Ok(())
}
