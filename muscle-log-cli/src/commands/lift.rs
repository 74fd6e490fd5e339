use anyhow::{Context, Result};

use super::AppContext;
use crate::chart;

/// Print the estimated 1RM trend of one exercise as chart JSON
pub async fn chart(ctx: &AppContext, exercise: &str) -> Result<()> {
    ctx.require_login()?;

    let exercise_id = match exercise.parse::<i64>() {
        Ok(id) => id,
        Err(_) => {
            let exercises = ctx.client.list_exercises().await?;
            exercises
                .iter()
                .find(|ex| ex.name.eq_ignore_ascii_case(exercise))
                .map(|ex| ex.id)
                .with_context(|| format!("No exercise named '{}'", exercise))?
        }
    };

    let series = ctx.client.lift_series(exercise_id).await?;
    let data = chart::align(&[series.into_member_series()]);

    println!("{}", serde_json::to_string_pretty(&data)?);

    Ok(())
}
