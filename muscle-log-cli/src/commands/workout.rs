use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Args;
use colored::Colorize;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use super::{AppContext, SetParser};
use crate::storage::Storage;
use crate::workout::{PendingLiftLog, SaveError, WorkoutDraft};

#[derive(Args)]
pub struct WorkoutLogCommand {
    /// Workout date as YYYY-MM-DD (defaults to today)
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Free-form note stored with the session
    #[arg(short, long)]
    note: Option<String>,

    /// Set lines such as "bench press 80x5" (prompted when omitted)
    #[arg(short, long = "set")]
    sets: Vec<String>,
}

impl WorkoutLogCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        ctx.require_login()?;

        let exercises = ctx
            .client
            .list_exercises()
            .await
            .context("Failed to load exercises")?;
        let parser = SetParser::new(exercises)?;

        let lines = if self.sets.is_empty() {
            prompt_set_lines()?
        } else {
            self.sets
        };

        let mut draft = WorkoutDraft {
            performed_on: Some(self.date.unwrap_or_else(|| Local::now().date_naive())),
            note: self.note,
            entries: Vec::with_capacity(lines.len()),
        };
        for line in &lines {
            draft.entries.push(parser.parse(line)?);
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} {msg}")
                .context("Invalid spinner template")?,
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner.set_message("Saving workout...");

        let outcome = ctx.save_transaction().save(&draft).await;
        spinner.finish_and_clear();

        match outcome {
            Ok(saved) => {
                println!(
                    "{} Workout {} saved with {} lift log entries",
                    "✓".green(),
                    saved.session_id,
                    saved.lifts_logged
                );
                Ok(())
            }
            Err(SaveError::PartialLiftLog(pending)) => {
                report_partial(&pending, |pending| Storage::init()?.save_pending(pending));
                Err(SaveError::PartialLiftLog(pending).into())
            }
            Err(e) => {
                println!("{} {}", "✗".red(), e);
                Err(e.into())
            }
        }
    }
}

fn prompt_set_lines() -> Result<Vec<String>> {
    println!("Enter one set per line, e.g. 'bench press 80x5'. Leave empty to finish.");

    let mut lines = Vec::new();
    loop {
        let line: String = Input::new()
            .with_prompt(format!("Set #{}", lines.len() + 1))
            .allow_empty(true)
            .interact_text()?;
        if line.trim().is_empty() {
            break;
        }
        lines.push(line);
    }
    Ok(lines)
}

fn partial_notice(pending: &PendingLiftLog) -> String {
    format!(
        "Workout {} was saved, but {} of its lift log entries were not.",
        pending.session_id,
        pending.remaining.len()
    )
}

/// Tell the user first, then queue what is still owed for
/// `workout resume`. Returns whether the queue accepted it.
fn report_partial<F>(pending: &PendingLiftLog, queue: F) -> bool
where
    F: FnOnce(&PendingLiftLog) -> Result<()>,
{
    println!("{} {}", "!".yellow(), partial_notice(pending));

    match queue(pending) {
        Ok(()) => {
            println!(
                "Run 'muscle-log workout resume --session {}' to retry them.",
                pending.session_id
            );
            true
        }
        Err(e) => {
            tracing::warn!("Could not queue lift log of session {}: {:#}", pending.session_id, e);
            println!(
                "{} Could not remember the missing entries for a later resume: {:#}",
                "✗".red(),
                e
            );
            false
        }
    }
}

pub async fn list_sessions(ctx: &AppContext, limit: usize) -> Result<()> {
    ctx.require_login()?;

    let sessions = ctx.client.list_sessions().await?;

    println!("Recent Workouts");
    println!("────────────────────────────────");

    if sessions.is_empty() {
        println!("No workouts recorded yet.");
        return Ok(());
    }

    for session in sessions.iter().take(limit) {
        println!(
            "{:>6}  {}  {:>3} sets  {:>8.1} kg  {}",
            session.id,
            session.performed_at.format("%Y-%m-%d"),
            session.sets.len(),
            session.volume_kg(),
            session.note.as_deref().unwrap_or("")
        );
    }

    let pending = Storage::init()?.list_pending()?;
    if !pending.is_empty() {
        println!();
        println!(
            "{} {} session(s) have unfinished lift logs. Run 'muscle-log workout resume'.",
            "!".yellow(),
            pending.len()
        );
    }

    Ok(())
}

pub async fn resume_lift_logs(ctx: &AppContext, session: Option<i64>) -> Result<()> {
    ctx.require_login()?;

    let storage = Storage::init()?;
    let queued = match session {
        Some(id) => storage.get_pending(id)?.into_iter().collect(),
        None => storage.list_pending()?,
    };

    if queued.is_empty() {
        println!("No unfinished lift logs.");
        return Ok(());
    }

    let transaction = ctx.save_transaction();

    for pending in queued {
        let session_id = pending.session_id;
        match transaction.resume(pending).await {
            Ok(saved) => {
                storage.remove_pending(session_id)?;
                println!(
                    "{} Lift log for workout {} complete ({} entries)",
                    "✓".green(),
                    session_id,
                    saved.lifts_logged
                );
            }
            Err(SaveError::PartialLiftLog(pending)) => {
                let expired = pending
                    .cause
                    .as_ref()
                    .map_or(false, |cause| cause.is_auth_expired());
                println!("{} {}", "✗".red(), SaveError::PartialLiftLog(pending.clone()));
                storage.save_pending(&pending)?;
                if expired {
                    break;
                }
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
