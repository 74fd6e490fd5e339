use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use super::draft::{ValidationError, WorkoutDraft};
use crate::api::{ApiClient, ApiError};
use crate::cache::DoneDateCache;
use crate::models::NewLiftRecord;

/// One lift-log request still owed for a saved session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiftStep {
    /// 1-based set line this lift came from
    pub entry: usize,
    pub lift: NewLiftRecord,
}

/// A session that is saved while its lift log is not complete.
///
/// `remaining` starts with the step that failed; nothing after it was
/// attempted. Hand it to `SaveTransaction::resume` to finish the log
/// without creating the session again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingLiftLog {
    pub session_id: i64,
    pub performed_on: NaiveDate,
    pub confirmed: usize,
    pub remaining: Vec<LiftStep>,
    #[serde(skip)]
    pub cause: Option<ApiError>,
}

impl PendingLiftLog {
    pub fn failed_entry(&self) -> Option<usize> {
        self.remaining.first().map(|step| step.entry)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SavedSession {
    pub session_id: i64,
    pub lifts_logged: usize,
}

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Nothing was saved
    #[error("Failed to save workout: {0}")]
    SessionCreate(#[source] ApiError),

    /// The session is saved; only the lift log is incomplete
    #[error("{}", describe_partial(.0))]
    PartialLiftLog(PendingLiftLog),
}

fn describe_partial(pending: &PendingLiftLog) -> String {
    let mut message = format!(
        "Workout {} saved, but the lift log stopped at set #{}",
        pending.session_id,
        pending.failed_entry().unwrap_or_default()
    );
    if let Some(cause) = &pending.cause {
        message.push_str(&format!(": {}", cause));
    }
    message
}

impl SaveError {
    pub fn is_auth_expired(&self) -> bool {
        match self {
            SaveError::Validation(_) => false,
            SaveError::SessionCreate(cause) => cause.is_auth_expired(),
            SaveError::PartialLiftLog(pending) => pending
                .cause
                .as_ref()
                .map_or(false, ApiError::is_auth_expired),
        }
    }
}

/// Saves a workout in two ordered steps.
///
/// Step 1 creates the session with all of its sets in one request; if it
/// fails nothing exists. Step 2 posts one lift record per set, in set
/// order, and stops at the first failure. The session is never rolled back
/// because of step 2.
pub struct SaveTransaction {
    client: Arc<ApiClient>,
    dates: Arc<DoneDateCache>,
}

impl SaveTransaction {
    pub fn new(client: Arc<ApiClient>, dates: Arc<DoneDateCache>) -> Self {
        Self { client, dates }
    }

    pub async fn save(&self, draft: &WorkoutDraft) -> Result<SavedSession, SaveError> {
        let plan = draft.plan()?;

        tracing::info!(
            "Saving workout for {} with {} sets",
            plan.performed_on,
            plan.session.sets.len()
        );

        let created = self
            .client
            .create_session(&plan.session)
            .await
            .map_err(SaveError::SessionCreate)?;

        // The session exists from here on, whatever happens to the lift log.
        self.dates.invalidate().await;

        let pending = PendingLiftLog {
            session_id: created.id,
            performed_on: plan.performed_on,
            confirmed: 0,
            remaining: plan
                .lifts
                .into_iter()
                .enumerate()
                .map(|(index, lift)| LiftStep {
                    entry: index + 1,
                    lift,
                })
                .collect(),
            cause: None,
        };

        self.replicate(pending).await
    }

    /// Post only the lift records still owed; never re-creates the session
    pub async fn resume(&self, pending: PendingLiftLog) -> Result<SavedSession, SaveError> {
        tracing::info!(
            "Resuming lift log for session {} ({} remaining)",
            pending.session_id,
            pending.remaining.len()
        );
        self.replicate(pending).await
    }

    async fn replicate(&self, mut pending: PendingLiftLog) -> Result<SavedSession, SaveError> {
        pending.cause = None;
        let mut steps = std::mem::take(&mut pending.remaining).into_iter();

        while let Some(step) = steps.next() {
            match self.client.create_lift(&step.lift).await {
                Ok(()) => {
                    pending.confirmed += 1;
                    tracing::debug!(
                        "Lift log entry {} confirmed for session {}",
                        step.entry,
                        pending.session_id
                    );
                }
                Err(cause) => {
                    tracing::warn!(
                        "Lift log for session {} stopped at set #{}: {}",
                        pending.session_id,
                        step.entry,
                        cause
                    );
                    pending.remaining = std::iter::once(step).chain(steps).collect();
                    pending.cause = Some(cause);
                    return Err(SaveError::PartialLiftLog(pending));
                }
            }
        }

        Ok(SavedSession {
            session_id: pending.session_id,
            lifts_logged: pending.confirmed,
        })
    }
}
