mod draft;
mod save;

pub use draft::{SavePlan, SetEntry, ValidationError, ValidationReason, WorkoutDraft};
pub use save::{LiftStep, PendingLiftLog, SaveError, SaveTransaction, SavedSession};
