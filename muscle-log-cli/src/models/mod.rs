pub mod exercise;
pub mod lift;
pub mod series;
pub mod team;
pub mod timestamp;
pub mod user;
pub mod workout;

pub use exercise::{Exercise, NewExercise};
pub use lift::{LiftRecord, LiftSeries, NewLiftRecord};
pub use series::{MemberSeries, SeriesPoint};
pub use team::{JoinTeam, JoinedTeam, NewTeam, Team, TeamSeries};
pub use user::{NewUser, TokenResponse, UserInfo};
pub use workout::{ExerciseSet, NewExerciseSet, NewWorkoutSession, WorkoutSession};
