mod calendar;
mod config_cmd;
mod context;
mod exercise;
mod lift;
mod login;
mod logout;
mod register;
mod set_parser;
mod team;
mod whoami;
mod workout;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use calendar::CalendarCommand;
pub use context::AppContext;
pub use login::LoginCommand;
pub use logout::LogoutCommand;
pub use register::RegisterCommand;
pub use set_parser::SetParser;
pub use whoami::WhoamiCommand;
pub use workout::WorkoutLogCommand;

#[derive(Parser)]
#[command(name = "muscle-log")]
#[command(about = "Terminal client for the Muscle Log workout tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "MUSCLE_LOG_CONFIG")]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Login to Muscle Log
    Login(LoginCommand),

    /// Logout from Muscle Log
    Logout(LogoutCommand),

    /// Create a new account
    Register(RegisterCommand),

    /// Show current user information
    Whoami(WhoamiCommand),

    /// Record and review workout sessions
    #[command(subcommand)]
    Workout(WorkoutSubcommands),

    /// Manage the exercise catalogue
    #[command(subcommand)]
    Exercise(ExerciseSubcommands),

    /// Show the month calendar with workout days marked
    Calendar(CalendarCommand),

    /// Lift trend charts
    #[command(subcommand)]
    Lift(LiftSubcommands),

    /// Teams and team progress charts
    #[command(subcommand)]
    Team(TeamSubcommands),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigSubcommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum WorkoutSubcommands {
    /// Save a workout session and its lift log
    Log(WorkoutLogCommand),

    /// List recorded sessions, newest first
    List {
        /// Number of sessions to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Retry lift logs left incomplete by an earlier save
    Resume {
        /// Only resume this session
        #[arg(long)]
        session: Option<i64>,
    },
}

#[derive(Subcommand)]
enum ExerciseSubcommands {
    /// List exercises
    List,

    /// Add an exercise
    Add {
        /// Exercise name
        name: String,
    },
}

#[derive(Subcommand)]
enum LiftSubcommands {
    /// Print the estimated 1RM trend of one exercise as chart data
    Chart {
        /// Exercise id or name
        exercise: String,
    },
}

#[derive(Subcommand)]
enum TeamSubcommands {
    /// List teams you belong to
    List,

    /// Create a team and print its invite code
    Create {
        /// Team name
        name: String,
    },

    /// Join a team with an invite code
    Join {
        /// Invite code
        code: String,
    },

    /// Print aligned member series for one metric as chart data
    Chart {
        /// Team id
        team: i64,

        /// Metric to chart
        #[arg(short, long, default_value = crate::api::DEFAULT_TEAM_METRIC)]
        metric: String,
    },
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show current configuration
    Show,

    /// Edit configuration file
    Edit,

    /// Initialize configuration with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        if self.verbose {
            tracing::info!("Verbose mode enabled");
        }

        if let Commands::Completions { shell } = self.command {
            generate_completions(shell);
            return Ok(());
        }

        let ctx = AppContext::load(self.config.as_deref())?;

        let result = match self.command {
            Commands::Login(cmd) => cmd.execute(&ctx).await,
            Commands::Logout(cmd) => cmd.execute(&ctx).await,
            Commands::Register(cmd) => cmd.execute(&ctx).await,
            Commands::Whoami(cmd) => cmd.execute(&ctx).await,
            Commands::Workout(subcmd) => match subcmd {
                WorkoutSubcommands::Log(cmd) => cmd.execute(&ctx).await,
                WorkoutSubcommands::List { limit } => workout::list_sessions(&ctx, limit).await,
                WorkoutSubcommands::Resume { session } => {
                    workout::resume_lift_logs(&ctx, session).await
                }
            },
            Commands::Exercise(subcmd) => match subcmd {
                ExerciseSubcommands::List => exercise::list_exercises(&ctx).await,
                ExerciseSubcommands::Add { name } => exercise::add_exercise(&ctx, &name).await,
            },
            Commands::Calendar(cmd) => cmd.execute(&ctx).await,
            Commands::Lift(subcmd) => match subcmd {
                LiftSubcommands::Chart { exercise } => lift::chart(&ctx, &exercise).await,
            },
            Commands::Team(subcmd) => match subcmd {
                TeamSubcommands::List => team::list_teams(&ctx).await,
                TeamSubcommands::Create { name } => team::create_team(&ctx, &name).await,
                TeamSubcommands::Join { code } => team::join_team(&ctx, &code).await,
                TeamSubcommands::Chart { team, metric } => team::chart(&ctx, team, &metric).await,
            },
            Commands::Config(subcmd) => match subcmd {
                ConfigSubcommands::Show => config_cmd::show_config(&ctx).await,
                ConfigSubcommands::Edit => config_cmd::edit_config(&ctx).await,
                ConfigSubcommands::Init { force } => config_cmd::init_config(&ctx, force).await,
            },
            Commands::Completions { .. } => Ok(()),
        };

        ctx.finish()?;
        result
    }
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
