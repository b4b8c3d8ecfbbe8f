//! Command-line definitions for the `petcare` binary.

use clap::{Args, Parser, Subcommand};

/// PetCare — track pets, feeding schedules, and vet visits.
#[derive(Parser)]
#[command(
    name = "petcare",
    version,
    about = "PetCare — track pets, feeding schedules, and vet visits",
    long_about = "Command-line client for a PetCare server. Sign in once; the session \
                  token is persisted and reused until you log out."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account and sign in.
    Register(RegisterArgs),

    /// Sign in with an existing account.
    Login(LoginArgs),

    /// End the current session.
    Logout,

    /// Show the signed-in user.
    Whoami,

    /// Manage pets.
    #[command(subcommand)]
    Pets(PetsCommand),

    /// Manage feeding schedules.
    #[command(subcommand)]
    Schedule(ScheduleCommand),

    /// Manage vet visits.
    #[command(subcommand)]
    Visits(VisitsCommand),
}

#[derive(Args)]
pub struct RegisterArgs {
    #[arg(short, long)]
    pub username: String,
    #[arg(short, long)]
    pub email: String,
    #[arg(short, long)]
    pub password: String,
}

#[derive(Args)]
pub struct LoginArgs {
    #[arg(short, long)]
    pub username: String,
    #[arg(short, long)]
    pub password: String,
}

// ---------------------------------------------------------------------------
// Pets
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum PetsCommand {
    /// List all pets.
    List,

    /// Show one pet.
    Show { id: i64 },

    /// Add a pet.
    Add(PetAddArgs),

    /// Edit a pet. Only the provided fields change.
    Edit(PetEditArgs),

    /// Remove a pet (and its schedules and visits).
    Rm { id: i64 },
}

#[derive(Args)]
pub struct PetAddArgs {
    #[arg(long)]
    pub name: String,
    /// Species label, e.g. "dog", "cat", "bird".
    #[arg(long)]
    pub species: String,
    #[arg(long)]
    pub breed: Option<String>,
    /// Age in years.
    #[arg(long)]
    pub age: Option<i32>,
    /// Weight in kilograms.
    #[arg(long)]
    pub weight: Option<f64>,
    /// Repeatable tag, e.g. `--tag friendly --tag big`.
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    #[arg(long)]
    pub notes: Option<String>,
    /// Path to a photo file (png, jpg, jpeg, gif, webp).
    #[arg(long)]
    pub photo: Option<std::path::PathBuf>,
}

#[derive(Args)]
pub struct PetEditArgs {
    pub id: i64,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub species: Option<String>,
    #[arg(long)]
    pub breed: Option<String>,
    #[arg(long)]
    pub age: Option<i32>,
    #[arg(long)]
    pub weight: Option<f64>,
    /// Repeatable tag; providing any tag replaces the whole tag list.
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    #[arg(long)]
    pub notes: Option<String>,
    /// Path to a replacement photo file.
    #[arg(long)]
    pub photo: Option<std::path::PathBuf>,
}

// ---------------------------------------------------------------------------
// Feeding schedules
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ScheduleCommand {
    /// List a pet's feeding schedules.
    List { pet_id: i64 },

    /// Add a feeding schedule for a pet.
    Add(ScheduleAddArgs),

    /// Edit a feeding schedule. Only the provided fields change.
    Edit(ScheduleEditArgs),

    /// Remove a feeding schedule.
    Rm { schedule_id: i64 },
}

#[derive(Args)]
pub struct ScheduleAddArgs {
    pub pet_id: i64,
    #[arg(long)]
    pub food_type: String,
    /// Feeding time of day, `HH:MM`.
    #[arg(long)]
    pub time: String,
    /// Portion description, e.g. "200g" or "1 cup".
    #[arg(long)]
    pub amount: Option<String>,
    /// Cadence description, e.g. "daily" or "twice a day".
    #[arg(long)]
    pub frequency: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args)]
pub struct ScheduleEditArgs {
    pub schedule_id: i64,
    #[arg(long)]
    pub food_type: Option<String>,
    /// Feeding time of day, `HH:MM`.
    #[arg(long)]
    pub time: Option<String>,
    #[arg(long)]
    pub amount: Option<String>,
    #[arg(long)]
    pub frequency: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Vet visits
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum VisitsCommand {
    /// List a pet's vet visits, most recent first.
    List { pet_id: i64 },

    /// Show one visit.
    Show { visit_id: i64 },

    /// Add a vet visit for a pet.
    Add(VisitAddArgs),

    /// Edit a vet visit. Only the provided fields change.
    Edit(VisitEditArgs),

    /// Remove a vet visit.
    Rm { visit_id: i64 },
}

#[derive(Args)]
pub struct VisitAddArgs {
    pub pet_id: i64,
    /// Visit date, ISO format (e.g. `2024-03-10T14:00:00` or `2024-03-10`).
    #[arg(long)]
    pub date: String,
    #[arg(long)]
    pub reason: String,
    #[arg(long)]
    pub vet: Option<String>,
    #[arg(long)]
    pub clinic: Option<String>,
    #[arg(long)]
    pub diagnosis: Option<String>,
    #[arg(long)]
    pub treatment: Option<String>,
    #[arg(long)]
    pub medications: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args)]
pub struct VisitEditArgs {
    pub visit_id: i64,
    /// Visit date, ISO format.
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub reason: Option<String>,
    #[arg(long)]
    pub vet: Option<String>,
    #[arg(long)]
    pub clinic: Option<String>,
    #[arg(long)]
    pub diagnosis: Option<String>,
    #[arg(long)]
    pub treatment: Option<String>,
    #[arg(long)]
    pub medications: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parses_login() {
        let cli = Cli::try_parse_from(["petcare", "login", "-u", "rex_owner", "-p", "secret"])
            .unwrap();
        match cli.command {
            Commands::Login(args) => {
                assert_eq!(args.username, "rex_owner");
                assert_eq!(args.password, "secret");
            }
            _ => panic!("expected login"),
        }
    }

    #[test]
    fn parses_pet_add_with_repeated_tags() {
        let cli = Cli::try_parse_from([
            "petcare", "pets", "add", "--name", "Rex", "--species", "dog", "--tag", "friendly",
            "--tag", "big", "--age", "3",
        ])
        .unwrap();
        match cli.command {
            Commands::Pets(PetsCommand::Add(args)) => {
                assert_eq!(args.name, "Rex");
                assert_eq!(args.tags, vec!["friendly", "big"]);
                assert_eq!(args.age, Some(3));
                assert!(args.photo.is_none());
            }
            _ => panic!("expected pets add"),
        }
    }

    #[test]
    fn parses_schedule_add() {
        let cli = Cli::try_parse_from([
            "petcare",
            "schedule",
            "add",
            "7",
            "--food-type",
            "kibble",
            "--time",
            "07:30",
        ])
        .unwrap();
        match cli.command {
            Commands::Schedule(ScheduleCommand::Add(args)) => {
                assert_eq!(args.pet_id, 7);
                assert_eq!(args.food_type, "kibble");
                assert_eq!(args.time, "07:30");
            }
            _ => panic!("expected schedule add"),
        }
    }

    #[test]
    fn parses_visit_edit_with_partial_fields() {
        let cli = Cli::try_parse_from([
            "petcare",
            "visits",
            "edit",
            "11",
            "--diagnosis",
            "healthy",
        ])
        .unwrap();
        match cli.command {
            Commands::Visits(VisitsCommand::Edit(args)) => {
                assert_eq!(args.visit_id, 11);
                assert_eq!(args.diagnosis.as_deref(), Some("healthy"));
                assert!(args.date.is_none());
            }
            _ => panic!("expected visits edit"),
        }
    }

    #[test]
    fn pet_add_requires_name_and_species() {
        assert!(Cli::try_parse_from(["petcare", "pets", "add", "--name", "Rex"]).is_err());
    }
}
