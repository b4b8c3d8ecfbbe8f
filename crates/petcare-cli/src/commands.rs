//! Subcommand handlers.
//!
//! Each handler drives one store action and prints a human-readable result.
//! Store errors propagate out with their message intact; the stores have
//! already recorded them in their error slots by the time we see them.

use anyhow::{bail, Context as _, Result};
use petcare_client::{
    validate, FeedingSchedule, NewPet, NewSchedule, NewVisit, Pet, PetPatch, PhotoFile,
    SchedulePatch, VetVisit, VisitPatch,
};

use crate::cli::{
    LoginArgs, PetAddArgs, PetEditArgs, PetsCommand, RegisterArgs, ScheduleAddArgs,
    ScheduleCommand, ScheduleEditArgs, VisitAddArgs, VisitEditArgs, VisitsCommand,
};
use crate::context::Context;

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

pub async fn register(ctx: &Context, args: RegisterArgs) -> Result<()> {
    let user = ctx
        .auth
        .register(&args.username, &args.email, &args.password)
        .await?;
    println!("Registered and signed in as {} <{}>", user.username, user.email);
    Ok(())
}

pub async fn login(ctx: &Context, args: LoginArgs) -> Result<()> {
    let user = ctx.auth.login(&args.username, &args.password).await?;
    println!("Signed in as {} <{}>", user.username, user.email);
    Ok(())
}

pub async fn logout(ctx: &Context) -> Result<()> {
    ctx.auth.logout().await;
    println!("Signed out.");
    Ok(())
}

pub async fn whoami(ctx: &Context) -> Result<()> {
    let user = ctx.auth.fetch_user().await?;
    println!("#{}  {} <{}>", user.id, user.username, user.email);
    println!("member since {}", user.created_at.date());
    Ok(())
}

// ---------------------------------------------------------------------------
// Pets
// ---------------------------------------------------------------------------

pub async fn pets(ctx: &Context, cmd: PetsCommand) -> Result<()> {
    match cmd {
        PetsCommand::List => {
            let pets = ctx.pets.fetch_pets().await?;
            if pets.is_empty() {
                println!("No pets yet. Add one with `petcare pets add`.");
                return Ok(());
            }
            for pet in &pets {
                print_pet_line(pet);
            }
        }
        PetsCommand::Show { id } => {
            let pet = ctx.pets.fetch_pet(id).await?;
            print_pet(&pet);
        }
        PetsCommand::Add(args) => {
            let pet = ctx.pets.create_pet(&new_pet_from_args(args)?).await?;
            println!("Added pet #{}: {}", pet.id, pet.name);
        }
        PetsCommand::Edit(args) => {
            let id = args.id;
            let patch = pet_patch_from_args(args)?;
            if patch.is_empty() {
                bail!("nothing to change: provide at least one field");
            }
            let pet = ctx.pets.update_pet(id, &patch).await?;
            println!("Updated pet #{}: {}", pet.id, pet.name);
        }
        PetsCommand::Rm { id } => {
            ctx.pets.delete_pet(id).await?;
            println!("Removed pet #{id}");
        }
    }
    Ok(())
}

fn new_pet_from_args(args: PetAddArgs) -> Result<NewPet> {
    let photo = args.photo.map(load_photo).transpose()?;
    Ok(NewPet {
        name: args.name,
        species: args.species,
        breed: args.breed,
        age: args.age,
        weight: args.weight,
        tags: args.tags,
        notes: args.notes,
        photo,
    })
}

fn pet_patch_from_args(args: PetEditArgs) -> Result<PetPatch> {
    let photo = args.photo.map(load_photo).transpose()?;
    Ok(PetPatch {
        name: args.name,
        species: args.species,
        breed: args.breed,
        age: args.age,
        weight: args.weight,
        tags: if args.tags.is_empty() {
            None
        } else {
            Some(args.tags)
        },
        notes: args.notes,
        photo,
    })
}

fn load_photo(path: std::path::PathBuf) -> Result<PhotoFile> {
    let bytes = std::fs::read(&path)
        .with_context(|| format!("failed to read photo `{}`", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo".to_string());
    Ok(PhotoFile { file_name, bytes })
}

// ---------------------------------------------------------------------------
// Feeding schedules
// ---------------------------------------------------------------------------

pub async fn schedule(ctx: &Context, cmd: ScheduleCommand) -> Result<()> {
    match cmd {
        ScheduleCommand::List { pet_id } => {
            let schedules = ctx.schedules.fetch_for_pet(pet_id).await?;
            if schedules.is_empty() {
                println!("No feeding schedules for pet #{pet_id}.");
                return Ok(());
            }
            for schedule in &schedules {
                print_schedule_line(schedule);
            }
        }
        ScheduleCommand::Add(args) => {
            let schedule = ctx
                .schedules
                .create(args.pet_id, &new_schedule_from_args(&args)?)
                .await?;
            println!(
                "Added schedule #{}: {} at {}",
                schedule.id,
                schedule.food_type,
                schedule.time.format("%H:%M")
            );
        }
        ScheduleCommand::Edit(args) => {
            let patch = schedule_patch_from_args(&args)?;
            let schedule = ctx.schedules.update(args.schedule_id, &patch).await?;
            println!("Updated schedule #{}", schedule.id);
        }
        ScheduleCommand::Rm { schedule_id } => {
            ctx.schedules.delete(schedule_id).await?;
            println!("Removed schedule #{schedule_id}");
        }
    }
    Ok(())
}

fn new_schedule_from_args(args: &ScheduleAddArgs) -> Result<NewSchedule> {
    Ok(NewSchedule {
        food_type: args.food_type.clone(),
        amount: args.amount.clone(),
        time: validate::parse_time(&args.time)?,
        frequency: args.frequency.clone(),
        notes: args.notes.clone(),
    })
}

fn schedule_patch_from_args(args: &ScheduleEditArgs) -> Result<SchedulePatch> {
    let time = match &args.time {
        Some(raw) => Some(validate::parse_time(raw)?),
        None => None,
    };
    Ok(SchedulePatch {
        food_type: args.food_type.clone(),
        amount: args.amount.clone(),
        time,
        frequency: args.frequency.clone(),
        notes: args.notes.clone(),
    })
}

// ---------------------------------------------------------------------------
// Vet visits
// ---------------------------------------------------------------------------

pub async fn visits(ctx: &Context, cmd: VisitsCommand) -> Result<()> {
    match cmd {
        VisitsCommand::List { pet_id } => {
            ctx.visits.fetch_for_pet(pet_id).await?;
            let visits = ctx.visits.visits_by_date_desc().await;
            if visits.is_empty() {
                println!("No vet visits for pet #{pet_id}.");
                return Ok(());
            }
            for visit in &visits {
                print_visit_line(visit);
            }
        }
        VisitsCommand::Show { visit_id } => {
            let visit = ctx.visits.fetch_visit(visit_id).await?;
            print_visit(&visit);
        }
        VisitsCommand::Add(args) => {
            let visit = ctx
                .visits
                .create(args.pet_id, &new_visit_from_args(&args)?)
                .await?;
            println!("Added visit #{}: {}", visit.id, visit.reason);
        }
        VisitsCommand::Edit(args) => {
            let patch = visit_patch_from_args(&args)?;
            let visit = ctx.visits.update(args.visit_id, &patch).await?;
            println!("Updated visit #{}", visit.id);
        }
        VisitsCommand::Rm { visit_id } => {
            ctx.visits.delete(visit_id).await?;
            println!("Removed visit #{visit_id}");
        }
    }
    Ok(())
}

fn new_visit_from_args(args: &VisitAddArgs) -> Result<NewVisit> {
    Ok(NewVisit {
        visit_date: validate::parse_datetime(&args.date, "Visit date")?,
        vet_name: args.vet.clone(),
        clinic_name: args.clinic.clone(),
        reason: args.reason.clone(),
        diagnosis: args.diagnosis.clone(),
        treatment: args.treatment.clone(),
        medications: args.medications.clone(),
        notes: args.notes.clone(),
    })
}

fn visit_patch_from_args(args: &VisitEditArgs) -> Result<VisitPatch> {
    let visit_date = match &args.date {
        Some(raw) => Some(validate::parse_datetime(raw, "Visit date")?),
        None => None,
    };
    Ok(VisitPatch {
        visit_date,
        vet_name: args.vet.clone(),
        clinic_name: args.clinic.clone(),
        reason: args.reason.clone(),
        diagnosis: args.diagnosis.clone(),
        treatment: args.treatment.clone(),
        medications: args.medications.clone(),
        notes: args.notes.clone(),
    })
}

// ---------------------------------------------------------------------------
// Printing
// ---------------------------------------------------------------------------

fn print_pet_line(pet: &Pet) {
    let mut details = vec![pet.species.clone()];
    if let Some(breed) = &pet.breed {
        details.push(breed.clone());
    }
    if let Some(age) = pet.age {
        details.push(format!("{age}y"));
    }
    if let Some(weight) = pet.weight {
        details.push(format!("{weight}kg"));
    }
    println!("#{:<4} {:<20} {}", pet.id, pet.name, details.join(", "));
}

fn print_pet(pet: &Pet) {
    println!("Pet #{}", pet.id);
    println!("  Name:     {}", pet.name);
    println!("  Species:  {}", pet.species);
    println!("  Breed:    {}", opt(&pet.breed));
    println!(
        "  Age:      {}",
        pet.age.map(|a| a.to_string()).unwrap_or_else(|| "-".into())
    );
    println!(
        "  Weight:   {}",
        pet.weight
            .map(|w| format!("{w} kg"))
            .unwrap_or_else(|| "-".into())
    );
    println!(
        "  Tags:     {}",
        if pet.tags.is_empty() {
            "-".to_string()
        } else {
            pet.tags.join(", ")
        }
    );
    println!("  Notes:    {}", opt(&pet.notes));
    println!("  Photo:    {}", opt(&pet.photo_url));
    println!("  Added:    {}", pet.created_at.date());
}

fn print_schedule_line(schedule: &FeedingSchedule) {
    println!(
        "#{:<4} {}  {:<20} {:<10} {}",
        schedule.id,
        schedule.time.format("%H:%M"),
        schedule.food_type,
        schedule.amount.as_deref().unwrap_or("-"),
        schedule.frequency.as_deref().unwrap_or("-"),
    );
}

fn print_visit_line(visit: &VetVisit) {
    println!(
        "#{:<4} {}  {}",
        visit.id,
        visit.visit_date.format("%Y-%m-%d %H:%M"),
        visit.reason,
    );
}

fn print_visit(visit: &VetVisit) {
    println!("Visit #{} (pet #{})", visit.id, visit.pet_id);
    println!("  Date:        {}", visit.visit_date.format("%Y-%m-%d %H:%M"));
    println!("  Reason:      {}", visit.reason);
    println!("  Vet:         {}", opt(&visit.vet_name));
    println!("  Clinic:      {}", opt(&visit.clinic_name));
    println!("  Diagnosis:   {}", opt(&visit.diagnosis));
    println!("  Treatment:   {}", opt(&visit.treatment));
    println!("  Medications: {}", opt(&visit.medications));
    println!("  Notes:       {}", opt(&visit.notes));
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}
