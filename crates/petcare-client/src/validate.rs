//! Pre-flight input validation.
//!
//! Mirrors the server's acceptance rules so bad input is rejected before it
//! costs a round trip, with the same message text the server would return.

use chrono::{Local, NaiveDateTime, NaiveTime};

use crate::error::{ClientError, Result};
use crate::model::{NewPet, NewSchedule, NewVisit, PetPatch, PhotoFile, VisitPatch};

/// Photo extensions the server will accept and serve back.
pub const ALLOWED_PHOTO_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Special characters accepted in passwords.
const PASSWORD_SPECIALS: &str = "!@#$%^&*(),.?\":{}|<>_-+=[]\\/~`";

fn invalid(message: impl Into<String>) -> ClientError {
    ClientError::Validation(message.into())
}

// ---------------------------------------------------------------------------
// Account fields
// ---------------------------------------------------------------------------

/// Validate a username: 3-50 chars of letters, digits, underscore, dash.
pub fn username(value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(invalid("Username is required"));
    }
    if value.len() < 3 {
        return Err(invalid("Username must be at least 3 characters"));
    }
    if value.len() > 50 {
        return Err(invalid("Username must be at most 50 characters"));
    }
    if !value
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
    {
        return Err(invalid(
            "Username can only contain letters, numbers, underscore and dash",
        ));
    }
    Ok(())
}

/// Validate an email address against the server's `local@domain.tld` shape.
pub fn email(value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(invalid("Email is required"));
    }
    if !is_valid_email(value) {
        return Err(invalid("Invalid email format"));
    }
    Ok(())
}

fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty()
        || !local
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"._%+-".contains(&b))
    {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    if host.is_empty()
        || !host
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'.' || b == b'-')
    {
        return false;
    }
    tld.len() >= 2 && tld.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Validate password strength: 8-100 chars with at least one uppercase,
/// lowercase, digit, and special character.
pub fn password(value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(invalid("Password is required"));
    }
    if value.len() < 8 {
        return Err(invalid("Password must be at least 8 characters"));
    }
    if value.len() > 100 {
        return Err(invalid("Password is too long (max 100 characters)"));
    }
    if !value.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(invalid(
            "Password must contain at least one uppercase letter",
        ));
    }
    if !value.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(invalid(
            "Password must contain at least one lowercase letter",
        ));
    }
    if !value.chars().any(|c| c.is_ascii_digit()) {
        return Err(invalid("Password must contain at least one number"));
    }
    if !value.chars().any(|c| PASSWORD_SPECIALS.contains(c)) {
        return Err(invalid(
            "Password must contain at least one special character (!@#$%^&*...)",
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Pet fields
// ---------------------------------------------------------------------------

/// Validate a full pet creation payload.
pub fn new_pet(pet: &NewPet) -> Result<()> {
    if pet.name.is_empty() || pet.species.is_empty() {
        return Err(invalid("Name and species are required"));
    }
    string_length(&pet.name, "Name", 1, 100)?;
    string_length(&pet.species, "Species", 1, 50)?;
    if let Some(value) = pet.age {
        age(value)?;
    }
    if let Some(value) = pet.weight {
        weight(value)?;
    }
    if let Some(file) = &pet.photo {
        photo(file)?;
    }
    Ok(())
}

/// Validate the fields present in a pet update payload.
pub fn pet_patch(patch: &PetPatch) -> Result<()> {
    if let Some(name) = &patch.name {
        string_length(name, "Name", 1, 100)?;
    }
    if let Some(species) = &patch.species {
        string_length(species, "Species", 1, 50)?;
    }
    if let Some(value) = patch.age {
        age(value)?;
    }
    if let Some(value) = patch.weight {
        weight(value)?;
    }
    if let Some(file) = &patch.photo {
        photo(file)?;
    }
    Ok(())
}

/// Validate a pet's age in years.
pub fn age(value: i32) -> Result<()> {
    if value < 0 {
        return Err(invalid("Age cannot be negative"));
    }
    if value > 50 {
        return Err(invalid("Age seems unrealistic (max 50 years)"));
    }
    Ok(())
}

/// Validate a pet's weight in kilograms.
pub fn weight(value: f64) -> Result<()> {
    if value <= 0.0 {
        return Err(invalid("Weight must be positive"));
    }
    if value > 500.0 {
        return Err(invalid("Weight seems unrealistic (max 500kg)"));
    }
    Ok(())
}

/// Validate a photo file by extension.
pub fn photo(file: &PhotoFile) -> Result<()> {
    let ext = file.extension();
    let allowed = ext
        .as_deref()
        .is_some_and(|e| ALLOWED_PHOTO_EXTENSIONS.contains(&e));
    if !allowed {
        return Err(invalid(format!(
            "Photo must be one of: {}",
            ALLOWED_PHOTO_EXTENSIONS.join(", ")
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Schedule and visit fields
// ---------------------------------------------------------------------------

/// Validate a feeding schedule creation payload.
pub fn new_schedule(schedule: &NewSchedule) -> Result<()> {
    if schedule.food_type.is_empty() {
        return Err(invalid("food_type and time are required"));
    }
    string_length(&schedule.food_type, "Food type", 1, 100)?;
    Ok(())
}

/// Validate a vet visit creation payload.
pub fn new_visit(visit: &NewVisit) -> Result<()> {
    if visit.reason.is_empty() {
        return Err(invalid("visit_date and reason are required"));
    }
    string_length(&visit.reason, "Reason", 1, 200)?;
    not_in_future(visit.visit_date, "Visit date")?;
    Ok(())
}

/// Validate the fields present in a visit update payload.
pub fn visit_patch(patch: &VisitPatch) -> Result<()> {
    if let Some(reason) = &patch.reason {
        string_length(reason, "Reason", 1, 200)?;
    }
    if let Some(date) = patch.visit_date {
        not_in_future(date, "Visit date")?;
    }
    Ok(())
}

fn not_in_future(date: NaiveDateTime, field: &str) -> Result<()> {
    if date > Local::now().naive_local() {
        return Err(invalid(format!("{field} cannot be in the future")));
    }
    Ok(())
}

fn string_length(value: &str, field: &str, min: usize, max: usize) -> Result<()> {
    let length = value.chars().count();
    if length < min {
        return Err(invalid(format!(
            "{field} must be at least {min} characters"
        )));
    }
    if length > max {
        return Err(invalid(format!("{field} must be at most {max} characters")));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Input parsing
// ---------------------------------------------------------------------------

/// Parse a `"HH:MM"` time string with the server's error messages.
pub fn parse_time(raw: &str) -> Result<NaiveTime> {
    if raw.is_empty() {
        return Err(invalid("Time is required"));
    }
    let parts: Vec<&str> = raw.split(':').collect();
    let (hour, minute) = match parts.as_slice() {
        [h, m] => match (h.parse::<i32>(), m.parse::<i32>()) {
            (Ok(h), Ok(m)) => (h, m),
            _ => return Err(invalid("Invalid time format. Use HH:MM")),
        },
        _ => return Err(invalid("Invalid time format. Use HH:MM")),
    };
    if !(0..=23).contains(&hour) {
        return Err(invalid("Hour must be between 0 and 23"));
    }
    if !(0..=59).contains(&minute) {
        return Err(invalid("Minute must be between 0 and 59"));
    }
    NaiveTime::from_hms_opt(hour as u32, minute as u32, 0)
        .ok_or_else(|| invalid("Invalid time format. Use HH:MM"))
}

/// Parse an ISO-8601 datetime string. A trailing `Z` or a date without a
/// time component are both accepted, matching the server's parser.
pub fn parse_datetime(raw: &str, field: &str) -> Result<NaiveDateTime> {
    if raw.is_empty() {
        return Err(invalid(format!("{field} is required")));
    }
    let trimmed = raw.trim_end_matches('Z');
    let candidates = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for format in candidates {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed);
        }
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(parsed) = date.and_hms_opt(0, 0, 0) {
            return Ok(parsed);
        }
    }
    Err(invalid(format!(
        "Invalid {field} format. Use ISO format (YYYY-MM-DDTHH:MM:SS)"
    )))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
