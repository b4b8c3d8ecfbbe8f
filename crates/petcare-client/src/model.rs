//! Wire-format types for the PetCare API.
//!
//! Records mirror the server's JSON shapes exactly: timestamps are naive
//! ISO-8601 strings (no offset), feeding times are `"HH:MM"`, and a pet's
//! `tags` field is always a list (empty when unset). Write payloads carry
//! only the fields the caller wants to send; `None` fields are omitted
//! from the request entirely.

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
//  Records
// ═══════════════════════════════════════════════════════════════════════

/// An authenticated user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: NaiveDateTime,
}

/// A pet owned by the authenticated user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: i64,
    pub name: String,
    /// Species label, e.g. "dog", "cat", "bird".
    pub species: String,
    pub breed: Option<String>,
    /// Age in years.
    pub age: Option<i32>,
    /// Weight in kilograms.
    pub weight: Option<f64>,
    /// Server-relative URL of the uploaded photo, when one exists.
    pub photo_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub user_id: i64,
}

/// A recurring feeding entry for a pet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedingSchedule {
    pub id: i64,
    pub pet_id: i64,
    pub food_type: String,
    /// Free-form portion description, e.g. "200g" or "1 cup".
    pub amount: Option<String>,
    /// Scheduled feeding time of day.
    #[serde(with = "time_hm")]
    pub time: NaiveTime,
    /// Free-form cadence description, e.g. "daily" or "twice a day".
    pub frequency: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

/// A veterinary visit record for a pet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VetVisit {
    pub id: i64,
    pub pet_id: i64,
    pub visit_date: NaiveDateTime,
    pub vet_name: Option<String>,
    pub clinic_name: Option<String>,
    pub reason: String,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub medications: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

// ═══════════════════════════════════════════════════════════════════════
//  Write payloads
// ═══════════════════════════════════════════════════════════════════════

/// A photo to attach to a pet create or update request.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoFile {
    /// File name as it will be sent in the multipart part, e.g. "rex.png".
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl PhotoFile {
    /// Lowercased file extension, if the name has one.
    pub fn extension(&self) -> Option<String> {
        let (_, ext) = self.file_name.rsplit_once('.')?;
        if ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    /// MIME type derived from the file extension.
    pub fn mime_type(&self) -> &'static str {
        match self.extension().as_deref() {
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            _ => "application/octet-stream",
        }
    }
}

/// Fields for creating a pet. Sent as a multipart form so the photo can
/// ride along with the text fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewPet {
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub weight: Option<f64>,
    pub tags: Vec<String>,
    pub notes: Option<String>,
    pub photo: Option<PhotoFile>,
}

impl NewPet {
    /// Text parts of the multipart form, in field order. Tags are joined
    /// with commas; unset optional fields are omitted.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("name", self.name.clone()),
            ("species", self.species.clone()),
        ];
        if let Some(breed) = &self.breed {
            fields.push(("breed", breed.clone()));
        }
        if let Some(age) = self.age {
            fields.push(("age", age.to_string()));
        }
        if let Some(weight) = self.weight {
            fields.push(("weight", weight.to_string()));
        }
        if !self.tags.is_empty() {
            fields.push(("tags", self.tags.join(",")));
        }
        if let Some(notes) = &self.notes {
            fields.push(("notes", notes.clone()));
        }
        fields
    }
}

/// Partial update for a pet. Only present fields are sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PetPatch {
    pub name: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub weight: Option<f64>,
    pub tags: Option<Vec<String>>,
    pub notes: Option<String>,
    pub photo: Option<PhotoFile>,
}

impl PetPatch {
    /// Text parts of the multipart form, in field order.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(name) = &self.name {
            fields.push(("name", name.clone()));
        }
        if let Some(species) = &self.species {
            fields.push(("species", species.clone()));
        }
        if let Some(breed) = &self.breed {
            fields.push(("breed", breed.clone()));
        }
        if let Some(age) = self.age {
            fields.push(("age", age.to_string()));
        }
        if let Some(weight) = self.weight {
            fields.push(("weight", weight.to_string()));
        }
        if let Some(tags) = &self.tags {
            fields.push(("tags", tags.join(",")));
        }
        if let Some(notes) = &self.notes {
            fields.push(("notes", notes.clone()));
        }
        fields
    }

    /// True when the patch carries nothing to send.
    pub fn is_empty(&self) -> bool {
        self.text_fields().is_empty() && self.photo.is_none()
    }
}

/// Fields for creating a feeding schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSchedule {
    pub food_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(with = "time_hm")]
    pub time: NaiveTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Partial update for a feeding schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchedulePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(with = "time_hm::option", skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Fields for creating a vet visit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewVisit {
    pub visit_date: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vet_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinic_name: Option<String>,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treatment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medications: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Partial update for a vet visit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VisitPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visit_date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vet_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinic_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treatment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medications: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════
//  Serde adapters
// ═══════════════════════════════════════════════════════════════════════

/// Serializes a `NaiveTime` as `"HH:MM"`, the format the server uses for
/// feeding times.
pub mod time_hm {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }

    /// `Option<NaiveTime>` variant for patch payloads.
    pub mod option {
        use chrono::NaiveTime;
        use serde::{Serialize, Serializer};

        #[derive(Serialize)]
        struct Wrapper<'a>(#[serde(with = "super")] &'a NaiveTime);

        pub fn serialize<S: Serializer>(
            time: &Option<NaiveTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            time.as_ref().map(Wrapper).serialize(serializer)
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use serde_json::json;

    #[test]
    fn pet_decodes_server_shape() {
        let body = json!({
            "id": 7,
            "name": "Rex",
            "species": "dog",
            "breed": "labrador",
            "age": 3,
            "weight": 28.5,
            "photo_url": "/uploads/20240101_120000_rex.png",
            "tags": ["friendly", "big"],
            "notes": null,
            "created_at": "2024-01-01T12:00:00",
            "user_id": 1
        });

        let pet: Pet = serde_json::from_value(body).unwrap();
        assert_eq!(pet.name, "Rex");
        assert_eq!(pet.tags, vec!["friendly", "big"]);
        assert_eq!(pet.weight, Some(28.5));
        assert!(pet.notes.is_none());
        assert_eq!(
            pet.created_at,
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn pet_decodes_with_missing_tags() {
        // Older server responses omitted the field entirely.
        let body = json!({
            "id": 1,
            "name": "Misu",
            "species": "cat",
            "breed": null,
            "age": null,
            "weight": null,
            "photo_url": null,
            "notes": null,
            "created_at": "2023-06-15T08:30:00",
            "user_id": 4
        });

        let pet: Pet = serde_json::from_value(body).unwrap();
        assert!(pet.tags.is_empty());
    }

    #[test]
    fn schedule_round_trips_hh_mm_time() {
        let body = json!({
            "id": 2,
            "pet_id": 7,
            "food_type": "kibble",
            "amount": "200g",
            "time": "07:30",
            "frequency": "daily",
            "notes": null,
            "created_at": "2024-02-02T09:00:00"
        });

        let schedule: FeedingSchedule = serde_json::from_value(body).unwrap();
        assert_eq!(schedule.time, NaiveTime::from_hms_opt(7, 30, 0).unwrap());

        let encoded = serde_json::to_value(&schedule).unwrap();
        assert_eq!(encoded["time"], "07:30");
    }

    #[test]
    fn visit_decodes_server_shape() {
        let body = json!({
            "id": 11,
            "pet_id": 7,
            "visit_date": "2024-03-10T14:00:00",
            "vet_name": "Dr. Huang",
            "clinic_name": "North Paws",
            "reason": "annual checkup",
            "diagnosis": null,
            "treatment": null,
            "medications": null,
            "notes": null,
            "created_at": "2024-03-10T15:05:00"
        });

        let visit: VetVisit = serde_json::from_value(body).unwrap();
        assert_eq!(visit.reason, "annual checkup");
        assert!(visit.diagnosis.is_none());
    }

    #[test]
    fn new_pet_text_fields_joins_tags_and_skips_unset() {
        let pet = NewPet {
            name: "Rex".into(),
            species: "dog".into(),
            breed: None,
            age: Some(3),
            weight: None,
            tags: vec!["friendly".into(), "big".into()],
            notes: Some("rescued".into()),
            photo: None,
        };

        let fields = pet.text_fields();
        assert_eq!(
            fields,
            vec![
                ("name", "Rex".to_string()),
                ("species", "dog".to_string()),
                ("age", "3".to_string()),
                ("tags", "friendly,big".to_string()),
                ("notes", "rescued".to_string()),
            ]
        );
    }

    #[test]
    fn pet_patch_text_fields_only_carries_present_fields() {
        let patch = PetPatch {
            weight: Some(30.2),
            ..Default::default()
        };
        assert_eq!(patch.text_fields(), vec![("weight", "30.2".to_string())]);
        assert!(!patch.is_empty());
        assert!(PetPatch::default().is_empty());
    }

    #[test]
    fn schedule_payload_serializes_time_and_omits_none() {
        let payload = NewSchedule {
            food_type: "kibble".into(),
            amount: None,
            time: NaiveTime::from_hms_opt(18, 5, 0).unwrap(),
            frequency: Some("daily".into()),
            notes: None,
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["time"], "18:05");
        assert_eq!(value["frequency"], "daily");
        assert!(value.get("amount").is_none());
        assert!(value.get("notes").is_none());
    }

    #[test]
    fn schedule_patch_serializes_optional_time() {
        let patch = SchedulePatch {
            time: Some(NaiveTime::from_hms_opt(6, 0, 0).unwrap()),
            ..Default::default()
        };
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value["time"], "06:00");
        assert!(value.get("food_type").is_none());
    }

    #[test]
    fn visit_payload_serializes_naive_date() {
        let payload = NewVisit {
            visit_date: NaiveDate::from_ymd_opt(2024, 3, 10)
                .unwrap()
                .and_hms_opt(14, 0, 0)
                .unwrap(),
            vet_name: None,
            clinic_name: None,
            reason: "checkup".into(),
            diagnosis: None,
            treatment: None,
            medications: None,
            notes: None,
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["visit_date"], "2024-03-10T14:00:00");
        assert!(value.get("vet_name").is_none());
    }

    #[test]
    fn photo_file_extension_and_mime() {
        let photo = PhotoFile {
            file_name: "Rex.Portrait.PNG".into(),
            bytes: vec![1, 2, 3],
        };
        assert_eq!(photo.extension().as_deref(), Some("png"));
        assert_eq!(photo.mime_type(), "image/png");

        let unknown = PhotoFile {
            file_name: "notes".into(),
            bytes: vec![],
        };
        assert!(unknown.extension().is_none());
        assert_eq!(unknown.mime_type(), "application/octet-stream");
    }
}
