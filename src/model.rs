use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Gender as recorded on a client. `Unset` is the form sentinel and must
/// not survive into a committed save.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    Unset,
    Male,
    Female,
    Diverse,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Unset => "unset",
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Diverse => "diverse",
        }
    }

    /// Stored values outside the known set decode to `Unset`; the write
    /// path is guarded by validation, the read path stays tolerant.
    pub fn from_db(value: &str) -> Self {
        match value {
            "male" => Gender::Male,
            "female" => Gender::Female,
            "diverse" => Gender::Diverse,
            _ => Gender::Unset,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipStatus {
    #[default]
    Unset,
    Married,
    Single,
    Widowed,
}

impl RelationshipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipStatus::Unset => "unset",
            RelationshipStatus::Married => "married",
            RelationshipStatus::Single => "single",
            RelationshipStatus::Widowed => "widowed",
        }
    }

    pub fn from_db(value: &str) -> Self {
        match value {
            "married" => RelationshipStatus::Married,
            "single" => RelationshipStatus::Single,
            "widowed" => RelationshipStatus::Widowed,
            _ => RelationshipStatus::Unset,
        }
    }
}

/// A case record. The case number is assigned before first persistence and
/// never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Client {
    pub case_number: String,
    pub last_name: String,
    pub first_name: String,
    pub date_of_birth: NaiveDate,
    pub nationality: String,
    pub gender: Gender,
    pub relationship_status: RelationshipStatus,
}

/// Mutable client form state. Unlike [`Client`] every field may still be
/// empty or unselected; validation turns a draft into a persistable client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ClientDraft {
    pub case_number: String,
    pub last_name: String,
    pub first_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub nationality: String,
    pub gender: Gender,
    pub relationship_status: RelationshipStatus,
}

/// An appointment linked to a client by case number.
///
/// `id` is 0 until the store assigns one on insert. The client name pair is
/// populated by the list queries' join and is never written back; it is
/// `None` when the owning client no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Appointment {
    pub id: i64,
    pub case_number: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub address: String,
    pub institution: String,
    pub priority: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_first_name: Option<String>,
}

/// A case note. Same lifecycle as [`Appointment`]: `id` 0 until inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Documentation {
    pub id: i64,
    pub case_number: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub title: String,
    pub description: String,
}

/// An uploaded file. The record stores the absolute path of the managed
/// copy, never the file's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FileRecord {
    pub id: i64,
    pub case_number: String,
    pub upload_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    pub file_name: String,
    pub file_path: String,
}
