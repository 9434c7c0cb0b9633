use chrono::NaiveTime;
use thiserror::Error;

use crate::model::{Client, ClientDraft, Gender, RelationshipStatus};

/// Form-level rejection. Validation runs in the calling view before any
/// orchestration or store access; a rejected draft never reaches a
/// repository.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("required field `{0}` is empty")]
    MissingField(&'static str),
    #[error("no selection made for `{0}`")]
    UnsetChoice(&'static str),
    #[error("`{0}` is not a valid HH:MM time")]
    InvalidTime(String),
}

/// Turn form state into a persistable client.
pub fn client_from_draft(draft: &ClientDraft) -> Result<Client, ValidationError> {
    if draft.case_number.trim().is_empty() {
        return Err(ValidationError::MissingField("case_number"));
    }
    if draft.last_name.trim().is_empty() {
        return Err(ValidationError::MissingField("last_name"));
    }
    if draft.first_name.trim().is_empty() {
        return Err(ValidationError::MissingField("first_name"));
    }
    let date_of_birth = draft
        .date_of_birth
        .ok_or(ValidationError::MissingField("date_of_birth"))?;
    if draft.gender == Gender::Unset {
        return Err(ValidationError::UnsetChoice("gender"));
    }
    if draft.relationship_status == RelationshipStatus::Unset {
        return Err(ValidationError::UnsetChoice("relationship_status"));
    }

    Ok(Client {
        case_number: draft.case_number.trim().to_string(),
        last_name: draft.last_name.trim().to_string(),
        first_name: draft.first_name.trim().to_string(),
        date_of_birth,
        nationality: draft.nationality.trim().to_string(),
        gender: draft.gender,
        relationship_status: draft.relationship_status,
    })
}

/// Parse `HH:MM` form input (seconds tolerated).
pub fn parse_time(value: &str) -> Result<NaiveTime, ValidationError> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| ValidationError::InvalidTime(value.to_string()))
}
