use thiserror::Error;

use crate::excuse::{Category, ExcuseForm, ExcuseRequest, Seriousness, Tone};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("unknown category '{0}', expected one of: Running Late, Missed Meeting, Deadline, WFH/OOO, Social, Travel")]
    UnknownCategory(String),

    #[error("unknown tone '{0}', expected one of: Sincere, Playful, Corporate")]
    UnknownTone(String),

    #[error("seriousness must be between 1 and 5, got {0}")]
    SeriousnessOutOfRange(i64),
}

fn required(value: Option<&str>, field: &'static str) -> Result<String, ValidationError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ValidationError::MissingField(field)),
    }
}

impl ExcuseForm {
    /// Checks required fields and enumerated domains.
    ///
    /// Names are checked first, so a form missing both a name and a valid
    /// category reports the missing name.
    pub fn validate(&self) -> Result<ExcuseRequest, ValidationError> {
        let recipient_name = required(self.recipient_name.as_deref(), "recipient_name")?;
        let sender_name = required(self.sender_name.as_deref(), "sender_name")?;

        let category: Category = required(self.category.as_deref(), "category")?.parse()?;
        let tone: Tone = required(self.tone.as_deref(), "tone")?.parse()?;
        let seriousness = self
            .seriousness
            .ok_or(ValidationError::MissingField("seriousness"))
            .and_then(Seriousness::try_from)?;

        let eta_when = self
            .eta_when
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(ExcuseRequest {
            category,
            tone,
            seriousness,
            recipient_name,
            sender_name,
            eta_when,
        })
    }
}
