use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    #[serde(rename = "Running Late")]
    RunningLate,
    #[serde(rename = "Missed Meeting")]
    MissedMeeting,
    #[serde(rename = "Deadline")]
    Deadline,
    #[serde(rename = "WFH/OOO")]
    WfhOoo,
    #[serde(rename = "Social")]
    Social,
    #[serde(rename = "Travel")]
    Travel,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::RunningLate,
        Category::MissedMeeting,
        Category::Deadline,
        Category::WfhOoo,
        Category::Social,
        Category::Travel,
    ];

    /// Label shown on the form and embedded in prompts and subjects.
    pub fn label(self) -> &'static str {
        match self {
            Category::RunningLate => "Running Late",
            Category::MissedMeeting => "Missed Meeting",
            Category::Deadline => "Deadline",
            Category::WfhOoo => "WFH/OOO",
            Category::Social => "Social",
            Category::Travel => "Travel",
        }
    }

    /// Command-line friendly form, e.g. `running-late`.
    pub fn slug(self) -> &'static str {
        match self {
            Category::RunningLate => "running-late",
            Category::MissedMeeting => "missed-meeting",
            Category::Deadline => "deadline",
            Category::WfhOoo => "wfh-ooo",
            Category::Social => "social",
            Category::Travel => "travel",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(raw) || c.slug().eq_ignore_ascii_case(raw))
            .ok_or_else(|| ValidationError::UnknownCategory(raw.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Tone {
    Sincere,
    Playful,
    Corporate,
}

impl Tone {
    pub const ALL: [Tone; 3] = [Tone::Sincere, Tone::Playful, Tone::Corporate];

    pub fn label(self) -> &'static str {
        match self {
            Tone::Sincere => "Sincere",
            Tone::Playful => "Playful",
            Tone::Corporate => "Corporate",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tone {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        Tone::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(raw))
            .ok_or_else(|| ValidationError::UnknownTone(raw.to_string()))
    }
}

/// Seriousness level, always within `MIN..=MAX`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Seriousness(u8);

impl Seriousness {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn description(self) -> &'static str {
        match self.0 {
            1 => "very silly and humorous",
            2 => "light and playful",
            3 => "balanced and professional",
            4 => "serious and formal",
            _ => "very serious and professional",
        }
    }

    pub fn all() -> impl Iterator<Item = Seriousness> {
        (Self::MIN..=Self::MAX).map(Seriousness)
    }
}

impl TryFrom<i64> for Seriousness {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Seriousness(value as u8))
        } else {
            Err(ValidationError::SeriousnessOutOfRange(value))
        }
    }
}

impl fmt::Display for Seriousness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated excuse request. Build one through [`ExcuseForm::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcuseRequest {
    pub category: Category,
    pub tone: Tone,
    pub seriousness: Seriousness,
    pub recipient_name: String,
    pub sender_name: String,
    pub eta_when: Option<String>,
}

impl ExcuseRequest {
    /// Subject used when the generated reply does not carry one.
    pub fn default_subject(&self) -> String {
        match self.eta_when.as_deref() {
            Some(eta) => format!("{} - ETA {}", self.category, eta),
            None => format!("Re: {}", self.category),
        }
    }
}

/// Raw request body as submitted by a collector.
///
/// Every field is optional on the wire so that incomplete submissions reach
/// validation and come back as a failed [`ExcuseResponse`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExcuseForm {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub seriousness: Option<i64>,
    #[serde(default)]
    pub recipient_name: Option<String>,
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta_when: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExcuseResponse {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExcuseResponse {
    pub fn success(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
            success: true,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            subject: String::new(),
            body: String::new(),
            success: false,
            error: Some(error.into()),
        }
    }
}
