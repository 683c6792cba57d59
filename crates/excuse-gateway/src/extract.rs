//! Recovers a subject and body from free-form model output.
//!
//! The reply format is not under our control, so extraction runs an ordered
//! chain of [`Strategy`] values. Each one either extracts an email, declines
//! (the reply is not in its shape), or rejects (the reply is in its shape but
//! unusable). The first outcome that is not a decline wins.

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedEmail {
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt {
    Extracted(ExtractedEmail),
    Declined,
    Rejected(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// `{"subject": ..., "body": ...}`, optionally fenced or wrapped in prose.
    StructuredJson,
    /// A `Subject:` (or `Subject ...`) line somewhere in the text, everything else is the body.
    LabelledText,
    /// First non-empty line is the subject, the rest is the body.
    LineSplit,
}

impl Strategy {
    pub const CHAIN: [Strategy; 3] = [
        Strategy::StructuredJson,
        Strategy::LabelledText,
        Strategy::LineSplit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::StructuredJson => "structured_json",
            Strategy::LabelledText => "labelled_text",
            Strategy::LineSplit => "line_split",
        }
    }

    pub fn attempt(self, reply: &str, fallback_subject: &str) -> Attempt {
        match self {
            Strategy::StructuredJson => structured_json(reply, fallback_subject),
            Strategy::LabelledText => labelled_text(reply, fallback_subject),
            Strategy::LineSplit => line_split(reply, fallback_subject),
        }
    }
}

/// Runs the strategy chain. `fallback_subject` is used whenever the reply
/// carries a body but no subject.
pub fn extract_email(reply: &str, fallback_subject: &str) -> Result<ExtractedEmail, String> {
    for strategy in Strategy::CHAIN {
        match strategy.attempt(reply, fallback_subject) {
            Attempt::Extracted(email) => {
                tracing::debug!(strategy = strategy.name(), "extracted email from reply");
                return Ok(email);
            }
            Attempt::Rejected(reason) => {
                tracing::warn!(strategy = strategy.name(), %reason, "reply rejected");
                return Err(reason);
            }
            Attempt::Declined => continue,
        }
    }
    Err("reply contained no usable text".to_string())
}

fn non_empty(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string ("json") on the opening fence line.
    let rest = rest.split_once('\n').map_or("", |(_, r)| r);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

/// The JSON object in the reply, and whether it spans the whole reply.
fn json_object(reply: &str) -> Option<(serde_json::Map<String, Value>, bool)> {
    let text = strip_code_fence(reply.trim());
    let (candidate, whole) = if text.starts_with('{') {
        (text, true)
    } else {
        let start = text.find('{')?;
        let end = text.rfind('}')?;
        (text.get(start..=end)?, false)
    };
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => Some((map, whole)),
        _ => None,
    }
}

fn structured_json(reply: &str, fallback_subject: &str) -> Attempt {
    let Some((map, whole)) = json_object(reply) else {
        return Attempt::Declined;
    };
    let field = |key: &str| map.get(key).and_then(Value::as_str).and_then(non_empty);

    match field("body") {
        Some(body) => Attempt::Extracted(ExtractedEmail {
            subject: field("subject").unwrap_or(fallback_subject).to_string(),
            body: body.to_string(),
        }),
        None if whole => Attempt::Rejected("reply JSON has no body".to_string()),
        // Braces quoted inside prose, leave it to the text strategies.
        None => Attempt::Declined,
    }
}

fn strip_markup(line: &str) -> &str {
    line.trim().trim_start_matches(['*', '#', '_', ' '])
}

fn label_value<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let line = strip_markup(line);
    let head = line.get(..label.len())?;
    if !head.eq_ignore_ascii_case(label) {
        return None;
    }
    let rest = line[label.len()..].trim_start_matches(['*', '_']);
    rest.strip_prefix(':')
        .map(|v| v.trim().trim_matches(['*', '_']).trim())
}

// Also accepts the colon-less form "Subject Running late".
fn subject_value(line: &str) -> Option<&str> {
    label_value(line, "subject").or_else(|| {
        let line = strip_markup(line);
        let head = line.get(..7)?;
        let rest = line.get(7..)?;
        if !head.eq_ignore_ascii_case("subject") {
            return None;
        }
        if rest.is_empty() || rest.starts_with(char::is_whitespace) {
            Some(rest.trim())
        } else {
            None
        }
    })
}

fn labelled_text(reply: &str, fallback_subject: &str) -> Attempt {
    let lines: Vec<&str> = reply.lines().collect();
    let Some((idx, subject)) = lines
        .iter()
        .enumerate()
        .find_map(|(i, l)| subject_value(l).map(|v| (i, v)))
    else {
        return Attempt::Declined;
    };

    let body_lines: Vec<&str> = lines
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != idx)
        .map(|(_, l)| label_value(l, "body").unwrap_or(*l))
        .collect();
    let body = body_lines.join("\n");

    match non_empty(&body) {
        Some(body) => Attempt::Extracted(ExtractedEmail {
            subject: non_empty(subject).unwrap_or(fallback_subject).to_string(),
            body: body.to_string(),
        }),
        None => Attempt::Rejected("reply has a subject line but no body".to_string()),
    }
}

fn line_split(reply: &str, fallback_subject: &str) -> Attempt {
    let Some(text) = non_empty(reply) else {
        return Attempt::Declined;
    };

    let (first, rest) = text.split_once('\n').unwrap_or((text, ""));
    match non_empty(rest) {
        Some(body) => Attempt::Extracted(ExtractedEmail {
            subject: first.trim().to_string(),
            body: body.to_string(),
        }),
        None => Attempt::Extracted(ExtractedEmail {
            subject: fallback_subject.to_string(),
            body: first.trim().to_string(),
        }),
    }
}
