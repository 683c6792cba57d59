use excuse_common::ExcuseRequest;

/// Renders the instruction sent to the text-generation service.
pub fn render_prompt(req: &ExcuseRequest) -> String {
    let seriousness = req.seriousness.description();
    let eta = req.eta_when.as_deref().unwrap_or("not specified");
    let eta_requirement = match req.eta_when.as_deref() {
        Some(eta) => format!("- Include the specific ETA/timing information: {eta}"),
        None => "- No specific ETA was given; do not invent one".to_string(),
    };

    format!(
        r#"You are an expert email writer. Generate an excuse email based on the following requirements:

Category: {category}
Tone: {tone}
Seriousness Level: {seriousness} (scale 1-5, current: {level})
Recipient: {recipient}
Sender: {sender}
ETA/When: {eta}

Respond with a JSON object with exactly this structure:
{{
    "subject": "Appropriate email subject line",
    "body": "Complete email body with greeting, apology, reason, next steps, and sign-off"
}}

Requirements:
- The email should fit a {tone} tone
- Match the {seriousness} seriousness level
{eta_requirement}
- Address {recipient} appropriately
- Sign off from {sender}
- The body should be well-formatted with proper paragraphs

Return only the JSON object, no additional text."#,
        category = req.category,
        tone = req.tone,
        level = req.seriousness,
        recipient = req.recipient_name,
        sender = req.sender_name,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use excuse_common::ExcuseForm;

    fn request(eta: Option<&str>) -> ExcuseRequest {
        ExcuseForm {
            category: Some("Missed Meeting".to_string()),
            tone: Some("Corporate".to_string()),
            seriousness: Some(4),
            recipient_name: Some("Jordan".to_string()),
            sender_name: Some("Sam".to_string()),
            eta_when: eta.map(str::to_string),
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn test_prompt_embeds_every_field() {
        let p = render_prompt(&request(Some("tomorrow 9am")));
        assert!(p.contains("Category: Missed Meeting"));
        assert!(p.contains("Tone: Corporate"));
        assert!(p.contains("serious and formal (scale 1-5, current: 4)"));
        assert!(p.contains("Recipient: Jordan"));
        assert!(p.contains("Sender: Sam"));
        assert!(p.contains("ETA/When: tomorrow 9am"));
        assert!(p.contains(r#""subject""#));
    }

    #[test]
    fn test_prompt_without_eta() {
        let p = render_prompt(&request(None));
        assert!(p.contains("ETA/When: not specified"));
        assert!(p.contains("do not invent one"));
    }
}
