use std::sync::Arc;

use excuse_common::{ExcuseForm, ExcuseRequest};

use crate::engine::GenerationClient;
use crate::error::GenerationError;
use crate::extract::{extract_email, ExtractedEmail};
use crate::prompt::render_prompt;

/// Validate, prompt, call once, extract.
#[derive(Clone)]
pub struct ExcuseGenerator {
    client: Arc<dyn GenerationClient>,
}

impl ExcuseGenerator {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self { client }
    }

    pub async fn generate(&self, form: &ExcuseForm) -> Result<ExtractedEmail, GenerationError> {
        let req = form.validate()?;
        self.generate_validated(&req).await
    }

    pub async fn generate_validated(
        &self,
        req: &ExcuseRequest,
    ) -> Result<ExtractedEmail, GenerationError> {
        tracing::info!(
            category = %req.category,
            tone = %req.tone,
            seriousness = req.seriousness.value(),
            "generating excuse"
        );

        let prompt = render_prompt(req);
        let reply = self.client.complete(&prompt).await?;

        extract_email(&reply, &req.default_subject()).map_err(GenerationError::Parse)
    }
}
