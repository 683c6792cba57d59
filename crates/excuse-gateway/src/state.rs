use std::sync::Arc;

use crate::config::GeneratorConfig;
use crate::engine::GenerationClient;
use crate::generate::ExcuseGenerator;
use crate::metrics::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub generator: ExcuseGenerator,
    pub config: Arc<GeneratorConfig>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(config: Arc<GeneratorConfig>, client: Arc<dyn GenerationClient>) -> Self {
        Self {
            generator: ExcuseGenerator::new(client),
            config,
            metrics: Arc::new(Metrics::default()),
        }
    }
}
