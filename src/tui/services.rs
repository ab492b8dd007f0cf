use std::sync::Arc;

use crate::config::AppConfig;
use crate::core::analysis::AnalysisClient;
use crate::core::provider::GeminiClient;

/// Centralized handle to backend services.
///
/// Created once at startup, then passed (by ref or clone) to the parts of
/// the interface that need backend access.
pub struct Services {
    pub analysis: AnalysisClient,
}

impl Services {
    /// Build services from config. The API key is read from the process
    /// environment exactly once, here.
    pub fn init(config: &AppConfig) -> Self {
        let api_key = config.api_key();
        if api_key.is_none() {
            log::warn!(
                "{} not set — trending will fall back to static data and analysis will fail",
                config.api.key_env
            );
        }

        let provider = GeminiClient::new(api_key, config.api.model.clone());
        let analysis = AnalysisClient::new(Arc::new(provider));

        Self { analysis }
    }
}
