//! Natural-language salary assessments.
//!
//! An assessment is requested from an external text-generation service after
//! a successful conversion. The conversion itself never waits on or depends
//! on the assessment.

mod client;
mod prompt;
mod scheduler;

use std::sync::Arc;

use tracing::info;

use crate::config::AssessmentConfig;
use crate::error::EngineResult;

pub use client::{
    Assessor, ChatChoice, ChatChoiceMessage, ChatCompletionAssessor, ChatCompletionRequest,
    ChatCompletionResponse, ChatMessage, DisabledAssessor,
};
pub use prompt::{SYSTEM_PROMPT, build_prompt};
pub use scheduler::{AssessmentOutcome, AssessmentScheduler, PendingAssessment};

/// Text shown to users when an assessment could not be produced.
pub const ASSESSMENT_FALLBACK_MESSAGE: &str =
    "There was an error while rating. Please try again later.";

/// Builds the assessor described by the configuration.
///
/// Returns [`DisabledAssessor`] when assessments are switched off, and fails
/// if they are switched on but the API key variable is unset.
pub fn assessor_from_config(config: &AssessmentConfig) -> EngineResult<Arc<dyn Assessor>> {
    if !config.enabled {
        info!("Salary assessments disabled");
        return Ok(Arc::new(DisabledAssessor));
    }

    let assessor = ChatCompletionAssessor::from_env(config)?;
    info!(endpoint = %config.endpoint, model = %config.model, "Salary assessments enabled");
    Ok(Arc::new(assessor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_disabled_config_builds_without_key() {
        let config = AssessmentConfig {
            enabled: false,
            api_key_env: "SALARY_ENGINE_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..AssessmentConfig::default()
        };
        assert!(assessor_from_config(&config).is_ok());
    }

    #[test]
    fn test_enabled_config_requires_key() {
        let config = AssessmentConfig {
            enabled: true,
            api_key_env: "SALARY_ENGINE_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..AssessmentConfig::default()
        };
        assert!(matches!(
            assessor_from_config(&config),
            Err(EngineError::InvalidConfig { .. })
        ));
    }
}
