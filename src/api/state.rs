//! Application state for the salary engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::assessment::{AssessmentScheduler, Assessor, assessor_from_config};
use crate::config::ConfigLoader;
use crate::error::EngineResult;

/// Shared application state.
///
/// Holds the loaded configuration and the assessment scheduler.
#[derive(Clone)]
pub struct AppState {
    /// The loaded engine configuration.
    config: Arc<ConfigLoader>,
    /// Runs assessments, one in flight per session.
    scheduler: Arc<AssessmentScheduler>,
}

impl AppState {
    /// Creates a new application state with an explicit assessor.
    pub fn new(config: ConfigLoader, assessor: Arc<dyn Assessor>) -> Self {
        Self {
            config: Arc::new(config),
            scheduler: Arc::new(AssessmentScheduler::new(assessor)),
        }
    }

    /// Creates a new application state, building the assessor from the
    /// configuration's assessment section.
    pub fn from_config(config: ConfigLoader) -> EngineResult<Self> {
        let assessor = assessor_from_config(&config.service().assessment)?;
        Ok(Self::new(config, assessor))
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the assessment scheduler.
    pub fn scheduler(&self) -> &AssessmentScheduler {
        &self.scheduler
    }
}
