pub mod integrations;
pub mod mapper;
pub mod real;
pub mod simulated;

use std::sync::Arc;
use async_trait::async_trait;
use crate::config::{AegisConfig, OperationMode};
use crate::errors::AegisError;
use crate::models::{IntelligenceReport, ScanInput, SecurityGraph};
use crate::pipeline::Pacing;

pub use real::RealProvider;
pub use simulated::SimulatedProvider;

/// Source of exposure intelligence for an identity.
#[async_trait]
pub trait SecurityProvider: Send + Sync {
    async fn scan_identity(&self, input: &ScanInput) -> Result<IntelligenceReport, AegisError>;

    async fn threat_graph(&self, identity: &str) -> Result<SecurityGraph, AegisError>;

    fn provider_name(&self) -> &str;
}

/// Both provider instances, built once at startup.
#[derive(Clone)]
pub struct Providers {
    simulated: Arc<dyn SecurityProvider>,
    real: Arc<dyn SecurityProvider>,
}

impl Providers {
    pub fn new(simulated: Arc<dyn SecurityProvider>, real: Arc<dyn SecurityProvider>) -> Self {
        Self { simulated, real }
    }

    pub fn from_config(config: &AegisConfig, pacing: Pacing) -> Self {
        Self::new(
            Arc::new(SimulatedProvider::new(pacing)),
            Arc::new(RealProvider::new(config.services.clone())),
        )
    }

    pub fn select(&self, mode: OperationMode) -> Arc<dyn SecurityProvider> {
        match mode {
            OperationMode::Simulation => Arc::clone(&self.simulated),
            OperationMode::Real => Arc::clone(&self.real),
        }
    }
}
