//! Service context - dependency container for services
//!
//! Holds the repository ports, the optimistic store, and the engagement
//! settings every service needs.

use std::sync::Arc;

use engage_cache::OptimisticStore;
use engage_common::EngagementSettings;
use engage_core::traits::{CounterRepository, EngagementRepository, ReactionRepository};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    reaction_repo: Arc<dyn ReactionRepository>,
    counter_repo: Arc<dyn CounterRepository>,
    engagement_repo: Arc<dyn EngagementRepository>,
    optimistic: Arc<OptimisticStore>,
    settings: EngagementSettings,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        reaction_repo: Arc<dyn ReactionRepository>,
        counter_repo: Arc<dyn CounterRepository>,
        engagement_repo: Arc<dyn EngagementRepository>,
        settings: EngagementSettings,
    ) -> Self {
        Self {
            reaction_repo,
            counter_repo,
            engagement_repo,
            optimistic: Arc::new(OptimisticStore::new()),
            settings,
        }
    }

    /// Get the reaction ledger
    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    /// Get the counter aggregator
    pub fn counter_repo(&self) -> &dyn CounterRepository {
        self.counter_repo.as_ref()
    }

    /// Get the engagement recorder
    pub fn engagement_repo(&self) -> &dyn EngagementRepository {
        self.engagement_repo.as_ref()
    }

    /// Get the client-held optimistic store
    pub fn optimistic(&self) -> &OptimisticStore {
        self.optimistic.as_ref()
    }

    /// Get the engagement settings
    pub fn settings(&self) -> &EngagementSettings {
        &self.settings
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("optimistic", &self.optimistic)
            .field("settings", &self.settings)
            .finish()
    }
}

/// Builder for creating ServiceContext
pub struct ServiceContextBuilder {
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    counter_repo: Option<Arc<dyn CounterRepository>>,
    engagement_repo: Option<Arc<dyn EngagementRepository>>,
    settings: EngagementSettings,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            reaction_repo: None,
            counter_repo: None,
            engagement_repo: None,
            settings: EngagementSettings::default(),
        }
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn counter_repo(mut self, repo: Arc<dyn CounterRepository>) -> Self {
        self.counter_repo = Some(repo);
        self
    }

    pub fn engagement_repo(mut self, repo: Arc<dyn EngagementRepository>) -> Self {
        self.engagement_repo = Some(repo);
        self
    }

    pub fn settings(mut self, settings: EngagementSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.reaction_repo.ok_or_else(|| {
                super::error::ServiceError::validation("reaction_repo is required")
            })?,
            self.counter_repo.ok_or_else(|| {
                super::error::ServiceError::validation("counter_repo is required")
            })?,
            self.engagement_repo.ok_or_else(|| {
                super::error::ServiceError::validation("engagement_repo is required")
            })?,
            self.settings,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
