//! Pipeline service.

use std::sync::Arc;

use chrono::NaiveDate;
use ledgerlens_shared::AppConfig;
use tracing::{info, instrument};

use super::error::PipelineError;
use crate::comparison::{PeriodComparator, PeriodComparison};
use crate::consolidation::{Consolidator, PortfolioTrialBalance};
use crate::journal::{JournalScreener, ScreeningReport};
use crate::sources::{Entity, EntityRegistry, JournalQuery, JournalSource, ReportSource};
use crate::trial_balance::{EntityTrialBalance, TrialBalanceBuilder};

/// Parses an optional `YYYY-MM-DD` date, defaulting to `today`.
///
/// # Errors
///
/// Returns `InvalidReportDate` if the text is present but not a valid date.
pub fn resolve_report_date(
    requested: Option<&str>,
    today: NaiveDate,
) -> Result<NaiveDate, PipelineError> {
    match requested.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(today),
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map_err(|_| PipelineError::InvalidReportDate(text.to_string())),
    }
}

/// Finds an entity by exact id, then by case-insensitive name.
///
/// # Errors
///
/// Returns `NoMatchingEntity` if nothing matches, or the registry error.
pub async fn resolve_entity<R>(registry: &R, needle: &str) -> Result<Entity, PipelineError>
where
    R: EntityRegistry + ?Sized,
{
    let entities = registry.entities().await?;
    let needle = needle.trim();
    let lowered = needle.to_lowercase();

    entities
        .iter()
        .find(|e| e.id.as_str() == needle)
        .or_else(|| entities.iter().find(|e| e.name.to_lowercase() == lowered))
        .cloned()
        .ok_or_else(|| PipelineError::NoMatchingEntity(needle.to_string()))
}

/// Returns every connected entity in registry order.
///
/// # Errors
///
/// Returns the registry error.
pub async fn connected_entities<R>(registry: &R) -> Result<Vec<Entity>, PipelineError>
where
    R: EntityRegistry + ?Sized,
{
    let entities = registry.entities().await?;
    Ok(entities.into_iter().filter(Entity::is_connected).collect())
}

/// Runs the analysis flows against one data source.
pub struct LedgerPipeline<S> {
    source: Arc<S>,
    config: AppConfig,
}

impl<S> LedgerPipeline<S>
where
    S: ReportSource + JournalSource + EntityRegistry,
{
    /// Creates a pipeline.
    pub fn new(source: Arc<S>, config: AppConfig) -> Self {
        Self { source, config }
    }

    fn builder(&self) -> TrialBalanceBuilder {
        TrialBalanceBuilder::new(self.config.consolidation.balance_tolerance)
    }

    /// Builds the trial balance for one entity.
    ///
    /// # Errors
    ///
    /// Fails if the entity is unknown or its balance sheet is unavailable.
    #[instrument(skip(self))]
    pub async fn entity_trial_balance(
        &self,
        entity: &str,
        report_date: NaiveDate,
    ) -> Result<EntityTrialBalance, PipelineError> {
        let entity = resolve_entity(self.source.as_ref(), entity).await?;
        Ok(self
            .builder()
            .build_from_source(self.source.as_ref(), &entity, report_date)
            .await?)
    }

    /// Consolidates every connected entity.
    ///
    /// # Errors
    ///
    /// Fails only if the registry is unavailable; entity failures are
    /// reported inside the result.
    #[instrument(skip(self))]
    pub async fn portfolio_trial_balance(
        &self,
        report_date: NaiveDate,
    ) -> Result<PortfolioTrialBalance, PipelineError> {
        let entities = connected_entities(self.source.as_ref()).await?;
        info!(entities = entities.len(), "Consolidating connected entities");
        Ok(Consolidator::new(self.config.consolidation.clone())
            .consolidate(self.source.as_ref(), report_date, &entities)
            .await)
    }

    /// Screens an entity's manual journals in the query's date range.
    ///
    /// With `suspicious_only`, only flagged entries are listed, largest
    /// imbalance first.
    ///
    /// # Errors
    ///
    /// Fails if the entity is unknown or its journals are unavailable.
    #[instrument(skip(self, query), fields(from = %query.date_from, to = %query.date_to))]
    pub async fn screen_journals(
        &self,
        entity: &str,
        query: &JournalQuery,
        suspicious_only: bool,
    ) -> Result<ScreeningReport, PipelineError> {
        let entity = resolve_entity(self.source.as_ref(), entity).await?;
        let entries = self.source.manual_journals(&entity.id, query).await?;
        let screener = JournalScreener::new(self.config.screening.clone());
        let filter = query.account_name.as_deref();

        Ok(if suspicious_only {
            screener.find_suspicious(&entries, filter)
        } else {
            screener.screen(&entries, filter)
        })
    }

    /// Compares one entity's balance sheet between two dates.
    ///
    /// # Errors
    ///
    /// Fails if the entity is unknown or either balance sheet is unavailable.
    #[instrument(skip(self))]
    pub async fn compare_entity(
        &self,
        entity: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<PeriodComparison, PipelineError> {
        let entity = resolve_entity(self.source.as_ref(), entity).await?;
        let builder = self.builder();
        let before = builder
            .build_from_source(self.source.as_ref(), &entity, from)
            .await?;
        let after = builder
            .build_from_source(self.source.as_ref(), &entity, to)
            .await?;

        Ok(PeriodComparator::new(self.config.comparison.clone()).compare(&before, &after))
    }

    /// Compares the consolidated portfolio between two dates.
    ///
    /// # Errors
    ///
    /// Fails only if the registry is unavailable.
    #[instrument(skip(self))]
    pub async fn compare_portfolio(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<PeriodComparison, PipelineError> {
        let before = self.portfolio_trial_balance(from).await?;
        let after = self.portfolio_trial_balance(to).await?;
        Ok(PeriodComparator::new(self.config.comparison.clone()).compare(&before, &after))
    }
}
