//! Consolidation service.

use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use ledgerlens_shared::ConsolidationConfig;
use tokio::time::{Instant, timeout_at};
use tracing::{info, warn};

use super::types::{
    ConsolidatedView, DataQuality, MissingEntity, PortfolioSummary, PortfolioTrialBalance,
};
use crate::sources::{Entity, ReportSource, SourceError};
use crate::trial_balance::{
    BalanceCheck, EntityTrialBalance, RowCounts, TrialBalanceBuilder, TrialBalanceTotals,
};

/// Error code recorded for a company whose totals do not fit the portfolio sum.
pub const AMOUNT_OVERFLOW: &str = "AMOUNT_OVERFLOW";

/// Consolidates entity trial balances into a portfolio view.
#[derive(Debug, Clone, Default)]
pub struct Consolidator {
    config: ConsolidationConfig,
}

impl Consolidator {
    /// Creates a consolidator.
    #[must_use]
    pub const fn new(config: ConsolidationConfig) -> Self {
        Self { config }
    }

    /// Fetches and consolidates every entity in `entities` for `report_date`.
    ///
    /// The call deadline is `deadline_ms` from now; see
    /// [`consolidate_until`](Self::consolidate_until).
    pub async fn consolidate<S>(
        &self,
        source: &S,
        report_date: NaiveDate,
        entities: &[Entity],
    ) -> PortfolioTrialBalance
    where
        S: ReportSource + ?Sized,
    {
        let deadline = Instant::now() + self.config.deadline();
        self.consolidate_until(source, report_date, entities, deadline).await
    }

    /// Fetches and consolidates every entity, finishing by `deadline`.
    ///
    /// At most `max_concurrency` fetches are in flight. Each fetch is bounded
    /// by its own timeout and by `deadline`, whichever comes first. Failed and
    /// timed-out entities are listed in `missing_entities`; they never cancel
    /// sibling fetches.
    pub async fn consolidate_until<S>(
        &self,
        source: &S,
        report_date: NaiveDate,
        entities: &[Entity],
        deadline: Instant,
    ) -> PortfolioTrialBalance
    where
        S: ReportSource + ?Sized,
    {
        let builder = TrialBalanceBuilder::new(self.config.balance_tolerance);
        let fetch_timeout = self.config.fetch_timeout();

        let mut outcomes: Vec<(usize, Result<EntityTrialBalance, SourceError>)> =
            stream::iter(entities.iter().enumerate())
                .map(|(index, entity)| async move {
                    let started = Instant::now();
                    let limit = (started + fetch_timeout).min(deadline);
                    let fetch = builder.build_from_source(source, entity, report_date);
                    let result = match timeout_at(limit, fetch).await {
                        Ok(result) => result,
                        Err(_) => Err(SourceError::Timeout {
                            entity_id: entity.id.clone(),
                            timeout_ms: u64::try_from(
                                limit.saturating_duration_since(started).as_millis(),
                            )
                            .unwrap_or(u64::MAX),
                        }),
                    };
                    (index, result)
                })
                .buffer_unordered(self.config.max_concurrency.max(1))
                .collect()
                .await;

        // Completion order is arbitrary; restore request order.
        outcomes.sort_by_key(|(index, _)| *index);
        let outcomes = outcomes
            .into_iter()
            .map(|(index, result)| (&entities[index], result));

        self.aggregate(report_date, entities.len(), outcomes)
    }

    /// Sums per-entity outcomes into a portfolio. Pure; no I/O.
    ///
    /// `outcomes` must be in the order companies should appear.
    pub fn aggregate<'a>(
        &self,
        report_date: NaiveDate,
        requested: usize,
        outcomes: impl IntoIterator<Item = (&'a Entity, Result<EntityTrialBalance, SourceError>)>,
    ) -> PortfolioTrialBalance {
        let mut companies: Vec<EntityTrialBalance> = Vec::new();
        let mut missing_entities = Vec::new();
        let mut totals = TrialBalanceTotals::default();

        for (entity, outcome) in outcomes {
            let (error_code, reason) = match outcome {
                Ok(trial_balance) => match totals.checked_add(&trial_balance.totals) {
                    Some(next) => {
                        totals = next;
                        companies.push(trial_balance);
                        continue;
                    }
                    None => (
                        AMOUNT_OVERFLOW,
                        format!("Totals for {} overflow the consolidated sum", entity.id),
                    ),
                },
                Err(err) => (err.error_code(), err.to_string()),
            };

            warn!(
                entity_id = %entity.id,
                entity_name = %entity.name,
                error_code,
                reason = %reason,
                "Entity omitted from consolidation"
            );
            missing_entities.push(MissingEntity {
                entity_id: entity.id.clone(),
                entity_name: entity.name.clone(),
                error_code: error_code.to_string(),
                reason,
            });
        }

        let balance_check = BalanceCheck::evaluate(&totals, self.config.balance_tolerance);
        let balanced_companies = companies
            .iter()
            .filter(|c| c.balance_check.debits_equal_credits)
            .count();
        let mut row_counts = RowCounts::default();
        for company in &companies {
            row_counts += company.row_counts;
        }

        let summary = PortfolioSummary {
            total_companies: companies.len(),
            requested_companies: requested,
            total_accounts: companies.iter().map(|c| c.accounts.len()).sum(),
            balanced_companies,
            row_counts,
            data_quality: DataQuality {
                all_connected: companies.len() == requested,
                all_balanced: balanced_companies == companies.len(),
                consolidated_balanced: balance_check.debits_equal_credits,
            },
        };

        info!(
            report_date = %report_date,
            companies = summary.total_companies,
            requested = requested,
            balanced = balanced_companies,
            consolidated_balanced = balance_check.debits_equal_credits,
            "Consolidated portfolio trial balance"
        );

        PortfolioTrialBalance {
            report_date,
            companies,
            consolidated: ConsolidatedView {
                totals,
                balance_check,
            },
            summary,
            missing_entities,
        }
    }
}
