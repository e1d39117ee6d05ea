//! Trial balance builder.

use chrono::NaiveDate;
use ledgerlens_shared::types::{EntityId, parse_amount};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::types::{AccountsByType, BalanceCheck, EntityTrialBalance, RowCounts, TrialBalanceTotals};
use crate::classifier::{AccountClassifier, Classification, ReportKind, SkipReason};
use crate::rows::{ReportNode, walk_rows};
use crate::sources::{Entity, ReportSource, SourceError};

/// Default tolerance for the balance checks (0.01).
pub const DEFAULT_BALANCE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Builds entity trial balances from report row trees.
#[derive(Debug, Clone, Copy)]
pub struct TrialBalanceBuilder {
    tolerance: Decimal,
}

impl Default for TrialBalanceBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_BALANCE_TOLERANCE)
    }
}

impl TrialBalanceBuilder {
    /// Creates a builder using `tolerance` for the balance checks.
    #[must_use]
    pub const fn new(tolerance: Decimal) -> Self {
        Self { tolerance }
    }

    /// Fetches both reports for an entity and builds its trial balance.
    ///
    /// A failed balance-sheet fetch fails the build. A failed profit-and-loss
    /// fetch is logged and the build continues with balance-sheet data only.
    pub async fn build_from_source<S>(
        &self,
        source: &S,
        entity: &Entity,
        report_date: NaiveDate,
    ) -> Result<EntityTrialBalance, SourceError>
    where
        S: ReportSource + ?Sized,
    {
        let balance_sheet = source.balance_sheet(&entity.id, report_date).await?;
        let profit_loss = match source.profit_and_loss(&entity.id, report_date).await {
            Ok(rows) => rows,
            Err(err) => {
                warn!(
                    entity_id = %entity.id,
                    report_date = %report_date,
                    error = %err,
                    "Profit and loss unavailable, using balance sheet only"
                );
                Vec::new()
            }
        };

        Ok(self.build(
            entity.id.clone(),
            &entity.name,
            report_date,
            &balance_sheet,
            &profit_loss,
        ))
    }

    /// Builds the trial balance for one entity and date.
    ///
    /// Pass an empty profit-and-loss forest when that report is unavailable;
    /// revenue and expense totals then stay at zero.
    #[must_use]
    pub fn build(
        &self,
        entity_id: EntityId,
        entity_name: &str,
        report_date: NaiveDate,
        balance_sheet: &[ReportNode],
        profit_loss: &[ReportNode],
    ) -> EntityTrialBalance {
        let mut accounts = AccountsByType::default();
        let mut totals = TrialBalanceTotals::default();
        let mut counts = RowCounts::default();

        for (kind, forest) in [
            (ReportKind::BalanceSheet, balance_sheet),
            (ReportKind::ProfitAndLoss, profit_loss),
        ] {
            for visit in walk_rows(forest) {
                counts.processed += 1;

                let (Some(name), Some(raw_balance)) = (visit.name(), visit.raw_balance()) else {
                    counts.malformed += 1;
                    continue;
                };
                let section = visit.section.unwrap_or_default();

                match AccountClassifier::classify_for_report(
                    kind,
                    name,
                    parse_amount(raw_balance),
                    section,
                ) {
                    Classification::Account(mut record) => {
                        let Some(next) = totals.checked_record(&record) else {
                            warn!(
                                entity_id = %entity_id,
                                section = %section,
                                account = %name,
                                balance = %record.balance,
                                "Dropped row whose balance overflows the totals"
                            );
                            counts.malformed += 1;
                            continue;
                        };
                        totals = next;
                        record.code = visit.account_id().map(str::to_string);
                        accounts.push(record);
                        counts.admitted += 1;
                    }
                    Classification::Skipped(SkipReason::TotalRow) => counts.skipped_totals += 1,
                    Classification::Skipped(SkipReason::ZeroBalance) => counts.skipped_zero += 1,
                    Classification::Skipped(SkipReason::Unclassified) => {
                        debug!(
                            entity_id = %entity_id,
                            section = %section,
                            account = %name,
                            "Dropped row in unclassified section"
                        );
                        counts.unclassified += 1;
                    }
                }
            }
        }

        accounts.sort_by_name();
        let balance_check = BalanceCheck::evaluate(&totals, self.tolerance);

        debug!(
            entity_id = %entity_id,
            report_date = %report_date,
            accounts = accounts.len(),
            dropped = counts.unclassified,
            balanced = balance_check.debits_equal_credits,
            "Built entity trial balance"
        );

        EntityTrialBalance {
            entity_id,
            entity_name: entity_name.to_string(),
            report_date,
            accounts,
            totals,
            balance_check,
            row_counts: counts,
        }
    }
}
