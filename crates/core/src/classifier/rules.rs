//! Ordered section-title rule table.

use super::types::AccountType;

/// One classification rule: a section title containing `needle` maps to
/// `account_type`.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    /// Lowercase substring searched for in the section title.
    pub needle: &'static str,
    /// Type assigned on match.
    pub account_type: AccountType,
}

const fn rule(needle: &'static str, account_type: AccountType) -> ClassificationRule {
    ClassificationRule {
        needle,
        account_type,
    }
}

/// Rules in priority order; the first match wins.
pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    rule("bank", AccountType::Asset),
    rule("asset", AccountType::Asset),
    rule("liabilit", AccountType::Liability),
    rule("equity", AccountType::Equity),
    rule("income", AccountType::Revenue),
    rule("revenue", AccountType::Revenue),
    rule("expense", AccountType::Expense),
    rule("cost", AccountType::Expense),
];

/// Resolves the account type for a section title, case-insensitively.
#[must_use]
pub fn type_for_section(section_title: &str) -> Option<AccountType> {
    let title = section_title.to_lowercase();
    CLASSIFICATION_RULES
        .iter()
        .find(|rule| title.contains(rule.needle))
        .map(|rule| rule.account_type)
}
