//! Row tree data types.

use serde::{Deserialize, Serialize};

/// One node of a report row tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ReportNode {
    /// A titled group of rows or nested sections.
    Section {
        /// Section title (may be empty).
        title: String,
        /// Child nodes.
        rows: Vec<ReportNode>,
    },
    /// An account line: `cells[0]` is the name, `cells[1]` the balance.
    Row {
        /// Row cells.
        cells: Vec<ReportCell>,
    },
    /// Headers, summary rows and anything else that carries no account.
    Other,
}

/// One cell of a report row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCell {
    /// Cell text; `None` when the upstream cell had no value.
    pub value: Option<String>,
    /// Upstream account identifier attached to the cell, if any.
    pub account_id: Option<String>,
}

impl ReportCell {
    /// Creates a cell holding a value and no account identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            account_id: None,
        }
    }

    /// Attaches an account identifier.
    #[must_use]
    pub fn with_account_id(mut self, id: impl Into<String>) -> Self {
        self.account_id = Some(id.into());
        self
    }
}

/// A row yielded by [`super::walk_rows`].
#[derive(Debug, Clone, Copy)]
pub struct RowVisit<'a> {
    /// Title of the nearest enclosing section.
    pub section: Option<&'a str>,
    /// The row's cells.
    pub cells: &'a [ReportCell],
}

impl<'a> RowVisit<'a> {
    /// Account name from the first cell.
    #[must_use]
    pub fn name(&self) -> Option<&'a str> {
        self.cells.first().and_then(|c| c.value.as_deref())
    }

    /// Raw balance text from the second cell.
    #[must_use]
    pub fn raw_balance(&self) -> Option<&'a str> {
        self.cells.get(1).and_then(|c| c.value.as_deref())
    }

    /// Account identifier attached to the name cell.
    #[must_use]
    pub fn account_id(&self) -> Option<&'a str> {
        self.cells.first().and_then(|c| c.account_id.as_deref())
    }
}

// ============================================================================
// Upstream wire shape
// ============================================================================

/// A report node exactly as the report source returns it.
///
/// Field names are accepted in both camelCase and the PascalCase used by the
/// accounting system's API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReportNode {
    /// `Section`, `Row`, `Header`, `SummaryRow`, ...
    #[serde(alias = "RowType", default)]
    pub row_type: String,
    /// Section title.
    #[serde(alias = "Title", default)]
    pub title: Option<String>,
    /// Child nodes of a section.
    #[serde(alias = "Rows", default)]
    pub rows: Option<Vec<RawReportNode>>,
    /// Cells of a row.
    #[serde(alias = "Cells", default)]
    pub cells: Option<Vec<RawCell>>,
}

/// A report cell as returned by the report source.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCell {
    /// Cell text.
    #[serde(alias = "Value", default)]
    pub value: Option<String>,
    /// Extra key/value attributes (the account id lives here).
    #[serde(alias = "Attributes", default)]
    pub attributes: Option<Vec<RawCellAttribute>>,
}

/// A cell attribute.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCellAttribute {
    /// Attribute name, e.g. `account`.
    #[serde(alias = "Id", default)]
    pub id: String,
    /// Attribute value.
    #[serde(alias = "Value", default)]
    pub value: String,
}
