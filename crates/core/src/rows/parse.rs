//! Conversion from the upstream wire shape into [`ReportNode`] trees.

use super::types::{RawCell, RawReportNode, ReportCell, ReportNode};

/// Attribute id carrying the upstream account identifier.
const ACCOUNT_ATTRIBUTE: &str = "account";

/// Converts a raw forest into typed nodes.
///
/// `Section` and `Row` are matched case-insensitively; every other row type
/// becomes [`ReportNode::Other`]. A section without a title gets an empty
/// one, and a row without cells gets an empty cell list (the builder counts
/// it as malformed).
#[must_use]
pub fn from_raw(forest: &[RawReportNode]) -> Vec<ReportNode> {
    forest.iter().map(convert).collect()
}

/// Parses a JSON forest (`[{rowType, title?, rows?, cells?}, ...]`).
///
/// # Errors
///
/// Returns an error if the text is not a JSON array of report nodes.
pub fn from_json(text: &str) -> Result<Vec<ReportNode>, serde_json::Error> {
    let raw: Vec<RawReportNode> = serde_json::from_str(text)?;
    Ok(from_raw(&raw))
}

fn convert(node: &RawReportNode) -> ReportNode {
    if node.row_type.eq_ignore_ascii_case("section") {
        ReportNode::Section {
            title: node.title.clone().unwrap_or_default(),
            rows: node.rows.as_deref().map(from_raw).unwrap_or_default(),
        }
    } else if node.row_type.eq_ignore_ascii_case("row") {
        ReportNode::Row {
            cells: node
                .cells
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(convert_cell)
                .collect(),
        }
    } else {
        ReportNode::Other
    }
}

fn convert_cell(cell: &RawCell) -> ReportCell {
    let account_id = cell.attributes.as_ref().and_then(|attrs| {
        attrs
            .iter()
            .find(|a| a.id.eq_ignore_ascii_case(ACCOUNT_ATTRIBUTE))
            .map(|a| a.value.clone())
    });
    ReportCell {
        value: cell.value.clone(),
        account_id,
    }
}
