//! Report row trees.
//!
//! Upstream balance-sheet and profit-and-loss reports arrive as loosely typed
//! JSON forests. This module converts them into a small tagged-variant tree
//! and walks it, yielding every row together with its nearest enclosing
//! section title.

pub mod parse;
pub mod types;

pub use parse::{from_json, from_raw};
pub use types::{RawCell, RawCellAttribute, RawReportNode, ReportCell, ReportNode, RowVisit};

/// Visits every `Row` in the forest in document order.
///
/// `section` on each visit is the title of the innermost enclosing `Section`,
/// or `None` for rows at the top level. Nodes that are neither sections nor
/// rows (headers, summary rows) are not visited.
pub fn walk_rows<'a>(forest: &'a [ReportNode]) -> Vec<RowVisit<'a>> {
    let mut visits = Vec::new();
    for node in forest {
        collect(node, None, &mut visits);
    }
    visits
}

fn collect<'a>(node: &'a ReportNode, section: Option<&'a str>, out: &mut Vec<RowVisit<'a>>) {
    match node {
        ReportNode::Section { title, rows } => {
            for child in rows {
                collect(child, Some(title.as_str()), out);
            }
        }
        ReportNode::Row { cells } => out.push(RowVisit { section, cells }),
        ReportNode::Other => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, value: &str) -> ReportNode {
        ReportNode::Row {
            cells: vec![ReportCell::new(name), ReportCell::new(value)],
        }
    }

    #[test]
    fn test_walk_uses_nearest_section_title() {
        let forest = vec![
            ReportNode::Other,
            ReportNode::Section {
                title: "Assets".to_string(),
                rows: vec![
                    ReportNode::Section {
                        title: "Bank".to_string(),
                        rows: vec![row("Cheque Account", "100")],
                    },
                    row("Inventory", "20"),
                ],
            },
            row("Orphan", "1"),
        ];

        let visits = walk_rows(&forest);
        let sections: Vec<Option<&str>> = visits.iter().map(|v| v.section).collect();
        assert_eq!(sections, vec![Some("Bank"), Some("Assets"), None]);
        assert_eq!(visits[0].name(), Some("Cheque Account"));
    }

    #[test]
    fn test_walk_empty_forest() {
        assert!(walk_rows(&[]).is_empty());
    }
}
