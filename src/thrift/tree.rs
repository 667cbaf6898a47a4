use std::{borrow::Cow, fmt, io};

use ptree::{print_tree_with, write_tree_with, PrintConfig, Style, TreeItem};

use super::{
    hql::Hql,
    types::{HqlResult, ScanSpec},
};

/// A record laid out as a tree: scalar fields on the label, one branch per sequence.
#[derive(Debug, Clone)]
pub struct RecordNode {
    pub label: String,
    pub children: Vec<RecordNode>,
}

impl RecordNode {
    fn leaf(label: impl ToString) -> Self {
        RecordNode {
            label: label.to_string(),
            children: Vec::new(),
        }
    }

    fn branch<T: fmt::Display>(name: &str, items: &Option<Vec<T>>) -> Option<Self> {
        items.as_ref().map(|items| RecordNode {
            label: name.to_owned(),
            children: items.iter().map(RecordNode::leaf).collect(),
        })
    }

    pub fn pretty_print(&self) -> io::Result<()> {
        print_tree_with(self, &config())
    }

    pub fn write(&self, out: impl io::Write) -> io::Result<()> {
        write_tree_with(self, out, &config())
    }
}

fn config() -> PrintConfig {
    PrintConfig {
        leaf: Style {
            bold: true,
            ..Style::default()
        },
        branch: Style { ..Style::default() },
        ..PrintConfig::default()
    }
}

impl From<&ScanSpec> for RecordNode {
    fn from(spec: &ScanSpec) -> Self {
        let scalars = ScanSpec {
            row_intervals: None,
            cell_intervals: None,
            ..spec.clone()
        };
        RecordNode {
            label: scalars.to_string(),
            children: [
                RecordNode::branch("rows", &spec.row_intervals),
                RecordNode::branch("cells", &spec.cell_intervals),
            ]
            .into_iter()
            .flatten()
            .collect(),
        }
    }
}

impl From<&HqlResult> for RecordNode {
    fn from(result: &HqlResult) -> Self {
        let scalars = HqlResult {
            results: None,
            cells: None,
            ..result.clone()
        };
        let results = result
            .results
            .as_ref()
            .map(|r| r.iter().map(|s| format!("'{s}'")).collect());
        RecordNode {
            label: scalars.to_string(),
            children: [
                RecordNode::branch("results", &results),
                RecordNode::branch("cells", &result.cells),
            ]
            .into_iter()
            .flatten()
            .collect(),
        }
    }
}

impl From<&Hql> for RecordNode {
    fn from(hql: &Hql) -> Self {
        match hql {
            Hql::Insert { table, cells } => RecordNode {
                label: format!("INSERT INTO {table}"),
                children: cells.iter().map(RecordNode::leaf).collect(),
            },
            Hql::Select { table, scan_spec } => RecordNode {
                label: format!("SELECT FROM {table}"),
                children: vec![scan_spec.into()],
            },
        }
    }
}

impl TreeItem for RecordNode {
    type Child = Self;

    fn write_self<W: io::Write>(&self, f: &mut W, _: &Style) -> io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> Cow<'_, [Self::Child]> {
        Cow::from(&self.children[..])
    }
}
