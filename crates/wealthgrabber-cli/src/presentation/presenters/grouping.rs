use std::collections::BTreeMap;
use wealthgrabber_types::{Activity, Position};

/// Attribute positions are partitioned by in grouped table output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupLabel {
    Account,
    Currency,
}

impl GroupLabel {
    pub fn key(self, position: &Position) -> Option<&str> {
        match self {
            GroupLabel::Account => position.account_label.as_deref(),
            GroupLabel::Currency => Some(position.currency.as_str()),
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            GroupLabel::Account => "Account",
            GroupLabel::Currency => "Currency",
        }
    }

    pub fn subtotal_label(self) -> &'static str {
        match self {
            GroupLabel::Account => "Account Total",
            GroupLabel::Currency => "Currency Total",
        }
    }
}

#[derive(Debug)]
pub struct PositionGroup<'a> {
    /// `None` for positions without a value for the grouping attribute
    pub label: Option<&'a str>,
    pub positions: Vec<&'a Position>,
}

/// Groups ordered by label, with unlabeled positions last. Order within a group is preserved.
pub fn group_positions(positions: &[Position], by: GroupLabel) -> Vec<PositionGroup<'_>> {
    let mut labeled: BTreeMap<&str, Vec<&Position>> = BTreeMap::new();
    let mut unlabeled = Vec::new();
    for position in positions {
        match by.key(position) {
            Some(label) => labeled.entry(label).or_default().push(position),
            None => unlabeled.push(position),
        }
    }

    let mut groups: Vec<PositionGroup<'_>> = labeled
        .into_iter()
        .map(|(label, positions)| PositionGroup {
            label: Some(label),
            positions,
        })
        .collect();
    if !unlabeled.is_empty() {
        groups.push(PositionGroup {
            label: None,
            positions: unlabeled,
        });
    }
    groups
}

/// Activities split by account label: unlabeled first, then labels ascending.
pub fn activity_sections(activities: &[Activity]) -> Vec<(Option<&str>, Vec<&Activity>)> {
    let mut sections: BTreeMap<Option<&str>, Vec<&Activity>> = BTreeMap::new();
    for activity in activities {
        sections
            .entry(activity.account_label.as_deref())
            .or_default()
            .push(activity);
    }
    sections.into_iter().collect()
}
