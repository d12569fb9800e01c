//! Milestone evaluation and the milestone browser listing.

pub mod types;

pub use types::*;

use crate::data::{GameData, Milestone};

/// Records every milestone of `kind` whose threshold `value` meets and
/// returns the newly achieved ones, in table order.
pub fn evaluate<'a>(
    data: &'a GameData,
    log: &mut MilestoneLog,
    kind: MilestoneKind,
    value: u64,
) -> Vec<&'a Milestone> {
    data.milestones
        .iter()
        .filter(|m| m.kind == kind && kind != MilestoneKind::Unknown && value >= m.value)
        .filter(|m| log.unlock(&m.id))
        .collect()
}

/// One row of the milestone browser.
#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneStatus<'a> {
    pub milestone: &'a Milestone,
    pub achieved_at: Option<i64>,
}

impl MilestoneStatus<'_> {
    pub fn is_achieved(&self) -> bool {
        self.achieved_at.is_some()
    }
}

/// Every milestone with its achievement time, in table order.
pub fn milestone_status<'a>(data: &'a GameData, log: &MilestoneLog) -> Vec<MilestoneStatus<'a>> {
    data.milestones
        .iter()
        .map(|milestone| MilestoneStatus {
            milestone,
            achieved_at: log.get(&milestone.id).map(|a| a.achieved_at),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Area;

    fn milestone(id: &str, kind: MilestoneKind, value: u64) -> Milestone {
        Milestone {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            kind,
            value,
        }
    }

    fn data() -> GameData {
        let area = Area {
            id: "a".into(),
            name: "A".into(),
            recommended_level: 1,
            max_level: 100,
            max_item_level: 100,
            description: String::new(),
            allowed_item_levels: vec![],
        };
        GameData::from_tables(
            vec![area],
            vec![],
            vec![],
            vec![],
            vec![],
            vec![],
            vec![
                milestone("first_kill", MilestoneKind::Kill, 1),
                milestone("ten_kills", MilestoneKind::Kill, 10),
                milestone("level_5", MilestoneKind::Level, 5),
                milestone("mystery", MilestoneKind::Unknown, 0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_evaluate_records_qualifying_only() {
        let data = data();
        let mut log = MilestoneLog::new();
        let new = evaluate(&data, &mut log, MilestoneKind::Kill, 1);
        assert_eq!(new.len(), 1);
        assert_eq!(new[0].id, "first_kill");
        assert!(!log.is_achieved("ten_kills"));
        assert!(!log.is_achieved("level_5"));
    }

    #[test]
    fn test_evaluate_twice_never_double_records() {
        let data = data();
        let mut log = MilestoneLog::new();
        assert_eq!(evaluate(&data, &mut log, MilestoneKind::Kill, 12).len(), 2);
        assert!(evaluate(&data, &mut log, MilestoneKind::Kill, 12).is_empty());
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_unknown_kind_never_achieved() {
        let data = data();
        let mut log = MilestoneLog::new();
        assert!(evaluate(&data, &mut log, MilestoneKind::Unknown, 1000).is_empty());
    }

    #[test]
    fn test_status_lists_every_milestone() {
        let data = data();
        let mut log = MilestoneLog::new();
        evaluate(&data, &mut log, MilestoneKind::Level, 5);
        let status = milestone_status(&data, &log);
        assert_eq!(status.len(), 4);
        assert!(status.iter().find(|s| s.milestone.id == "level_5").unwrap().is_achieved());
        assert!(!status.iter().find(|s| s.milestone.id == "first_kill").unwrap().is_achieved());
    }
}
