//! Cycle list entries and membership filtering.

use serde::{Deserialize, Serialize};

use super::CycleOption;
use crate::domain::foundation::{EmployeeId, ValidationError};

/// A cycle as returned by the cycle-listing API.
///
/// `employee_ids`, when present and non-empty, restricts the cycle to the
/// listed employees. Absent or empty means visible to everyone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleListEntry {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_ids: Option<Vec<String>>,
}

impl CycleListEntry {
    /// Creates an unrestricted entry.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            employee_ids: None,
        }
    }

    /// Restricts the entry to the given employees.
    pub fn with_employees<I, S>(mut self, employee_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.employee_ids = Some(employee_ids.into_iter().map(Into::into).collect());
        self
    }

    /// True when a non-empty membership list is attached.
    pub fn restricts_membership(&self) -> bool {
        self.employee_ids.as_ref().is_some_and(|ids| !ids.is_empty())
    }

    /// True when the entry is unrestricted or lists the employee.
    pub fn is_visible_to(&self, employee_id: &EmployeeId) -> bool {
        match &self.employee_ids {
            Some(ids) if !ids.is_empty() => ids.iter().any(|id| id == employee_id.as_str()),
            _ => true,
        }
    }

    /// Converts the entry into a selectable option.
    pub fn to_option(&self) -> Result<CycleOption, ValidationError> {
        CycleOption::new(self.id.clone(), self.name.clone())
    }
}

/// Restricts `entries` to the cycles visible to `employee_id`.
///
/// Filtering only applies when an employee id is known and at least one entry
/// in the batch carries a membership list; otherwise the batch is returned
/// untouched. Order is preserved.
pub fn filter_by_membership<'a>(
    entries: &'a [CycleListEntry],
    employee_id: Option<&EmployeeId>,
) -> Vec<&'a CycleListEntry> {
    match employee_id {
        Some(employee_id) if entries.iter().any(CycleListEntry::restricts_membership) => entries
            .iter()
            .filter(|entry| entry.is_visible_to(employee_id))
            .collect(),
        _ => entries.iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn employee(id: &str) -> EmployeeId {
        EmployeeId::new(id).unwrap()
    }

    #[test]
    fn deserializes_camel_case_membership_list() {
        let entry: CycleListEntry =
            serde_json::from_str(r#"{"id":"c1","name":"Q1","employeeIds":["E1","E2"]}"#).unwrap();
        assert_eq!(entry.employee_ids, Some(vec!["E1".to_string(), "E2".to_string()]));
    }

    #[test]
    fn deserializes_without_membership_list() {
        let entry: CycleListEntry = serde_json::from_str(r#"{"id":"c1","name":"Q1"}"#).unwrap();
        assert_eq!(entry.employee_ids, None);
        assert!(!entry.restricts_membership());
    }

    #[test]
    fn empty_membership_list_is_unrestricted() {
        let entry = CycleListEntry::new("c2", "Q2").with_employees(Vec::<String>::new());
        assert!(!entry.restricts_membership());
        assert!(entry.is_visible_to(&employee("E1")));
    }

    #[test]
    fn filter_excludes_cycles_the_employee_is_not_part_of() {
        let entries = vec![
            CycleListEntry::new("c1", "Q1").with_employees(["E2"]),
            CycleListEntry::new("c2", "Q2").with_employees(Vec::<String>::new()),
        ];

        let visible = filter_by_membership(&entries, Some(&employee("E1")));

        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "c2");
    }

    #[test]
    fn filter_keeps_everything_without_employee_id() {
        let entries = vec![
            CycleListEntry::new("c1", "Q1").with_employees(["E2"]),
            CycleListEntry::new("c2", "Q2"),
        ];

        let visible = filter_by_membership(&entries, None);

        assert_eq!(visible.len(), 2);
    }

    #[test]
    fn filter_keeps_everything_when_no_entry_restricts() {
        let entries = vec![
            CycleListEntry::new("c1", "Q1"),
            CycleListEntry::new("c2", "Q2").with_employees(Vec::<String>::new()),
        ];

        let visible = filter_by_membership(&entries, Some(&employee("E9")));

        assert_eq!(visible.len(), 2);
    }

    #[test]
    fn to_option_rejects_empty_name() {
        let entry = CycleListEntry::new("c1", "");
        assert!(entry.to_option().is_err());
    }

    fn arb_entry() -> impl Strategy<Value = CycleListEntry> {
        (
            "c[0-9]{1,3}",
            "Q[0-9]",
            proptest::option::of(proptest::collection::vec("E[0-4]", 0..4)),
        )
            .prop_map(|(id, name, employee_ids)| CycleListEntry {
                id,
                name,
                employee_ids,
            })
    }

    proptest! {
        #[test]
        fn filtered_entries_are_an_ordered_subsequence(
            entries in proptest::collection::vec(arb_entry(), 0..12),
            employee_id in "E[0-4]",
        ) {
            let employee_id = employee(&employee_id);
            let visible = filter_by_membership(&entries, Some(&employee_id));

            let mut remaining = entries.iter();
            for entry in &visible {
                prop_assert!(remaining.any(|candidate| candidate == *entry));
            }
        }

        #[test]
        fn every_visible_entry_admits_the_employee(
            entries in proptest::collection::vec(arb_entry(), 0..12),
            employee_id in "E[0-4]",
        ) {
            let employee_id = employee(&employee_id);
            for entry in filter_by_membership(&entries, Some(&employee_id)) {
                prop_assert!(entry.is_visible_to(&employee_id));
            }
        }

        #[test]
        fn unrestricted_entries_are_never_filtered_out(
            entries in proptest::collection::vec(arb_entry(), 0..12),
            employee_id in "E[0-4]",
        ) {
            let employee_id = employee(&employee_id);
            let visible = filter_by_membership(&entries, Some(&employee_id));
            let unrestricted = entries.iter().filter(|e| !e.restricts_membership()).count();
            prop_assert!(visible.iter().filter(|e| !e.restricts_membership()).count() == unrestricted);
        }
    }
}
