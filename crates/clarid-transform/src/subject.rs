//! Sequential synthetic subject identifiers.

/// Assigns sequential subject IDs, collapsing contiguous runs of an equal
/// grouping key into one logical subject.
///
/// Two states: no prior subject (initial) and prior subject with its key.
/// The counter starts at 1 on the first assignment and never decreases or
/// resets within a run. Grouping only compares against the immediately
/// preceding row; a key that reappears after other keys starts a new
/// subject.
#[derive(Debug, Default)]
pub struct SubjectIdAssigner {
    counter: u64,
    state: GroupState,
}

#[derive(Debug, Default)]
enum GroupState {
    #[default]
    Initial,
    Prior(Option<String>),
}

impl SubjectIdAssigner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter mode: every row starts a new subject.
    pub fn next_row(&mut self) -> u64 {
        self.counter += 1;
        self.counter
    }

    /// Group mode: reuse the current ID while `key` repeats contiguously,
    /// advance it when the key changes.
    pub fn assign(&mut self, key: Option<String>) -> u64 {
        let changed = match &self.state {
            GroupState::Initial => true,
            GroupState::Prior(previous) => *previous != key,
        };
        if changed {
            self.counter += 1;
            self.state = GroupState::Prior(key);
        }
        self.counter
    }

    /// Number of subjects assigned so far.
    pub fn count(&self) -> u64 {
        self.counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_mode_is_one_per_row() {
        let mut assigner = SubjectIdAssigner::new();
        assert_eq!(assigner.next_row(), 1);
        assert_eq!(assigner.next_row(), 2);
        assert_eq!(assigner.count(), 2);
    }

    #[test]
    fn group_mode_collapses_contiguous_runs() {
        let mut assigner = SubjectIdAssigner::new();
        let ids: Vec<u64> = ["A", "A", "B", "B"]
            .iter()
            .map(|key| assigner.assign(Some((*key).to_string())))
            .collect();
        assert_eq!(ids, vec![1, 1, 2, 2]);
    }

    #[test]
    fn group_mode_does_not_merge_non_adjacent_runs() {
        let mut assigner = SubjectIdAssigner::new();
        let ids: Vec<u64> = ["A", "B", "A"]
            .iter()
            .map(|key| assigner.assign(Some((*key).to_string())))
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn first_assignment_starts_at_one_even_for_absent_key() {
        let mut assigner = SubjectIdAssigner::new();
        assert_eq!(assigner.assign(None), 1);
        assert_eq!(assigner.assign(None), 1);
        assert_eq!(assigner.assign(Some("A".to_string())), 2);
    }
}
