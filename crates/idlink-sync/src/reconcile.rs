//! Account lifecycle delta computation.
//!
//! Pure set-difference reconciliation: compares a desired account list
//! against the observed list and produces the add/delete action sets.
//! Execution of the delta lives in [`crate::lifecycle`].

use std::collections::HashMap;

use idlink_connector::types::AccountId;

/// The disjoint add/delete action sets for one reconciliation run.
///
/// Both sides use multiset semantics: an identifier appearing twice in
/// the desired list and once in the observed list yields exactly one
/// addition, not zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountDelta {
    /// Accounts present in the desired population in excess of the
    /// observed one.
    pub to_add: Vec<AccountId>,
    /// Accounts present in the observed population in excess of the
    /// desired one.
    pub to_delete: Vec<AccountId>,
}

impl AccountDelta {
    /// Compare a desired population against an observed one.
    ///
    /// Deterministic and pure. Output order follows the input lists,
    /// but callers may only rely on the count contract: each
    /// qualifying element appears exactly
    /// `desired_count - actual_count` times (or the symmetric count
    /// for deletions).
    pub fn compute(desired: &[AccountId], actual: &[AccountId]) -> Self {
        Self {
            to_add: multiset_difference(desired, actual),
            to_delete: multiset_difference(actual, desired),
        }
    }

    /// True when observed state already matches desired state.
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_delete.is_empty()
    }
}

/// Elements of `left` in excess of their multiplicity in `right`.
///
/// Duplicates are matched one-for-one rather than by membership.
fn multiset_difference(left: &[AccountId], right: &[AccountId]) -> Vec<AccountId> {
    let mut remaining: HashMap<&AccountId, usize> = HashMap::new();
    for id in right {
        *remaining.entry(id).or_insert(0) += 1;
    }

    let mut excess = Vec::new();
    for id in left {
        match remaining.get_mut(id) {
            Some(count) if *count > 0 => *count -= 1,
            _ => excess.push(id.clone()),
        }
    }
    excess
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<AccountId> {
        names.iter().map(|n| AccountId::from(*n)).collect()
    }

    #[test]
    fn test_additions_only() {
        let delta = AccountDelta::compute(&ids(&["a", "b", "c"]), &ids(&["b"]));
        assert_eq!(delta.to_add, ids(&["a", "c"]));
        assert!(delta.to_delete.is_empty());
    }

    #[test]
    fn test_swapped_arguments_swap_the_sets() {
        let desired = ids(&["a", "b", "c"]);
        let actual = ids(&["b", "d"]);

        let forward = AccountDelta::compute(&desired, &actual);
        let backward = AccountDelta::compute(&actual, &desired);

        assert_eq!(forward.to_add, backward.to_delete);
        assert_eq!(forward.to_delete, backward.to_add);
    }

    #[test]
    fn test_identical_populations_yield_empty_delta() {
        let population = ids(&["a", "b", "b", "c"]);
        let delta = AccountDelta::compute(&population, &population);
        assert!(delta.is_empty());
    }

    #[test]
    fn test_duplicates_are_matched_one_for_one() {
        // "a" twice desired, once observed: exactly one addition.
        let delta = AccountDelta::compute(&ids(&["a", "a"]), &ids(&["a"]));
        assert_eq!(delta.to_add, ids(&["a"]));
        assert!(delta.to_delete.is_empty());

        // Symmetric case: one extra observed copy to delete.
        let delta = AccountDelta::compute(&ids(&["a"]), &ids(&["a", "a", "a"]));
        assert!(delta.to_add.is_empty());
        assert_eq!(delta.to_delete, ids(&["a", "a"]));
    }

    #[test]
    fn test_add_and_delete_sets_are_disjoint() {
        let desired = ids(&["a", "a", "b", "c"]);
        let actual = ids(&["a", "c", "c", "d"]);
        let delta = AccountDelta::compute(&desired, &actual);

        for id in &delta.to_add {
            assert!(!delta.to_delete.contains(id), "{id} present in both sets");
        }
        assert_eq!(delta.to_add, ids(&["a", "b"]));
        assert_eq!(delta.to_delete, ids(&["c", "d"]));
    }

    #[test]
    fn test_empty_inputs() {
        let delta = AccountDelta::compute(&[], &[]);
        assert!(delta.is_empty());

        let delta = AccountDelta::compute(&ids(&["a"]), &[]);
        assert_eq!(delta.to_add, ids(&["a"]));

        let delta = AccountDelta::compute(&[], &ids(&["a"]));
        assert_eq!(delta.to_delete, ids(&["a"]));
    }
}
