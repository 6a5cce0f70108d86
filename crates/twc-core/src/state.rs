//! State histories.
//!
//! A component state carries one current-step instance (written by
//! `run`) and `history` past instances (read-only inputs to `run`). Most
//! solvers need one past step; multi-step solvers declare more through
//! `Component::solver_history`. Between timesteps the driver calls
//! [`StateHistory::rotate`], which ages every instance by one step,
//! recycles the oldest slot as the new current instance, and zeroes it.
//! No data is copied and nothing is allocated after construction.

use indexmap::IndexMap;

use crate::error::ComponentError;
use crate::field::FieldName;

/// Current and past instances of one state field, kept as a ring.
#[derive(Clone, Debug, PartialEq)]
pub struct StateHistory {
    slots: Vec<Vec<f64>>,
    current: usize,
}

impl StateHistory {
    /// Create a history of one past and one current instance, each
    /// holding `len` zeros.
    pub fn new(len: usize) -> Self {
        Self::with_history(len, 1)
    }

    /// Create a history keeping `history` past instances besides the
    /// current one. A `history` of zero is raised to one.
    pub fn with_history(len: usize, history: usize) -> Self {
        Self {
            slots: vec![vec![0.0; len]; history.max(1) + 1],
            current: 0,
        }
    }

    /// Number of values in each instance.
    pub fn len(&self) -> usize {
        self.slots[0].len()
    }

    /// Whether the instances hold no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of past instances kept.
    pub fn history(&self) -> usize {
        self.slots.len() - 1
    }

    fn lag_index(&self, lag: usize) -> usize {
        let depth = self.slots.len();
        (self.current + depth - lag) % depth
    }

    /// The previous-step instance.
    pub fn previous(&self) -> &[f64] {
        &self.slots[self.lag_index(1)]
    }

    /// Mutable previous-step instance, used to set initial conditions.
    pub fn previous_mut(&mut self) -> &mut [f64] {
        let idx = self.lag_index(1);
        &mut self.slots[idx]
    }

    /// The instance `lag` steps back, for `1 <= lag <= history()`.
    pub fn lagged(&self, lag: usize) -> Option<&[f64]> {
        if lag == 0 || lag > self.history() {
            return None;
        }
        Some(&self.slots[self.lag_index(lag)])
    }

    /// Mutable instance `lag` steps back.
    pub fn lagged_mut(&mut self, lag: usize) -> Option<&mut [f64]> {
        if lag == 0 || lag > self.history() {
            return None;
        }
        let idx = self.lag_index(lag);
        Some(&mut self.slots[idx])
    }

    /// The current-step instance.
    pub fn current(&self) -> &[f64] {
        &self.slots[self.current]
    }

    /// Borrow the previous instance for reading and the current one for
    /// writing at the same time.
    pub fn split(&mut self) -> (&[f64], &mut [f64]) {
        let read = self.lag_index(1);
        self.pair(read)
    }

    /// Like [`split`](Self::split), reading the instance `lag` steps back.
    pub fn split_lagged(&mut self, lag: usize) -> Option<(&[f64], &mut [f64])> {
        if lag == 0 || lag > self.history() {
            return None;
        }
        let read = self.lag_index(lag);
        Some(self.pair(read))
    }

    fn pair(&mut self, read: usize) -> (&[f64], &mut [f64]) {
        let write = self.current;
        if read < write {
            let (lo, hi) = self.slots.split_at_mut(write);
            (lo[read].as_slice(), hi[0].as_mut_slice())
        } else {
            let (lo, hi) = self.slots.split_at_mut(read);
            (hi[0].as_slice(), lo[write].as_mut_slice())
        }
    }

    /// Advance one timestep: every instance ages by one step, and the
    /// oldest slot becomes the new current instance, reset to zero.
    pub fn rotate(&mut self) {
        self.current = (self.current + 1) % self.slots.len();
        self.slots[self.current].fill(0.0);
    }

    /// Zero every instance.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.fill(0.0);
        }
    }
}

/// The state histories of one component, keyed by state name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StateStore {
    states: IndexMap<FieldName, StateHistory>,
}

impl StateStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a zeroed history of `len` values for `name`.
    pub fn declare(&mut self, name: FieldName, len: usize) {
        self.declare_with_history(name, len, 1);
    }

    /// Allocate a zeroed history of `len` values for `name`, keeping
    /// `history` past instances.
    pub fn declare_with_history(&mut self, name: FieldName, len: usize, history: usize) {
        self.states
            .insert(name, StateHistory::with_history(len, history));
    }

    /// Look up a state history.
    pub fn get(&self, name: &str) -> Option<&StateHistory> {
        self.states.get(name)
    }

    /// Look up a state history mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut StateHistory> {
        self.states.get_mut(name)
    }

    /// Names of all states, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.states.keys().copied()
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the store holds no states.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Borrow `N` distinct state histories at once, each holding
    /// exactly `len` values.
    pub fn histories_mut<const N: usize>(
        &mut self,
        names: [FieldName; N],
        len: usize,
    ) -> Result<[&mut StateHistory; N], ComponentError> {
        for (idx, name) in names.iter().enumerate() {
            if names[..idx].contains(name) {
                return Err(ComponentError::ExecutionFailed {
                    reason: format!("state '{name}' requested twice"),
                });
            }
        }

        let mut slots: [Option<&mut StateHistory>; N] = std::array::from_fn(|_| None);
        for (name, history) in self.states.iter_mut() {
            if let Some(pos) = names.iter().position(|n| n == name) {
                slots[pos] = Some(history);
            }
        }

        let mut found = Vec::with_capacity(N);
        for (slot, name) in slots.into_iter().zip(names) {
            let history = slot.ok_or_else(|| ComponentError::MissingField {
                name: name.to_string(),
            })?;
            if history.len() != len {
                return Err(ComponentError::ShapeMismatch {
                    name: name.to_string(),
                    expected: len,
                    actual: history.len(),
                });
            }
            found.push(history);
        }
        found
            .try_into()
            .map_err(|_: Vec<&mut StateHistory>| ComponentError::ExecutionFailed {
                reason: format!("wrong number of states for {names:?}"),
            })
    }

    /// Rotate every history by one timestep.
    pub fn rotate_all(&mut self) {
        for history in self.states.values_mut() {
            history.rotate();
        }
    }

    /// Zero every instance of every history.
    pub fn clear_all(&mut self) {
        for history in self.states.values_mut() {
            history.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_reads_previous_and_writes_current() {
        let mut h = StateHistory::new(2);
        h.previous_mut().copy_from_slice(&[1.0, 2.0]);
        {
            let (prev, cur) = h.split();
            for (c, p) in cur.iter_mut().zip(prev) {
                *c = p + 10.0;
            }
        }
        assert_eq!(h.previous(), &[1.0, 2.0]);
        assert_eq!(h.current(), &[11.0, 12.0]);
    }

    #[test]
    fn rotate_moves_current_to_previous_and_zeroes_current() {
        let mut h = StateHistory::new(3);
        h.split().1.fill(7.0);
        h.rotate();
        assert_eq!(h.previous(), &[7.0; 3]);
        assert_eq!(h.current(), &[0.0; 3]);

        h.split().1.fill(8.0);
        h.rotate();
        assert_eq!(h.previous(), &[8.0; 3]);
        assert_eq!(h.current(), &[0.0; 3]);
    }

    #[test]
    fn deep_history_ages_every_instance() {
        let mut h = StateHistory::with_history(1, 3);
        assert_eq!(h.history(), 3);
        // Initial conditions at t-3, t-2, t-1.
        for lag in 1..=3 {
            h.lagged_mut(lag).unwrap()[0] = -(lag as f64);
        }
        for step in 1..=4 {
            {
                let (oldest, cur) = h.split_lagged(3).unwrap();
                cur[0] = 100.0 * step as f64 + oldest[0];
            }
            h.rotate();
            assert_eq!(h.current(), &[0.0]);
        }
        // Step 4 read what step 1 wrote: 100 - 3.
        assert_eq!(h.lagged(1).unwrap(), &[497.0]);
        assert_eq!(h.lagged(2).unwrap(), &[299.0]);
        assert_eq!(h.lagged(3).unwrap(), &[198.0]);
        assert_eq!(h.previous(), &[497.0]);
    }

    #[test]
    fn lags_outside_history_are_absent() {
        let mut h = StateHistory::with_history(2, 2);
        assert!(h.lagged(0).is_none());
        assert!(h.lagged(3).is_none());
        assert!(h.split_lagged(3).is_none());
        assert!(h.split_lagged(2).is_some());
        assert_eq!(StateHistory::with_history(2, 0).history(), 1);
    }

    #[test]
    fn clear_zeroes_every_instance() {
        let mut h = StateHistory::new(1);
        h.previous_mut()[0] = 1.0;
        h.split().1[0] = 2.0;
        h.clear();
        assert_eq!(h.history(), 1);
        assert_eq!(h.previous(), &[0.0]);
        assert_eq!(h.current(), &[0.0]);
    }

    #[test]
    fn histories_mut_borrows_disjoint_states() {
        let mut store = StateStore::new();
        store.declare("state_a", 2);
        store.declare("state_b", 2);
        {
            let [b, a] = store.histories_mut(["state_b", "state_a"], 2).unwrap();
            a.previous_mut().fill(1.0);
            b.previous_mut().fill(2.0);
        }
        assert_eq!(store.get("state_a").unwrap().previous(), &[1.0; 2]);
        assert_eq!(store.get("state_b").unwrap().previous(), &[2.0; 2]);
    }

    #[test]
    fn histories_mut_errors() {
        let mut store = StateStore::new();
        store.declare("state_a", 2);
        assert_eq!(
            store.histories_mut(["state_c"], 2).unwrap_err(),
            ComponentError::MissingField {
                name: "state_c".into()
            }
        );
        assert_eq!(
            store.histories_mut(["state_a"], 3).unwrap_err(),
            ComponentError::ShapeMismatch {
                name: "state_a".into(),
                expected: 3,
                actual: 2
            }
        );
        assert!(matches!(
            store.histories_mut(["state_a", "state_a"], 2).unwrap_err(),
            ComponentError::ExecutionFailed { .. }
        ));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn lag_n_holds_the_value_written_n_steps_ago(
                history in 1usize..6,
                steps in 0usize..20,
            ) {
                let mut h = StateHistory::with_history(1, history);
                for step in 1..=steps {
                    h.split().1[0] = step as f64;
                    h.rotate();
                }
                for lag in 1..=history {
                    let expected = steps.checked_sub(lag - 1).filter(|&s| s > 0);
                    let value = h.lagged(lag).unwrap()[0];
                    prop_assert_eq!(value, expected.map_or(0.0, |s| s as f64));
                }
                prop_assert_eq!(h.current()[0], 0.0);
            }
        }
    }
}
