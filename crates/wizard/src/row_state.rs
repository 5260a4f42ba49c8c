use std::collections::HashMap;

/// RowStateMap keeps transient per-row UI state (edit mode, search text)
/// keyed by row index, outside of the composition rows themselves.
///
/// Removal of a composition row MUST go through `remove_row` so that the
/// keys keep matching the shifted row indices.
#[derive(Clone, Debug)]
pub struct RowStateMap<T> {
    states: HashMap<usize, T>,
}

impl<T> RowStateMap<T> {
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
        }
    }

    /// Get the state for a specific row
    pub fn get(&self, row: usize) -> Option<&T> {
        self.states.get(&row)
    }

    /// Set the state for a specific row
    pub fn set(&mut self, row: usize, state: T) {
        self.states.insert(row, state);
    }

    /// Drop the state for a removed row and shift every state above it
    /// down by one
    pub fn remove_row(&mut self, row: usize) {
        let mut shifted = HashMap::with_capacity(self.states.len());
        for (index, state) in self.states.drain() {
            if index < row {
                shifted.insert(index, state);
            } else if index > row {
                shifted.insert(index - 1, state);
            }
        }
        self.states = shifted;
    }

    /// Clear all states
    pub fn clear_all(&mut self) {
        self.states.clear();
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl<T> Default for RowStateMap<T> {
    fn default() -> Self {
        Self::new()
    }
}
