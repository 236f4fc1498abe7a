//! Single-selection state machine
//!
//! At most one entity is highlighted at a time. Clicking the selected
//! entity again deselects it; clicking a different one replaces the
//! selection. Hover emphasis is transient view state and deliberately
//! not tracked here.

/// Selection over an arbitrary entity type (point index, category key).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState<T> {
    Unselected,
    Selected(T),
}

impl<T> Default for SelectionState<T> {
    fn default() -> Self {
        SelectionState::Unselected
    }
}

impl<T: PartialEq> SelectionState<T> {
    pub fn new() -> Self {
        SelectionState::Unselected
    }

    /// Apply a click on `entity`. Returns true when the entity is
    /// selected afterwards, false when the click toggled it off.
    pub fn toggle(&mut self, entity: T) -> bool {
        match self {
            SelectionState::Selected(current) if *current == entity => {
                *self = SelectionState::Unselected;
                false
            }
            _ => {
                *self = SelectionState::Selected(entity);
                true
            }
        }
    }

    /// Force the unselected state.
    pub fn clear(&mut self) {
        *self = SelectionState::Unselected;
    }

    pub fn selected(&self) -> Option<&T> {
        match self {
            SelectionState::Selected(entity) => Some(entity),
            SelectionState::Unselected => None,
        }
    }

    pub fn is_selected(&self, entity: &T) -> bool {
        matches!(self, SelectionState::Selected(current) if current == entity)
    }

    pub fn is_unselected(&self) -> bool {
        matches!(self, SelectionState::Unselected)
    }
}
