use std::{cmp::Ordering, collections::BTreeSet};

use serde::{Deserialize, Serialize};
use shared::{
    domain::{
        AgeValue, EditableField, LoadPhase, RecordDraft, RecordId, SortDirection, UserRecord,
    },
    error::AddRecordError,
};

/// The table's source of truth: records in display order, the selected
/// ids, and the direction the next sort applies. Every transition is a
/// pure function returning the successor state; the controller swaps
/// states under its lock so observers only ever see whole snapshots.
#[derive(Debug, Clone)]
pub struct TableState {
    pub phase: LoadPhase,
    pub records: Vec<UserRecord>,
    pub selected: BTreeSet<RecordId>,
    pub sort_direction: SortDirection,
    next_record_id: i64,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            phase: LoadPhase::Loading,
            records: Vec::new(),
            selected: BTreeSet::new(),
            sort_direction: SortDirection::Ascending,
            next_record_id: 1,
        }
    }
}

impl TableState {
    /// Successor state after a successful fetch: records replaced
    /// wholesale, selection cleared (every previously selected id is
    /// gone by definition), phase latched to `Ready`, and the id
    /// counter raised past the largest fetched id so generated ids
    /// never collide with loaded ones.
    pub fn with_loaded(&self, records: Vec<UserRecord>) -> Self {
        let max_loaded_id = records.iter().map(|record| record.id.0).max();
        Self {
            phase: LoadPhase::Ready,
            next_record_id: max_loaded_id.map_or(self.next_record_id, |max| {
                self.next_record_id.max(max.saturating_add(1))
            }),
            records,
            selected: BTreeSet::new(),
            sort_direction: self.sort_direction,
        }
    }

    /// Appends a record built from the form draft, assigning the next
    /// id from the monotonic counter. Name and country must be
    /// non-empty after trimming; age is optional and coerced through
    /// `AgeValue::parse`.
    pub fn with_record_added(
        &self,
        draft: &RecordDraft,
    ) -> Result<(Self, RecordId), AddRecordError> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(AddRecordError::MissingName);
        }
        let country = draft.country.trim();
        if country.is_empty() {
            return Err(AddRecordError::MissingCountry);
        }

        let id = RecordId(self.next_record_id);
        let mut next = self.clone();
        next.next_record_id = next.next_record_id.saturating_add(1);
        next.records.push(UserRecord {
            id,
            name: name.to_string(),
            age: AgeValue::parse(&draft.age),
            country: country.to_string(),
        });
        Ok((next, id))
    }

    /// Removes the record if present and prunes it from the selection.
    /// Idempotent; an absent id yields an identical successor.
    pub fn with_record_removed(&self, id: RecordId) -> Self {
        let mut next = self.clone();
        next.records.retain(|record| record.id != id);
        next.selected.remove(&id);
        next
    }

    /// Applies a single-field edit. An absent id is a silent no-op.
    /// `None` means the cell was committed empty. Text is trimmed;
    /// age goes through `AgeValue::parse` so non-numeric input is kept
    /// as text rather than rejected.
    pub fn with_field_updated(
        &self,
        id: RecordId,
        field: EditableField,
        raw_value: Option<&str>,
    ) -> Self {
        let mut next = self.clone();
        if let Some(record) = next.records.iter_mut().find(|record| record.id == id) {
            let trimmed = raw_value.unwrap_or("").trim();
            match field {
                EditableField::Name => record.name = trimmed.to_string(),
                EditableField::Age => record.age = AgeValue::parse(trimmed),
                EditableField::Country => record.country = trimmed.to_string(),
            }
        }
        next
    }

    /// Flips selection membership for `id`. Ids that do not reference
    /// a present record are ignored, keeping the selection invariant
    /// total.
    pub fn with_selection_toggled(&self, id: RecordId) -> Self {
        if !self.records.iter().any(|record| record.id == id) {
            return self.clone();
        }
        let mut next = self.clone();
        if !next.selected.remove(&id) {
            next.selected.insert(id);
        }
        next
    }

    /// Full select/deselect toggle: clears the selection when it
    /// already covers every record, otherwise selects exactly all
    /// current records. Selection pruning makes the size comparison
    /// equivalent to set equality.
    pub fn with_select_all_toggled(&self) -> Self {
        let mut next = self.clone();
        if self.selected.len() == self.records.len() {
            next.selected.clear();
        } else {
            next.selected = self.records.iter().map(|record| record.id).collect();
        }
        next
    }

    /// Removes every selected record, then clears the selection.
    pub fn with_selected_removed(&self) -> Self {
        let mut next = self.clone();
        next.records
            .retain(|record| !self.selected.contains(&record.id));
        next.selected.clear();
        next
    }

    /// Stable reorder by age in the current direction, then flip the
    /// direction for the next invocation. Equal ages keep their prior
    /// relative order.
    pub fn with_sorted_by_age(&self) -> Self {
        let direction = self.sort_direction;
        let mut next = self.clone();
        next.records
            .sort_by(|a, b| compare_ages(&a.age, &b.age, direction));
        next.sort_direction = direction.flipped();
        next
    }

    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            phase: self.phase,
            records: self.records.clone(),
            selected: self.selected.clone(),
            sort_direction: self.sort_direction,
        }
    }
}

/// Total order on ages: numbers compare by `total_cmp` with the
/// direction applied; a non-numeric age orders after every number in
/// either direction; two non-numeric ages compare equal, so sort
/// stability preserves their relative order.
fn compare_ages(a: &AgeValue, b: &AgeValue, direction: SortDirection) -> Ordering {
    match (a.as_number(), b.as_number()) {
        (Some(left), Some(right)) => {
            let ordering = left.total_cmp(&right);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Immutable observable state broadcast to subscribers after every
/// mutation; everything the presentation layer renders comes from here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub phase: LoadPhase,
    pub records: Vec<UserRecord>,
    pub selected: BTreeSet<RecordId>,
    pub sort_direction: SortDirection,
}

impl TableSnapshot {
    /// State of the header select-all checkbox.
    pub fn all_selected(&self) -> bool {
        !self.records.is_empty() && self.selected.len() == self.records.len()
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
