//! Pending filter edits that are committed in one navigation update.

use crate::{
    errors::CatalogResult,
    types::{
        catalog_item::CategoryId,
        filter_state::{FilterPatch, FilterState, SortField, SortOrder, TypeFilter},
    },
};

use super::{
    controller::{CatalogController, NavigationOutcome},
    navigation::NavigationHost,
};

/// Locally edited copy of the committed filter state.
///
/// Edits stay local until [`commit`](Self::commit), which turns the whole
/// draft into a single [`FilterPatch`]. The committed state is never edited
/// through a draft, so there is always exactly one authoritative copy.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterDraft {
    base:  FilterState,
    draft: FilterState,
}

impl FilterDraft {
    /// Starts a draft from the committed state.
    #[must_use]
    pub fn from_state(state: &FilterState) -> Self {
        Self { base: state.clone(), draft: state.clone() }
    }

    /// Discards local edits and restarts from `state`.
    pub fn resync(&mut self, state: &FilterState) {
        self.base = state.clone();
        self.draft = state.clone();
    }

    /// The edited state.
    #[must_use]
    pub fn state(&self) -> &FilterState {
        &self.draft
    }

    /// Whether the draft differs from the state it was started from.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.base != self.draft
    }

    pub fn set_item_type(&mut self, item_type: TypeFilter) {
        self.draft.item_type = item_type;
    }

    pub fn toggle_category(&mut self, id: &CategoryId) {
        self.draft = self.draft.toggled(id);
    }

    pub fn set_price_range(&mut self, min: f64, max: f64) {
        self.draft.min_price = min;
        self.draft.max_price = max;
    }

    pub fn set_sort(&mut self, sort_by: SortField, sort_order: SortOrder) {
        self.draft.sort_by = sort_by;
        self.draft.sort_order = sort_order;
    }

    /// Fields edited since the draft was started or last resynced.
    #[must_use]
    pub fn changes(&self) -> FilterPatch {
        let (base, draft) = (&self.base, &self.draft);
        FilterPatch {
            item_type:    (draft.item_type != base.item_type).then_some(draft.item_type),
            category_ids: (draft.category_ids != base.category_ids)
                .then(|| draft.category_ids.clone()),
            min_price:    (draft.min_price != base.min_price).then_some(draft.min_price),
            max_price:    (draft.max_price != base.max_price).then_some(draft.max_price),
            sort_by:      (draft.sort_by != base.sort_by).then_some(draft.sort_by),
            sort_order:   (draft.sort_order != base.sort_order).then_some(draft.sort_order),
        }
    }

    /// Pushes the edited fields through the controller and resyncs from the
    /// result. Fields left alone keep whatever the host holds now, even if it
    /// moved on after the draft was started.
    ///
    /// # Errors
    /// Returns error if the navigation host rejects the update.
    pub fn commit<H: NavigationHost>(
        &mut self, controller: &mut CatalogController<H>,
    ) -> CatalogResult<NavigationOutcome> {
        let outcome = controller.apply_filters(self.changes())?;
        self.resync(controller.filter_state());
        Ok(outcome)
    }
}
