/*
 * This module defines `BrowserSession`, the single owned state structure for
 * a browsing session: the immutable catalog plus the three pieces of mutable
 * session state (filter constraints, selection set, sort state). All core
 * operations are methods here, either explicitly state-mutating or pure
 * derived-state queries, so the session can be unit-tested without any
 * rendering surface. State lives for the process; the only teardown is the
 * explicit reset event.
 */
use super::aggregation::{self, ViewTotals};
use super::catalog::{Catalog, DataRecord};
use super::filtering::{self, FacetKey, FilterState};
use super::script_gen::{self, GeneratedScript};
use super::selection::{self, HeaderCheckState, SelectionSet};
use super::sorting::{self, SortKey, SortState};
use std::collections::{HashMap, HashSet};

/// Completed/active flags for one workflow step, recomputed on every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepIndicator {
    pub completed: bool,
    pub active: bool,
}

/// The three-step "Filter / Select / Download" indicator. Pure function of
/// whether any facet is constrained and whether the selection is nonempty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowSteps {
    pub filter: StepIndicator,
    pub select: StepIndicator,
    pub download: StepIndicator,
}

pub struct BrowserSession {
    catalog: Catalog,
    filters: FilterState,
    selection: SelectionSet,
    sort: Option<SortState>,
}

impl BrowserSession {
    pub fn new(catalog: Catalog) -> Self {
        log::debug!(
            "BrowserSession: starting session over {} catalog records.",
            catalog.len()
        );
        BrowserSession {
            catalog,
            filters: FilterState::new(),
            selection: SelectionSet::new(),
            sort: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn sort(&self) -> Option<SortState> {
        self.sort
    }

    // --- Filter events ---

    pub fn toggle_facet_value(&mut self, facet: FacetKey, value: &str, is_selected: bool) {
        self.filters.toggle_value(facet, value, is_selected);
    }

    /*
     * The facet "All" action selects every distinct value the catalog has for
     * the facet, including values currently unavailable under other facets'
     * constraints. The resulting view is identical to checking each value by
     * hand, and to no constraint at all, but the facet counts as constrained
     * for the workflow indicator and count badges.
     */
    pub fn select_all_facet_values(&mut self, facet: FacetKey) {
        let values: HashSet<String> = filtering::distinct_values(&self.catalog, facet)
            .into_iter()
            .collect();
        self.filters.replace_values(facet, values);
    }

    pub fn clear_facet(&mut self, facet: FacetKey) {
        self.filters.clear_facet(facet);
    }

    /// The explicit reset event: drops every facet constraint and the sort
    /// state, returning the view to catalog order. The selection is untouched.
    pub fn reset_all_filters(&mut self) {
        log::debug!("BrowserSession: resetting all filters and sort state.");
        self.filters.clear_all();
        self.sort = None;
    }

    // --- Selection events ---

    pub fn set_row_selected(&mut self, id: usize, is_selected: bool) {
        // Unknown ids are an adapter contract violation; Catalog::record
        // fails fast on them.
        let _ = self.catalog.record(id);
        self.selection.set_selected(id, is_selected);
    }

    /// Adds every record in the current filtered view to the selection.
    pub fn select_all_shown(&mut self) {
        let ids: Vec<usize> = self.filtered_view().iter().map(|r| r.id).collect();
        self.selection.add_all(ids);
    }

    /// Removes only the currently visible records from the selection; hidden
    /// selections survive. Raised when the header checkbox is unchecked.
    pub fn deselect_shown(&mut self) {
        let ids: Vec<usize> = self.filtered_view().iter().map(|r| r.id).collect();
        self.selection.remove_all(&ids);
    }

    /// Clears the entire selection, visible or not.
    pub fn deselect_all(&mut self) {
        self.selection.clear();
    }

    // --- Sort events ---

    pub fn sort_column_clicked(&mut self, key: SortKey) {
        let next = sorting::click_column(self.sort, key);
        log::debug!(
            "BrowserSession: sort '{}' ascending={}",
            next.key.label(),
            next.ascending
        );
        self.sort = Some(next);
    }

    // --- Derived state ---

    /// The records satisfying the filter state, ordered per the sort state
    /// (catalog order when no column has been clicked).
    pub fn filtered_view(&self) -> Vec<&DataRecord> {
        let mut view = filtering::filtered_view(&self.catalog, &self.filters);
        if let Some(state) = &self.sort {
            sorting::sort_view(&mut view, state);
        }
        view
    }

    pub fn available_options(&self) -> HashMap<FacetKey, HashSet<String>> {
        filtering::available_options(&self.catalog, &self.filters)
    }

    pub fn header_check_state(&self) -> HeaderCheckState {
        let visible_ids: Vec<usize> = self.filtered_view().iter().map(|r| r.id).collect();
        selection::header_check_state(&visible_ids, &self.selection)
    }

    pub fn totals(&self) -> ViewTotals {
        aggregation::compute_totals(&self.catalog, &self.filtered_view(), &self.selection)
    }

    pub fn generate_enabled(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn workflow_steps(&self) -> WorkflowSteps {
        let has_filters = self.filters.has_any_constraint();
        let has_selection = !self.selection.is_empty();
        WorkflowSteps {
            filter: StepIndicator {
                completed: has_filters,
                active: !has_filters,
            },
            select: StepIndicator {
                completed: has_selection,
                active: has_filters && !has_selection,
            },
            download: StepIndicator {
                completed: false,
                active: has_selection,
            },
        }
    }

    /// Renders the download script for the current selection; `None` when the
    /// selection is empty.
    pub fn generate_script(&self, timestamp: &str) -> Option<GeneratedScript> {
        script_gen::generate_script(&self.catalog, &self.selection, timestamp)
    }
}
