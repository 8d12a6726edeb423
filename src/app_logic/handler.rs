/*
 * The application-logic layer: a closed set of browser events dispatched into
 * the session state, with a derived view model for the rendering adapter and
 * a pending-script handoff for the generate action. Every event runs a full,
 * synchronous recompute; events arrive one at a time from the adapter, so no
 * locking is needed. Unit tests live in `handler_tests.rs`.
 */
use super::view_model::ViewModel;
use crate::core::{BrowserSession, Catalog, FacetKey, GeneratedScript, SortKey, script_gen};
use std::sync::Arc;
use time::OffsetDateTime;

/*
 * The discrete events the rendering adapter can raise. Facet and sort keys
 * are closed enums, so an event referencing an unknown key cannot be
 * constructed; a record id outside the catalog panics when handled, since it
 * indicates a broken adapter rather than a user-facing condition.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserEvent {
    FacetValueToggled {
        facet: FacetKey,
        value: String,
        is_selected: bool,
    },
    FacetSelectAll {
        facet: FacetKey,
    },
    FacetClear {
        facet: FacetKey,
    },
    RowSelectionToggled {
        id: usize,
        is_selected: bool,
    },
    HeaderSelectAllChanged {
        is_checked: bool,
    },
    SelectAllShown,
    DeselectAll,
    SortColumnClicked {
        key: SortKey,
    },
    ResetAllFilters,
    GenerateScriptRequested,
}

/// Clock seam so script generation stays deterministic under test.
pub trait ClockOperations: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

pub struct SystemClock;

impl ClockOperations for SystemClock {
    fn now(&self) -> OffsetDateTime {
        // Local time for the script header; UTC when the local offset is
        // unavailable (e.g. restricted environments).
        OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
    }
}

/*
 * Owns the browsing session and processes adapter events. After each event
 * the adapter pulls a fresh `ViewModel`; a generated script is parked in
 * `pending_script` until the adapter collects it for saving.
 */
pub struct ArchiveBrowserLogic {
    session: BrowserSession,
    clock: Arc<dyn ClockOperations>,
    pending_script: Option<GeneratedScript>,
}

impl ArchiveBrowserLogic {
    pub fn new(catalog: Catalog, clock: Arc<dyn ClockOperations>) -> Self {
        ArchiveBrowserLogic {
            session: BrowserSession::new(catalog),
            clock,
            pending_script: None,
        }
    }

    pub fn session(&self) -> &BrowserSession {
        &self.session
    }

    pub fn handle_event(&mut self, event: BrowserEvent) {
        log::debug!("ArchiveBrowserLogic: handling {event:?}");
        match event {
            BrowserEvent::FacetValueToggled {
                facet,
                value,
                is_selected,
            } => self.session.toggle_facet_value(facet, &value, is_selected),
            BrowserEvent::FacetSelectAll { facet } => self.session.select_all_facet_values(facet),
            BrowserEvent::FacetClear { facet } => self.session.clear_facet(facet),
            BrowserEvent::RowSelectionToggled { id, is_selected } => {
                self.session.set_row_selected(id, is_selected)
            }
            BrowserEvent::HeaderSelectAllChanged { is_checked } => {
                if is_checked {
                    self.session.select_all_shown();
                } else {
                    self.session.deselect_shown();
                }
            }
            BrowserEvent::SelectAllShown => self.session.select_all_shown(),
            BrowserEvent::DeselectAll => self.session.deselect_all(),
            BrowserEvent::SortColumnClicked { key } => self.session.sort_column_clicked(key),
            BrowserEvent::ResetAllFilters => self.session.reset_all_filters(),
            BrowserEvent::GenerateScriptRequested => self.on_generate_script_requested(),
        }
    }

    fn on_generate_script_requested(&mut self) {
        if !self.session.generate_enabled() {
            // The adapter should keep the action disabled for an empty
            // selection; a request in that state produces nothing.
            log::warn!("ArchiveBrowserLogic: generate requested with empty selection; ignoring.");
            return;
        }
        let timestamp = script_gen::format_timestamp(self.clock.now());
        self.pending_script = self.session.generate_script(&timestamp);
        if let Some(script) = &self.pending_script {
            log::debug!(
                "ArchiveBrowserLogic: script '{}' ready ({} bytes).",
                script.filename,
                script.content.len()
            );
        }
    }

    /// Builds a fresh view model from the current session state.
    pub fn view_model(&self) -> ViewModel {
        ViewModel::build(&self.session)
    }

    /// Hands over the generated script, if any, clearing the pending slot.
    pub fn take_pending_script(&mut self) -> Option<GeneratedScript> {
        self.pending_script.take()
    }
}
