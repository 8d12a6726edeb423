/*
 * This module consolidates the core, rendering-agnostic logic of the
 * application: the catalog data model, facet filtering and available-options
 * calculation, sorting, selection management, aggregation, script templating,
 * and the `BrowserSession` state structure that ties them together.
 */
pub mod aggregation;
pub mod catalog;
pub mod filtering;
pub mod script_gen;
pub mod selection;
pub mod session;
pub mod sorting;

// Re-export key structures and enums
pub use catalog::{Catalog, CatalogError, DataRecord};
pub use filtering::{FacetKey, FilterState};
pub use script_gen::GeneratedScript;
pub use selection::{HeaderCheckState, SelectionSet};
pub use session::{BrowserSession, StepIndicator, WorkflowSteps};
pub use sorting::{SortKey, SortState};

pub use aggregation::{ViewTotals, format_row_size, format_total_size};
