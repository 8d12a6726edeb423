/*
 * The derived, render-ready view model. The core exposes only structured data
 * (facet groups, rows, flags, preformatted count/size strings); producing
 * markup or widgets from it is entirely the rendering adapter's concern.
 * A fresh view model is built after every handled event.
 */
use crate::core::{
    BrowserSession, FacetKey, HeaderCheckState, SortState, WorkflowSteps, filtering,
    format_row_size, format_total_size,
};

/// One checkbox in a facet group. `match_count` is reported only while the
/// facet has an active constraint that includes this value and the value is
/// still reachable; otherwise the badge stays empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetOptionDescriptor {
    pub value: String,
    pub is_selected: bool,
    pub is_available: bool,
    pub match_count: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetGroupDescriptor {
    pub facet: FacetKey,
    pub options: Vec<FacetOptionDescriptor>,
}

/// One row of the results table, in filtered+sorted order.
#[derive(Debug, Clone, PartialEq)]
pub struct RowDescriptor {
    pub id: usize,
    pub filename: String,
    pub region: String,
    pub disk: String,
    pub band: String,
    pub molecule: String,
    pub data_type: String,
    pub size_label: String,
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryDescriptor {
    pub results_count_text: String,
    pub results_size_text: String,
    pub selected_count_text: String,
    pub selected_size_text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub facet_groups: Vec<FacetGroupDescriptor>,
    pub rows: Vec<RowDescriptor>,
    pub header_state: HeaderCheckState,
    pub summary: SummaryDescriptor,
    pub generate_enabled: bool,
    pub workflow: WorkflowSteps,
    pub sort: Option<SortState>,
}

impl ViewModel {
    pub fn build(session: &BrowserSession) -> Self {
        let view = session.filtered_view();
        let available = session.available_options();
        let filters = session.filters();

        let facet_groups = FacetKey::ALL
            .into_iter()
            .map(|facet| {
                let selected = filters.selected_values(facet);
                let facet_available = &available[&facet];
                let options = filtering::distinct_values(session.catalog(), facet)
                    .into_iter()
                    .map(|value| {
                        let is_selected = selected.contains(&value);
                        let is_available = facet_available.contains(&value);
                        let match_count = if is_available && !selected.is_empty() && is_selected {
                            Some(filtering::value_count_in_view(&view, facet, &value))
                        } else {
                            None
                        };
                        FacetOptionDescriptor {
                            value,
                            is_selected,
                            is_available,
                            match_count,
                        }
                    })
                    .collect();
                FacetGroupDescriptor { facet, options }
            })
            .collect();

        let rows = view
            .iter()
            .map(|record| RowDescriptor {
                id: record.id,
                filename: record.filename.clone(),
                region: record.region.clone(),
                disk: record.disk.clone(),
                band: record.band.clone(),
                molecule: record.molecule.clone(),
                data_type: record.data_type.clone(),
                size_label: format_row_size(record.size_mb),
                is_selected: session.selection().contains(record.id),
            })
            .collect();

        let totals = session.totals();
        let summary = SummaryDescriptor {
            results_count_text: format!(
                "Showing {} of {} files",
                totals.shown_count,
                session.catalog().len()
            ),
            results_size_text: format!("Total: {}", format_total_size(totals.shown_size_mb)),
            selected_count_text: format!("{} selected", totals.selected_count),
            selected_size_text: format!(
                "Selected: {}",
                format_total_size(totals.selected_size_mb)
            ),
        };

        ViewModel {
            facet_groups,
            rows,
            header_state: session.header_check_state(),
            summary,
            generate_enabled: session.generate_enabled(),
            workflow: session.workflow_steps(),
            sort: session.sort(),
        }
    }
}
