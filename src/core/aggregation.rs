/*
 * Counts and size totals for the filtered view and the selection, plus the
 * size formatting rules. Selection totals are looked up against the full
 * catalog, not the filtered view, because selections survive filtering.
 */
use super::catalog::{Catalog, DataRecord};
use super::selection::SelectionSet;

/*
 * Per-row size label. Values of 1000 MB and above render in GB to one
 * decimal; an exact zero renders as "<1 MB" (files whose size rounds to
 * zero); everything else renders in MB to one decimal.
 */
pub fn format_row_size(mb: f64) -> String {
    if mb >= 1000.0 {
        format!("{:.1} GB", mb / 1000.0)
    } else if mb == 0.0 {
        "<1 MB".to_string()
    } else {
        format!("{mb:.1} MB")
    }
}

/// Aggregate size label: the same GB threshold, but a zero total renders as
/// "0.0 MB" rather than the per-row "<1 MB" special case.
pub fn format_total_size(mb: f64) -> String {
    if mb >= 1000.0 {
        format!("{:.1} GB", mb / 1000.0)
    } else {
        format!("{mb:.1} MB")
    }
}

/// Counts and raw sizes for the current view and selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTotals {
    pub shown_count: usize,
    pub shown_size_mb: f64,
    pub selected_count: usize,
    pub selected_size_mb: f64,
}

pub fn compute_totals(
    catalog: &Catalog,
    view: &[&DataRecord],
    selection: &SelectionSet,
) -> ViewTotals {
    let shown_size_mb = view.iter().map(|record| record.size_mb).sum();
    let selected_size_mb = selection
        .iter()
        .map(|id| catalog.record(*id).size_mb)
        .sum();
    ViewTotals {
        shown_count: view.len(),
        shown_size_mb,
        selected_count: selection.len(),
        selected_size_mb,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::test_record;

    #[test]
    fn test_format_row_size_thresholds() {
        assert_eq!(format_row_size(999.0), "999.0 MB");
        assert_eq!(format_row_size(1000.0), "1.0 GB");
        assert_eq!(format_row_size(0.0), "<1 MB");
        assert_eq!(format_row_size(1536.0), "1.5 GB");
        assert_eq!(format_row_size(0.4), "0.4 MB");
    }

    #[test]
    fn test_format_total_size_no_sub_megabyte_case() {
        assert_eq!(format_total_size(999.0), "999.0 MB");
        assert_eq!(format_total_size(1000.0), "1.0 GB");
        assert_eq!(format_total_size(0.0), "0.0 MB");
    }

    #[test]
    fn test_compute_totals_selection_uses_full_catalog() {
        let mut r0 = test_record(0, "a.fits");
        r0.size_mb = 100.0;
        let mut r1 = test_record(1, "b.fits");
        r1.size_mb = 250.0;
        let mut r2 = test_record(2, "c.fits");
        r2.size_mb = 50.0;
        let catalog = Catalog::new(vec![r0, r1, r2]).unwrap();

        // View shows only record 0; records 1 and 2 are selected but hidden.
        let view = vec![catalog.record(0)];
        let mut selection = SelectionSet::new();
        selection.add_all([1, 2]);

        let totals = compute_totals(&catalog, &view, &selection);
        assert_eq!(totals.shown_count, 1);
        assert_eq!(totals.shown_size_mb, 100.0);
        assert_eq!(totals.selected_count, 2);
        assert_eq!(totals.selected_size_mb, 300.0);
    }
}
