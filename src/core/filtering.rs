/*
 * Facet filtering over the catalog. A `FilterState` maps each of the five
 * fixed facets to a set of selected values; an empty set means "no constraint".
 * A record matches when, for every facet, the facet is unconstrained or the
 * record's value is among the selected ones (OR within a facet, AND across
 * facets). The module also computes per-facet "available options": the values
 * a facet can still take given every *other* facet's constraints. Available
 * options are advisory for the UI and never filter the result set themselves.
 */
use super::catalog::{Catalog, DataRecord};
use super::sorting::natural_cmp;
use std::collections::{HashMap, HashSet};

/// The fixed, closed set of filterable dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacetKey {
    Region,
    Disk,
    Band,
    Molecule,
    DataType,
}

impl FacetKey {
    pub const ALL: [FacetKey; 5] = [
        FacetKey::Region,
        FacetKey::Disk,
        FacetKey::Band,
        FacetKey::Molecule,
        FacetKey::DataType,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FacetKey::Region => "region",
            FacetKey::Disk => "disk",
            FacetKey::Band => "band",
            FacetKey::Molecule => "molecule",
            FacetKey::DataType => "dataType",
        }
    }

    pub fn parse(text: &str) -> Option<FacetKey> {
        FacetKey::ALL
            .into_iter()
            .find(|key| key.label().eq_ignore_ascii_case(text))
    }

    pub fn value_of<'a>(&self, record: &'a DataRecord) -> &'a str {
        match self {
            FacetKey::Region => &record.region,
            FacetKey::Disk => &record.disk,
            FacetKey::Band => &record.band,
            FacetKey::Molecule => &record.molecule,
            FacetKey::DataType => &record.data_type,
        }
    }
}

/*
 * The per-facet sets of selected values, one slot per facet in `FacetKey::ALL`
 * order. Created empty (all facets unconstrained) and mutated only by discrete
 * UI events.
 */
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    selected: [HashSet<String>; FacetKey::ALL.len()],
}

impl FilterState {
    pub fn new() -> Self {
        FilterState {
            selected: Default::default(),
        }
    }

    fn values_mut(&mut self, facet: FacetKey) -> &mut HashSet<String> {
        &mut self.selected[facet as usize]
    }

    pub fn selected_values(&self, facet: FacetKey) -> &HashSet<String> {
        &self.selected[facet as usize]
    }

    pub fn toggle_value(&mut self, facet: FacetKey, value: &str, is_selected: bool) {
        let values = self.values_mut(facet);
        if is_selected {
            values.insert(value.to_string());
        } else {
            values.remove(value);
        }
        log::debug!(
            "FilterState: facet '{}' value '{}' -> selected={}",
            facet.label(),
            value,
            is_selected
        );
    }

    /// Replaces a facet's constraint wholesale; used by the facet "All" action.
    pub fn replace_values(&mut self, facet: FacetKey, values: HashSet<String>) {
        log::debug!(
            "FilterState: facet '{}' replaced with {} values",
            facet.label(),
            values.len()
        );
        *self.values_mut(facet) = values;
    }

    pub fn clear_facet(&mut self, facet: FacetKey) {
        log::debug!("FilterState: facet '{}' cleared", facet.label());
        self.values_mut(facet).clear();
    }

    pub fn clear_all(&mut self) {
        log::debug!("FilterState: clearing all facet constraints");
        for key in FacetKey::ALL {
            self.values_mut(key).clear();
        }
    }

    pub fn is_constrained(&self, facet: FacetKey) -> bool {
        !self.selected_values(facet).is_empty()
    }

    pub fn has_any_constraint(&self) -> bool {
        FacetKey::ALL.into_iter().any(|key| self.is_constrained(key))
    }

    pub fn matches(&self, record: &DataRecord) -> bool {
        FacetKey::ALL.into_iter().all(|key| {
            let values = self.selected_values(key);
            values.is_empty() || values.contains(key.value_of(record))
        })
    }

    /// Like `matches`, but ignores one facet's own constraint. This is the
    /// predicate behind the available-options calculation.
    pub fn matches_ignoring(&self, record: &DataRecord, ignored: FacetKey) -> bool {
        FacetKey::ALL.into_iter().all(|key| {
            if key == ignored {
                return true;
            }
            let values = self.selected_values(key);
            values.is_empty() || values.contains(key.value_of(record))
        })
    }
}

/// Records satisfying the full filter state, in catalog order.
pub fn filtered_view<'a>(catalog: &'a Catalog, filters: &FilterState) -> Vec<&'a DataRecord> {
    catalog
        .iter()
        .filter(|record| filters.matches(record))
        .collect()
}

/*
 * For each facet, the set of values still reachable given every other facet's
 * constraints. Recomputed wholesale on every filter change; the catalog is
 * small enough that the O(facets^2 x records) pass completes well within one
 * UI event.
 */
pub fn available_options(
    catalog: &Catalog,
    filters: &FilterState,
) -> HashMap<FacetKey, HashSet<String>> {
    let mut options = HashMap::with_capacity(FacetKey::ALL.len());
    for key in FacetKey::ALL {
        let values: HashSet<String> = catalog
            .iter()
            .filter(|record| filters.matches_ignoring(record, key))
            .map(|record| key.value_of(record).to_string())
            .collect();
        options.insert(key, values);
    }
    options
}

/// Every distinct value the catalog has for a facet, in natural order.
/// Used to build the facet UI and by the facet "All" action.
pub fn distinct_values(catalog: &Catalog, facet: FacetKey) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut values = Vec::new();
    for record in catalog.iter() {
        let value = facet.value_of(record);
        if seen.insert(value.to_string()) {
            values.push(value.to_string());
        }
    }
    values.sort_by(|a, b| natural_cmp(a, b));
    values
}

/// How many records in the filtered view carry `value` for `facet`.
pub fn value_count_in_view(view: &[&DataRecord], facet: FacetKey, value: &str) -> usize {
    view.iter()
        .filter(|record| facet.value_of(record) == value)
        .count()
}
