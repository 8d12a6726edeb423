/*
 * Ordering of the filtered view. String columns compare with a natural
 * ordering that is case-insensitive and treats embedded digit runs as numbers
 * (so "file2" sorts before "file10"); the size column compares numerically.
 * Sorting is stable, so ties retain the filtered view's relative order.
 */
use super::catalog::DataRecord;
use std::cmp::Ordering;

/// The fixed set of sortable columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Filename,
    Region,
    Disk,
    Band,
    Molecule,
    DataType,
    SizeMb,
}

impl SortKey {
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Filename => "filename",
            SortKey::Region => "region",
            SortKey::Disk => "disk",
            SortKey::Band => "band",
            SortKey::Molecule => "molecule",
            SortKey::DataType => "dataType",
            SortKey::SizeMb => "sizeMB",
        }
    }

    pub fn parse(text: &str) -> Option<SortKey> {
        [
            SortKey::Filename,
            SortKey::Region,
            SortKey::Disk,
            SortKey::Band,
            SortKey::Molecule,
            SortKey::DataType,
            SortKey::SizeMb,
        ]
        .into_iter()
        .find(|key| key.label().eq_ignore_ascii_case(text))
    }
}

/// The current sort column and direction. Absent `SortState` means catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub key: SortKey,
    pub ascending: bool,
}

/*
 * The column-click transition rule: clicking the current sort column toggles
 * its direction; clicking any other column makes it the sort key, ascending.
 * Once a column has been clicked the only way back to "no sort" is the
 * explicit reset action, which clears SortState entirely.
 */
pub fn click_column(current: Option<SortState>, key: SortKey) -> SortState {
    match current {
        Some(state) if state.key == key => SortState {
            key,
            ascending: !state.ascending,
        },
        _ => SortState {
            key,
            ascending: true,
        },
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.peek() {
        if c.is_ascii_digit() {
            digits.push(*c);
            chars.next();
        } else {
            break;
        }
    }
    digits
}

fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a_trimmed = a.trim_start_matches('0');
    let b_trimmed = b.trim_start_matches('0');
    match a_trimmed.len().cmp(&b_trimmed.len()) {
        Ordering::Equal => a_trimmed.cmp(b_trimmed),
        other => other,
    }
}

/*
 * Case-insensitive natural comparison. Digit runs compare by numeric value
 * (without a width limit; leading zeros are insignificant); everything else
 * compares per lowercased character. Strings equal under those rules fall
 * back to an exact comparison so the ordering stays total and deterministic.
 */
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ca = a.chars().peekable();
    let mut cb = b.chars().peekable();
    loop {
        match (ca.peek().copied(), cb.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                if x.is_ascii_digit() && y.is_ascii_digit() {
                    let run_a = take_digits(&mut ca);
                    let run_b = take_digits(&mut cb);
                    let ordering = cmp_digit_runs(&run_a, &run_b);
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                } else {
                    let ordering = x.to_lowercase().cmp(y.to_lowercase());
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                    ca.next();
                    cb.next();
                }
            }
        }
    }
}

fn compare_records(a: &DataRecord, b: &DataRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::SizeMb => a.size_mb.partial_cmp(&b.size_mb).unwrap_or(Ordering::Equal),
        SortKey::Filename => natural_cmp(&a.filename, &b.filename),
        SortKey::Region => natural_cmp(&a.region, &b.region),
        SortKey::Disk => natural_cmp(&a.disk, &b.disk),
        SortKey::Band => natural_cmp(&a.band, &b.band),
        SortKey::Molecule => natural_cmp(&a.molecule, &b.molecule),
        SortKey::DataType => natural_cmp(&a.data_type, &b.data_type),
    }
}

/// Stable in-place sort of the filtered view. Equal keys keep their relative
/// order because the comparator returns `Equal` and `sort_by` is stable.
pub fn sort_view(view: &mut [&DataRecord], state: &SortState) {
    view.sort_by(|a, b| {
        let ordering = compare_records(a, b, state.key);
        if state.ascending {
            ordering
        } else {
            ordering.reverse()
        }
    });
}
