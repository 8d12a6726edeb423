/*
 * The script template engine. The generated download script is assembled from
 * three parts: a fixed preamble with the generation timestamp inserted after
 * its "generated by" header line, a dynamic block declaring the total size
 * and the URL/target-directory arrays for the selection, and a fixed body
 * holding the retry/parallel-download logic. The preamble and body live as
 * opaque assets under `assets/`; this module owns only the three insertion
 * points and never touches the templates' other bytes.
 */
use super::catalog::Catalog;
use super::selection::SelectionSet;
use time::OffsetDateTime;

pub const SCRIPT_PREAMBLE: &str = include_str!("../../assets/download_preamble.sh");
pub const SCRIPT_BODY: &str = include_str!("../../assets/download_body.sh");

/// The preamble line the timestamp is inserted after. Must match the asset
/// byte for byte.
const GENERATED_BY_LINE: &str = "# Generated by the AGE-PRO Data Archive\n";

/// A rendered script, ready for the adapter to offer as a local save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedScript {
    pub filename: String,
    pub content: String,
}

/// `YYYYMMDD_HHMMSS`, used both inside the preamble header and in the
/// suggested filename.
pub fn format_timestamp(moment: OffsetDateTime) -> String {
    format!(
        "{:04}{:02}{:02}_{:02}{:02}{:02}",
        moment.year(),
        moment.month() as u8,
        moment.day(),
        moment.hour(),
        moment.minute(),
        moment.second()
    )
}

pub fn script_filename(timestamp: &str) -> String {
    format!("download_data_{timestamp}.sh")
}

/*
 * Renders the download script for the current selection. Records are emitted
 * in ascending id order so the output is deterministic regardless of the
 * selection set's internal ordering. An empty selection produces no script;
 * that is the "nothing to generate" outcome, not an error, and the caller is
 * expected to keep the generate action disabled in that case.
 */
pub fn generate_script(
    catalog: &Catalog,
    selection: &SelectionSet,
    timestamp: &str,
) -> Option<GeneratedScript> {
    if selection.is_empty() {
        log::debug!("generate_script: empty selection, nothing to generate.");
        return None;
    }
    let ids = selection.ids_ascending();
    let total_mb: f64 = ids.iter().map(|id| catalog.record(*id).size_mb).sum();
    let total_label = super::aggregation::format_total_size(total_mb);

    let preamble = SCRIPT_PREAMBLE.replacen(
        GENERATED_BY_LINE,
        &format!("{GENERATED_BY_LINE}# Generated on: {timestamp}\n"),
        1,
    );

    let mut dynamic = String::new();
    dynamic.push_str(&format!("TOTAL_SIZE=\"Total size: {total_label}\"\n"));
    dynamic.push_str("DOWNLOAD_URLS=()\n");
    dynamic.push_str("DOWNLOAD_TARGETS=()\n");
    for id in &ids {
        let record = catalog.record(*id);
        dynamic.push_str(&format!("DOWNLOAD_URLS+=(\"{}\")\n", record.url));
        dynamic.push_str(&format!("DOWNLOAD_TARGETS+=(\"{}\")\n", record.target_dir));
    }

    log::debug!(
        "generate_script: {} records, total {} ({timestamp})",
        ids.len(),
        total_label
    );
    Some(GeneratedScript {
        filename: script_filename(timestamp),
        content: format!("{preamble}{dynamic}\n{SCRIPT_BODY}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{Catalog, test_record};
    use time::{Date, Month};

    fn fixed_timestamp() -> String {
        let moment = Date::from_calendar_date(2026, Month::August, 29)
            .unwrap()
            .with_hms(14, 5, 9)
            .unwrap()
            .assume_utc();
        format_timestamp(moment)
    }

    fn two_record_catalog() -> Catalog {
        let mut r0 = test_record(0, "a.fits");
        r0.size_mb = 600.0;
        r0.url = "https://example.org/data/a.fits".into();
        r0.target_dir = "AGEPRO_DATA/Lupus/Lupus 1/Band 6/12CO".into();
        let mut r1 = test_record(1, "b.fits");
        r1.size_mb = 500.0;
        r1.url = "https://example.org/data/b.fits".into();
        r1.target_dir = "AGEPRO_DATA/Lupus/Lupus 2/Band 6/13CO".into();
        Catalog::new(vec![r0, r1]).unwrap()
    }

    #[test]
    fn test_format_timestamp_pads_components() {
        assert_eq!(fixed_timestamp(), "20260829_140509");
    }

    #[test]
    fn test_script_filename_convention() {
        assert_eq!(
            script_filename("20260829_140509"),
            "download_data_20260829_140509.sh"
        );
    }

    #[test]
    fn test_empty_selection_generates_nothing() {
        let catalog = two_record_catalog();
        let selection = SelectionSet::new();
        assert!(generate_script(&catalog, &selection, &fixed_timestamp()).is_none());
    }

    #[test]
    fn test_generated_script_structure() {
        let catalog = two_record_catalog();
        let mut selection = SelectionSet::new();
        // Inserted out of id order; output must still be ascending by id.
        selection.set_selected(1, true);
        selection.set_selected(0, true);

        let timestamp = fixed_timestamp();
        let script = generate_script(&catalog, &selection, &timestamp).unwrap();
        assert_eq!(script.filename, "download_data_20260829_140509.sh");

        // Timestamp goes immediately after the "generated by" header line.
        assert!(script.content.contains(
            "# Generated by the AGE-PRO Data Archive\n# Generated on: 20260829_140509\n"
        ));

        // Dynamic block: total size (600 + 500 >= 1000 -> GB) and interleaved
        // URL/target pairs in ascending id order.
        let expected_dynamic = "TOTAL_SIZE=\"Total size: 1.1 GB\"\n\
                                DOWNLOAD_URLS=()\n\
                                DOWNLOAD_TARGETS=()\n\
                                DOWNLOAD_URLS+=(\"https://example.org/data/a.fits\")\n\
                                DOWNLOAD_TARGETS+=(\"AGEPRO_DATA/Lupus/Lupus 1/Band 6/12CO\")\n\
                                DOWNLOAD_URLS+=(\"https://example.org/data/b.fits\")\n\
                                DOWNLOAD_TARGETS+=(\"AGEPRO_DATA/Lupus/Lupus 2/Band 6/13CO\")\n";
        assert!(script.content.contains(expected_dynamic));

        assert_eq!(
            script
                .content
                .matches("DOWNLOAD_URLS+=")
                .count(),
            2,
            "exactly one URL entry per selected record"
        );
        assert_eq!(script.content.matches("DOWNLOAD_TARGETS+=").count(), 2);
    }

    #[test]
    fn test_templates_outside_insertion_points_are_untouched() {
        let catalog = two_record_catalog();
        let mut selection = SelectionSet::new();
        selection.set_selected(0, true);

        let timestamp = fixed_timestamp();
        let script = generate_script(&catalog, &selection, &timestamp).unwrap();

        // The body is appended verbatim, separated by a blank line.
        assert!(script.content.ends_with(SCRIPT_BODY));
        let body_start = script.content.len() - SCRIPT_BODY.len();
        assert!(script.content[..body_start].ends_with("\")\n\n"));

        // Everything before the inserted timestamp line matches the preamble.
        let header_end = SCRIPT_PREAMBLE.find(GENERATED_BY_LINE).unwrap() + GENERATED_BY_LINE.len();
        assert!(script.content.starts_with(&SCRIPT_PREAMBLE[..header_end]));

        // And everything after it, up to the dynamic block, matches too.
        let preamble_rest = &SCRIPT_PREAMBLE[header_end..];
        assert!(script.content.contains(preamble_rest));
        assert!(preamble_rest.ends_with("# Parameters\n"));
    }

    #[test]
    fn test_total_size_below_threshold_stays_in_mb() {
        let mut record = test_record(0, "small.fits");
        record.size_mb = 0.0;
        let catalog = Catalog::new(vec![record]).unwrap();
        let mut selection = SelectionSet::new();
        selection.set_selected(0, true);

        let script = generate_script(&catalog, &selection, "20260101_000000").unwrap();
        // Totals never use the per-row "<1 MB" special case.
        assert!(script.content.contains("TOTAL_SIZE=\"Total size: 0.0 MB\"\n"));
    }
}
