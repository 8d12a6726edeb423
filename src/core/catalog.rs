/*
 * This module defines the catalog: the static, immutable list of downloadable
 * data products for the session. A catalog is loaded once from a JSON array of
 * records before the rest of the core starts, and is never mutated afterwards.
 * Record ids double as indices into the catalog, which loading validates.
 */
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

#[derive(Debug)]
pub enum CatalogError {
    Io(io::Error),
    Serde(serde_json::Error),
    /// A record's `id` did not equal its position in the catalog array.
    NonDenseId { position: usize, id: usize },
    NegativeSize { id: usize },
    Empty,
}

impl From<io::Error> for CatalogError {
    fn from(err: io::Error) -> Self {
        CatalogError::Io(err)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Serde(err)
    }
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(e) => write!(f, "Catalog I/O error: {e}"),
            CatalogError::Serde(e) => write!(f, "Catalog parse error: {e}"),
            CatalogError::NonDenseId { position, id } => write!(
                f,
                "Catalog record at position {position} has id {id}; ids must be dense and ascending from 0"
            ),
            CatalogError::NegativeSize { id } => {
                write!(f, "Catalog record {id} has a negative sizeMB")
            }
            CatalogError::Empty => write!(f, "Catalog contains no records"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(e) => Some(e),
            CatalogError::Serde(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/*
 * One downloadable data product. Field names in the serialized form follow the
 * upstream catalog export (`dataType`, `sizeMB`, `targetDir`).
 */
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataRecord {
    pub id: usize,
    pub filename: String,
    pub region: String,
    pub disk: String,
    pub band: String,
    pub molecule: String,
    #[serde(rename = "dataType")]
    pub data_type: String,
    #[serde(rename = "sizeMB")]
    pub size_mb: f64,
    pub url: String,
    #[serde(rename = "targetDir")]
    pub target_dir: String,
}

/*
 * The ordered, immutable record list. `id` values are dense indices into the
 * underlying vector, so lookups by id are plain indexing. An id outside the
 * catalog indicates a contract violation between the UI adapter and the core,
 * and `record()` panics on it rather than papering over it.
 */
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<DataRecord>,
}

impl Catalog {
    pub fn new(records: Vec<DataRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (position, record) in records.iter().enumerate() {
            if record.id != position {
                return Err(CatalogError::NonDenseId {
                    position,
                    id: record.id,
                });
            }
            if record.size_mb < 0.0 {
                return Err(CatalogError::NegativeSize { id: record.id });
            }
        }
        log::debug!("Catalog: validated {} records.", records.len());
        Ok(Catalog { records })
    }

    pub fn load_from_reader<R: Read>(reader: R) -> Result<Self> {
        let records: Vec<DataRecord> = serde_json::from_reader(reader)?;
        Self::new(records)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        log::debug!("Catalog: loading from {path:?}");
        let file = File::open(path)?;
        Self::load_from_reader(BufReader::new(file))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up a record by id. Panics if the id is not in the catalog,
    /// since that indicates a broken caller, not a runtime condition.
    pub fn record(&self, id: usize) -> &DataRecord {
        assert!(
            id < self.records.len(),
            "record id {} outside catalog of {} records",
            id,
            self.records.len()
        );
        &self.records[id]
    }

    pub fn records(&self) -> &[DataRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataRecord> {
        self.records.iter()
    }
}

#[cfg(test)]
pub(crate) fn test_record(id: usize, filename: &str) -> DataRecord {
    DataRecord {
        id,
        filename: filename.to_string(),
        region: "Lupus".to_string(),
        disk: "Lupus 1".to_string(),
        band: "Band 6".to_string(),
        molecule: "12CO".to_string(),
        data_type: "Image cube".to_string(),
        size_mb: 100.0,
        url: format!("https://example.org/data/{filename}"),
        target_dir: "AGEPRO_DATA/Lupus/Lupus 1/Band 6/12CO".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG_JSON: &str = r#"[
        {
            "id": 0,
            "filename": "lupus1_12co.fits",
            "region": "Lupus",
            "disk": "Lupus 1",
            "band": "Band 6",
            "molecule": "12CO",
            "dataType": "Image cube",
            "sizeMB": 120.5,
            "url": "https://example.org/data/lupus1_12co.fits",
            "targetDir": "AGEPRO_DATA/Lupus/Lupus 1/Band 6/12CO"
        },
        {
            "id": 1,
            "filename": "usco5_cont.fits",
            "region": "Upper Sco",
            "disk": "UpperSco 5",
            "band": "Band 7",
            "molecule": "Continuum",
            "dataType": "Continuum image",
            "sizeMB": 0,
            "url": "https://example.org/data/usco5_cont.fits",
            "targetDir": "AGEPRO_DATA/Upper Sco/UpperSco 5/Band 7/Continuum"
        }
    ]"#;

    #[test]
    fn test_load_from_reader_parses_upstream_field_names() {
        let catalog = Catalog::load_from_reader(CATALOG_JSON.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 2);
        let first = catalog.record(0);
        assert_eq!(first.data_type, "Image cube");
        assert_eq!(first.size_mb, 120.5);
        assert_eq!(first.target_dir, "AGEPRO_DATA/Lupus/Lupus 1/Band 6/12CO");
        assert_eq!(catalog.record(1).size_mb, 0.0);
    }

    #[test]
    fn test_new_rejects_non_dense_ids() {
        let mut records = vec![test_record(0, "a.fits"), test_record(2, "b.fits")];
        let result = Catalog::new(records.clone());
        match result {
            Err(CatalogError::NonDenseId { position: 1, id: 2 }) => {}
            other => panic!("Expected NonDenseId error, got {other:?}"),
        }

        // Fixing the id makes the same data valid.
        records[1].id = 1;
        assert!(Catalog::new(records).is_ok());
    }

    #[test]
    fn test_new_rejects_negative_size() {
        let mut record = test_record(0, "a.fits");
        record.size_mb = -1.0;
        match Catalog::new(vec![record]) {
            Err(CatalogError::NegativeSize { id: 0 }) => {}
            other => panic!("Expected NegativeSize error, got {other:?}"),
        }
    }

    #[test]
    fn test_new_rejects_empty_catalog() {
        assert!(matches!(Catalog::new(Vec::new()), Err(CatalogError::Empty)));
    }

    #[test]
    #[should_panic(expected = "outside catalog")]
    fn test_record_panics_on_unknown_id() {
        let catalog = Catalog::new(vec![test_record(0, "a.fits")]).unwrap();
        let _ = catalog.record(7);
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CATALOG_JSON.as_bytes()).unwrap();
        let catalog = Catalog::load_from_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
    }
}
