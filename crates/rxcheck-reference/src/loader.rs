//! Reference table loading from delimited text.
//!
//! The table has a header row naming at least the diagnosis column and the
//! recommended-drugs column (names come from `ReferenceTableLayout`, matched
//! case-insensitively). The drugs cell holds a separator-delimited list.
//!
//! Unusable rows are skipped with a warning rather than failing the load:
//!
//! - an empty diagnosis cell,
//! - a drugs cell with no non-blank names,
//! - a repeated diagnosis (the first row wins).
//!
//! A table that is unreadable, lacks a required column, or yields no usable
//! rows at all is a `DataLoad` error.

use std::{collections::HashSet, fs::File, io::Read, path::Path};

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{info, warn};

use rxcheck_contracts::{
    error::{RxError, RxResult},
    policy::ReferenceTableLayout,
    reference::{normalize_key, ReferenceEntry, ReferenceStore},
};

/// Load a reference table from an in-memory string.
pub fn load_csv_str(data: &str, layout: &ReferenceTableLayout) -> RxResult<ReferenceStore> {
    from_reader(data.as_bytes(), layout)
}

/// Load a reference table from a file on disk.
pub fn from_path(path: impl AsRef<Path>, layout: &ReferenceTableLayout) -> RxResult<ReferenceStore> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| RxError::DataLoad {
        reason: format!("cannot open '{}': {}", path.display(), e),
    })?;
    let store = from_reader(file, layout)?;
    info!(path = %path.display(), diagnoses = store.len(), "reference table loaded");
    Ok(store)
}

/// Load a reference table from any reader.
pub fn from_reader<R: Read>(reader: R, layout: &ReferenceTableLayout) -> RxResult<ReferenceStore> {
    let mut csv = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv
        .headers()
        .map_err(|e| RxError::DataLoad {
            reason: format!("cannot read header row: {}", e),
        })?
        .clone();
    let diagnosis_idx = column_index(&headers, &layout.diagnosis_column)?;
    let drugs_idx = column_index(&headers, &layout.drugs_column)?;

    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for (row, record) in csv.records().enumerate() {
        // Header is line 1.
        let line = row + 2;
        let record = record.map_err(|e| RxError::DataLoad {
            reason: format!("line {}: {}", line, e),
        })?;

        let diagnosis = record.get(diagnosis_idx).unwrap_or_default();
        if diagnosis.is_empty() {
            warn!(line, "skipping reference row with empty diagnosis");
            continue;
        }

        let drugs = record
            .get(drugs_idx)
            .unwrap_or_default()
            .split(layout.drug_separator);
        let entry = ReferenceEntry::new(diagnosis, drugs);
        if entry.drugs.is_empty() {
            warn!(line, diagnosis = %diagnosis, "skipping reference row with no drugs");
            continue;
        }

        if !seen.insert(normalize_key(diagnosis)) {
            warn!(line, diagnosis = %diagnosis, "duplicate diagnosis; keeping the first row");
            continue;
        }
        entries.push(entry);
    }

    if entries.is_empty() {
        return Err(RxError::DataLoad {
            reason: "reference table has no usable rows".to_string(),
        });
    }

    Ok(ReferenceStore::from_entries(entries))
}

fn column_index(headers: &StringRecord, name: &str) -> RxResult<usize> {
    let wanted = normalize_key(name);
    headers
        .iter()
        .position(|h| normalize_key(h) == wanted)
        .ok_or_else(|| RxError::DataLoad {
            reason: format!("missing required column '{}'", name),
        })
}

#[cfg(test)]
mod tests {
    use rxcheck_contracts::{error::RxError, policy::ReferenceTableLayout};

    use super::load_csv_str;

    fn layout() -> ReferenceTableLayout {
        ReferenceTableLayout::default()
    }

    #[test]
    fn loads_rows_and_splits_drug_lists() {
        let data = "diagnosis,recommended_drugs\n\
                    Asthma,\"Budesonide, Salbutamol\"\n\
                    Hypertension,\"Amlodipine,Lisinopril\"\n";
        let store = load_csv_str(data, &layout()).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.lookup("asthma"), ["Budesonide", "Salbutamol"]);
        assert_eq!(store.lookup("HYPERTENSION"), ["Amlodipine", "Lisinopril"]);
        assert!(store.vocabulary().contains("lisinopril"));
    }

    #[test]
    fn extra_columns_and_header_case_are_tolerated() {
        let data = "ID,Diagnosis,Notes,Recommended_Drugs\n\
                    1,Asthma,first line,\"Budesonide,Salbutamol\"\n";
        let store = load_csv_str(data, &layout()).unwrap();
        assert_eq!(store.lookup("Asthma").len(), 2);
    }

    #[test]
    fn missing_column_names_the_column() {
        let data = "diagnosis,drugs\nAsthma,Budesonide\n";
        match load_csv_str(data, &layout()) {
            Err(RxError::DataLoad { reason }) => assert!(reason.contains("recommended_drugs")),
            other => panic!("expected DataLoad, got {:?}", other),
        }
    }

    #[test]
    fn unusable_rows_are_skipped() {
        let data = "diagnosis,recommended_drugs\n\
                    ,Aspirin\n\
                    Gout,\" , \"\n\
                    Migraine\n\
                    Asthma,Budesonide\n";
        let store = load_csv_str(data, &layout()).unwrap();
        assert_eq!(store.len(), 1);
        assert!(!store.contains_diagnosis("gout"));
        assert!(!store.contains_diagnosis("migraine"));
        assert_eq!(store.lookup("asthma"), ["Budesonide"]);
    }

    #[test]
    fn duplicate_diagnosis_keeps_first_row() {
        let data = "diagnosis,recommended_drugs\n\
                    Asthma,Budesonide\n\
                    asthma,Montelukast\n";
        let store = load_csv_str(data, &layout()).unwrap();
        assert_eq!(store.lookup("ASTHMA"), ["Budesonide"]);
    }

    #[test]
    fn table_without_usable_rows_fails() {
        let data = "diagnosis,recommended_drugs\n,\n";
        assert!(matches!(
            load_csv_str(data, &layout()),
            Err(RxError::DataLoad { .. })
        ));
    }

    #[test]
    fn custom_layout_is_honoured() {
        let layout = ReferenceTableLayout {
            diagnosis_column: "condition".to_string(),
            drugs_column: "therapy".to_string(),
            drug_separator: ';',
        };
        let data = "condition,therapy\nMigraine,Sumatriptan;Ibuprofen\n";
        let store = load_csv_str(data, &layout).unwrap();
        assert_eq!(store.lookup("migraine"), ["Sumatriptan", "Ibuprofen"]);
    }
}
