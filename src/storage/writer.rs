use crate::errors::StorageError;
use crate::models::Record;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Writes `records` to `path`, taking the header from the first record's
/// keys. Later records are assumed to share that field set: missing fields
/// become empty cells and extra fields are dropped.
///
/// An empty slice writes nothing.
pub fn save_records_to_csv(records: &[Record], path: &Path) -> Result<(), StorageError> {
    let Some(first) = records.first() else {
        tracing::warn!("No data to save.");
        return Ok(());
    };

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();

    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(&headers)?;

    for record in records {
        wtr.write_record(
            headers
                .iter()
                .map(|key| record.get(*key).map(cell).unwrap_or_default()),
        )?;
    }

    wtr.flush()?;
    tracing::info!("Successfully saved data to: {}", path.display());
    Ok(())
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn header_follows_first_record_and_rows_follow_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.csv");

        let records = vec![
            record(json!({"timestamp": 1, "interest_8h": 0.0001, "index_price": 100.5})),
            record(json!({"timestamp": 2, "interest_8h": -0.0002, "index_price": 101.0})),
            record(json!({"timestamp": 3, "interest_8h": 0.0, "index_price": 99.25})),
        ];

        save_records_to_csv(&records, &path).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = rdr.headers().unwrap().iter().map(str::to_string).collect();
        assert_eq!(headers, ["timestamp", "interest_8h", "index_price"]);

        let rows: Vec<csv::StringRecord> = rdr.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), records.len());
        assert_eq!(rows[0].iter().collect::<Vec<_>>(), ["1", "0.0001", "100.5"]);
        assert_eq!(rows[1].iter().collect::<Vec<_>>(), ["2", "-0.0002", "101.0"]);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), records.len() + 1);
    }

    #[test]
    fn missing_fields_are_blank_and_extra_fields_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let records = vec![
            record(json!({"a": "x", "b": null})),
            record(json!({"b": true, "c": [1, 2]})),
        ];

        save_records_to_csv(&records, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "a,b\nx,\n,true\n");
    }

    #[test]
    fn empty_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never").join("out.csv");

        save_records_to_csv(&[], &path).unwrap();

        assert!(!path.exists());
        assert!(!path.parent().unwrap().exists());
    }
}
