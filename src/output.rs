//! Serialization of the final publication list.
//!
//! The list is written as a pretty-printed UTF-8 JSON array. Absent values are written as
//! `null` rather than omitted so consumers always see the same fields.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::{Publication, PublistError, Result};

/// Writes publications as a JSON array.
///
/// # Errors
///
/// Returns `PublistError::Io` if the writer fails.
pub fn write_json<W: Write>(mut writer: W, publications: &[Publication]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, publications)
        .map_err(|e| PublistError::Serialization(e.to_string()))?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Writes publications as a JSON array to a file, replacing it if it exists.
pub fn save_json(path: impl AsRef<Path>, publications: &[Publication]) -> Result<()> {
    let file = File::create(path)?;
    write_json(BufWriter::new(file), publications)
}

/// Non-empty DOIs of the publications, in list order.
///
/// This is what PDF retrieval and thumbnail rendering consume downstream.
pub fn dois(publications: &[Publication]) -> Vec<&str> {
    publications
        .iter()
        .filter(|p| p.has_doi())
        .map(|p| p.doi.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Author, Issued, Source};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn publication(doi: &str) -> Publication {
        Publication {
            title: "Bérénice's Équations".to_string(),
            authors: vec![Author::new("Vlado", "Menkovski")],
            venue: "Journal".to_string(),
            doi: doi.to_string(),
            issued: Issued {
                year: None,
                month_year: "Unknown".to_string(),
                month_year_numeric: None,
            },
            source: Source::DataCite,
            abstract_text: None,
        }
    }

    #[test]
    fn test_write_json_keeps_null_fields() {
        let mut buffer = Vec::new();
        write_json(&mut buffer, &[publication("10.1/a")]).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("Bérénice's Équations"));
        assert!(text.ends_with("]\n"));

        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            json!([{
                "title": "Bérénice's Équations",
                "authors": [{"given": "Vlado", "family": "Menkovski"}],
                "venue": "Journal",
                "doi": "10.1/a",
                "issued": {"year": null, "month_year": "Unknown", "month_year_numeric": null},
                "source": "datacite",
                "abstract": null
            }])
        );
    }

    #[test]
    fn test_write_json_empty() {
        let mut buffer = Vec::new();
        write_json(&mut buffer, &[]).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "[]\n");
    }

    #[test]
    fn test_dois() {
        let publications = vec![publication("10.1/a"), publication(""), publication("10.1/b")];
        assert_eq!(dois(&publications), vec!["10.1/a", "10.1/b"]);
    }
}
