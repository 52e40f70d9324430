//! Declarative header detection shared by the source adapters.
//!
//! Operator feeds label columns in English or Japanese, in any order. Each
//! adapter declares a synonym table; the header row is scanned exactly once
//! and the resulting field-to-index mapping is what row parsing consumes,
//! keeping string matching out of the row loop.

use std::collections::HashMap;

use csv::StringRecord;
use tracing::warn;

use crate::error::ParseError;

/// Synonyms accepted for one canonical field.
///
/// `substrings` match case-insensitively anywhere in the trimmed label,
/// which covers unit-suffixed labels such as `実績(万kW)`; `exact` tokens
/// must equal the whole trimmed label.
#[derive(Debug, Clone, Copy)]
pub struct FieldSynonyms {
    pub field: &'static str,
    pub substrings: &'static [&'static str],
    pub exact: &'static [&'static str],
}

impl FieldSynonyms {
    fn matches(&self, label: &str) -> bool {
        self.exact.iter().any(|token| label == *token)
            || self.substrings.iter().any(|token| label.contains(token))
    }
}

/// Field-to-column mapping produced from one header row.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    indices: HashMap<&'static str, usize>,
}

impl ColumnMap {
    /// Scan `header` left to right against the synonym table. A label is
    /// assigned to the first field it matches; when a field matches more
    /// than one column the last column wins. That override is easy to trip
    /// over with repeated labels, so each occurrence is logged.
    pub fn detect(
        header: &StringRecord,
        fields: &[FieldSynonyms],
        required: &[&'static str],
    ) -> Result<Self, ParseError> {
        let mut indices = HashMap::new();

        for (index, raw) in header.iter().enumerate() {
            let label = raw.trim().to_lowercase();
            let Some(spec) = fields.iter().find(|spec| spec.matches(&label)) else {
                continue;
            };

            if let Some(previous) = indices.insert(spec.field, index) {
                warn!(
                    field = spec.field,
                    previous,
                    column = index,
                    "duplicate column match, keeping the later column"
                );
            }
        }

        if required.iter().any(|field| !indices.contains_key(field)) {
            return Err(ParseError::HeaderDetection {
                header: header.iter().map(str::to_owned).collect(),
            });
        }

        Ok(Self { indices })
    }

    pub fn get(&self, field: &'static str) -> Option<usize> {
        self.indices.get(field).copied()
    }

    /// Index of a field already verified as required during detection.
    pub fn index(&self, field: &'static str) -> usize {
        self.indices[field]
    }
}
