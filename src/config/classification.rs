//! Question classification configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::survey::{Category, CategoryRange, ClassificationTable};

/// Ordinal ranges mapping question ids onto categories
#[derive(Debug, Clone, Deserialize)]
pub struct ClassificationConfig {
    /// Half-open `[start, end)` ordinal ranges
    #[serde(default = "default_ranges")]
    pub ranges: Vec<RangeConfig>,

    /// Fold ordinals past the last range back onto the table (q73 -> q1)
    #[serde(default)]
    pub wrap_beyond_last: bool,
}

/// One configured range
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct RangeConfig {
    pub category: Category,
    pub start: u32,
    pub end: u32,
}

fn default_ranges() -> Vec<RangeConfig> {
    ClassificationTable::standard()
        .ranges()
        .iter()
        .map(|r| RangeConfig {
            category: r.category,
            start: r.start,
            end: r.end,
        })
        .collect()
}

impl ClassificationConfig {
    /// Build the classification table
    pub fn table(&self) -> Result<ClassificationTable, ValidationError> {
        let ranges = self
            .ranges
            .iter()
            .map(|r| CategoryRange::new(r.category, r.start, r.end))
            .collect();
        ClassificationTable::new(ranges, self.wrap_beyond_last)
            .map_err(|e| ValidationError::InvalidClassification(e.to_string()))
    }

    /// Validate classification configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.table().map(|_| ())
    }
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            ranges: default_ranges(),
            wrap_beyond_last: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_standard_table() {
        let config = ClassificationConfig::default();
        assert_eq!(&config.table().unwrap(), ClassificationTable::standard());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn overlapping_ranges_are_rejected() {
        let config = ClassificationConfig {
            ranges: vec![
                RangeConfig { category: Category::VisibleHousehold, start: 1, end: 20 },
                RangeConfig { category: Category::InvisibleHousehold, start: 19, end: 37 },
            ],
            wrap_beyond_last: false,
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidClassification(_))));
    }

    #[test]
    fn empty_ranges_are_rejected() {
        let config = ClassificationConfig {
            ranges: vec![],
            wrap_beyond_last: true,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn deserializes_snake_case_categories() {
        let json = r#"{
            "ranges": [{ "category": "invisible_parenting", "start": 1, "end": 10 }],
            "wrap_beyond_last": true
        }"#;
        let config: ClassificationConfig = serde_json::from_str(json).unwrap();
        let table = config.table().unwrap();
        assert!(table.wraps_beyond_last());
        assert_eq!(table.lookup(12), Some(Category::InvisibleParenting));
    }
}
