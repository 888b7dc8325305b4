//! Workload categories and the question-ordinal table that maps onto them.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Workload domain a survey question belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    VisibleHousehold,
    InvisibleHousehold,
    VisibleParenting,
    InvisibleParenting,
}

impl Category {
    /// All categories in survey order.
    pub const ALL: [Category; 4] = [
        Category::VisibleHousehold,
        Category::InvisibleHousehold,
        Category::VisibleParenting,
        Category::InvisibleParenting,
    ];

    /// Returns the display label used by the survey content.
    pub fn label(&self) -> &'static str {
        match self {
            Category::VisibleHousehold => "Visible Household Tasks",
            Category::InvisibleHousehold => "Invisible Household Tasks",
            Category::VisibleParenting => "Visible Parental Tasks",
            Category::InvisibleParenting => "Invisible Parental Tasks",
        }
    }

    /// Returns the snake_case key.
    pub fn key(&self) -> &'static str {
        match self {
            Category::VisibleHousehold => "visible_household",
            Category::InvisibleHousehold => "invisible_household",
            Category::VisibleParenting => "visible_parenting",
            Category::InvisibleParenting => "invisible_parenting",
        }
    }

    /// True for the invisible (cognitive/emotional) categories.
    pub fn is_invisible(&self) -> bool {
        matches!(
            self,
            Category::InvisibleHousehold | Category::InvisibleParenting
        )
    }

    /// Weight of this category in the composite balance.
    ///
    /// Invisible categories carry 0.3, visible ones 0.2; the four sum to 1.0.
    /// Historical comparisons depend on these exact values.
    pub fn composite_weight(&self) -> f64 {
        self.composite_tenths() as f64 / 10.0
    }

    /// Composite weight in tenths (3 for invisible, 2 for visible), for
    /// exact integer blending.
    pub fn composite_tenths(&self) -> u64 {
        if self.is_invisible() {
            3
        } else {
            2
        }
    }

    /// Parses a category label in any of the forms found in stored responses.
    ///
    /// Accepts display labels ("Invisible Parental Tasks"), snake_case keys
    /// ("invisible_parenting") and loose variants ("visible parenting"),
    /// case-insensitively. Returns `None` for anything else.
    pub fn from_label(label: &str) -> Option<Category> {
        let normalized = label
            .trim()
            .to_lowercase()
            .replace(" tasks", "")
            .replace(['_', '-'], " ")
            .replace("parental", "parenting");

        match normalized.split_whitespace().collect::<Vec<_>>().join(" ").as_str() {
            "visible household" => Some(Category::VisibleHousehold),
            "invisible household" => Some(Category::InvisibleHousehold),
            "visible parenting" => Some(Category::VisibleParenting),
            "invisible parenting" => Some(Category::InvisibleParenting),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A half-open range of question ordinals `[start, end)` assigned to one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRange {
    pub category: Category,
    pub start: u32,
    pub end: u32,
}

impl CategoryRange {
    pub fn new(category: Category, start: u32, end: u32) -> Self {
        Self { category, start, end }
    }

    /// Returns true if the ordinal falls inside this range.
    pub fn contains(&self, ordinal: u32) -> bool {
        ordinal >= self.start && ordinal < self.end
    }
}

/// Standard 72-question survey: 18 questions per category.
static STANDARD_TABLE: Lazy<ClassificationTable> = Lazy::new(|| ClassificationTable {
    ranges: vec![
        CategoryRange::new(Category::VisibleHousehold, 1, 19),
        CategoryRange::new(Category::InvisibleHousehold, 19, 37),
        CategoryRange::new(Category::VisibleParenting, 37, 55),
        CategoryRange::new(Category::InvisibleParenting, 55, 73),
    ],
    wrap_beyond_last: false,
});

/// The ordinal → category table, fixed once at startup.
///
/// Ranges are kept sorted by `start` and never overlap, so every ordinal maps
/// to at most one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationTable {
    ranges: Vec<CategoryRange>,
    wrap_beyond_last: bool,
}

impl ClassificationTable {
    /// Builds a validated table.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if no ranges are given
    /// - `InvalidFormat` if a range is empty or two ranges overlap
    pub fn new(
        mut ranges: Vec<CategoryRange>,
        wrap_beyond_last: bool,
    ) -> Result<Self, ValidationError> {
        if ranges.is_empty() {
            return Err(ValidationError::empty_field("classification.ranges"));
        }

        for range in &ranges {
            if range.start >= range.end {
                return Err(ValidationError::invalid_format(
                    "classification.ranges",
                    format!(
                        "range {}..{} for {} is empty",
                        range.start, range.end, range.category
                    ),
                ));
            }
        }

        ranges.sort_by_key(|r| r.start);
        for pair in ranges.windows(2) {
            if pair[1].start < pair[0].end {
                return Err(ValidationError::invalid_format(
                    "classification.ranges",
                    format!(
                        "range {}..{} overlaps {}..{}",
                        pair[1].start, pair[1].end, pair[0].start, pair[0].end
                    ),
                ));
            }
        }

        Ok(Self {
            ranges,
            wrap_beyond_last,
        })
    }

    /// The standard four-category, 72-question table.
    pub fn standard() -> &'static ClassificationTable {
        &STANDARD_TABLE
    }

    /// Returns the configured ranges, sorted by start.
    pub fn ranges(&self) -> &[CategoryRange] {
        &self.ranges
    }

    /// Whether ordinals past the last range fold back onto the table.
    pub fn wraps_beyond_last(&self) -> bool {
        self.wrap_beyond_last
    }

    /// Looks up the category for an ordinal.
    pub fn lookup(&self, ordinal: u32) -> Option<Category> {
        let ordinal = self.fold(ordinal);
        self.ranges
            .iter()
            .find(|r| r.contains(ordinal))
            .map(|r| r.category)
    }

    fn fold(&self, ordinal: u32) -> u32 {
        if !self.wrap_beyond_last {
            return ordinal;
        }
        // Both unwrap_or arms are unreachable: `new` rejects an empty table.
        let first_start = self.ranges.first().map(|r| r.start).unwrap_or(0);
        let last_end = self.ranges.last().map(|r| r.end).unwrap_or(0);
        let span = last_end - first_start;
        if ordinal < last_end || span == 0 {
            return ordinal;
        }
        ((ordinal - last_end) % span) + first_start
    }
}

impl Default for ClassificationTable {
    fn default() -> Self {
        Self::standard().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_weights_sum_to_one() {
        let total: f64 = Category::ALL.iter().map(|c| c.composite_weight()).sum();
        assert!((total - 1.0).abs() < 1e-12);
        let tenths: u64 = Category::ALL.iter().map(|c| c.composite_tenths()).sum();
        assert_eq!(tenths, 10);
    }

    #[test]
    fn from_label_accepts_stored_forms() {
        assert_eq!(
            Category::from_label("Invisible Parental Tasks"),
            Some(Category::InvisibleParenting)
        );
        assert_eq!(
            Category::from_label("visible_household"),
            Some(Category::VisibleHousehold)
        );
        assert_eq!(
            Category::from_label("  Visible Parenting "),
            Some(Category::VisibleParenting)
        );
        assert_eq!(
            Category::from_label("Invisible Household Tasks"),
            Some(Category::InvisibleHousehold)
        );
        assert_eq!(Category::from_label("Financial Tasks"), None);
        assert_eq!(Category::from_label(""), None);
    }

    #[test]
    fn standard_table_boundaries() {
        let table = ClassificationTable::standard();
        assert_eq!(table.lookup(0), None);
        assert_eq!(table.lookup(1), Some(Category::VisibleHousehold));
        assert_eq!(table.lookup(18), Some(Category::VisibleHousehold));
        assert_eq!(table.lookup(19), Some(Category::InvisibleHousehold));
        assert_eq!(table.lookup(36), Some(Category::InvisibleHousehold));
        assert_eq!(table.lookup(37), Some(Category::VisibleParenting));
        assert_eq!(table.lookup(54), Some(Category::VisibleParenting));
        assert_eq!(table.lookup(55), Some(Category::InvisibleParenting));
        assert_eq!(table.lookup(72), Some(Category::InvisibleParenting));
        assert_eq!(table.lookup(73), None);
    }

    #[test]
    fn wrapping_table_folds_later_weeks() {
        let table = ClassificationTable::new(
            ClassificationTable::standard().ranges().to_vec(),
            true,
        )
        .unwrap();
        assert_eq!(table.lookup(73), Some(Category::VisibleHousehold));
        assert_eq!(table.lookup(109), Some(Category::VisibleParenting));
        assert_eq!(table.lookup(144), Some(Category::InvisibleParenting));
        assert_eq!(table.lookup(145), Some(Category::VisibleHousehold));
        assert_eq!(table.lookup(0), None);
    }

    #[test]
    fn new_sorts_ranges() {
        let table = ClassificationTable::new(
            vec![
                CategoryRange::new(Category::InvisibleHousehold, 10, 20),
                CategoryRange::new(Category::VisibleHousehold, 1, 10),
            ],
            false,
        )
        .unwrap();
        assert_eq!(table.ranges()[0].category, Category::VisibleHousehold);
        assert_eq!(table.lookup(10), Some(Category::InvisibleHousehold));
    }

    #[test]
    fn new_rejects_empty_table() {
        assert!(matches!(
            ClassificationTable::new(vec![], false),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn new_rejects_overlap_and_empty_range() {
        let overlapping = vec![
            CategoryRange::new(Category::VisibleHousehold, 1, 20),
            CategoryRange::new(Category::InvisibleHousehold, 19, 37),
        ];
        assert!(ClassificationTable::new(overlapping, false).is_err());

        let empty = vec![CategoryRange::new(Category::VisibleHousehold, 5, 5)];
        assert!(ClassificationTable::new(empty, false).is_err());
    }

    #[test]
    fn category_serializes_snake_case() {
        let json = serde_json::to_string(&Category::InvisibleParenting).unwrap();
        assert_eq!(json, "\"invisible_parenting\"");
    }
}
