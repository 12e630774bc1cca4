//! Catalog completeness report.

use crate::item::{CatalogItem, ProductSummary};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Incomplete items listed in a report.
pub const INCOMPLETE_SAMPLE_SIZE: usize = 10;

/// How many items lack each required field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingFields {
    pub name: usize,
    pub tok_code: usize,
    pub oem_code: usize,
    pub model: usize,
}

/// Completeness of a loaded catalog against an expected product count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub total: usize,
    pub expected: Option<usize>,
    /// `total - expected`, when an expected count is set
    pub difference: Option<i64>,
    pub complete: usize,
    pub incomplete: usize,
    pub missing: MissingFields,
    /// True when no expected count is set or it equals `total`
    pub count_matches: bool,
    pub all_complete: bool,
    /// `count_matches && all_complete`
    pub overall: bool,
    /// One-line verdict for humans
    pub message: String,
    /// First few incomplete items, in catalog order
    pub incomplete_items: Vec<ProductSummary>,
    pub timestamp: DateTime<Utc>,
}

impl ValidationReport {
    /// Check every item for name, TOK code, OEM code and model.
    pub fn from_items(items: &[CatalogItem], expected: Option<usize>) -> Self {
        let mut missing = MissingFields::default();
        let mut incomplete_items = Vec::new();
        let mut incomplete = 0;

        for item in items {
            missing.name += usize::from(item.name.is_empty());
            missing.tok_code += usize::from(item.tok_code.is_empty());
            missing.oem_code += usize::from(item.oem_code.is_empty());
            missing.model += usize::from(item.model.is_empty());

            if !item.is_complete() {
                incomplete += 1;
                if incomplete_items.len() < INCOMPLETE_SAMPLE_SIZE {
                    incomplete_items.push(item.summary());
                }
            }
        }

        let total = items.len();
        let count_matches = expected.is_none_or(|n| n == total);
        let all_complete = incomplete == 0;

        Self {
            total,
            expected,
            difference: expected.map(|n| to_i64(total) - to_i64(n)),
            complete: total - incomplete,
            incomplete,
            missing,
            count_matches,
            all_complete,
            overall: count_matches && all_complete,
            message: verdict(total, expected, incomplete),
            incomplete_items,
            timestamp: Utc::now(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.overall
    }
}

fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

fn verdict(total: usize, expected: Option<usize>, incomplete: usize) -> String {
    match expected {
        Some(n) if n != total => format!("Expected {n} products, but found {total}"),
        Some(_) if incomplete == 0 => format!("All {total} products are present and complete"),
        Some(_) => format!(
            "Product count is correct ({total}), but {incomplete} products have missing fields"
        ),
        None if incomplete == 0 => format!("All {total} products are complete"),
        None => format!("{incomplete} of {total} products have missing fields"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete(id: &str) -> CatalogItem {
        CatalogItem::builder(id, "Бампер")
            .tok_code("T")
            .oem_code("O")
            .model("Prius")
            .build()
    }

    #[test]
    fn test_all_complete_and_expected() {
        let items = vec![complete("1"), complete("2")];
        let report = ValidationReport::from_items(&items, Some(2));

        assert!(report.is_valid());
        assert_eq!(report.difference, Some(0));
        assert_eq!(report.message, "All 2 products are present and complete");
        assert!(report.incomplete_items.is_empty());
    }

    #[test]
    fn test_missing_fields_counted() {
        let items = vec![
            complete("1"),
            CatalogItem::builder("2", "Толь").model("Harrier").build(),
            CatalogItem::builder("3", "").tok_code("T9").build(),
        ];
        let report = ValidationReport::from_items(&items, Some(3));

        assert!(!report.is_valid());
        assert!(report.count_matches);
        assert_eq!(report.complete, 1);
        assert_eq!(report.incomplete, 2);
        assert_eq!(
            report.missing,
            MissingFields { name: 1, tok_code: 1, oem_code: 2, model: 1 }
        );
        assert_eq!(report.incomplete_items.len(), 2);
        assert_eq!(report.incomplete_items[0].id, "2");
        assert!(report.message.contains("2 products have missing fields"));
    }

    #[test]
    fn test_count_mismatch() {
        let report = ValidationReport::from_items(&[complete("1")], Some(226));
        assert!(!report.count_matches);
        assert!(!report.is_valid());
        assert_eq!(report.difference, Some(-225));
        assert_eq!(report.message, "Expected 226 products, but found 1");
    }

    #[test]
    fn test_no_expected_count() {
        let report = ValidationReport::from_items(&[complete("1")], None);
        assert!(report.is_valid());
        assert_eq!(report.difference, None);

        let report = ValidationReport::from_items(&[], None);
        assert!(report.is_valid());
        assert_eq!(report.total, 0);
    }

    #[test]
    fn test_sample_capped() {
        let items: Vec<CatalogItem> = (0..25)
            .map(|i| CatalogItem::builder(i.to_string(), "Фар").build())
            .collect();
        let report = ValidationReport::from_items(&items, None);

        assert_eq!(report.incomplete, 25);
        assert_eq!(report.incomplete_items.len(), INCOMPLETE_SAMPLE_SIZE);
    }

    #[test]
    fn test_serializes_camel_case() {
        let report = ValidationReport::from_items(&[complete("1")], Some(1));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["countMatches"], true);
        assert_eq!(json["missing"]["tokCode"], 0);
        assert!(json["timestamp"].is_string());
    }
}
