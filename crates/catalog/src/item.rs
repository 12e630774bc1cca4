//! Catalog item model and spreadsheet row mapping.

use crate::price::format_price;
use partmatch_search::{build_search_tokens, SearchFields, SearchIndex, Searchable, TokenSet};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// One spreadsheet row keyed by column header.
pub type RawRow = HashMap<String, String>;

/// Header variants accepted for each field, in priority order.
pub mod aliases {
    pub const NAME: &[&str] = &["Барааны нэр", "Нэр", "name", "Product Name"];
    pub const TOK_CODE: &[&str] = &["TOK код", "TOK CODE", "Tok code", "tokCode", "tok"];
    pub const OEM_CODE: &[&str] = &["OEM код", "OEM", "oemCode"];
    pub const MODEL: &[&str] = &["Загвар", "Машин загвар", "Model"];
    pub const PRICE_WITH_VAT: &[&str] = &["Үнэ (НӨАТ-тэй)", "Бөөний үнэ (НӨАТ орсон үнэ)", "priceVat"];
    pub const PRICE_WITHOUT_VAT: &[&str] = &["Үнэ (НӨАТ-гүй)", "Бөөний үнэ (НӨАТ-гүй)", "priceNoVat"];
    pub const STOCK: &[&str] = &["Нөөц", "Тоо", "Stock"];
    pub const BRAND: &[&str] = &["Брэнд", "Brand"];
    pub const ID: &[&str] = &["ID", "id", "Row ID"];
}

/// A sellable part.
///
/// Immutable once built; the search index is computed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub tok_code: String,
    pub oem_code: String,
    pub model: String,
    pub brand: String,
    pub price_with_vat: String,
    pub price_without_vat: String,
    pub raw_price_with_vat: String,
    pub raw_price_without_vat: String,
    pub stock: String,
    search: SearchIndex,
}

/// Client-facing view of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: String,
    pub name: String,
    pub tok_code: String,
    pub oem_code: String,
    pub model: String,
    pub price_with_vat: String,
    pub price_without_vat: String,
    pub stock: String,
}

/// First alias whose trimmed value is non-empty.
///
/// Row keys are expected to be trimmed already, as [`parse_records`]
/// produces them.
///
/// [`parse_records`]: crate::csv::parse_records
fn pick_field(row: &RawRow, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| row.get(*key))
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_default()
}

impl CatalogItem {
    /// Map a spreadsheet row through the alias table.
    pub fn from_row(row: &RawRow) -> Self {
        let name = pick_field(row, aliases::NAME);
        let tok_code = pick_field(row, aliases::TOK_CODE);
        let oem_code = pick_field(row, aliases::OEM_CODE);

        let id = [pick_field(row, aliases::ID), tok_code.clone(), oem_code.clone()]
            .into_iter()
            .find(|candidate| !candidate.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let raw_price_with_vat = pick_field(row, aliases::PRICE_WITH_VAT);
        let raw_price_without_vat = pick_field(row, aliases::PRICE_WITHOUT_VAT);

        Self::builder(id, name)
            .tok_code(tok_code)
            .oem_code(oem_code)
            .model(pick_field(row, aliases::MODEL))
            .brand(pick_field(row, aliases::BRAND))
            .prices(raw_price_with_vat, raw_price_without_vat)
            .stock(pick_field(row, aliases::STOCK))
            .build()
    }

    /// Start building an item by hand.
    pub fn builder(id: impl Into<String>, name: impl Into<String>) -> CatalogItemBuilder {
        CatalogItemBuilder {
            id: id.into(),
            name: name.into(),
            ..CatalogItemBuilder::default()
        }
    }

    /// Whether the row identifies a product at all.
    pub fn has_identity(&self) -> bool {
        !(self.name.is_empty() && self.tok_code.is_empty() && self.oem_code.is_empty())
    }

    /// Whether name, both codes and model are all filled in.
    pub fn is_complete(&self) -> bool {
        !(self.name.is_empty()
            || self.tok_code.is_empty()
            || self.oem_code.is_empty()
            || self.model.is_empty())
    }

    /// Token set used for matching, recomputed from the item's fields.
    pub fn search_tokens(&self) -> TokenSet {
        build_search_tokens(self.search_fields())
    }

    /// Client-facing view; prices fall back to raw sheet values.
    pub fn summary(&self) -> ProductSummary {
        ProductSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            tok_code: self.tok_code.clone(),
            oem_code: self.oem_code.clone(),
            model: self.model.clone(),
            price_with_vat: fallback(&self.price_with_vat, &self.raw_price_with_vat),
            price_without_vat: fallback(&self.price_without_vat, &self.raw_price_without_vat),
            stock: self.stock.clone(),
        }
    }

    fn search_fields(&self) -> SearchFields<'_> {
        SearchFields {
            name: &self.name,
            model: &self.model,
            primary_code: &self.tok_code,
            secondary_code: &self.oem_code,
        }
    }
}

fn fallback(formatted: &str, raw: &str) -> String {
    if formatted.is_empty() { raw } else { formatted }.to_string()
}

impl Searchable for CatalogItem {
    fn search_index(&self) -> &SearchIndex {
        &self.search
    }
}

/// Builder for [`CatalogItem`]; the search index is built in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct CatalogItemBuilder {
    id: String,
    name: String,
    tok_code: String,
    oem_code: String,
    model: String,
    brand: String,
    raw_price_with_vat: String,
    raw_price_without_vat: String,
    stock: String,
}

impl CatalogItemBuilder {
    #[must_use]
    pub fn tok_code(mut self, code: impl Into<String>) -> Self {
        self.tok_code = code.into();
        self
    }

    #[must_use]
    pub fn oem_code(mut self, code: impl Into<String>) -> Self {
        self.oem_code = code.into();
        self
    }

    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    /// Raw sheet prices, with and without VAT.
    #[must_use]
    pub fn prices(mut self, with_vat: impl Into<String>, without_vat: impl Into<String>) -> Self {
        self.raw_price_with_vat = with_vat.into();
        self.raw_price_without_vat = without_vat.into();
        self
    }

    #[must_use]
    pub fn stock(mut self, stock: impl Into<String>) -> Self {
        self.stock = stock.into();
        self
    }

    pub fn build(self) -> CatalogItem {
        let search = SearchIndex::new(SearchFields {
            name: &self.name,
            model: &self.model,
            primary_code: &self.tok_code,
            secondary_code: &self.oem_code,
        });

        CatalogItem {
            price_with_vat: format_price(&self.raw_price_with_vat),
            price_without_vat: format_price(&self.raw_price_without_vat),
            id: self.id,
            name: self.name,
            tok_code: self.tok_code,
            oem_code: self.oem_code,
            model: self.model,
            brand: self.brand,
            raw_price_with_vat: self.raw_price_with_vat,
            raw_price_without_vat: self.raw_price_without_vat,
            stock: self.stock,
            search,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::parse_records;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_from_row_mongolian_headers() {
        let item = CatalogItem::from_row(&row(&[
            ("Барааны нэр", " Prius бампер "),
            ("TOK код", "TOK123"),
            ("OEM код", "OEM456"),
            ("Машин загвар", "Prius 30"),
            ("Бөөний үнэ (НӨАТ орсон үнэ)", "125000"),
            ("Үнэ (НӨАТ-гүй)", "асуух"),
            ("Тоо", "4"),
            ("Брэнд", "Toyota"),
        ]));

        assert_eq!(item.name, "Prius бампер");
        assert_eq!(item.tok_code, "TOK123");
        assert_eq!(item.oem_code, "OEM456");
        assert_eq!(item.model, "Prius 30");
        assert_eq!(item.price_with_vat, "125,000 ₮");
        assert_eq!(item.raw_price_with_vat, "125000");
        assert_eq!(item.price_without_vat, "асуух");
        assert_eq!(item.stock, "4");
        assert_eq!(item.brand, "Toyota");
        assert_eq!(item.id, "TOK123");
    }

    #[test]
    fn test_from_row_english_headers() {
        let item = CatalogItem::from_row(&row(&[
            ("Product Name", "Harrier mirror"),
            ("tokCode", "H-77"),
            ("Model", "Harrier"),
            ("Stock", "1"),
            ("id", "row-9"),
        ]));

        assert_eq!(item.name, "Harrier mirror");
        assert_eq!(item.tok_code, "H-77");
        assert_eq!(item.oem_code, "");
        assert_eq!(item.id, "row-9");
    }

    #[test]
    fn test_first_non_empty_alias_wins() {
        let item = CatalogItem::from_row(&row(&[
            ("Барааны нэр", "  "),
            ("Нэр", "Толь"),
            ("name", "Mirror"),
        ]));
        assert_eq!(item.name, "Толь");
    }

    #[test]
    fn test_header_keys_trimmed() {
        let records = parse_records(" OEM \n90919\n");
        let item = CatalogItem::from_row(&records[0]);
        assert_eq!(item.oem_code, "90919");
        assert_eq!(item.id, "90919");
    }

    #[test]
    fn test_duplicate_headers_pick_first_filled_column() {
        for _ in 0..8 {
            let records = parse_records("Нэр, Нэр ,TOK код\nБампер,Толь,T1\n,Толь,T2\n");
            assert_eq!(CatalogItem::from_row(&records[0]).name, "Бампер");
            assert_eq!(CatalogItem::from_row(&records[1]).name, "Толь");
        }
    }

    #[test]
    fn test_id_falls_back_to_uuid() {
        let item = CatalogItem::from_row(&row(&[("Нэр", "Шүүлтүүр")]));
        assert!(Uuid::parse_str(&item.id).is_ok());
    }

    #[test]
    fn test_identity_and_completeness() {
        let empty = CatalogItem::from_row(&row(&[("Тоо", "3")]));
        assert!(!empty.has_identity());

        let code_only = CatalogItem::from_row(&row(&[("OEM", "X1")]));
        assert!(code_only.has_identity());
        assert!(!code_only.is_complete());

        let full = CatalogItem::builder("1", "Бампер")
            .tok_code("T")
            .oem_code("O")
            .model("Prius")
            .build();
        assert!(full.is_complete());
    }

    #[test]
    fn test_search_tokens() {
        let item = CatalogItem::builder("1", "Prius бампер")
            .tok_code("TOK123")
            .oem_code("OEM456")
            .build();

        let tokens = item.search_tokens();
        assert!(tokens.contains("bamper"));
        assert!(tokens.contains("tok123"));
        assert_eq!(&tokens, item.search_index().tokens());
    }

    #[test]
    fn test_summary_price_fallback() {
        let item = CatalogItem::builder("1", "Фар")
            .prices("", "")
            .build();
        assert_eq!(item.summary().price_with_vat, "");

        let item = CatalogItem::builder("2", "Фар")
            .prices("89000", "")
            .build();
        let summary = item.summary();
        assert_eq!(summary.price_with_vat, "89,000 ₮");

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"priceWithVat\":\"89,000 ₮\""));
        assert!(json.contains("\"tokCode\""));
    }
}
