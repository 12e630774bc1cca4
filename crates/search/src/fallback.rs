//! Suggestions for queries that match nothing.
//!
//! When ranking comes back empty the caller can still point the customer
//! at the car model they mentioned, or list the part categories the
//! catalog carries.

use crate::index::Searchable;
use crate::normalize::normalize;
use once_cell::sync::Lazy;
use regex::Regex;

struct LabelPattern {
    pattern: Regex,
    label: &'static str,
}

fn label(pattern: &str, label: &'static str) -> LabelPattern {
    LabelPattern {
        pattern: Regex::new(pattern).unwrap(),
        label,
    }
}

/// Part categories, detected from item names.
static CATEGORY_PATTERNS: Lazy<Vec<LabelPattern>> = Lazy::new(|| {
    vec![
        label(r"(?i)бампер|bumper|bamper", "Бампер (Bumper)"),
        label(r"(?i)фар|headlight|headlamp|lamp", "Фар (Headlight)"),
        label(r"(?i)толь|mirror", "Толь (Mirror)"),
        label(r"(?i)хөдөлгүүр|мотор|motor|engine", "Хөдөлгүүр (Engine)"),
        label(r"(?i)хаалга|door", "Хаалга (Door)"),
        label(r"(?i)капот|hood", "Капот (Hood)"),
        label(r"(?i)хавтан|panel|fender", "Хавтан (Panel)"),
        label(r"(?i)тоормос|тормоз|brake", "Тоормос (Brake)"),
        label(r"(?i)колодок|колодка|brake pad|pad", "Тоормосны колодок (Brake Pads)"),
        label(r"(?i)диск|disc|disk|rotor", "Тоормосны диск (Brake Disc)"),
        label(r"(?i)амортизатор|suspension|shock", "Түдгэлзүүлэлт (Suspension)"),
        label(r"(?i)жолоодлого|steering", "Жолоодлого (Steering)"),
        label(r"(?i)шүүлтүүр|filter|фильтр", "Шүүлтүүр (Filter)"),
        label(r"(?i)сэлбэг|part", "Бусад сэлбэг (Other parts)"),
    ]
});

/// Car models customers ask about, with their common spellings.
static MODEL_PATTERNS: Lazy<Vec<LabelPattern>> = Lazy::new(|| {
    vec![
        label(r"(?i)prius|приус|pruis|pius|prus|p20|p30", "Prius"),
        label(r"(?i)harrier|харриер|harier|harer", "Harrier"),
        label(r"(?i)camry|камри", "Camry"),
        label(r"(?i)corolla|королла", "Corolla"),
        label(r"(?i)rav4|рав4", "RAV4"),
        label(r"(?i)land\s*cruiser|ленд\s*крузер|landcruiser", "Land Cruiser"),
        label(r"(?i)hilux|хайлакс", "Hilux"),
        label(r"(?i)alphard|альфард", "Alphard"),
        label(r"(?i)voxy|вокси", "Voxy"),
        label(r"(?i)noah|ноах", "Noah"),
        label(r"(?i)wish|виш", "Wish"),
        label(r"(?i)crown|краун", "Crown"),
        label(r"(?i)mark\s*x|маркх|markx", "Mark X"),
        label(r"(?i)estima|эстима", "Estima"),
    ]
});

/// Category labels present among item names, in first-seen order.
pub fn extract_categories<T: Searchable>(items: &[T]) -> Vec<&'static str> {
    let mut found: Vec<&'static str> = Vec::new();

    for item in items {
        let name = item.search_index().name();
        for category in CATEGORY_PATTERNS.iter() {
            if category.pattern.is_match(name) && !found.contains(&category.label) {
                found.push(category.label);
            }
        }
    }

    found
}

/// Car model names mentioned in a query.
pub fn extract_model_names(query: &str) -> Vec<&'static str> {
    if query.is_empty() {
        return Vec::new();
    }

    let normalized = normalize(query);
    MODEL_PATTERNS
        .iter()
        .filter(|model| model.pattern.is_match(&normalized) || model.pattern.is_match(query))
        .map(|model| model.label)
        .collect()
}

/// Items whose model or name contains the given model name.
///
/// Comparison is on normalized text; catalog order is kept.
pub fn find_by_model<'a, T: Searchable>(model_name: &str, items: &'a [T], limit: usize) -> Vec<&'a T> {
    let wanted = normalize(model_name);
    if wanted.is_empty() {
        return Vec::new();
    }

    items
        .iter()
        .filter(|item| {
            let index = item.search_index();
            normalize(index.model()).contains(&wanted) || normalize(index.name()).contains(&wanted)
        })
        .take(limit)
        .collect()
}
