//! Synonym groups for auto-part and car-model vocabulary.
//!
//! A group lists spellings that mean the same thing: English names,
//! Mongolian and Russian Cyrillic, Latin transliterations and common
//! customer misspellings or slang (`gpr` for a bumper, `p20` for a Prius).

use crate::normalize::normalize;
use crate::transliterate::TokenSet;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Built-in groups. Entries are normalized when the table is built.
const BUILTIN_GROUPS: &[&[&str]] = &[
    &["motor", "мотор", "хөдөлгүүр", "engine", "motoor", "hodolguur"],
    &["prius", "приус", "p20", "p30", "pruis", "pius", "prus"],
    &["harrier", "харриер", "harier", "harer"],
    &["bumper", "бампер", "гупер", "bamper", "gpr", "guper", "gvr"],
    &["headlight", "headlamp", "фар", "толгойн гэрэл"],
    &["mirror", "толь", "зөөгч толь", "зөөгч", "мирор"],
    &["door", "хаалга", "door panel", "хаалганы хавтан"],
    &["hood", "капот", "hood panel", "капот хавтан"],
    &["fender", "fender panel", "хаалт", "хаалт хавтан"],
    &[
        "brake", "тоормос", "тормоз", "тоорм", "toormos", "toorm", "brakes", "тоормосны",
        "тоормосын", "тормозный", "тормозные",
    ],
    &[
        "brake pad", "brake pads", "колодок", "колодка", "тоормосны колодок",
        "тормозные колодки", "kolodok", "kolodka", "pad", "pads", "колодки",
    ],
    &[
        "brake disc", "brake disk", "диск", "тоормосны диск", "disc", "disk", "rotor", "дискийг",
    ],
    &["brake shoe", "тоормосны гутал", "shoe", "shoes"],
    &[
        "suspension", "түдгэлзүүлэлт", "амортизатор", "amortizator", "shock absorber", "shock",
        "амортизаторын",
    ],
    &[
        "steering", "жолоодлого", "жолооны", "steering wheel", "joloodlogo", "joloonii",
        "жолоодлогын",
    ],
    &["tie rod", "рулевая тяга", "рулын татлага", "тяга"],
    &[
        "transmission", "хурдны хайрцаг", "коробка", "gearbox", "gear box", "hurdn haircag",
        "хурдны", "хурдны хайрцагны",
    ],
    &["clutch", "сэгсрэгч", "сцепление", "segsregch", "сэгсрэгчийн"],
    &["axle", "тэнхлэг", "ось", "tenkhleg", "тэнхлэгийн"],
    &["driveshaft", "drive shaft", "хөтлөгч тэнхлэг", "карданный вал"],
    &[
        "filter", "шүүлтүүр", "фильтр", "shuultur", "air filter", "oil filter", "fuel filter",
        "шүүлтүүрийн",
    ],
    &["oil", "тос", "масло", "engine oil", "motor oil", "тосны"],
    &["coolant", "хөргөлтийн шингэн", "антифриз", "antifreeze", "хөргөлтийн"],
    &[
        "windshield", "windscreen", "цонх", "урд цонх", "лобовое стекло", "tsonh", "glass",
        "цонхны",
    ],
    &["spoiler", "спойлер", "сарьсан багваахай"],
    &["grille", "радиатор сүлжээ", "радиаторная решетка", "grid", "радиаторын"],
    &["roof", "дээвэр", "крыша", "deever", "дээврийн"],
];

static BUILTIN: Lazy<SynonymTable> = Lazy::new(SynonymTable::builtin);

/// Normalized synonym groups with a reverse index from term to group.
#[derive(Debug, Clone, Default)]
pub struct SynonymTable {
    groups: Vec<Vec<String>>,
    index: HashMap<String, Vec<usize>>,
}

impl SynonymTable {
    /// Build a table from arbitrary term groups.
    ///
    /// Every term goes through [`normalize`]; terms that normalize to an
    /// empty string are dropped, as are duplicates inside a group.
    pub fn new<G, T>(groups: G) -> Self
    where
        G: IntoIterator,
        G::Item: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut table = Self::default();

        for group in groups {
            let mut normalized: Vec<String> = Vec::new();
            for term in group {
                let term = normalize(term.as_ref());
                if !term.is_empty() && !normalized.contains(&term) {
                    normalized.push(term);
                }
            }
            if normalized.is_empty() {
                continue;
            }

            let group_id = table.groups.len();
            for term in &normalized {
                let ids = table.index.entry(term.clone()).or_default();
                if !ids.contains(&group_id) {
                    ids.push(group_id);
                }
            }
            table.groups.push(normalized);
        }

        table
    }

    /// Build the table of built-in auto-part groups.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_GROUPS.iter().map(|group| group.iter().copied()))
    }

    /// Process-wide built-in table, built on first use and never mutated.
    pub fn shared() -> &'static SynonymTable {
        &BUILTIN
    }

    /// Number of groups in the table.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the table has no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Normalized groups, in definition order.
    pub fn groups(&self) -> impl Iterator<Item = &[String]> {
        self.groups.iter().map(Vec::as_slice)
    }

    /// Terms interchangeable with `token`, excluding `token` itself.
    ///
    /// Empty when the token belongs to no group.
    pub fn synonyms_of(&self, token: &str) -> TokenSet {
        let token = normalize(token);
        let Some(ids) = self.index.get(&token) else {
            return TokenSet::new();
        };

        ids.iter()
            .flat_map(|&id| self.groups[id].iter())
            .filter(|term| **term != token)
            .cloned()
            .collect()
    }

    /// Whether two tokens are equal after normalization or share a group.
    pub fn are_synonyms(&self, a: &str, b: &str) -> bool {
        if a == b {
            return true;
        }

        let a = normalize(a);
        let b = normalize(b);
        if a == b {
            return true;
        }

        match (self.index.get(&a), self.index.get(&b)) {
            (Some(left), Some(right)) => left.iter().any(|id| right.contains(id)),
            _ => false,
        }
    }

    /// Union of `tokens` and every synonym of every token.
    ///
    /// Groups are closed, so expanding an expanded set adds nothing.
    pub fn expand_tokens<'a, I>(&self, tokens: I) -> TokenSet
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut expanded = TokenSet::new();
        for token in tokens {
            expanded.extend(self.synonyms_of(token));
            expanded.insert(token.clone());
        }
        expanded
    }
}
