//! Cyrillic Mongolian to Latin transliteration.
//!
//! Customers often type Mongolian in Latin letters ("SMS style"), while the
//! catalog is written in Cyrillic. Token variants are produced in both
//! scripts so either side can match the other.

use crate::normalize::normalize;
use std::collections::BTreeSet;

/// Ordered, deduplicated set of search tokens.
pub type TokenSet = BTreeSet<String>;

/// Latin rendering of a lowercase Cyrillic character, if it has one.
///
/// Vowel length and rounding are lost on purpose: ө, ү and у all map to `u`.
fn latin_for(c: char) -> Option<&'static str> {
    let latin = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "j",
        'з' => "z",
        'и' | 'й' => "i",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'ө' | 'у' | 'ү' => "u",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' | 'щ' => "sh",
        'ъ' | 'ь' => "",
        'ы' => "y",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    };
    Some(latin)
}

/// Transliterate Cyrillic characters to Latin, one character at a time.
///
/// Characters outside the table (Latin, digits, uppercase Cyrillic,
/// punctuation) are copied unchanged.
pub fn transliterate(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match latin_for(c) {
            Some(latin) => out.push_str(latin),
            None => out.push(c),
        }
    }
    out
}

/// Build the canonical token set for a piece of text.
///
/// The union of the normalized tokens and the tokens of their
/// transliteration. Used for queries and catalog items alike.
pub fn build_token_variants(text: &str) -> TokenSet {
    let normalized = normalize(text);
    let transliterated = transliterate(&normalized);

    normalized
        .split_whitespace()
        .chain(transliterated.split_whitespace())
        .map(str::to_string)
        .collect()
}
