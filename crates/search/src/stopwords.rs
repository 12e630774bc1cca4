//! Greetings and filler words customers wrap around a part request.
//!
//! "Сайн байна уу? p30 бампер байгаа юу" should search for `p30 бампер`.
//! A query made only of such words has nothing to search for.

use crate::normalize::tokenize;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Normalized words that carry no product meaning.
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // Mongolian greetings and question particles
        "сайн", "сайнуу", "байна", "бна", "бну", "уу", "үү", "юу", "вэ", "бэ", "байгаа",
        "байх", "байдаг", "мэнд", "мэндээ", "өглөөний", "оройн", "баярлалаа", "танай",
        "надад", "хэрэгтэй", "асуух", "гэсэн", "юм",
        // Latin spellings of the same
        "sain", "sn", "snu", "baina", "bn", "bnu", "uu", "yu", "baigaa", "bgaa", "bh",
        "mend", "bayarlalaa", "hergtei", "heregtei",
        // English
        "hello", "hi", "hey", "please", "thanks", "thank", "you",
    ]
    .into_iter()
    .collect()
});

/// Whether a normalized token is a greeting or filler word.
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

/// Normalized query with greetings and filler words removed.
///
/// Returns an empty string when nothing searchable is left.
pub fn strip_stopwords(query: &str) -> String {
    tokenize(query)
        .into_iter()
        .filter(|token| !is_stopword(token))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{SearchFields, SearchIndex};
    use crate::relevance::Matcher;

    #[test]
    fn test_greeting_only_queries_are_empty() {
        assert_eq!(strip_stopwords("Сайн байна уу?"), "");
        assert_eq!(strip_stopwords("sain baina uu"), "");
        assert_eq!(strip_stopwords("Hello!"), "");
        assert_eq!(strip_stopwords("   "), "");
    }

    #[test]
    fn test_part_words_survive() {
        assert_eq!(strip_stopwords("Сайн байна уу? p30 бампер байгаа юу"), "p30 бампер");
        assert_eq!(strip_stopwords("TOK123 bnu"), "tok123");
        assert_eq!(strip_stopwords("Harrier фар"), "harrier фар");
    }

    #[test]
    fn test_is_stopword() {
        assert!(is_stopword("уу"));
        assert!(is_stopword("sain"));
        assert!(!is_stopword("бампер"));
        assert!(!is_stopword("prius"));
        assert!(!is_stopword("Сайн"));
    }

    #[test]
    fn test_greeting_query_ranks_nothing() {
        let catalog = vec![SearchIndex::new(SearchFields {
            name: "Harrier фар зүүн",
            model: "Harrier",
            ..SearchFields::default()
        })];
        let matcher = Matcher::default();

        // Unfiltered, "сайн" is within edit distance of "фар".
        assert!(!matcher.rank("Сайн байна уу?", &catalog, None).is_empty());
        assert!(matcher.rank(&strip_stopwords("Сайн байна уу?"), &catalog, None).is_empty());
        assert_eq!(
            matcher.rank(&strip_stopwords("Сайн байна уу? harrier фар"), &catalog, None).len(),
            1
        );
    }
}
