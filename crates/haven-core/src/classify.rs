//! Keyword-based classification of free-text search results.

use crate::ResourceCategory;

/// Only the first ten keywords of each category are consulted. Checking the
/// full list catches more matches but is slower and noisier on generic
/// words; ten keeps classification cheap and reproducible.
const MAX_KEYWORDS_CHECKED: usize = 10;

/// Assigns a category to a free-text search result.
///
/// The keyword matcher is approximate by nature, so the engine takes this
/// as a seam: a stricter or model-based matcher can be swapped in without
/// touching the discovery logic.
pub trait Classifier: Send + Sync {
    /// Classifies a result given the original user query and the result's
    /// display name. Must be pure and total: same inputs, same category,
    /// never an error.
    fn classify(&self, query: &str, name: &str) -> ResourceCategory;
}

/// Default classifier: case-insensitive substring match over the first ten
/// keywords of each category, walking the catalog in declaration order.
/// The first category with any keyword contained in the query or the name
/// wins; the catch-all is returned when nothing matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl Classifier for KeywordClassifier {
    fn classify(&self, query: &str, name: &str) -> ResourceCategory {
        let query = query.to_lowercase();
        let name = name.to_lowercase();

        for category in ResourceCategory::catalog() {
            if category == ResourceCategory::All {
                continue;
            }
            let matched = category
                .search_keywords()
                .iter()
                .take(MAX_KEYWORDS_CHECKED)
                .any(|kw| query.contains(kw) || name.contains(kw));
            if matched {
                return category;
            }
        }

        ResourceCategory::All
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_query_text() {
        let c = KeywordClassifier;
        assert_eq!(c.classify("food pantry near me", ""), ResourceCategory::Food);
    }

    #[test]
    fn classifies_by_result_name_when_query_is_generic() {
        let c = KeywordClassifier;
        assert_eq!(
            c.classify("help near me", "Atlanta Community Food Bank"),
            ResourceCategory::Food
        );
    }

    #[test]
    fn falls_back_to_catch_all() {
        let c = KeywordClassifier;
        assert_eq!(c.classify("zzzz", "Qqqq"), ResourceCategory::All);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let c = KeywordClassifier;
        assert_eq!(
            c.classify("", "ATLANTA COMMUNITY FOOD BANK"),
            ResourceCategory::Food
        );
    }

    #[test]
    fn catalog_order_breaks_ties() {
        // "shelter" appears in Shelter's keywords and in later categories'
        // phrases ("women's shelter", "youth shelter"); Shelter is declared
        // first so it wins.
        let c = KeywordClassifier;
        assert_eq!(
            c.classify("shelter", "Women's Shelter of Fulton County"),
            ResourceCategory::Shelter
        );
    }

    #[test]
    fn keywords_past_the_first_ten_are_ignored() {
        // "meals on wheels" is Food's 12th keyword and matches nothing in
        // any category's first ten, so it must fall through to the catch-all.
        let c = KeywordClassifier;
        assert_eq!(c.classify("meals on wheels", ""), ResourceCategory::All);
    }

    #[test]
    fn classification_is_deterministic() {
        let c = KeywordClassifier;
        let first = c.classify("housing help", "Hope Center");
        for _ in 0..10 {
            assert_eq!(c.classify("housing help", "Hope Center"), first);
        }
    }
}
