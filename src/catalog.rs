//! Keyword Catalog
//!
//! Fixed set of keywords users can follow, grouped by section.

use serde::Serialize;
use serde_json::{Map, Value};

/// Sections in display order, each with its keywords.
pub const SECTIONS: &[(&str, &[&str])] = &[
    (
        "main",
        &[
            "Politics",
            "Business",
            "Technology",
            "Sports",
            "Entertainment",
            "Health",
            "Science",
            "Education",
            "Environment",
            "World News",
            "National News",
            "Local News",
        ],
    ),
    (
        "technology",
        &[
            "AI",
            "Startups",
            "Cybersecurity",
            "Mobile",
            "Gadgets",
            "Software",
            "Internet",
            "Robotics",
            "Space Tech",
            "Data Science",
        ],
    ),
    (
        "sports",
        &[
            "Cricket",
            "Football",
            "Olympics",
            "Tennis",
            "Badminton",
            "Kabaddi",
            "IPL",
            "World Cup",
            "Player Transfer",
            "Match Results",
        ],
    ),
    (
        "entertainment",
        &[
            "Bollywood",
            "Hollywood",
            "OTT",
            "Movies",
            "Web Series",
            "Celebrity News",
            "Music",
            "TV Shows",
            "Trailers",
            "Awards",
        ],
    ),
    (
        "business",
        &[
            "Stock Market",
            "Cryptocurrency",
            "Economy",
            "Banking",
            "Inflation",
            "Budget",
            "Startups Funding",
            "Real Estate",
            "Trade",
            "Companies",
        ],
    ),
    (
        "health",
        &[
            "COVID-19",
            "Fitness",
            "Nutrition",
            "Mental Health",
            "Medicine",
            "Diseases",
            "Vaccines",
            "Hospitals",
            "Yoga",
            "Lifestyle",
        ],
    ),
    (
        "trending",
        &[
            "Breaking News",
            "Latest Updates",
            "Viral",
            "Trending",
            "Live",
            "Exclusive",
            "Analysis",
            "Opinion",
            "Headlines",
            "Top Stories",
        ],
    ),
];

/// Every keyword across all sections, in section order.
pub fn all_keywords() -> Vec<&'static str> {
    SECTIONS
        .iter()
        .flat_map(|(_, keywords)| keywords.iter().copied())
        .collect()
}

pub fn is_known_keyword(keyword: &str) -> bool {
    SECTIONS
        .iter()
        .any(|(_, keywords)| keywords.contains(&keyword))
}

/// Body of GET /preferences/available
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordCatalog {
    /// Section name to keywords
    pub categories: Map<String, Value>,
    pub all_keywords: Vec<&'static str>,
}

impl KeywordCatalog {
    pub fn new() -> Self {
        let categories = SECTIONS
            .iter()
            .map(|(name, keywords)| (name.to_string(), Value::from(keywords.to_vec())))
            .collect();
        Self {
            categories,
            all_keywords: all_keywords(),
        }
    }
}

impl Default for KeywordCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_keywords_flattens_sections() {
        let all = all_keywords();
        let expected: usize = SECTIONS.iter().map(|(_, k)| k.len()).sum();
        assert_eq!(all.len(), expected);
        assert_eq!(all.first(), Some(&"Politics"));
        assert_eq!(all.last(), Some(&"Top Stories"));
    }

    #[test]
    fn test_known_keyword() {
        assert!(is_known_keyword("Cybersecurity"));
        assert!(is_known_keyword("IPL"));
        assert!(!is_known_keyword("cybersecurity"));
        assert!(!is_known_keyword("Gardening"));
    }

    #[test]
    fn test_catalog_serializes_sections() {
        let value = serde_json::to_value(KeywordCatalog::new()).unwrap();
        assert_eq!(value["categories"]["sports"][0], "Cricket");
        assert_eq!(value["allKeywords"].as_array().unwrap().len(), all_keywords().len());
    }
}
