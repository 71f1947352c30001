//! Request Descriptor Module
//!
//! Turns a logical news request into the exact upstream URL. The URL doubles
//! as the cache key, so parameter order is fixed and every field that
//! changes the upstream answer is part of it.

use std::fmt;
use std::str::FromStr;

use url::form_urlencoded::byte_serialize;

/// Default page size when the client sends none
pub const DEFAULT_PAGE_SIZE: u32 = 40;
/// Default page when the client sends none
pub const DEFAULT_PAGE: u32 = 1;
/// Default free-text query
pub const DEFAULT_QUERY: &str = "news";

// == Category ==
/// Headline categories supported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    Business,
    Entertainment,
    General,
    Health,
    Science,
    Sports,
    Technology,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Business,
        Category::Entertainment,
        Category::General,
        Category::Health,
        Category::Science,
        Category::Sports,
        Category::Technology,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Business => "business",
            Category::Entertainment => "entertainment",
            Category::General => "general",
            Category::Health => "health",
            Category::Science => "science",
            Category::Sports => "sports",
            Category::Technology => "technology",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| format!("Unknown category '{}'", s))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Country Code ==
/// Two-letter lowercase country code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CountryCode(String);

impl CountryCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CountryCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(code.to_ascii_lowercase()))
        } else {
            Err(format!("Country code must be two letters, got '{}'", s))
        }
    }
}

// == News Query ==
/// The three shapes of news request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsQuery {
    /// Keyword search over all articles
    Search { query: String },
    /// Top headlines for a category
    Category { category: Category },
    /// Top headlines for a country
    Country { country: CountryCode },
}

impl NewsQuery {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            NewsQuery::Search { .. } => "search",
            NewsQuery::Category { .. } => "category",
            NewsQuery::Country { .. } => "country",
        }
    }
}

// == News Request ==
/// A logical news request with pagination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsRequest {
    pub query: NewsQuery,
    pub page_size: u32,
    pub page: u32,
}

impl NewsRequest {
    pub fn new(query: NewsQuery) -> Self {
        Self {
            query,
            page_size: DEFAULT_PAGE_SIZE,
            page: DEFAULT_PAGE,
        }
    }

    pub fn search(query: impl Into<String>) -> Self {
        Self::new(NewsQuery::Search {
            query: query.into(),
        })
    }

    pub fn category(category: Category) -> Self {
        Self::new(NewsQuery::Category { category })
    }

    pub fn country(country: CountryCode) -> Self {
        Self::new(NewsQuery::Country { country })
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }
}

// == Descriptor ==
/// Fully resolved upstream URL for one request.
///
/// The credential is appended last, so the descriptor (and therefore the
/// cache key) is specific to the configured API key. Use [`Descriptor::redacted`]
/// for anything that is logged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Descriptor {
    url: String,
    key_offset: usize,
}

impl Descriptor {
    /// Resolves `request` against `base_url` with the given credential.
    pub fn resolve(base_url: &str, api_key: &str, request: &NewsRequest) -> Self {
        let base = base_url.trim_end_matches('/');
        let mut url = match &request.query {
            NewsQuery::Search { query } => {
                format!("{}/everything?q={}", base, encode(query))
            }
            NewsQuery::Category { category } => {
                format!("{}/top-headlines?category={}&language=en", base, category)
            }
            NewsQuery::Country { country } => {
                format!("{}/top-headlines?country={}", base, country.as_str())
            }
        };
        url.push_str(&format!(
            "&pageSize={}&page={}&apiKey=",
            request.page_size, request.page
        ));
        let key_offset = url.len();
        url.push_str(&encode(api_key));

        Self { url, key_offset }
    }

    /// The URL to request, also used as cache key.
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// The URL with the credential masked.
    pub fn redacted(&self) -> String {
        format!("{}***", &self.url[..self.key_offset])
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}

fn encode(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BASE: &str = "https://newsapi.org/v2";

    fn country(code: &str) -> CountryCode {
        code.parse().unwrap()
    }

    #[test]
    fn test_search_descriptor() {
        let req = NewsRequest::search("election results").with_page(2);
        let d = Descriptor::resolve(BASE, "k", &req);
        assert_eq!(
            d.as_str(),
            "https://newsapi.org/v2/everything?q=election+results&pageSize=40&page=2&apiKey=k"
        );
    }

    #[test]
    fn test_search_query_is_encoded() {
        let req = NewsRequest::search("a&b=c?");
        let d = Descriptor::resolve(BASE, "k", &req);
        assert!(d.as_str().contains("q=a%26b%3Dc%3F&"));
    }

    #[test]
    fn test_category_descriptor() {
        let req = NewsRequest::category(Category::Science).with_page_size(10);
        let d = Descriptor::resolve(BASE, "k", &req);
        assert_eq!(
            d.as_str(),
            "https://newsapi.org/v2/top-headlines?category=science&language=en&pageSize=10&page=1&apiKey=k"
        );
    }

    #[test]
    fn test_country_descriptor() {
        let req = NewsRequest::country(country("US")).with_page_size(20);
        let d = Descriptor::resolve(&format!("{}/", BASE), "k", &req);
        assert_eq!(
            d.as_str(),
            "https://newsapi.org/v2/top-headlines?country=us&pageSize=20&page=1&apiKey=k"
        );
    }

    #[test]
    fn test_descriptor_depends_on_credential() {
        let req = NewsRequest::search("news");
        let a = Descriptor::resolve(BASE, "key-a", &req);
        let b = Descriptor::resolve(BASE, "key-b", &req);
        assert_ne!(a, b);
    }

    #[test]
    fn test_redacted_hides_credential() {
        let d = Descriptor::resolve(BASE, "super-secret", &NewsRequest::search("news"));
        let shown = d.redacted();
        assert!(!shown.contains("super-secret"));
        assert!(shown.ends_with("apiKey=***"));
        assert_eq!(d.to_string(), shown);
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("Sports".parse::<Category>(), Ok(Category::Sports));
        assert_eq!(" health ".parse::<Category>(), Ok(Category::Health));
        assert!("politics".parse::<Category>().is_err());
        assert_eq!(Category::default(), Category::Business);
    }

    #[test]
    fn test_country_parse() {
        assert_eq!(country("GB").as_str(), "gb");
        assert!("usa".parse::<CountryCode>().is_err());
        assert!("u1".parse::<CountryCode>().is_err());
        assert!("".parse::<CountryCode>().is_err());
    }

    fn query_strategy() -> impl Strategy<Value = NewsQuery> {
        prop_oneof![
            ".{0,30}".prop_map(|query| NewsQuery::Search { query }),
            prop::sample::select(Category::ALL.to_vec())
                .prop_map(|category| NewsQuery::Category { category }),
            "[a-z]{2}".prop_map(|c| NewsQuery::Country {
                country: c.parse().unwrap()
            }),
        ]
    }

    proptest! {
        #[test]
        fn prop_descriptor_is_deterministic(
            query in query_strategy(),
            page_size in 1u32..100,
            page in 1u32..1000,
        ) {
            let req = NewsRequest { query, page_size, page };
            let first = Descriptor::resolve(BASE, "k", &req);
            let second = Descriptor::resolve(BASE, "k", &req.clone());
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_distinct_pages_give_distinct_keys(
            query in query_strategy(),
            page_size in 1u32..100,
            page_a in 1u32..1000,
            page_b in 1u32..1000,
        ) {
            prop_assume!(page_a != page_b);
            let a = NewsRequest { query: query.clone(), page_size, page: page_a };
            let b = NewsRequest { query, page_size, page: page_b };
            let da = Descriptor::resolve(BASE, "k", &a);
            let db = Descriptor::resolve(BASE, "k", &b);
            prop_assert_ne!(da.as_str(), db.as_str());
        }
    }
}
