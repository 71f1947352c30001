//! Request DTOs for the news proxy API
//!
//! Query strings are accepted leniently: repeated parameters keep their first
//! value, and paging values read their leading digits, falling back to the
//! defaults when there are none or they come to zero.

use std::collections::HashMap;

use url::form_urlencoded;

use crate::error::ApiError;
use crate::upstream::{
    Category, CountryCode, NewsRequest, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, DEFAULT_QUERY,
};

// == Query Params ==
/// Decoded query string keeping the first value of each parameter.
#[derive(Debug, Clone, Default)]
pub struct QueryParams(HashMap<String, String>);

impl QueryParams {
    /// Decodes a raw query string. Never fails; malformed pairs decode as-is.
    pub fn parse(raw: Option<&str>) -> Self {
        let mut values = HashMap::new();
        for (name, value) in form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
            values
                .entry(name.into_owned())
                .or_insert_with(|| value.into_owned());
        }
        Self(values)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    fn owned(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }
}

/// Paging parameters shared by every news endpoint.
#[derive(Debug, Clone, Default)]
pub struct PageParams {
    pub page_size: Option<String>,
    pub page: Option<String>,
}

impl PageParams {
    pub fn from_query(query: &QueryParams) -> Self {
        Self {
            page_size: query.owned("pageSize"),
            page: query.owned("page"),
        }
    }

    fn apply(&self, request: NewsRequest) -> NewsRequest {
        request
            .with_page_size(parse_positive(self.page_size.as_deref(), DEFAULT_PAGE_SIZE))
            .with_page(parse_positive(self.page.as_deref(), DEFAULT_PAGE))
    }
}

/// Query for GET /all-news
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    pub q: Option<String>,
    pub paging: PageParams,
}

impl SearchParams {
    pub fn from_query(query: &QueryParams) -> Self {
        Self {
            q: query.owned("q"),
            paging: PageParams::from_query(query),
        }
    }

    pub fn into_request(self) -> NewsRequest {
        let query = self
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .unwrap_or(DEFAULT_QUERY);
        self.paging.apply(NewsRequest::search(query))
    }
}

/// Query for GET /top-headlines
#[derive(Debug, Clone, Default)]
pub struct HeadlineParams {
    pub category: Option<String>,
    pub paging: PageParams,
}

impl HeadlineParams {
    pub fn from_query(query: &QueryParams) -> Self {
        Self {
            category: query.owned("category"),
            paging: PageParams::from_query(query),
        }
    }

    pub fn into_request(self) -> Result<NewsRequest, ApiError> {
        let category = match self.category.as_deref().filter(|c| !c.is_empty()) {
            Some(raw) => raw.parse::<Category>().map_err(ApiError::InvalidRequest)?,
            None => Category::default(),
        };
        Ok(self.paging.apply(NewsRequest::category(category)))
    }
}

/// Builds the request for GET /country/:iso
pub fn country_request(iso: &str, paging: &PageParams) -> Result<NewsRequest, ApiError> {
    let country = iso.parse::<CountryCode>().map_err(ApiError::InvalidRequest)?;
    Ok(paging.apply(NewsRequest::country(country)))
}

/// Reads the leading digits of `raw` (`"20abc"` is 20). No digits, zero, a
/// minus sign, or overflow fall back to `default`.
fn parse_positive(raw: Option<&str>, default: u32) -> u32 {
    raw.map(|v| {
        let v = v.trim_start();
        v.strip_prefix('+')
            .unwrap_or(v)
            .chars()
            .take_while(char::is_ascii_digit)
            .collect::<String>()
    })
    .and_then(|digits| digits.parse::<u32>().ok())
    .filter(|n| *n > 0)
    .unwrap_or(default)
}
