//! Pagination links reported by GitHub list endpoints.
//!
//! GitHub advertises neighbouring pages through the `Link` response header.
//! The facade only reports the page numbers; walking pages is left to the
//! caller.

use http::HeaderMap;
use http::header::LINK;
use url::Url;

/// Page numbers parsed from a `Link` response header.
///
/// # Example
///
/// ```
/// use forge_facade::github::pagination::PageLinks;
///
/// let links = PageLinks::default().with_next(Some(3)).with_last(Some(5));
/// assert!(links.has_next());
/// assert!(!links.is_last_page());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageLinks {
    next: Option<u32>,
    prev: Option<u32>,
    first: Option<u32>,
    last: Option<u32>,
}

impl PageLinks {
    /// Links for a response without a `Link` header.
    pub const EMPTY: Self = Self {
        next: None,
        prev: None,
        first: None,
        last: None,
    };

    /// Parses the `Link` header of a response.
    ///
    /// Missing or malformed headers produce empty links rather than an error.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .map(Self::parse)
            .unwrap_or_default()
    }

    /// Parses a raw `Link` header value such as
    /// `<https://api.github.com/...?page=2>; rel="next"`.
    #[must_use]
    pub fn parse(header: &str) -> Self {
        let mut links = Self::default();

        for entry in header.split(',') {
            let mut parts = entry.split(';');
            let Some(target) = parts.next() else {
                continue;
            };
            let Some(page) = page_number(target) else {
                continue;
            };

            for parameter in parts {
                match relation(parameter) {
                    Some("next") => links.next = Some(page),
                    Some("prev") => links.prev = Some(page),
                    Some("first") => links.first = Some(page),
                    Some("last") => links.last = Some(page),
                    _ => {}
                }
            }
        }

        links
    }

    /// Sets the next page number.
    #[must_use]
    pub const fn with_next(mut self, next: Option<u32>) -> Self {
        self.next = next;
        self
    }

    /// Sets the previous page number.
    #[must_use]
    pub const fn with_prev(mut self, prev: Option<u32>) -> Self {
        self.prev = prev;
        self
    }

    /// Sets the first page number.
    #[must_use]
    pub const fn with_first(mut self, first: Option<u32>) -> Self {
        self.first = first;
        self
    }

    /// Sets the last page number.
    #[must_use]
    pub const fn with_last(mut self, last: Option<u32>) -> Self {
        self.last = last;
        self
    }

    /// Page after the current one, if any.
    #[must_use]
    pub const fn next(&self) -> Option<u32> {
        self.next
    }

    /// Page before the current one, if any.
    #[must_use]
    pub const fn prev(&self) -> Option<u32> {
        self.prev
    }

    /// First page, when GitHub advertised it.
    #[must_use]
    pub const fn first(&self) -> Option<u32> {
        self.first
    }

    /// Last page, when GitHub advertised it.
    #[must_use]
    pub const fn last(&self) -> Option<u32> {
        self.last
    }

    /// Returns true if more pages exist after the current one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Returns true if this is the last page.
    #[must_use]
    pub const fn is_last_page(&self) -> bool {
        self.next.is_none()
    }
}

fn page_number(target: &str) -> Option<u32> {
    let url = target.trim().strip_prefix('<')?.strip_suffix('>')?;
    let parsed = Url::parse(url).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse::<u32>().ok())
}

fn relation(parameter: &str) -> Option<&str> {
    let (key, value) = parameter.trim().split_once('=')?;
    if key.trim() != "rel" {
        return None;
    }
    Some(value.trim().trim_matches('"'))
}
