//! Hypermedia link construction.
//!
//! Every `href` the API emits is built here from the configured public base address.
use serde::Serialize;
use url::Url;

pub const EXPENSES_SEGMENT: &str = "expenses";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
}

/// Navigation link of a page window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub page: u64,
    pub href: String,
}

#[derive(Debug, Clone)]
pub struct LinkBuilder {
    base: Url,
}

impl LinkBuilder {
    /// `base` must be a hierarchical URL (http/https), e.g. `https://api.example.com/v1`.
    pub fn new(base: Url) -> Result<Self, url::ParseError> {
        if base.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase);
        }
        Ok(Self { base })
    }

    fn at(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn collection(&self) -> Link {
        Link {
            href: self.at(&[EXPENSES_SEGMENT]).into(),
        }
    }

    pub fn expense(&self, public_id: &str) -> Link {
        Link {
            href: self.at(&[EXPENSES_SEGMENT, public_id]).into(),
        }
    }

    /// Collection window link carrying both `page` and `limit`.
    pub fn page(&self, page: u64, limit: u64) -> PageLink {
        let mut url = self.at(&[EXPENSES_SEGMENT]);
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());

        PageLink {
            page,
            href: url.into(),
        }
    }

    /// Link of the single unlimited window (the bare collection).
    pub fn unlimited_page(&self) -> PageLink {
        PageLink {
            page: 1,
            href: self.collection().href,
        }
    }

    pub fn login(&self) -> Link {
        Link {
            href: self.at(&["login"]).into(),
        }
    }

    pub fn secure(&self) -> Link {
        Link {
            href: self.at(&["secure"]).into(),
        }
    }
}
