//! Page window computation for the expense collection.
//!
//! Two modes:
//! - unlimited (no `limit`): a single window holding every record, only `page=1` exists
//! - limited: `ceil(total / limit)` windows (at least one), `page` beyond the last is out of range
//!
//! Everything here is pure; the list handler feeds it the store count and renders the links.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageParamError {
    #[error("Invalid page parameter: must be a positive integer")]
    InvalidPage,
    #[error("Invalid limit parameter: must be a positive integer")]
    InvalidLimit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("page {page} is beyond the last page {total_pages}")]
    OutOfRange { page: u64, total_pages: u64 },
}

/// Validated `page` / `limit` query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: Option<u64>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: None,
        }
    }
}

// Blank counts as absent; anything else must be a plain positive integer.
fn positive_integer(raw: Option<&str>) -> Result<Option<u64>, ()> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(());
    }
    match raw.parse::<u64>() {
        Ok(n) if n >= 1 => Ok(Some(n)),
        _ => Err(()),
    }
}

impl PageRequest {
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Result<Self, PageParamError> {
        let page = positive_integer(page)
            .map_err(|_| PageParamError::InvalidPage)?
            .unwrap_or(1);
        let limit = positive_integer(limit).map_err(|_| PageParamError::InvalidLimit)?;

        Ok(Self { page, limit })
    }
}

/// One computed window over the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub current_page: u64,
    pub limit: Option<u64>,
    pub total_items: u64,
    pub total_pages: u64,
}

impl PageWindow {
    pub fn compute(req: PageRequest, total_items: u64) -> Result<Self, PageError> {
        let Some(limit) = req.limit else {
            if req.page != 1 {
                return Err(PageError::OutOfRange {
                    page: req.page,
                    total_pages: 1,
                });
            }
            return Ok(Self {
                current_page: 1,
                limit: None,
                total_items,
                total_pages: 1,
            });
        };

        let total_pages = total_items.div_ceil(limit).max(1);

        // An empty collection never errors: whatever the page, it is the single empty page 1
        if total_items == 0 {
            return Ok(Self {
                current_page: 1,
                limit: Some(limit),
                total_items,
                total_pages,
            });
        }
        if req.page > total_pages {
            return Err(PageError::OutOfRange {
                page: req.page,
                total_pages,
            });
        }

        Ok(Self {
            current_page: req.page,
            limit: Some(limit),
            total_items,
            total_pages,
        })
    }

    /// Number of records to skip in insertion order.
    pub fn offset(&self) -> u64 {
        match self.limit {
            Some(limit) => (self.current_page - 1).saturating_mul(limit),
            None => 0,
        }
    }

    pub fn first(&self) -> u64 {
        1
    }

    pub fn last(&self) -> u64 {
        self.total_pages
    }

    pub fn previous(&self) -> Option<u64> {
        (self.limit.is_some() && self.current_page > 1).then(|| self.current_page - 1)
    }

    pub fn next(&self) -> Option<u64> {
        (self.limit.is_some() && self.current_page < self.total_pages)
            .then(|| self.current_page + 1)
    }

    /// Records expected on this window, given the total at compute time.
    pub fn expected_items(&self) -> u64 {
        match self.limit {
            Some(limit) => limit.min(self.total_items.saturating_sub(self.offset())),
            None => self.total_items,
        }
    }
}
