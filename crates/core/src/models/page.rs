use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Largest page a caller may request.
pub const MAX_PAGE_SIZE: u32 = 500;

/// 1-based page request. Only constructible through [`PageRequest::new`],
/// deserialization included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawPageRequest")]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPageRequest {
    page: u32,
    page_size: u32,
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = CoreError;

    fn try_from(raw: RawPageRequest) -> Result<Self, Self::Error> {
        Self::new(raw.page, raw.page_size)
    }
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Result<Self, CoreError> {
        if page == 0 {
            return Err(CoreError::ValidationError("page numbers start at 1".into()));
        }
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(CoreError::ValidationError(format!(
                "page size must be between 1 and {MAX_PAGE_SIZE} (got {page_size})"
            )));
        }
        Ok(Self { page, page_size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(self.page_size as usize)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 50,
        }
    }
}

/// One page of results plus the totals needed to render a pager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total_items: usize,
    pub total_pages: u32,
}

impl<T: Clone> Page<T> {
    /// Cut the requested page out of a fully materialized, already ordered list.
    pub fn slice(all: &[T], request: PageRequest) -> Self {
        let total_items = all.len();
        let size = (request.page_size as usize).max(1);
        let total_pages = total_items.div_ceil(size) as u32;
        let items = all
            .iter()
            .skip(request.offset())
            .take(size)
            .cloned()
            .collect();
        Self {
            items,
            page: request.page,
            page_size: request.page_size,
            total_items,
            total_pages,
        }
    }
}
