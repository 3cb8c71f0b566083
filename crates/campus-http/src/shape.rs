//! List-shaped payloads.
//!
//! List endpoints answer either with a paginated object carrying `items`, or
//! with a plain array, or (on odd revisions) with something else entirely.
//! The shape is decoded once here so stores only ever see a [`Page`].

use crate::envelope::Normalized;
use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PagedList<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default, alias = "pageSize")]
    pub page_size: Option<u32>,
    #[serde(default, alias = "totalPages")]
    pub total_pages: Option<u32>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ListShape<T> {
    Paged(PagedList<T>),
    Items(Vec<T>),
    Empty,
}

/// Fully resolved page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn empty(page: u32, page_size: u32) -> Self {
        Page {
            items: Vec::new(),
            total: 0,
            page,
            page_size,
            total_pages: 0,
        }
    }
}

impl<T: DeserializeOwned> ListShape<T> {
    pub fn from_normalized(payload: Normalized) -> Result<Self> {
        Self::from_value(payload.into_data())
    }

    /// Priority: object with an `items` array, then array, then empty.
    pub fn from_value(value: Value) -> Result<Self> {
        let has_items = value.get("items").is_some_and(Value::is_array);
        if has_items {
            return Ok(ListShape::Paged(serde_json::from_value(value)?));
        }
        if value.is_array() {
            return Ok(ListShape::Items(serde_json::from_value(value)?));
        }
        Ok(ListShape::Empty)
    }
}

impl<T> ListShape<T> {
    /// Fills in whatever the backend left out using the requested paging.
    pub fn resolve(self, requested_page: u32, requested_size: u32) -> Page<T> {
        match self {
            ListShape::Paged(paged) => {
                let total = paged.total.unwrap_or(paged.items.len() as u64);
                let page_size = paged.page_size.unwrap_or(requested_size);
                let total_pages = paged
                    .total_pages
                    .unwrap_or_else(|| page_count(total, page_size));
                Page {
                    items: paged.items,
                    total,
                    page: paged.page.unwrap_or(requested_page),
                    page_size,
                    total_pages,
                }
            }
            ListShape::Items(items) => {
                let len = items.len();
                Page {
                    items,
                    total: len as u64,
                    page: 1,
                    page_size: len as u32,
                    total_pages: u32::from(len > 0),
                }
            }
            ListShape::Empty => Page::empty(requested_page, requested_size),
        }
    }
}

fn page_count(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(u64::from(page_size)) as u32
}
