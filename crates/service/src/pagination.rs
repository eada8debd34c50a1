//! Pagination utilities for service layer
//!
//! `PageRequest` is zero-indexed; `Page` is the envelope returned to clients.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

fn default_size() -> u64 { DEFAULT_PAGE_SIZE }

/// Pagination parameters, as read from `?page=&size=`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct PageRequest {
    /// 0-based page index
    #[serde(default)]
    pub page: u64,
    /// items per page
    #[serde(default = "default_size")]
    pub size: u64,
}

impl PageRequest {
    pub const fn of(page: u64, size: u64) -> Self { Self { page, size } }

    /// Clamp `size` into `1..=MAX_PAGE_SIZE`.
    pub fn normalize(self) -> Self {
        Self { page: self.page, size: self.size.clamp(1, MAX_PAGE_SIZE) }
    }

    /// Number of records before this page.
    pub fn offset(&self) -> u64 { self.page.saturating_mul(self.size) }
}

impl Default for PageRequest {
    fn default() -> Self { Self { page: 0, size: DEFAULT_PAGE_SIZE } }
}

/// One page of results plus totals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number: u64,
    pub size: u64,
    pub number_of_elements: u64,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let size = request.size.max(1);
        let total_pages = total_elements.div_ceil(size);
        let number_of_elements = content.len() as u64;
        Self {
            empty: content.is_empty(),
            content,
            total_elements,
            total_pages,
            number: request.page,
            size,
            number_of_elements,
            first: request.page == 0,
            last: request.page.saturating_add(1) >= total_pages,
        }
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number: self.number,
            size: self.size,
            number_of_elements: self.number_of_elements,
            first: self.first,
            last: self.last,
            empty: self.empty,
        }
    }
}
