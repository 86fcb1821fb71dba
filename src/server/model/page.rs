//! Pagination request and result types shared by list operations.

use crate::model::api::{PaginatedResponse, PaginationDto};

pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;

/// A 1-based page request with a clamped page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    /// Builds a page request from optional query values.
    ///
    /// A missing or zero page becomes 1. A missing or zero limit becomes `default_limit`,
    /// and any limit above 100 is clamped to 100.
    pub fn new(page: Option<u64>, limit: Option<u64>, default_limit: u64) -> Self {
        let page = page.filter(|p| *p > 0).unwrap_or(1);
        let limit = limit
            .filter(|l| *l > 0)
            .unwrap_or(default_limit)
            .min(MAX_LIMIT);

        Self { page, limit }
    }

    /// Zero-based page index as used by SeaORM paginators.
    pub fn index(&self) -> u64 {
        self.page - 1
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None, DEFAULT_LIMIT)
    }
}

/// One page of domain items plus the total row count.
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            limit: request.limit,
        }
    }

    pub fn pages(&self) -> u64 {
        if self.limit == 0 {
            0
        } else {
            self.total.div_ceil(self.limit)
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
        }
    }

    /// Converts into the paginated response envelope, mapping each item to its DTO.
    pub fn into_dto<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        let pagination = PaginationDto {
            page: self.page,
            limit: self.limit,
            total: self.total,
            pages: self.pages(),
        };

        PaginatedResponse {
            success: true,
            data: self.items.into_iter().map(f).collect(),
            pagination,
        }
    }
}
