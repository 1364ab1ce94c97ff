use crate::error::{UserError, UserResult};
use serde::{Deserialize, Serialize};

/// Sortable columns of the users table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Id,
    FirstName,
    LastName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Sort {
    pub fn ascending(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }
}

/// Offset/limit description of a slice of an ordered collection.
///
/// Validates on construction (fail-fast, before the store is touched):
/// offset must not be negative, limit must be at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    offset: i64,
    limit: i64,
    sort: Sort,
}

impl PageRequest {
    pub fn new(offset: i64, limit: i64, sort: Sort) -> UserResult<Self> {
        if offset < 0 {
            return Err(UserError::Validation(
                "offset must not be negative".to_string(),
            ));
        }
        if limit < 1 {
            return Err(UserError::Validation(
                "limit must be at least one".to_string(),
            ));
        }

        Ok(Self {
            offset,
            limit,
            sort,
        })
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn sort(&self) -> Sort {
        self.sort
    }

    /// Zero-based page number implied by the offset.
    pub fn page_number(&self) -> i64 {
        self.offset / self.limit
    }

    pub fn page_size(&self) -> i64 {
        self.limit
    }

    pub fn has_previous(&self) -> bool {
        self.offset >= self.limit
    }

    /// The next page: same limit and sort, offset advanced by one page.
    pub fn next(&self) -> Self {
        Self {
            offset: self.offset + self.limit,
            ..*self
        }
    }

    /// The previous page, clamped to the first page when there is none.
    pub fn previous(&self) -> Self {
        if self.has_previous() {
            Self {
                offset: self.offset - self.limit,
                ..*self
            }
        } else {
            self.first()
        }
    }

    pub fn first(&self) -> Self {
        Self { offset: 0, ..*self }
    }
}

/// One page of store results together with the total matching count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}
