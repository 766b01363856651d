//! Page requests, validated page descriptors and the paginated envelope
//! returned by every list endpoint.
//!
//! Page numbers are zero-based throughout: in query strings, in the envelope
//! and when computing offsets.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::query::{FieldRegistry, QueryError, QueryResult};

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: usize = 20;
/// Upper bound applied to requested page sizes unless configured otherwise.
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sort direction: {0}")]
pub struct ParseSortDirectionError(pub String);

impl FromStr for SortDirection {
    type Err = ParseSortDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            _ => Err(ParseSortDirectionError(s.to_string())),
        }
    }
}

/// Page number, size and ordering requested by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page_number: usize,
    pub page_size: usize,
    pub sort_field: Option<String>,
    pub sort_direction: SortDirection,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: 0,
            page_size: DEFAULT_PAGE_SIZE,
            sort_field: None,
            sort_direction: SortDirection::Asc,
        }
    }
}

impl PageRequest {
    pub fn new(page_number: usize, page_size: usize) -> Self {
        Self {
            page_number,
            page_size,
            ..Self::default()
        }
    }

    pub fn sort_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_field = Some(field.into());
        self.sort_direction = direction;
        self
    }

    /// Validates the request against the entity's sortable fields.
    ///
    /// A zero page size is rejected; sizes above `max_page_size` are clamped
    /// to it. Without a sort field the primary key is used.
    pub fn describe(
        &self,
        registry: &FieldRegistry,
        max_page_size: usize,
    ) -> QueryResult<PageDescriptor> {
        if self.page_size == 0 {
            return Err(QueryError::InvalidPageSize);
        }

        let max_page_size = max_page_size.max(1);
        let page_size = if self.page_size > max_page_size {
            log::debug!(
                "Clamping page size {} to {max_page_size} for {}",
                self.page_size,
                registry.table()
            );
            max_page_size
        } else {
            self.page_size
        };

        let sort_column = match &self.sort_field {
            Some(name) => {
                registry
                    .sort_field(name)
                    .ok_or_else(|| QueryError::InvalidSortField(name.clone()))?
                    .column
            }
            None => registry.primary_key(),
        };

        let tie_breaker = (sort_column != registry.primary_key()).then(|| registry.primary_key());

        Ok(PageDescriptor {
            page_number: self.page_number,
            page_size,
            sort_column,
            sort_direction: self.sort_direction,
            tie_breaker,
        })
    }
}

/// Validated paging and ordering instructions for one query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageDescriptor {
    page_number: usize,
    page_size: usize,
    sort_column: &'static str,
    sort_direction: SortDirection,
    tie_breaker: Option<&'static str>,
}

impl PageDescriptor {
    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn sort_column(&self) -> &'static str {
        self.sort_column
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    /// Primary key appended to non-unique orderings so paging is stable.
    pub fn tie_breaker(&self) -> Option<&'static str> {
        self.tie_breaker
    }

    pub fn offset(&self) -> usize {
        self.page_number.saturating_mul(self.page_size)
    }
}

/// Envelope returned by every list endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub page_number: usize,
    pub page_size: usize,
}

impl<T> PageResponse<T> {
    pub fn new(content: Vec<T>, total_elements: u64, page: &PageDescriptor) -> Self {
        Self {
            content,
            total_elements,
            total_pages: total_pages(total_elements, page.page_size()),
            page_number: page.page_number(),
            page_size: page.page_size(),
        }
    }
}

impl<T, E> PageResponse<Result<T, E>> {
    /// Fails with the first error in the content, if any.
    pub fn transpose(self) -> Result<PageResponse<T>, E> {
        let content = self.content.into_iter().collect::<Result<Vec<_>, E>>()?;
        Ok(PageResponse {
            content,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            page_number: self.page_number,
            page_size: self.page_size,
        })
    }
}

/// `ceil(total_elements / page_size)`; zero when nothing matched.
pub fn total_pages(total_elements: u64, page_size: usize) -> u64 {
    match page_size {
        0 => 0,
        size => total_elements.div_ceil(size as u64),
    }
}
