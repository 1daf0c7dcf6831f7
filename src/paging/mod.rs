//! Paginated listing: page requests parsed from the query string and the page
//! results returned by services.

use crate::config::PagingConfig;
use serde::{Deserialize, Serialize};
use strum_macros::EnumString;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(ascii_case_insensitive)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub property: String,
    pub direction: Direction,
}

impl Order {
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Desc,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PageRequestError {
    #[error("Invalid page parameter {name}: {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("Invalid sort expression {0:?}")]
    InvalidSort(String),
}

/// Raw `?page=&size=&sort=` query parameters
///
/// Kept as strings so malformed values surface as the route's own failure
/// rather than a framework rejection.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub size: Option<String>,
    pub sort: Option<String>,
}

/// Zero-based page index, page size and sort orders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
    pub sort: Vec<Order>,
}

impl PageRequest {
    pub fn of(page: usize, size: usize) -> Self {
        Self {
            page,
            size: size.max(1),
            sort: Vec::new(),
        }
    }

    pub fn sorted_by(mut self, order: Order) -> Self {
        self.sort.push(order);
        self
    }

    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }

    /// Build a request from query parameters
    ///
    /// `sort` is `prop[,prop...][,asc|desc]`; every listed property shares the
    /// trailing direction. Sizes are clamped to `[1, max_size]`.
    pub fn from_params(params: &PageParams, paging: &PagingConfig) -> Result<Self, PageRequestError> {
        let page = parse_number("page", params.page.as_deref())?.unwrap_or(0);
        let size = parse_number("size", params.size.as_deref())?
            .unwrap_or(paging.default_size)
            .clamp(1, paging.max_size);
        if page.checked_mul(size).is_none() {
            return Err(PageRequestError::InvalidNumber {
                name: "page",
                value: page.to_string(),
            });
        }
        let sort = match params.sort.as_deref() {
            Some(expression) => parse_sort(expression)?,
            None => Vec::new(),
        };

        Ok(Self { page, size, sort })
    }
}

fn parse_number(name: &'static str, raw: Option<&str>) -> Result<Option<usize>, PageRequestError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<usize>()
            .map(Some)
            .map_err(|_| PageRequestError::InvalidNumber {
                name,
                value: value.to_string(),
            }),
    }
}

fn parse_sort(expression: &str) -> Result<Vec<Order>, PageRequestError> {
    let mut parts: Vec<&str> = expression
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    let direction = match parts.last().and_then(|last| last.parse::<Direction>().ok()) {
        Some(direction) => {
            parts.pop();
            direction
        }
        None => Direction::Asc,
    };

    if parts.is_empty() {
        return Err(PageRequestError::InvalidSort(expression.to_string()));
    }

    Ok(parts
        .into_iter()
        .map(|property| Order {
            property: property.to_string(),
            direction,
        })
        .collect())
}

/// One slice of a larger result set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number: usize,
    pub size: usize,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
    pub sort: Vec<Order>,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let size = request.size.max(1);
        let total_pages = total_elements.div_ceil(size as u64);
        Self {
            number_of_elements: content.len(),
            empty: content.is_empty(),
            content,
            total_elements,
            total_pages,
            number: request.page,
            size,
            first: request.page == 0,
            last: request.page.saturating_add(1) as u64 >= total_pages,
            sort: request.sort.clone(),
        }
    }
}
