//! List parameters accepted by every `/api/v1` collection endpoint.

use thiserror::Error;

use crate::pagination::{PageRequest, ParseSortDirectionError, SortDirection};
use crate::query::FilterSpec;
use crate::repository::ListQuery;

const PAGE: &str = "page";
const SIZE: &str = "size";
const SORT: &str = "sort";
const DIRECTION: &str = "direction";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListParamsError {
    #[error("invalid page number: {0}")]
    InvalidPage(String),

    #[error("invalid page size: {0}")]
    InvalidSize(String),

    #[error("invalid sort: {0}")]
    InvalidSort(String),

    #[error(transparent)]
    InvalidDirection(#[from] ParseSortDirectionError),
}

/// Paging, ordering and filters decoded from a query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListParams {
    pub page: PageRequest,
    pub filter: FilterSpec,
}

impl ListParams {
    /// Splits decoded query pairs into paging keys and filters.
    ///
    /// `page`, `size`, `sort` and `direction` are reserved; `sort` takes
    /// `field` or `field,direction`, and an explicit `direction` wins over
    /// the one embedded in `sort`. Every other key becomes a filter.
    pub fn from_query_pairs<I>(pairs: I) -> Result<Self, ListParamsError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut page = PageRequest::default();
        let mut direction = None;
        let mut filters = Vec::new();

        for (key, value) in pairs {
            let trimmed = value.trim();
            match key.as_str() {
                PAGE if !trimmed.is_empty() => {
                    page.page_number = trimmed
                        .parse()
                        .map_err(|_| ListParamsError::InvalidPage(value.clone()))?;
                }
                SIZE if !trimmed.is_empty() => {
                    page.page_size = trimmed
                        .parse()
                        .map_err(|_| ListParamsError::InvalidSize(value.clone()))?;
                }
                SORT if !trimmed.is_empty() => {
                    let (field, embedded) = parse_sort(trimmed)?;
                    page.sort_field = Some(field);
                    if let Some(embedded) = embedded {
                        page.sort_direction = embedded;
                    }
                }
                DIRECTION if !trimmed.is_empty() => {
                    direction = Some(trimmed.parse::<SortDirection>()?);
                }
                PAGE | SIZE | SORT | DIRECTION => {}
                _ => filters.push((key, value)),
            }
        }

        if let Some(direction) = direction {
            page.sort_direction = direction;
        }

        Ok(Self {
            page,
            filter: FilterSpec::from_query_pairs(filters),
        })
    }

    pub fn into_list_query(self, max_page_size: usize) -> ListQuery {
        ListQuery::new(self.filter, self.page).max_page_size(max_page_size)
    }
}

fn parse_sort(value: &str) -> Result<(String, Option<SortDirection>), ListParamsError> {
    let mut parts = value.split(',').map(str::trim);
    let field = parts.next().unwrap_or_default();
    let direction = parts.next();
    if field.is_empty() || parts.next().is_some() {
        return Err(ListParamsError::InvalidSort(value.to_string()));
    }
    let direction = direction.map(str::parse::<SortDirection>).transpose()?;
    Ok((field.to_string(), direction))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_without_parameters() {
        let params = ListParams::from_query_pairs(Vec::new()).unwrap();
        assert_eq!(params.page, PageRequest::default());
        assert!(params.filter.is_unconstrained());
    }

    #[test]
    fn reserved_keys_shape_the_page() {
        let params = ListParams::from_query_pairs(pairs(&[
            ("page", "2"),
            ("size", "15"),
            ("sort", "amount,desc"),
            ("status", "SETTLED"),
        ]))
        .unwrap();

        assert_eq!(params.page.page_number, 2);
        assert_eq!(params.page.page_size, 15);
        assert_eq!(params.page.sort_field.as_deref(), Some("amount"));
        assert_eq!(params.page.sort_direction, SortDirection::Desc);
        assert_eq!(params.filter, FilterSpec::new().with("status", "SETTLED"));
    }

    #[test]
    fn explicit_direction_overrides_sort_suffix() {
        let params = ListParams::from_query_pairs(pairs(&[
            ("sort", "createdAt,desc"),
            ("direction", "asc"),
        ]))
        .unwrap();
        assert_eq!(params.page.sort_direction, SortDirection::Asc);
    }

    #[test]
    fn repeated_filters_collect_into_sets() {
        let params =
            ListParams::from_query_pairs(pairs(&[("status", "ACTIVE"), ("status", "BLOCKED")]))
                .unwrap();
        assert_eq!(
            params.filter,
            FilterSpec::new().with("status", json!(["ACTIVE", "BLOCKED"]))
        );
    }

    #[test]
    fn malformed_paging_is_rejected() {
        assert_eq!(
            ListParams::from_query_pairs(pairs(&[("page", "-1")])),
            Err(ListParamsError::InvalidPage("-1".into()))
        );
        assert_eq!(
            ListParams::from_query_pairs(pairs(&[("size", "ten")])),
            Err(ListParamsError::InvalidSize("ten".into()))
        );
        assert!(matches!(
            ListParams::from_query_pairs(pairs(&[("sort", "amount,up")])),
            Err(ListParamsError::InvalidDirection(_))
        ));
        assert!(matches!(
            ListParams::from_query_pairs(pairs(&[("sort", ",desc")])),
            Err(ListParamsError::InvalidSort(_))
        ));
    }

    #[test]
    fn empty_reserved_values_keep_defaults() {
        let params = ListParams::from_query_pairs(pairs(&[("page", ""), ("sort", " ")])).unwrap();
        assert_eq!(params.page, PageRequest::default());
    }

    #[test]
    fn list_query_carries_the_size_ceiling() {
        let query = ListParams::default().into_list_query(25);
        assert_eq!(query.max_page_size, 25);
    }
}
