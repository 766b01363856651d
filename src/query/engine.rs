//! Query execution and envelope assembly.

use crate::pagination::{PageDescriptor, PageRequest, PageResponse};
use crate::query::fields::FieldRegistry;
use crate::query::filter::{FilterSpec, build_predicates};
use crate::query::sql::SelectQuery;
use crate::query::QueryResult;
use crate::repository::errors::RepositoryResult;

/// Storage driver able to answer a paged query.
///
/// Implementors must evaluate the count and the page fetch against the same
/// read snapshot so the total always describes the rows the page is drawn
/// from. Failures are returned as-is; retrying is the caller's decision.
pub trait PageStorage<R> {
    fn count_and_fetch(
        &self,
        query: &SelectQuery<'_>,
        page: &PageDescriptor,
    ) -> RepositoryResult<(u64, Vec<R>)>;
}

/// Runs a filtered, paged query and maps each row with `to_output`.
///
/// The page request and the filter are both validated before the storage is
/// touched. Either the whole page is returned or an error is.
pub fn find_page<S, R, T, F>(
    storage: &S,
    registry: &FieldRegistry,
    filter: &FilterSpec,
    request: &PageRequest,
    max_page_size: usize,
    to_output: F,
) -> QueryResult<PageResponse<T>>
where
    S: PageStorage<R> + ?Sized,
    F: FnMut(R) -> T,
{
    let page = request.describe(registry, max_page_size)?;
    let predicates = build_predicates(registry, filter)?;
    let query = SelectQuery::new(registry, &predicates);

    let (total_elements, rows) = storage.count_and_fetch(&query, &page)?;

    Ok(assemble(rows, total_elements, &page, to_output))
}

/// Wraps mapped rows with paging metadata.
pub fn assemble<R, T>(
    rows: Vec<R>,
    total_elements: u64,
    page: &PageDescriptor,
    to_output: impl FnMut(R) -> T,
) -> PageResponse<T> {
    let content = rows
        .into_iter()
        .take(page.page_size())
        .map(to_output)
        .collect();
    PageResponse::new(content, total_elements, page)
}
