//! Page slicing over an ordered result.

use crate::{QueryError, QueryResult};
use serde::Serialize;

/// One page of projected items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub limit: u64,
    /// Size of the whole result, not of this page.
    pub total: u64,
}

/// Slice `[(page-1)*limit, page*limit)` out of `ordered` and project each item.
///
/// Pages past the end are empty. `page` and `limit` are 1-based and must be
/// positive; no upper bound is placed on `limit` here.
pub fn paginate<T, U>(
    ordered: &[T],
    page: u64,
    limit: u64,
    mut projector: impl FnMut(&T) -> QueryResult<U>,
) -> QueryResult<Page<U>> {
    if page == 0 {
        return Err(QueryError::invalid_page("page must be at least 1"));
    }
    if limit == 0 {
        return Err(QueryError::invalid_page("limit must be at least 1"));
    }

    let total = ordered.len();
    let start = usize::try_from((page - 1).saturating_mul(limit))
        .unwrap_or(usize::MAX)
        .min(total);
    let end = usize::try_from(page.saturating_mul(limit))
        .unwrap_or(usize::MAX)
        .min(total);

    let items = ordered[start..end]
        .iter()
        .map(&mut projector)
        .collect::<QueryResult<Vec<_>>>()?;

    Ok(Page {
        items,
        page,
        limit,
        total: total as u64,
    })
}
