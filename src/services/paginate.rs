use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items_per_page: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    /// 1-based index of the first item on the page
    pub start_index: usize,
    /// 1-based inclusive index of the last item on the page
    pub end_index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// Slices `items` into page `page` (1-based) of `limit` items.
///
/// Pages past the end are empty rather than an error. Page 0 is also empty.
pub fn paginate<T>(items: Vec<T>, page: usize, limit: usize) -> Page<T> {
    let limit = limit.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(limit);

    let (data, start_index) = match page.checked_sub(1) {
        Some(offset) => {
            let start = offset.saturating_mul(limit);
            let data = items.into_iter().skip(start).take(limit).collect();
            (data, start)
        }
        None => (Vec::new(), 0),
    };

    Page {
        data,
        pagination: Pagination {
            current_page: page,
            total_pages,
            total_items,
            items_per_page: limit,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
            start_index: start_index.saturating_add(1),
            end_index: start_index.saturating_add(limit).min(total_items),
        },
    }
}
