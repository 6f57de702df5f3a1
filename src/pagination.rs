/// Number of results shown per page unless configured otherwise
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Returns page `page_index` of `items`: the slice
/// `[page_index * page_size, page_index * page_size + page_size)` clipped to the
/// list. Pages past the end are empty. Callers clamp the index themselves.
pub fn paginate<T>(items: &[T], page_index: usize, page_size: usize) -> &[T] {
    let start = page_index.saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Number of pages needed to show `total` items
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}
