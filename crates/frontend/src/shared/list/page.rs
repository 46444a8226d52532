/// Разрешённые размеры страницы по умолчанию
pub const DEFAULT_PAGE_SIZES: [u32; 4] = [10, 20, 50, 100];

/// Pagination state. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub page: u32,
    pub limit: u32,
}

impl PageState {
    pub fn new(limit: u32) -> Self {
        Self { page: 1, limit }
    }
}

/// Whether "Next" should be enabled.
///
/// With a reported total this is exact. Without one the last page can only be
/// proven by a short page: a full page keeps "Next" enabled.
pub fn has_next_page(state: PageState, reported_total: Option<u64>, fetched_rows: usize) -> bool {
    match reported_total {
        Some(total) => (state.page as u64) * (state.limit as u64) < total,
        None => fetched_rows >= state.limit as usize,
    }
}

/// Количество страниц; известно только при серверном total
pub fn page_count(limit: u32, reported_total: Option<u64>) -> Option<u64> {
    let total = reported_total?;
    if limit == 0 {
        return None;
    }
    Some(total.div_ceil(limit as u64).max(1))
}
