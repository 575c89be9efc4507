use serde::Serialize;

/// Requested page bounds after coercion. Raw query values arrive as
/// strings; anything non-numeric falls back to the defaults, a page below
/// 1 becomes 1 and the limit is clamped into [1, MAX_LIMIT].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: i64,
    pub limit: i64,
}

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

impl PageParams {
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = page
            .and_then(|p| p.trim().parse::<i64>().ok())
            .map(|p| p.max(1))
            .unwrap_or(1);

        let limit = limit
            .and_then(|l| l.trim().parse::<i64>().ok())
            .map(|l| l.clamp(1, MAX_LIMIT))
            .unwrap_or(DEFAULT_LIMIT);

        Self { page, limit }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

/// Page descriptor returned alongside every paginated listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl PageMeta {
    pub fn new(total: i64, params: &PageParams) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            (total + params.limit - 1) / params.limit
        };

        Self {
            total,
            page: params.page,
            limit: params.limit,
            total_pages,
            has_next_page: params.page < total_pages,
            has_prev_page: params.page > 1,
        }
    }
}

/// The `{ data, pagination }` envelope. A page past the end is an empty
/// data array with valid metadata, never an error.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: PageMeta,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, total: i64, params: &PageParams) -> Self {
        Self {
            data,
            pagination: PageMeta::new(total, params),
        }
    }
}
