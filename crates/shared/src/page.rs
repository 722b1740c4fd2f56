use serde::{Deserialize, Serialize};

/// `page`/`limit` query parameters. Pages are 1-based.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct PageArgs {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PageArgs {
    /// Explicit page, used by tests and library callers.
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    /// Resolves `(limit, offset)` using `default_limit` when no limit was
    /// given and clamping to `max_limit`.
    pub fn resolve(&self, default_limit: u32, max_limit: u32) -> (u64, u64) {
        let limit = self
            .limit
            .filter(|l| *l > 0)
            .unwrap_or(default_limit)
            .clamp(1, max_limit.max(1));
        let page = self.page.filter(|p| *p > 0).unwrap_or(1);

        (limit as u64, (page as u64 - 1) * limit as u64)
    }
}

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub count: u64,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            count: 0,
            results: vec![],
        }
    }
}
