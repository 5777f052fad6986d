//! Pagination parameters shared across list endpoints.

use serde::{Deserialize, Serialize};

/// Pagination parameters for list endpoints.
///
/// - `limit`: 1–100, default 10
/// - `page`: ≥ 1, default 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_limit() -> u32 {
    10
}

fn default_page() -> u32 {
    1
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            page: default_page(),
        }
    }
}

impl PageRequest {
    /// Clamp `limit` to 1–100 and `page` to ≥ 1.
    ///
    /// Call after deserializing from query params to enforce bounds.
    pub fn clamped(self) -> Self {
        Self {
            limit: self.limit.clamp(1, 100),
            page: self.page.max(1),
        }
    }

    pub fn offset(&self) -> u64 {
        ((self.page - 1) * self.limit) as u64
    }

    /// Total number of pages for `count` rows.
    pub fn total_pages(&self, count: u64) -> u64 {
        count.div_ceil(self.limit as u64)
    }
}
