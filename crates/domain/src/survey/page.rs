//! Pagination metadata

use serde::{Deserialize, Serialize};

/// Pagination block carried in the `meta` member of a list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Current page number, starting at 1.
    pub page: u32,
    /// Total number of pages.
    pub pages: u32,
    /// Number of records per page.
    pub page_size: u32,
    /// Total number of records.
    pub records: u32,
}
