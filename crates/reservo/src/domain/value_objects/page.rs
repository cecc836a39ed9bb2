//! Page - Validated pagination window

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const DEFAULT_MAX_PAGE_SIZE: i64 = 100;

/// Zero-based page of `size` items
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page {
    pub size: i64,
    pub number: i64,
}

impl Page {
    /// Resolve optional pagination parameters against defaults and bounds
    pub fn resolve(
        size: Option<i64>,
        number: Option<i64>,
        default_size: i64,
        max_size: i64,
    ) -> Result<Self, DomainError> {
        let size = size.unwrap_or(default_size);
        let number = number.unwrap_or(0);

        if size < 1 {
            return Err(DomainError::invalid_argument(format!(
                "page size must be positive, got {}",
                size
            )));
        }
        if size > max_size {
            return Err(DomainError::invalid_argument(format!(
                "page size must not exceed {}, got {}",
                max_size, size
            )));
        }
        if number < 0 {
            return Err(DomainError::invalid_argument(format!(
                "page number must not be negative, got {}",
                number
            )));
        }

        Ok(Self { size, number })
    }

    pub fn offset(&self) -> i64 {
        self.size.saturating_mul(self.number)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            size: DEFAULT_PAGE_SIZE,
            number: 0,
        }
    }
}
