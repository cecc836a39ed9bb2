//! Server configuration
//!
//! Values come from Shuttle secrets in production and from the process
//! environment (optionally seeded by a `.env` file) otherwise.

use reservo::domain::{DEFAULT_MAX_PAGE_SIZE, DEFAULT_PAGE_SIZE};

pub const API_KEY: &str = "RESERVO_API_KEY";
pub const DEFAULT_PAGE_SIZE_KEY: &str = "DEFAULT_PAGE_SIZE";
pub const MAX_PAGE_SIZE_KEY: &str = "MAX_PAGE_SIZE";

/// Pagination bounds applied to reservation searches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingConfig {
    pub default_page_size: i64,
    pub max_page_size: i64,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Bearer token required on reservation routes (None = auth disabled)
    pub api_key: Option<String>,
    pub paging: PagingConfig,
}

impl ServiceConfig {
    /// Build configuration from a key lookup (secrets store, environment, ...)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY).filter(|k| !k.trim().is_empty());

        let mut max_page_size = parse_positive(&lookup, MAX_PAGE_SIZE_KEY, DEFAULT_MAX_PAGE_SIZE);
        let default_page_size = parse_positive(&lookup, DEFAULT_PAGE_SIZE_KEY, DEFAULT_PAGE_SIZE);
        if default_page_size > max_page_size {
            tracing::warn!(
                default_page_size,
                max_page_size,
                "{} exceeds {}, raising the maximum",
                DEFAULT_PAGE_SIZE_KEY,
                MAX_PAGE_SIZE_KEY
            );
            max_page_size = default_page_size;
        }

        Self {
            api_key,
            paging: PagingConfig {
                default_page_size,
                max_page_size,
            },
        }
    }
}

fn parse_positive<F>(lookup: &F, key: &str, default: i64) -> i64
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse::<i64>() {
            Ok(value) if value > 0 => value,
            _ => {
                tracing::warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
                default
            }
        },
    }
}
