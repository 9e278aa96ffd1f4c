//! Paginated product sources.

use std::collections::HashSet;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, info_span, warn};

use nutri_model::ProductRow;

use crate::error::{IngestError, Result};
use crate::extract::extract_product;

/// A paginated source of raw product records.
///
/// Pages are numbered from 1. A page with no records marks the end of the
/// source.
pub trait ProductSource {
    fn fetch_page(&self, page: usize, page_size: usize) -> Result<Vec<Value>>;

    /// Returns true when the source can currently be reached.
    fn check_connection(&self) -> bool {
        true
    }
}

/// Pages held in memory. Pages past the last one are empty.
#[derive(Debug, Clone)]
pub struct MemorySource {
    pages: Vec<Vec<Value>>,
    failing: HashSet<usize>,
    reachable: bool,
}

impl MemorySource {
    pub fn new(pages: Vec<Vec<Value>>) -> Self {
        Self {
            pages,
            failing: HashSet::new(),
            reachable: true,
        }
    }

    /// A source whose connection check fails.
    pub fn unreachable() -> Self {
        Self {
            reachable: false,
            ..Self::new(Vec::new())
        }
    }

    /// Makes `page` fail with an HTTP error when fetched.
    pub fn with_failing_page(mut self, page: usize) -> Self {
        self.failing.insert(page);
        self
    }
}

impl ProductSource for MemorySource {
    fn check_connection(&self) -> bool {
        self.reachable
    }

    fn fetch_page(&self, page: usize, _page_size: usize) -> Result<Vec<Value>> {
        if self.failing.contains(&page) {
            return Err(IngestError::Http {
                url: format!("memory://page/{page}"),
                message: "simulated failure".to_string(),
            });
        }
        Ok(page
            .checked_sub(1)
            .and_then(|index| self.pages.get(index))
            .cloned()
            .unwrap_or_default())
    }
}

/// Paging parameters for [`collect_products`].
#[derive(Debug, Clone, Copy)]
pub struct CollectOptions {
    pub num_pages: usize,
    pub page_size: usize,
    /// Pause after each page that returned records.
    pub delay: Duration,
}

/// Outcome of a collection run.
#[derive(Debug, Clone, Default)]
pub struct CollectReport {
    pub products: Vec<ProductRow>,
    pub pages_fetched: usize,
    pub pages_failed: usize,
    /// Set when an empty page ended collection before `num_pages`.
    pub exhausted: bool,
}

/// Fetches pages `1..=num_pages` and extracts every record.
///
/// A page that fails is logged and treated as empty for that page only;
/// collection moves on. A page that succeeds with no records ends collection.
/// `on_page` is called after every attempted page.
pub fn collect_products<S>(
    source: &S,
    options: &CollectOptions,
    mut on_page: impl FnMut(usize),
) -> CollectReport
where
    S: ProductSource + ?Sized,
{
    let span = info_span!("collect", pages = options.num_pages, page_size = options.page_size);
    let _guard = span.enter();

    let mut report = CollectReport::default();
    for page in 1..=options.num_pages {
        match source.fetch_page(page, options.page_size) {
            Ok(records) if records.is_empty() => {
                info!(page, "no more products");
                report.exhausted = page < options.num_pages;
                on_page(page);
                break;
            }
            Ok(records) => {
                report.pages_fetched += 1;
                debug!(page, records = records.len(), "fetched page");
                report.products.extend(records.iter().map(extract_product));
                on_page(page);
                if page < options.num_pages && !options.delay.is_zero() {
                    std::thread::sleep(options.delay);
                }
            }
            Err(error) => {
                report.pages_failed += 1;
                warn!(page, %error, "failed to fetch page");
                on_page(page);
            }
        }
    }

    info!(
        products = report.products.len(),
        pages_fetched = report.pages_fetched,
        pages_failed = report.pages_failed,
        "collection finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(num_pages: usize) -> CollectOptions {
        CollectOptions {
            num_pages,
            page_size: 2,
            delay: Duration::ZERO,
        }
    }

    fn page(names: &[&str]) -> Vec<Value> {
        names.iter().map(|n| json!({ "product_name": n })).collect()
    }

    #[test]
    fn collects_until_empty_page() {
        let source = MemorySource::new(vec![page(&["a", "b"]), page(&["c"])]);
        let mut seen = Vec::new();
        let report = collect_products(&source, &options(5), |p| seen.push(p));

        assert_eq!(report.products.len(), 3);
        assert_eq!(report.pages_fetched, 2);
        assert!(report.exhausted);
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn failed_page_does_not_stop_collection() {
        let source =
            MemorySource::new(vec![page(&["a"]), page(&["b"]), page(&["c"])]).with_failing_page(1);
        let report = collect_products(&source, &options(3), |_| {});

        assert_eq!(report.pages_failed, 1);
        assert_eq!(report.pages_fetched, 2);
        let names: Vec<&str> = report.products.iter().map(|p| p.product_name.as_str()).collect();
        assert_eq!(names, vec!["b", "c"]);
        assert!(!report.exhausted);
    }

    #[test]
    fn stops_at_page_limit() {
        let source = MemorySource::new(vec![page(&["a"]), page(&["b"])]);
        let report = collect_products(&source, &options(1), |_| {});
        assert_eq!(report.products.len(), 1);
    }

    #[test]
    fn memory_source_reachability() {
        assert!(MemorySource::new(vec![]).check_connection());
        assert!(!MemorySource::unreachable().check_connection());
    }
}
