//! State machine for one paginated query (feed or comment thread).
//!
//! Pages use a 1-based page-number cursor. A next page exists when
//! `ceil(total / page_size) > last_page_number`, as reported by the most
//! recent page. The in-flight guard means page N+1 is never requested
//! while page N is still out, and never before page N's result proves a
//! next cursor exists.

use std::time::{Duration, Instant};

use crate::models::Page;

#[derive(Debug)]
pub struct PaginatedQuery<T> {
    pages: Vec<Page<T>>,
    last_page_number: u32,
    in_flight: Option<u32>,
    last_completed_at: Option<Instant>,
}

impl<T> Default for PaginatedQuery<T> {
    fn default() -> Self {
        Self {
            pages: Vec::new(),
            last_page_number: 0,
            in_flight: None,
            last_completed_at: None,
        }
    }
}

impl<T> PaginatedQuery<T> {
    /// All fetched items, in page order.
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.pages.iter().flat_map(|p| p.results.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether the server holds pages beyond what was fetched. Before the
    /// first page lands this is `false`; `begin_fetch` covers the initial
    /// load.
    pub fn has_next(&self) -> bool {
        self.pages
            .last()
            .map(|p| p.has_next(self.last_page_number))
            .unwrap_or(false)
    }

    /// Server-reported total from the most recent page, if any.
    pub fn total(&self) -> Option<u32> {
        self.pages.last().map(|p| p.total)
    }

    /// Hands out the next page number to fetch and marks it in flight.
    /// Returns `None` while a fetch is in flight or when no further page
    /// exists.
    pub fn begin_fetch(&mut self) -> Option<u32> {
        if self.in_flight.is_some() {
            return None;
        }
        let next = if self.pages.is_empty() {
            1
        } else if self.has_next() {
            self.last_page_number + 1
        } else {
            return None;
        };
        self.in_flight = Some(next);
        Some(next)
    }

    /// Pre-warms the query: hands out page 1 when the query holds no
    /// data and nothing fresh was fetched within `freshness`. Loaded
    /// pages are never discarded by a prefetch; hovering only trades a
    /// possible wasted request for latency, it must not blank a thread
    /// the user is reading.
    pub fn prefetch(&mut self, freshness: Duration) -> Option<u32> {
        self.prefetch_at(freshness, Instant::now())
    }

    pub fn prefetch_at(&mut self, freshness: Duration, now: Instant) -> Option<u32> {
        if self.in_flight.is_some() || !self.pages.is_empty() {
            return None;
        }
        if let Some(completed) = self.last_completed_at {
            if now.duration_since(completed) < freshness {
                return None;
            }
        }
        self.in_flight = Some(1);
        Some(1)
    }

    /// Records a fetched page. Results delivered for a page that is no
    /// longer in flight (the query was invalidated meanwhile) are dropped;
    /// returns whether the page was accepted.
    pub fn complete(&mut self, page_number: u32, page: Page<T>) -> bool {
        if self.in_flight != Some(page_number) {
            log::debug!("Dropping stale result for page {page_number}");
            return false;
        }
        self.pages.push(page);
        self.last_page_number = page_number;
        self.in_flight = None;
        self.last_completed_at = Some(Instant::now());
        true
    }

    /// Records a failed fetch so the page can be requested again.
    pub fn fail(&mut self, page_number: u32) {
        if self.in_flight == Some(page_number) {
            self.in_flight = None;
        }
    }

    /// Drops all cached pages; the next access refetches from page 1.
    /// Any in-flight result will be dropped on delivery.
    pub fn invalidate(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.pages.clear();
        self.last_page_number = 0;
        self.in_flight = None;
        self.last_completed_at = None;
    }
}

#[cfg(test)]
#[path = "paginated_tests.rs"]
mod tests;
