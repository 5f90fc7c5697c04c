//! Paginated, filterable, searchable job listing.
use std::time::{Duration, Instant};

use crate::badge::classify_source;
use crate::pagination::{display_range, page_range};
use crate::timers::Debounce;
use crate::view_model::{JobRowView, PaginationView, ResultsPageView, ResultsView};
use crate::ResultPage;

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);
pub const DEFAULT_PER_PAGE: u32 = 25;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub page: u32,
    pub search: String,
    /// Empty means every source.
    pub source: String,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
            source: String::new(),
        }
    }
}

/// Partial update merged into `QueryState`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryPatch {
    pub page: Option<u32>,
    pub search: Option<String>,
    pub source: Option<String>,
}

impl QueryPatch {
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Self::default()
        }
    }

    pub fn search(search: impl Into<String>) -> Self {
        Self {
            search: Some(search.into()),
            ..Self::default()
        }
    }

    pub fn source(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            ..Self::default()
        }
    }
}

/// Full request parameters for one jobs fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobQuery {
    pub page: u32,
    pub per_page: u32,
    pub search: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    query: QueryState,
    per_page: u32,
    search_input: String,
    debounce: Debounce,
    latest: Option<ResultPage>,
    sources: Vec<String>,
}

impl Default for ResultView {
    fn default() -> Self {
        Self::new(DEFAULT_PER_PAGE)
    }
}

impl ResultView {
    pub fn new(per_page: u32) -> Self {
        Self {
            query: QueryState::default(),
            per_page: per_page.max(1),
            search_input: String::new(),
            debounce: Debounce::new(SEARCH_DEBOUNCE),
            latest: None,
            sources: Vec::new(),
        }
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn current_query(&self) -> JobQuery {
        JobQuery {
            page: self.query.page,
            per_page: self.per_page,
            search: self.query.search.clone(),
            source: self.query.source.clone(),
        }
    }

    /// Merges `patch` and returns the fetch to issue. A changed search or
    /// source always lands on page 1.
    pub fn set_query(&mut self, patch: QueryPatch) -> JobQuery {
        let mut filters_changed = false;
        if let Some(search) = patch.search {
            if search != self.query.search {
                self.query.search = search;
                filters_changed = true;
            }
        }
        if let Some(source) = patch.source {
            if source != self.query.source {
                self.query.source = source;
                filters_changed = true;
            }
        }

        if filters_changed {
            self.query.page = 1;
        } else if let Some(page) = patch.page {
            self.query.page = page.max(1);
        }
        self.current_query()
    }

    /// Records a keystroke; the fetch waits for `SEARCH_DEBOUNCE` of quiet.
    pub fn type_search(&mut self, text: String, now: Instant) {
        self.search_input = text;
        self.debounce.arm(now);
    }

    pub fn search_pending(&self) -> bool {
        self.debounce.is_armed()
    }

    pub fn poll_debounce(&mut self, now: Instant) -> Option<JobQuery> {
        if !self.debounce.fire_due(now) {
            return None;
        }
        let search = self.search_input.trim().to_string();
        Some(self.set_query(QueryPatch::search(search)))
    }

    pub fn select_page(&mut self, page: u32) -> Option<JobQuery> {
        if page == 0 {
            return None;
        }
        if let Some(total) = self.total_pages() {
            if page > total {
                return None;
            }
        }
        Some(self.set_query(QueryPatch::page(page)))
    }

    pub fn next_page(&mut self) -> Option<JobQuery> {
        let total = self.total_pages()?;
        if self.query.page >= total {
            return None;
        }
        Some(self.set_query(QueryPatch::page(self.query.page + 1)))
    }

    pub fn prev_page(&mut self) -> Option<JobQuery> {
        if self.query.page <= 1 {
            return None;
        }
        Some(self.set_query(QueryPatch::page(self.query.page - 1)))
    }

    /// Stores a fetched page and adopts the server-reported page number.
    pub fn apply_page(&mut self, page: ResultPage) {
        if page.page >= 1 {
            self.query.page = page.page;
        }
        self.latest = Some(page);
    }

    pub fn set_sources(&mut self, sources: Vec<String>) {
        self.sources = sources;
    }

    fn total_pages(&self) -> Option<u32> {
        self.latest.as_ref().map(|page| page.pages)
    }

    pub fn view(&self) -> ResultsView {
        let Some(page) = &self.latest else {
            return ResultsView::Loading;
        };
        if page.is_empty() {
            return ResultsView::Empty;
        }

        let per_page = if page.per_page > 0 {
            page.per_page
        } else {
            self.per_page
        };
        let total_pages = page.pages.max(1);
        let current = page.page.clamp(1, total_pages);
        let (range_start, range_end) = display_range(current, per_page, page.total);

        ResultsView::Page(ResultsPageView {
            rows: page
                .items
                .iter()
                .map(|job| JobRowView {
                    company: job.company.clone(),
                    title: job.title.clone(),
                    source: job.source.clone(),
                    badge: classify_source(&job.source),
                    seen_at: job.seen_at.clone(),
                    url: job.url.clone(),
                })
                .collect(),
            range_start,
            range_end,
            total: page.total,
            pagination: PaginationView {
                current,
                total_pages,
                entries: page_range(current, total_pages),
                prev_enabled: current > 1,
                next_enabled: current < total_pages,
            },
        })
    }
}
