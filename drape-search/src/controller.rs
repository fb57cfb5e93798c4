//! Search controller: query, pagination and loading/error state of a
//! search front end.
//!
//! The controller never performs I/O. [`SearchController::submit`] and
//! [`SearchController::load_more`] hand back a [`PendingSearch`] to send;
//! the caller reports the outcome through [`SearchController::complete`].
//! Every pending search carries a [`RequestTicket`] and only the most
//! recently issued ticket may change state, so a slow response to a
//! superseded search can never overwrite newer results.

use drape_core::{DEFAULT_PAGE_SIZE, Product, SearchRequest, SearchResponse};

use crate::errors::SearchError;

/// UI-level state derived from the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Nothing in flight and no error shown
    Idle,
    /// First page of a new query in flight
    Searching,
    /// Follow-up page in flight
    LoadingMore,
    /// Last request failed; nothing in flight
    Error,
}

/// Whether a request starts a new result set or extends the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// New query, replaces the result set
    Fresh,
    /// Next page, appends to the result set
    LoadMore,
}

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    id: u64,
    kind: RequestKind,
    page: u32,
}

impl RequestTicket {
    /// Kind of request this ticket was issued for.
    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    /// Page that was requested.
    pub fn page(&self) -> u32 {
        self.page
    }
}

/// A request the caller must send, tagged with its ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    /// Ticket to hand back to [`SearchController::complete`]
    pub ticket: RequestTicket,
    /// Body to send to the search endpoint
    pub request: SearchRequest,
}

/// Result of reporting an outcome to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Response applied; `added` products joined the result set
    Applied {
        /// Products received in this response
        added: usize,
    },
    /// Failure recorded; results left untouched
    Failed,
    /// Ticket was superseded; outcome discarded
    Stale,
}

/// Explicit state of one search front end.
#[derive(Debug, Clone)]
pub struct SearchController {
    page_size: u32,
    query: String,
    results: Vec<Product>,
    current_page: u32,
    has_more: bool,
    error: Option<String>,
    in_flight: Option<RequestTicket>,
    next_ticket: u64,
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl SearchController {
    /// Creates an idle controller requesting `page_size` products per page.
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            query: String::new(),
            results: Vec::new(),
            current_page: 1,
            has_more: false,
            error: None,
            in_flight: None,
            next_ticket: 0,
        }
    }

    /// Starts a new search for `query`.
    ///
    /// Returns `None` without touching any state when the query is blank.
    /// Otherwise clears the result set and error, resets the page cursor
    /// to 1 and supersedes whatever request was in flight.
    pub fn submit(&mut self, query: &str) -> Option<PendingSearch> {
        if query.trim().is_empty() {
            return None;
        }

        self.query = query.to_string();
        self.results.clear();
        self.current_page = 1;
        self.has_more = false;
        self.error = None;

        Some(self.issue(RequestKind::Fresh, 1))
    }

    /// Requests the page after the current cursor for the active query.
    ///
    /// Returns `None` unless results are shown, the last response reported
    /// more pages and no request is in flight.
    pub fn load_more(&mut self) -> Option<PendingSearch> {
        if !self.can_load_more() || self.in_flight.is_some() {
            return None;
        }

        self.error = None;
        let page = self.current_page.saturating_add(1);
        Some(self.issue(RequestKind::LoadMore, page))
    }

    /// Reports the outcome of a previously issued request.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<SearchResponse, SearchError>,
    ) -> Completion {
        if self.in_flight != Some(ticket) {
            tracing::debug!(
                "Discarding stale response for ticket {} (page {})",
                ticket.id,
                ticket.page
            );
            return Completion::Stale;
        }
        self.in_flight = None;

        match outcome {
            Ok(response) => {
                if response.current_page != ticket.page {
                    tracing::warn!(
                        "Server answered page {} for a request of page {}",
                        response.current_page,
                        ticket.page
                    );
                }

                let added = response.results.len();
                match ticket.kind {
                    RequestKind::Fresh => self.results = response.results,
                    RequestKind::LoadMore => self.results.extend(response.results),
                }
                self.has_more = response.has_more;
                self.current_page = response.current_page;

                Completion::Applied { added }
            }
            Err(e) => {
                tracing::error!(
                    "Search for {:?} (page {}) failed: {}",
                    self.query,
                    ticket.page,
                    e
                );
                self.error = Some(e.user_message().to_string());
                Completion::Failed
            }
        }
    }

    fn issue(&mut self, kind: RequestKind, page: u32) -> PendingSearch {
        self.next_ticket += 1;
        let ticket = RequestTicket {
            id: self.next_ticket,
            kind,
            page,
        };
        self.in_flight = Some(ticket);

        PendingSearch {
            ticket,
            request: SearchRequest::new(self.query.clone(), page, self.page_size),
        }
    }

    /// Current UI state.
    pub fn state(&self) -> SearchState {
        match self.in_flight.map(|ticket| ticket.kind) {
            Some(RequestKind::Fresh) => SearchState::Searching,
            Some(RequestKind::LoadMore) => SearchState::LoadingMore,
            None if self.error.is_some() => SearchState::Error,
            None => SearchState::Idle,
        }
    }

    /// Query of the active search session.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Results in display order.
    pub fn results(&self) -> &[Product] {
        &self.results
    }

    /// Last page received from the server.
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Has-more flag from the most recent response.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Whether the "load more" control is offered.
    pub fn can_load_more(&self) -> bool {
        !self.results.is_empty() && self.has_more
    }

    /// User-visible error message, if the last request failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a completed search found nothing.
    pub fn shows_no_results(&self) -> bool {
        !self.query.is_empty() && self.state() == SearchState::Idle && self.results.is_empty()
    }
}
