//! Async driver pairing a [`SearchController`] with a [`SearchService`].

use crate::controller::{Completion, PendingSearch, SearchController};
use crate::service::SearchService;

/// One search front end: explicit state plus the service it calls.
///
/// Each user action issues exactly one request and awaits it before the
/// session accepts the next action.
#[derive(Debug)]
pub struct SearchSession {
    controller: SearchController,
    service: SearchService,
}

impl SearchSession {
    /// Creates a session requesting `page_size` products per page.
    pub fn new(service: SearchService, page_size: u32) -> Self {
        Self {
            controller: SearchController::new(page_size),
            service,
        }
    }

    /// Submits a new query. Returns `None` for a blank query.
    pub async fn submit(&mut self, query: &str) -> Option<Completion> {
        let pending = self.controller.submit(query)?;
        Some(self.dispatch(pending).await)
    }

    /// Loads the next page. Returns `None` when no more pages are offered.
    pub async fn load_more(&mut self) -> Option<Completion> {
        let pending = self.controller.load_more()?;
        Some(self.dispatch(pending).await)
    }

    async fn dispatch(&mut self, pending: PendingSearch) -> Completion {
        let outcome = self.service.search(&pending.request).await;
        self.controller.complete(pending.ticket, outcome)
    }

    /// Current front-end state.
    pub fn controller(&self) -> &SearchController {
        &self.controller
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use drape_core::{SearchRequest, SearchResponse};

    use super::*;
    use crate::controller::SearchState;
    use crate::providers::mock::{MockOutcome, MockProvider};

    fn respond(count: usize, has_more: bool, current_page: u32) -> MockOutcome {
        MockOutcome::Respond(SearchResponse {
            results: MockProvider::products(&format!("Page {current_page}"), count),
            has_more,
            current_page,
        })
    }

    #[tokio::test]
    async fn test_blank_query_sends_nothing() {
        let mock = Arc::new(MockProvider::default());
        let mut session = SearchSession::new(SearchService::with_provider(mock.clone()), 5);

        assert_eq!(session.submit("   ").await, None);
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_search_then_load_more() {
        let mock = Arc::new(MockProvider::new([
            respond(5, true, 1),
            respond(3, false, 2),
        ]));
        let mut session = SearchSession::new(SearchService::with_provider(mock.clone()), 5);

        assert_eq!(
            session.submit("blue jeans").await,
            Some(Completion::Applied { added: 5 })
        );
        assert_eq!(
            session.load_more().await,
            Some(Completion::Applied { added: 3 })
        );
        assert_eq!(session.load_more().await, None);

        assert_eq!(session.controller().results().len(), 8);
        assert_eq!(
            mock.requests(),
            vec![
                SearchRequest::new("blue jeans", 1, 5),
                SearchRequest::new("blue jeans", 2, 5),
            ]
        );
    }

    #[tokio::test]
    async fn test_server_error_keeps_results() {
        let mock = Arc::new(MockProvider::new([
            respond(5, true, 1),
            MockOutcome::Status(500),
        ]));
        let mut session = SearchSession::new(SearchService::with_provider(mock), 5);

        session.submit("jeans").await;
        assert_eq!(session.load_more().await, Some(Completion::Failed));

        let controller = session.controller();
        assert_eq!(controller.state(), SearchState::Error);
        assert_eq!(controller.results().len(), 5);
        assert!(controller.can_load_more());
    }

    #[tokio::test]
    async fn test_unreachable_service_on_first_search() {
        let mock = Arc::new(MockProvider::new([MockOutcome::Unreachable]));
        let mut session = SearchSession::new(SearchService::with_provider(mock), 5);

        assert_eq!(session.submit("jeans").await, Some(Completion::Failed));
        assert!(session.controller().results().is_empty());
        assert!(session.controller().error().is_some());
    }
}
