//! Search client against the catalog-backed search API.

use std::collections::HashSet;

use drape_search::{Completion, SearchState};

use crate::support::{remote_session, sample_catalog, spawn_app};

#[tokio::test]
async fn test_blue_jeans_paginates_without_duplicates() {
    let addr = spawn_app(sample_catalog()).await;
    let mut session = remote_session(addr, 5);

    assert_eq!(
        session.submit("blue jeans").await,
        Some(Completion::Applied { added: 5 })
    );
    let controller = session.controller();
    assert_eq!(controller.results().len(), 5);
    assert_eq!(controller.current_page(), 1);
    assert!(controller.can_load_more());
    assert!(
        controller
            .results()
            .iter()
            .all(|p| p.name.contains("Jeans"))
    );

    assert_eq!(
        session.load_more().await,
        Some(Completion::Applied { added: 3 })
    );
    let controller = session.controller();
    assert_eq!(controller.results().len(), 8);
    assert_eq!(controller.current_page(), 2);
    assert!(!controller.has_more());
    assert!(!controller.can_load_more());

    let names: HashSet<&str> = controller.results().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names.len(), 8);

    assert_eq!(session.load_more().await, None);
}

#[tokio::test]
async fn test_new_query_replaces_results() {
    let addr = spawn_app(sample_catalog()).await;
    let mut session = remote_session(addr, 5);

    session.submit("jeans").await;
    assert_eq!(session.controller().results().len(), 5);

    assert_eq!(
        session.submit("floral dress").await,
        Some(Completion::Applied { added: 1 })
    );
    let controller = session.controller();
    assert_eq!(controller.query(), "floral dress");
    assert_eq!(controller.results()[0].name, "Floral Maxi Dress");
    assert_eq!(controller.results().len(), 1);
    assert!(!controller.can_load_more());
}

#[tokio::test]
async fn test_unmatched_query_shows_no_results() {
    let addr = spawn_app(sample_catalog()).await;
    let mut session = remote_session(addr, 5);

    assert_eq!(
        session.submit("velvet tuxedo").await,
        Some(Completion::Applied { added: 0 })
    );
    let controller = session.controller();
    assert_eq!(controller.state(), SearchState::Idle);
    assert!(controller.shows_no_results());
    assert!(controller.error().is_none());
}

#[tokio::test]
async fn test_blank_query_sends_nothing() {
    let addr = spawn_app(sample_catalog()).await;
    let mut session = remote_session(addr, 5);

    assert_eq!(session.submit("   ").await, None);
    assert!(session.controller().results().is_empty());
    assert!(!session.controller().shows_no_results());
}

#[tokio::test]
async fn test_scores_are_ordered_and_bounded() {
    let addr = spawn_app(sample_catalog()).await;
    let mut session = remote_session(addr, 10);

    session.submit("blue denim jeans").await;
    let results = session.controller().results();
    assert_eq!(results.len(), 8);
    assert!(results.iter().all(|p| (0.0..=1.0).contains(&p.similarity_score)));
    assert!(
        results
            .windows(2)
            .all(|pair| pair[0].similarity_score >= pair[1].similarity_score)
    );
}
