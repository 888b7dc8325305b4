//! Concurrent match recording for one family must not lose updates.

use std::sync::Arc;

use family_balance::adapters::memory::{InMemoryMatchHistory, InMemoryRatingStore, InMemorySurveyStore};
use family_balance::application::handlers::rating::{FamilyLocks, RecordMatchCommand, RecordMatchHandler};
use family_balance::domain::foundation::FamilyId;
use family_balance::domain::rating::RatingEngine;
use family_balance::domain::survey::{QuestionClassifier, SurveyResponse};
use family_balance::ports::RatingStore;

const WRITERS: usize = 64;

fn handler(
    ratings: Arc<InMemoryRatingStore>,
    history: Arc<InMemoryMatchHistory>,
    locks: Arc<FamilyLocks>,
) -> Arc<RecordMatchHandler> {
    Arc::new(RecordMatchHandler::new(
        Arc::new(InMemorySurveyStore::new()),
        ratings,
        history,
        locks,
        QuestionClassifier::default(),
        RatingEngine::default(),
    ))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_writers_for_one_family_are_serialized() {
    let ratings = Arc::new(InMemoryRatingStore::new());
    let history = Arc::new(InMemoryMatchHistory::new());
    let handler = handler(ratings.clone(), history.clone(), Arc::new(FamilyLocks::new()));
    let family_id = FamilyId::new("busy-family").unwrap();

    let tasks: Vec<_> = (0..WRITERS)
        .map(|i| {
            let handler = Arc::clone(&handler);
            let family_id = family_id.clone();
            let answer = if i % 2 == 0 { "Mama" } else { "Papa" };
            tokio::spawn(async move {
                handler
                    .handle(RecordMatchCommand::new(
                        family_id,
                        SurveyResponse::new(format!("q{}", (i % 72) + 1), answer),
                    ))
                    .await
            })
        })
        .collect();

    for task in tasks {
        assert!(task.await.unwrap().unwrap().is_applied());
    }

    let stored = ratings.load(&family_id).await.unwrap().unwrap();
    let global = stored.global().unwrap();
    assert_eq!(global.match_count(), WRITERS as u32);
    assert_eq!(history.len(&family_id).await, WRITERS);

    let per_category: u32 = stored.categories().map(|(_, pair)| pair.match_count()).sum();
    assert_eq!(per_category, WRITERS as u32);
    assert!((global.mama.value + global.papa.value - 3000.0).abs() < 1e-6);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn the_same_match_recorded_concurrently_applies_once() {
    let ratings = Arc::new(InMemoryRatingStore::new());
    let history = Arc::new(InMemoryMatchHistory::new());
    let handler = handler(ratings.clone(), history.clone(), Arc::new(FamilyLocks::new()));
    let family_id = FamilyId::new("replaying-family").unwrap();

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let handler = Arc::clone(&handler);
            let family_id = family_id.clone();
            tokio::spawn(async move {
                handler
                    .handle(RecordMatchCommand::new(family_id, SurveyResponse::new("q10", "Mama")).with_weight(7.0))
                    .await
            })
        })
        .collect();

    let mut applied = 0;
    for task in tasks {
        if task.await.unwrap().unwrap().is_applied() {
            applied += 1;
        }
    }

    assert_eq!(applied, 1);
    assert_eq!(ratings.load(&family_id).await.unwrap().unwrap().total_matches(), 1);
}
