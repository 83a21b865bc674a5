use chrono::{Duration, TimeZone, Utc};
use rng_service::models::GenerationEvent;
use rng_service::repositories::GenerationRepository;
use sqlx::SqlitePool;

fn event_at(user: &str, value: f64, minutes: i64) -> GenerationEvent {
    let mut event = GenerationEvent::new(user, value);
    event.timestamp =
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes);
    event
}

#[sqlx::test(migrations = "src/db/migrations")]
async fn test_insert_and_read_back(pool: SqlitePool) {
    let repo = GenerationRepository::new(&pool);

    let event = event_at("alice", 0.25, 0);
    repo.insert(&event).await.unwrap();

    let page = repo.list_page(10, 0).await.unwrap();
    assert_eq!(page, vec![event]);
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[sqlx::test(migrations = "src/db/migrations")]
async fn test_duplicate_id_is_rejected(pool: SqlitePool) {
    let repo = GenerationRepository::new(&pool);

    let event = event_at("alice", 0.25, 0);
    repo.insert(&event).await.unwrap();
    assert!(repo.insert(&event).await.is_err());
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[sqlx::test(migrations = "src/db/migrations")]
async fn test_user_average_and_count(pool: SqlitePool) {
    let repo = GenerationRepository::new(&pool);

    for (i, value) in [0.1, 0.2, 0.6].iter().enumerate() {
        repo.insert(&event_at("alice", *value, i as i64)).await.unwrap();
    }
    repo.insert(&event_at("bob", 0.9, 10)).await.unwrap();

    let alice = repo.find_average("alice").await.unwrap().unwrap();
    assert_eq!(alice.user, "alice");
    assert_eq!(alice.count, 3);
    assert!((alice.average - 0.3).abs() < 1e-9);

    let all = repo.find_average("All").await.unwrap().unwrap();
    assert_eq!(all.count, 4);
    assert!((all.average - 0.45).abs() < 1e-9);
}

#[sqlx::test(migrations = "src/db/migrations")]
async fn test_average_lookup_is_exact_match(pool: SqlitePool) {
    let repo = GenerationRepository::new(&pool);

    repo.insert(&event_at("Alice", 0.5, 0)).await.unwrap();

    assert!(repo.find_average("Alice").await.unwrap().is_some());
    assert!(repo.find_average("alice").await.unwrap().is_none());
    assert!(repo.find_average("Al%").await.unwrap().is_none());
}

#[sqlx::test(migrations = "src/db/migrations")]
async fn test_unknown_user_and_empty_store_not_found(pool: SqlitePool) {
    let repo = GenerationRepository::new(&pool);

    assert!(repo.find_average("nobody").await.unwrap().is_none());
    assert!(repo.find_average("All").await.unwrap().is_none());
    assert!(repo.list_averages().await.unwrap().is_empty());
}

#[sqlx::test(migrations = "src/db/migrations")]
async fn test_list_averages_excludes_aggregate_row(pool: SqlitePool) {
    let repo = GenerationRepository::new(&pool);

    repo.insert(&event_at("alice", 0.5, 0)).await.unwrap();
    repo.insert(&event_at("bob", 0.5, 1)).await.unwrap();

    let averages = repo.list_averages().await.unwrap();
    let users: Vec<&str> = averages.iter().map(|a| a.user.as_str()).collect();
    assert_eq!(users, vec!["alice", "bob"]);
}

#[sqlx::test(migrations = "src/db/migrations")]
async fn test_list_users_is_distinct(pool: SqlitePool) {
    let repo = GenerationRepository::new(&pool);

    repo.insert(&event_at("bob", 0.1, 0)).await.unwrap();
    repo.insert(&event_at("alice", 0.2, 1)).await.unwrap();
    repo.insert(&event_at("bob", 0.3, 2)).await.unwrap();

    assert_eq!(repo.list_users().await.unwrap(), vec!["alice", "bob"]);
}

#[sqlx::test(migrations = "src/db/migrations")]
async fn test_paging_is_most_recent_first(pool: SqlitePool) {
    let repo = GenerationRepository::new(&pool);

    let events: Vec<GenerationEvent> = (0..5)
        .map(|i| event_at("alice", i as f64 / 10.0, i))
        .collect();
    for event in &events {
        repo.insert(event).await.unwrap();
    }

    let first = repo.list_page(2, 0).await.unwrap();
    assert_eq!(first, vec![events[4].clone(), events[3].clone()]);

    let second = repo.list_page(2, 2).await.unwrap();
    assert_eq!(second, vec![events[2].clone(), events[1].clone()]);

    let last = repo.list_page(2, 4).await.unwrap();
    assert_eq!(last, vec![events[0].clone()]);

    assert!(repo.list_page(2, 6).await.unwrap().is_empty());
}
