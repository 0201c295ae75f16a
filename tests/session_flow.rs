use enroll_session::core::session::RandomizeOutcome;
use enroll_session::core::{EnrollmentInput, Gender};
use enroll_session::{
    EnrollmentStore, GroupAssigner, LocalStorage, SessionManager, SessionTimer, TokioTicker,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use tempfile::TempDir;
use uuid::Uuid;

fn session_in(dir: &TempDir) -> SessionManager<LocalStorage, StdRng, TokioTicker> {
    let base = dir.path().to_str().unwrap().to_string();
    let store = EnrollmentStore::new(LocalStorage::new(base));
    let assigner = GroupAssigner::new(StdRng::seed_from_u64(42));
    let (timer, _completions) = SessionTimer::new(TokioTicker);
    SessionManager::new(store, assigner, timer)
}

fn input(name: &str, age: i64) -> EnrollmentInput {
    EnrollmentInput {
        name: name.to_string(),
        phone: "+1234567890".to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        age,
        gender: Gender::Other,
        attachment_name: None,
    }
}

#[tokio::test]
async fn test_full_session_flow_with_local_storage() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir);

    for i in 0..5 {
        session.enroll(input(&format!("User{}", i), 20 + i)).await.unwrap();
    }

    let roster = session.roster().await.unwrap();
    assert_eq!(roster.len(), 5);
    assert_eq!(roster[0].name, "User0");
    assert_eq!(roster[4].name, "User4");
    assert!(dir.path().join("enrollments.json").exists());

    let outcome = session.randomize().await.unwrap();
    assert_eq!(
        outcome,
        RandomizeOutcome::Assigned {
            group_a: 3,
            group_b: 2
        }
    );

    let roster_ids: HashSet<Uuid> = roster.iter().map(|r| r.id).collect();
    let assigned_ids: HashSet<Uuid> = session
        .groups()
        .group_a
        .iter()
        .chain(session.groups().group_b.iter())
        .map(|r| r.id)
        .collect();
    assert_eq!(roster_ids, assigned_ids);

    session.reset().await.unwrap();
    assert!(session.roster().await.unwrap().is_empty());
    assert!(session.groups().is_empty());
    assert!(!dir.path().join("enrollments.json").exists());
}

#[tokio::test]
async fn test_enrollments_survive_a_new_session() {
    let dir = TempDir::new().unwrap();

    {
        let session = session_in(&dir);
        session.enroll(input("Alice", 30)).await.unwrap();
        session.enroll(input("Bob", 25)).await.unwrap();
    }

    // A fresh session over the same data directory sees the same roster.
    let session = session_in(&dir);
    let roster = session.roster().await.unwrap();
    assert_eq!(roster.len(), 2);
    assert_eq!(roster[0].name, "Alice");
    assert_eq!(roster[1].name, "Bob");
    assert!(roster.iter().all(|r| r.group.is_none()));
}

#[tokio::test]
async fn test_corrupted_storage_fails_open() {
    let dir = TempDir::new().unwrap();

    std::fs::write(dir.path().join("enrollments.json"), b"{{ not json").unwrap();

    let session = session_in(&dir);
    assert!(session.roster().await.unwrap().is_empty());

    // Appending over the corrupted file starts a fresh collection.
    session.enroll(input("Alice", 30)).await.unwrap();
    let roster = session.roster().await.unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].name, "Alice");
}

#[tokio::test]
async fn test_rejected_enrollment_leaves_storage_untouched() {
    let dir = TempDir::new().unwrap();
    let session = session_in(&dir);

    session.enroll(input("Alice", 30)).await.unwrap();
    assert!(session.enroll(input("", 30)).await.is_err());
    assert!(session.enroll(input("Bob", 0)).await.is_err());
    assert!(session.enroll(input("Bob", 151)).await.is_err());

    let roster = session.roster().await.unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].name, "Alice");
}
