#![allow(clippy::unwrap_used)]

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use sober_streak_bot::database::{connection::DatabaseManager, models::UserStreak};
use sober_streak_bot::services::streak::{apply_answer, handle_text, DailyAnswer, StreakReply};
use tempfile::TempDir;

/// Helper function to create a test database
async fn create_test_db() -> (DatabaseManager, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite://{}", db_path.display());

    let db = DatabaseManager::new(&db_url)
        .await
        .expect("Failed to create test database");
    db.run_migrations().await.expect("Failed to run migrations");

    (db, temp_dir)
}

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

async fn seed(db: &DatabaseManager, chat_id: i64, streak: i64) -> UserStreak {
    let record = UserStreak::upsert(&db.pool, &UserStreak::new(chat_id, at(2025, 8, 1)))
        .await
        .unwrap();
    let mut updated = record.clone();
    updated.streak = streak;
    assert!(UserStreak::save_if_version(&db.pool, &updated, record.version).await.unwrap());
    UserStreak::find_by_chat_id(&db.pool, chat_id).await.unwrap().unwrap()
}

#[tokio::test]
async fn test_date_reply_counts_whole_days() {
    let (db, _temp_dir) = create_test_db().await;

    let reply = handle_text(&db, 1, "2025-08-12", at(2025, 8, 22)).await.unwrap();

    assert_eq!(reply, Some(StreakReply::DaysWithout(10)));
    assert_eq!(reply.unwrap().to_string(), "Дней без алкоголя: 10");
}

#[tokio::test]
async fn test_date_reply_floors_partial_days() {
    let (db, _temp_dir) = create_test_db().await;
    let now = at(2025, 8, 22) + Duration::hours(23) + Duration::minutes(59);

    let reply = handle_text(&db, 1, "2025-08-12", now).await.unwrap();

    assert_eq!(reply, Some(StreakReply::DaysWithout(10)));
}

#[tokio::test]
async fn test_future_date_gives_negative_count() {
    let (db, _temp_dir) = create_test_db().await;

    let reply = handle_text(&db, 1, "2025-08-25", at(2025, 8, 22)).await.unwrap();

    assert_eq!(reply, Some(StreakReply::DaysWithout(-3)));
}

#[tokio::test]
async fn test_first_date_creates_record() {
    let (db, _temp_dir) = create_test_db().await;
    let chat_id = 555i64;

    handle_text(&db, chat_id, "2025-08-12", at(2025, 8, 22)).await.unwrap();

    let record = UserStreak::find_by_chat_id(&db.pool, chat_id).await.unwrap().unwrap();
    assert_eq!(record.streak, 0);
    assert_eq!(record.last_drink_date, at(2025, 8, 12));
    assert_eq!(
        record.last_drink_date.date_naive(),
        NaiveDate::from_ymd_opt(2025, 8, 12).unwrap()
    );
}

#[tokio::test]
async fn test_same_date_twice_is_idempotent() {
    let (db, _temp_dir) = create_test_db().await;
    let chat_id = 556i64;

    handle_text(&db, chat_id, "2025-08-12", at(2025, 8, 22)).await.unwrap();
    let first = UserStreak::find_by_chat_id(&db.pool, chat_id).await.unwrap().unwrap();

    handle_text(&db, chat_id, "2025-08-12", at(2025, 8, 22)).await.unwrap();
    let second = UserStreak::find_by_chat_id(&db.pool, chat_id).await.unwrap().unwrap();

    assert_eq!(first.streak, 0);
    assert_eq!(second.streak, 0);
    assert_eq!(first.last_drink_date, second.last_drink_date);
    assert_eq!(UserStreak::count(&db.pool).await.unwrap(), 1);
}

#[tokio::test]
async fn test_new_date_resets_existing_streak() {
    let (db, _temp_dir) = create_test_db().await;
    seed(&db, 7, 12).await;

    handle_text(&db, 7, "2025-08-20", at(2025, 8, 22)).await.unwrap();

    let record = UserStreak::find_by_chat_id(&db.pool, 7).await.unwrap().unwrap();
    assert_eq!(record.streak, 0);
    assert_eq!(record.last_drink_date, at(2025, 8, 20));
}

#[tokio::test]
async fn test_impossible_date_is_refused_without_record() {
    let (db, _temp_dir) = create_test_db().await;

    let reply = handle_text(&db, 8, "2025-13-40", at(2025, 8, 22)).await.unwrap();

    assert_eq!(reply, Some(StreakReply::InvalidDate));
    assert!(UserStreak::find_by_chat_id(&db.pool, 8).await.unwrap().is_none());
}

#[tokio::test]
async fn test_other_text_is_ignored() {
    let (db, _temp_dir) = create_test_db().await;

    for text in ["hello", "/start", "12.08.2025", ""] {
        let reply = handle_text(&db, 9, text, at(2025, 8, 22)).await.unwrap();
        assert_eq!(reply, None, "Should ignore {:?}", text);
    }
    assert_eq!(UserStreak::count(&db.pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_no_answer_extends_streak() {
    let (db, _temp_dir) = create_test_db().await;
    let before = seed(&db, 10, 3).await;

    let reply = apply_answer(&db, 10, DailyAnswer::Sober, at(2025, 8, 22)).await.unwrap();

    assert_eq!(reply, Some(StreakReply::SoberYesterday(4)));
    let record = UserStreak::find_by_chat_id(&db.pool, 10).await.unwrap().unwrap();
    assert_eq!(record.streak, 4);
    assert_eq!(record.last_drink_date, before.last_drink_date);
}

#[tokio::test]
async fn test_yes_answer_resets_to_now() {
    let (db, _temp_dir) = create_test_db().await;
    seed(&db, 11, 9).await;
    let now = at(2025, 8, 22) + Duration::hours(9) + Duration::seconds(17);

    let reply = apply_answer(&db, 11, DailyAnswer::Drank, now).await.unwrap();

    assert_eq!(reply, Some(StreakReply::DrankYesterday));
    let record = UserStreak::find_by_chat_id(&db.pool, 11).await.unwrap().unwrap();
    assert_eq!(record.streak, 0);
    assert_eq!(record.last_drink_date, now);
}

#[tokio::test]
async fn test_answer_without_record_changes_nothing() {
    let (db, _temp_dir) = create_test_db().await;

    for answer in [DailyAnswer::Drank, DailyAnswer::Sober] {
        let reply = apply_answer(&db, 12, answer, at(2025, 8, 22)).await.unwrap();
        assert_eq!(reply, None);
    }
    assert_eq!(UserStreak::count(&db.pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_concurrent_answers_are_not_lost() {
    let (db, _temp_dir) = create_test_db().await;
    seed(&db, 13, 0).await;
    let now = at(2025, 8, 22);

    let (a, b) = tokio::join!(
        apply_answer(&db, 13, DailyAnswer::Sober, now),
        apply_answer(&db, 13, DailyAnswer::Sober, now),
    );
    assert!(a.unwrap().is_some());
    assert!(b.unwrap().is_some());

    let record = UserStreak::find_by_chat_id(&db.pool, 13).await.unwrap().unwrap();
    assert_eq!(record.streak, 2);
}

#[tokio::test]
async fn test_store_failure_surfaces_as_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("gone").join("absent.db");
    let db = DatabaseManager::connect_lazy(&format!("sqlite:{}", missing.display())).unwrap();

    assert!(handle_text(&db, 1, "2025-08-12", at(2025, 8, 22)).await.is_err());
    assert!(apply_answer(&db, 1, DailyAnswer::Sober, at(2025, 8, 22)).await.is_err());
    // Ignored text never touches the store
    assert_eq!(handle_text(&db, 1, "hi", at(2025, 8, 22)).await.unwrap(), None);
}
