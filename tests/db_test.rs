mod common;

use chrono::NaiveDate;
use common::create_test_db;
use ramadania::db::{CompletionOutcome, Db, RecordOutcome, RegisterOutcome};
use ramadania::names;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

async fn seed_user(db: &Db, name: &str, phone: &str) -> i64 {
    match db
        .create_user(name, phone, "29901011234567", "secret", None, names::USER_ROLE)
        .await
        .expect("create user")
    {
        RegisterOutcome::Created { user_id } => user_id,
        RegisterOutcome::PhoneTaken => panic!("phone already taken in a fresh database"),
    }
}

async fn seed_season(db: &Db) -> i64 {
    db.create_season("1447", date("2026-02-18"), date("2026-03-19"), 30)
        .await
        .expect("create season")
}

async fn seed_question(db: &Db, season_id: i64, day_number: i64, correct: i64) -> i64 {
    let options = [
        "أ".to_string(),
        "ب".to_string(),
        "ج".to_string(),
        "د".to_string(),
        String::new(),
    ];
    db.upsert_question(
        season_id,
        day_number,
        &format!("سؤال اليوم {day_number}"),
        &options,
        correct,
        names::DEFAULT_TIMER_SECONDS,
        names::PUBLISHED_STATUS,
    )
    .await
    .expect("create question")
}

async fn score_of(db: &Db, user_id: i64) -> (i64, i64) {
    let profile = db.profile(user_id).await.unwrap().expect("profile exists");
    (profile.score, profile.total_time_ms)
}

#[tokio::test]
async fn correct_answer_credits_score_exactly_once() {
    let db = create_test_db().await;
    let season = seed_season(&db).await;
    let question = seed_question(&db, season, 1, 2).await;
    let user = seed_user(&db, "أحمد", "01000000001").await;

    let first = db
        .record_answer(user, question, 2, true, 4200)
        .await
        .unwrap();
    assert_eq!(first, RecordOutcome::Recorded { is_correct: true });
    assert_eq!(score_of(&db, user).await, (3, 4200));

    // A retry of the same submission must not double-credit.
    let second = db
        .record_answer(user, question, 2, true, 9000)
        .await
        .unwrap();
    assert_eq!(second, RecordOutcome::AlreadyAnswered);
    assert_eq!(score_of(&db, user).await, (3, 4200));
}

#[tokio::test]
async fn simultaneous_submissions_credit_only_one() {
    let db = create_test_db().await;
    let season = seed_season(&db).await;
    let question = seed_question(&db, season, 1, 2).await;
    let user = seed_user(&db, "متسابق", "01000000121").await;

    // Both writes race for the same (user, question) slot; the constraint
    // decides the winner and exactly one credit lands.
    let (a, b) = tokio::join!(
        db.record_answer(user, question, 2, true, 700),
        db.record_answer(user, question, 2, true, 900),
    );
    let outcomes = [a.unwrap(), b.unwrap()];
    let recorded = outcomes
        .iter()
        .filter(|o| matches!(o, RecordOutcome::Recorded { .. }))
        .count();
    assert_eq!(recorded, 1);
    assert_eq!(
        outcomes
            .iter()
            .filter(|o| **o == RecordOutcome::AlreadyAnswered)
            .count(),
        1
    );
    assert_eq!(score_of(&db, user).await.0, 3);
}

#[tokio::test]
async fn wrong_answer_is_recorded_without_credit() {
    let db = create_test_db().await;
    let season = seed_season(&db).await;
    let question = seed_question(&db, season, 1, 2).await;
    let user = seed_user(&db, "سارة", "01000000002").await;

    let outcome = db
        .record_answer(user, question, 3, false, 1500)
        .await
        .unwrap();
    assert_eq!(outcome, RecordOutcome::Recorded { is_correct: false });
    assert_eq!(score_of(&db, user).await, (0, 0));

    // The wrong attempt still occupies the (user, question) slot.
    let retry = db.record_answer(user, question, 2, true, 100).await.unwrap();
    assert_eq!(retry, RecordOutcome::AlreadyAnswered);
    assert_eq!(score_of(&db, user).await, (0, 0));
}

#[tokio::test]
async fn answer_for_day_carries_the_correct_option() {
    let db = create_test_db().await;
    let season = seed_season(&db).await;
    let question = seed_question(&db, season, 5, 4).await;
    let user = seed_user(&db, "خالد", "01000000003").await;

    assert!(db.answer_for_day(user, season, 5).await.unwrap().is_none());

    db.record_answer(user, question, 1, false, 800).await.unwrap();

    let answer = db
        .answer_for_day(user, season, 5)
        .await
        .unwrap()
        .expect("answer recorded");
    assert_eq!(answer.answer.selected_option, 1);
    assert_eq!(answer.correct_answer, 4);
    assert!(!answer.answer.is_correct);
}

#[tokio::test]
async fn leaderboard_orders_by_score_then_cumulative_time() {
    let db = create_test_db().await;
    let season = seed_season(&db).await;
    let q1 = seed_question(&db, season, 1, 1).await;
    let q2 = seed_question(&db, season, 2, 1).await;

    let a = seed_user(&db, "أ", "01000000011").await;
    let b = seed_user(&db, "ب", "01000000012").await;
    let c = seed_user(&db, "ج", "01000000013").await;

    // a and b tie on score; b was faster. c leads on score despite being slow.
    db.record_answer(a, q1, 1, true, 500).await.unwrap();
    db.record_answer(b, q1, 1, true, 300).await.unwrap();
    db.record_answer(c, q1, 1, true, 900).await.unwrap();
    db.record_answer(c, q2, 1, true, 900).await.unwrap();

    let rows = db.leaderboard(None).await.unwrap();
    let order: Vec<i64> = rows.iter().map(|r| r.id).collect();
    assert_eq!(order, vec![c, b, a]);

    let ranks: Vec<i64> = rows.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);
}

#[tokio::test]
async fn leaderboard_masks_todays_points_until_reveal() {
    let db = create_test_db().await;
    let season = seed_season(&db).await;
    let q_today = seed_question(&db, season, 7, 1).await;
    let q_old = seed_question(&db, season, 6, 1).await;

    let answered = seed_user(&db, "صائم", "01000000021").await;
    let other = seed_user(&db, "آخر", "01000000022").await;

    db.record_answer(answered, q_old, 1, true, 400).await.unwrap();
    db.record_answer(answered, q_today, 1, true, 200).await.unwrap();
    db.record_answer(other, q_old, 1, true, 100).await.unwrap();

    // Day 7 not yet revealed: its points are hidden from the standings.
    let masked = db.leaderboard(Some((season, 7))).await.unwrap();
    let answered_row = masked.iter().find(|r| r.id == answered).unwrap();
    assert_eq!(answered_row.score, 3);
    let other_row = masked.iter().find(|r| r.id == other).unwrap();
    assert_eq!(other_row.score, 3);

    // After the reveal the full score shows.
    let revealed = db.leaderboard(None).await.unwrap();
    let answered_row = revealed.iter().find(|r| r.id == answered).unwrap();
    assert_eq!(answered_row.score, 6);
}

#[tokio::test]
async fn day_champion_is_the_fastest_correct_answer() {
    let db = create_test_db().await;
    let season = seed_season(&db).await;
    let question = seed_question(&db, season, 3, 2).await;

    let slow = seed_user(&db, "بطيء", "01000000031").await;
    let fast = seed_user(&db, "سريع", "01000000032").await;
    let wrong = seed_user(&db, "مخطئ", "01000000033").await;

    db.record_answer(slow, question, 2, true, 5000).await.unwrap();
    db.record_answer(fast, question, 2, true, 1200).await.unwrap();
    // Fastest raw time, but incorrect.
    db.record_answer(wrong, question, 1, false, 50).await.unwrap();

    let champion = db
        .day_champion(question)
        .await
        .unwrap()
        .expect("someone answered correctly");
    assert_eq!(champion.name, "سريع");
    assert_eq!(champion.time_taken_ms, 1200);
}

#[tokio::test]
async fn challenge_completion_is_idempotent() {
    let db = create_test_db().await;
    let user = seed_user(&db, "مجتهد", "01000000041").await;

    let first = db.complete_challenge(user, 1, 100).await.unwrap();
    assert_eq!(first, CompletionOutcome::New);
    assert_eq!(score_of(&db, user).await.0, 100);

    let second = db.complete_challenge(user, 1, 100).await.unwrap();
    assert_eq!(second, CompletionOutcome::AlreadyCompleted);
    assert_eq!(score_of(&db, user).await.0, 100);

    // A different day is a fresh slot.
    let third = db.complete_challenge(user, 2, 150).await.unwrap();
    assert_eq!(third, CompletionOutcome::New);
    assert_eq!(score_of(&db, user).await.0, 250);

    assert_eq!(db.completed_days(user).await.unwrap(), vec![1, 2]);
}

#[tokio::test]
async fn share_reward_is_once_per_calendar_day() {
    let db = create_test_db().await;
    let user = seed_user(&db, "ناشر", "01000000051").await;

    let first = db.record_share(user, date("2026-02-20")).await.unwrap();
    assert_eq!(first, CompletionOutcome::New);
    let again = db.record_share(user, date("2026-02-20")).await.unwrap();
    assert_eq!(again, CompletionOutcome::AlreadyCompleted);
    assert_eq!(score_of(&db, user).await.0, names::SHARE_REWARD_POINTS);

    let next_day = db.record_share(user, date("2026-02-21")).await.unwrap();
    assert_eq!(next_day, CompletionOutcome::New);
    assert_eq!(score_of(&db, user).await.0, 2 * names::SHARE_REWARD_POINTS);
}

#[tokio::test]
async fn challenge_leaderboard_sums_awarded_points() {
    let db = create_test_db().await;
    let a = seed_user(&db, "أول", "01000000061").await;
    let b = seed_user(&db, "ثاني", "01000000062").await;

    db.complete_challenge(a, 1, 100).await.unwrap();
    db.complete_challenge(a, 2, 150).await.unwrap();
    db.complete_challenge(b, 1, 100).await.unwrap();

    let rows = db.challenge_leaderboard().await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "أول");
    assert_eq!(rows[0].total_points, 250);
    assert_eq!(rows[0].completed_count, 2);
    assert_eq!(rows[1].total_points, 100);
}

#[tokio::test]
async fn duplicate_phone_is_rejected() {
    let db = create_test_db().await;
    seed_user(&db, "الأصلي", "01000000071").await;

    let outcome = db
        .create_user("منتحل", "01000000071", "123", "pw", None, names::USER_ROLE)
        .await
        .unwrap();
    assert!(matches!(outcome, RegisterOutcome::PhoneTaken));
}

#[tokio::test]
async fn login_verifies_the_password() {
    let db = create_test_db().await;
    let user = seed_user(&db, "مسجل", "01000000081").await;

    let ok = db.verify_login("01000000081", "secret").await.unwrap();
    assert_eq!(ok.expect("valid credentials").id, user);

    assert!(db.verify_login("01000000081", "wrong").await.unwrap().is_none());
    assert!(db.verify_login("01099999999", "secret").await.unwrap().is_none());
}

#[tokio::test]
async fn profile_update_requires_the_current_password() {
    let db = create_test_db().await;
    let user = seed_user(&db, "قديم", "01000000091").await;

    let rejected = db
        .update_profile(user, "جديد", None, None, Some(("wrong", "newpass")))
        .await
        .unwrap();
    assert!(!rejected);
    // The rejected attempt must not have renamed the account either.
    assert!(db.verify_login("01000000091", "secret").await.unwrap().is_some());

    let accepted = db
        .update_profile(user, "جديد", None, None, Some(("secret", "newpass")))
        .await
        .unwrap();
    assert!(accepted);
    assert!(db.verify_login("01000000091", "newpass").await.unwrap().is_some());
    assert!(db.verify_login("01000000091", "secret").await.unwrap().is_none());
}

#[tokio::test]
async fn announce_winner_picks_the_leaderboard_head() {
    let db = create_test_db().await;
    let season = seed_season(&db).await;
    let question = seed_question(&db, season, 1, 1).await;

    let runner_up = seed_user(&db, "ثاني", "01000000101").await;
    let head = seed_user(&db, "فائز", "01000000102").await;
    db.record_answer(head, question, 1, true, 100).await.unwrap();
    db.record_answer(runner_up, question, 1, true, 900).await.unwrap();

    let winner = db.announce_winner().await.unwrap();
    assert_eq!(winner, Some(head));

    let active = db.active_season().await.unwrap().expect("season active");
    assert_eq!(active.winner_user_id, Some(head));
}

#[tokio::test]
async fn announce_winner_with_no_players_records_nothing() {
    let db = create_test_db().await;
    seed_season(&db).await;

    assert_eq!(db.announce_winner().await.unwrap(), None);
}

#[tokio::test]
async fn creating_a_season_deactivates_the_previous_one() {
    let db = create_test_db().await;
    let old = seed_season(&db).await;
    let new = db
        .create_season("1448", date("2027-02-07"), date("2027-03-08"), 30)
        .await
        .unwrap();

    let active = db.active_season().await.unwrap().expect("season active");
    assert_eq!(active.id, new);
    assert_ne!(active.id, old);
}

#[tokio::test]
async fn schedule_upsert_replaces_the_day_slot() {
    let db = create_test_db().await;
    let season = seed_season(&db).await;

    db.upsert_schedule_day(
        season,
        3,
        Some("الجمعة"),
        date("2026-02-20"),
        &[Some("05:15 ص"), None, None, None, Some("06:00 م"), None],
    )
    .await
    .unwrap();

    // Re-uploading the same day overwrites instead of duplicating.
    db.upsert_schedule_day(
        season,
        3,
        Some("الجمعة"),
        date("2026-02-20"),
        &[Some("05:16 ص"), None, None, None, Some("06:01 م"), None],
    )
    .await
    .unwrap();

    let day = db
        .schedule_for_date(season, date("2026-02-20"))
        .await
        .unwrap()
        .expect("schedule row");
    assert_eq!(day.day_number, 3);
    assert_eq!(day.fajr.as_deref(), Some("05:16 ص"));

    let all = db.active_schedule().await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn published_filter_hides_draft_questions() {
    let db = create_test_db().await;
    let season = seed_season(&db).await;
    let options = ["أ".to_string(), "ب".to_string(), String::new(), String::new(), String::new()];
    db.upsert_question(season, 1, "مسودة", &options, 1, 30, names::DEFAULT_QUESTION_STATUS)
        .await
        .unwrap();

    assert!(db.published_question(season, 1).await.unwrap().is_none());
    assert!(db.question_for_day(season, 1).await.unwrap().is_some());
}

#[tokio::test]
async fn day_result_counts_correct_and_total_answers() {
    let db = create_test_db().await;
    let season = seed_season(&db).await;
    let question = seed_question(&db, season, 2, 1).await;

    let u1 = seed_user(&db, "١", "01000000111").await;
    let u2 = seed_user(&db, "٢", "01000000112").await;
    let u3 = seed_user(&db, "٣", "01000000113").await;
    db.record_answer(u1, question, 1, true, 100).await.unwrap();
    db.record_answer(u2, question, 2, false, 100).await.unwrap();
    db.record_answer(u3, question, 1, true, 100).await.unwrap();

    let result = db.day_result(season, 2).await.unwrap().expect("result");
    assert_eq!(result.total_answers, 3);
    assert_eq!(result.correct_count, 2);
    assert_eq!(result.question.correct_answer, 1);
}
