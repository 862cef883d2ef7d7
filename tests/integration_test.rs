use std::sync::Arc;

use matchquiz::cli::TerminalPrompt;
use matchquiz::config::QuestionnaireConfig;
use matchquiz::database::Database;
use matchquiz::models::*;
use matchquiz::service::MatchQuizService;
use matchquiz::store::{MemoryStore, ProfileStore, QuestionStore};
use matchquiz::{AppConfig, MatchQuizError, Result};

fn memory_service() -> MatchQuizService {
    MatchQuizService::with_store(Arc::new(MemoryStore::new()), QuestionnaireConfig::default())
}

async fn answer_from_text(service: &MatchQuizService, user: UserId, input: &'static str) -> Profile {
    let prompt = TerminalPrompt::new(input.as_bytes(), 60);
    service
        .take_questionnaire(user, &format!("user{user}"), &prompt)
        .await
        .expect("questionnaire should complete")
}

#[tokio::test]
async fn test_questionnaire_to_matches() -> Result<()> {
    let service = memory_service();
    service.add_question("Outdoors", "Do you enjoy hiking?").await?;
    service.add_question("Outdoors", "Camping trips?").await?;
    service.add_question("Evenings", "Board games?").await?;

    answer_from_text(&service, 100, "favorite\nno\n3\n").await;
    answer_from_text(&service, 200, "4\n1\nlike\n").await;
    answer_from_text(&service, 300, "1\n4\n1\n").await;
    // Typos are re-prompted, not recorded
    let partial = answer_from_text(&service, 400, "4\nsometimes\n2\n3\n").await;
    assert_eq!(partial.responses[&2].value, AnswerValue::Interested);

    let report = service.find_matches(100).await?;
    let ranked: Vec<_> = report.matches.iter().map(|m| (m.user_id, m.score)).collect();
    assert_eq!(ranked, vec![(200, 100), (400, 89), (300, 12)]);

    let view = service.profile(100).await?;
    assert_eq!(view.match_count, 3);
    assert_eq!(view.categories.len(), 2);

    let comparison = service.compare(300, 100).await?;
    assert_eq!(comparison.score, 12);
    assert!(!comparison.strong);

    Ok(())
}

#[tokio::test]
async fn test_scores_are_stable_across_question_removal() -> Result<()> {
    let service = memory_service();
    for text in ["Coffee?", "Tea?", "Cocoa?"] {
        service.add_question("Drinks", text).await?;
    }
    answer_from_text(&service, 1, "4\n1\n2\n").await;
    answer_from_text(&service, 2, "4\n1\n2\n").await;

    let before = service.compare(1, 2).await?.score;
    service.remove_question(2).await?;
    service.add_question("Drinks", "Juice?").await?;

    let listing = service.list_questions(None).await?;
    let ids: Vec<_> = listing.questions.iter().map(|q| q.question.id).collect();
    assert_eq!(ids, vec![1, 3, 4]);

    // Existing profiles still refer to the original ids
    assert_eq!(service.compare(1, 2).await?.score, before);
    Ok(())
}

#[tokio::test]
async fn test_public_scorer_and_ranker() {
    let subject: RawAnswers = [(1, 4), (2, 1)].into_iter().collect();
    let candidates = vec![
        ("far", [(1, 1), (2, 4)].into_iter().collect::<RawAnswers>()),
        ("same", subject.clone()),
        ("disjoint", [(9, 4)].into_iter().collect::<RawAnswers>()),
    ];

    let ranked = matchquiz::rank(&subject, &candidates).unwrap();
    let order: Vec<_> = ranked.iter().map(|r| (r.candidate, r.score)).collect();
    assert_eq!(order, vec![("same", 100), ("far", 1), ("disjoint", 0)]);

    let bad: RawAnswers = [(1, 7)].into_iter().collect();
    assert!(matches!(
        matchquiz::score(&subject, &bad),
        Err(MatchQuizError::InvalidValue(7))
    ));
}

// ====== PostgreSQL (requires a configured database) ======

async fn setup_test_db() -> Result<Database> {
    let config = AppConfig::load()?;
    let db = Database::from_config(&config).await?;
    db.init_schema().await?;
    Ok(db)
}

/// Remove the test category, which outlives its questions
async fn cleanup_test_category(db: &Database) -> Result<()> {
    sqlx::query("DELETE FROM categories WHERE name = 'IntegrationTest'")
        .execute(db.pool())
        .await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_postgres_question_roundtrip() -> Result<()> {
    let db = setup_test_db().await?;
    assert!(db.is_schema_initialized().await?);

    let added = db.add_question("IntegrationTest", "Do you like tests?").await?;
    assert_eq!(db.get_question(added.id).await?, Some(added.clone()));
    assert!(db
        .question_categories()
        .await?
        .contains(&"IntegrationTest".to_string()));

    assert!(db.remove_question(added.id).await?);
    assert!(!db.remove_question(added.id).await?);
    assert_eq!(db.get_question(added.id).await?, None);

    cleanup_test_category(&db).await
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_postgres_profile_roundtrip() -> Result<()> {
    let db = setup_test_db().await?;
    let user_id: UserId = 9_999_001;
    db.delete_profile(user_id).await?;

    let question = db.add_question("IntegrationTest", "Early mornings?").await?;
    let profile = Profile::new(
        user_id,
        "integration",
        vec![Response::new(&question, AnswerValue::Like)],
    );
    db.insert_profile(&profile).await?;
    assert!(matches!(
        db.insert_profile(&profile).await,
        Err(MatchQuizError::ProfileExists(id)) if id == user_id
    ));

    db.update_match_count(user_id, 7).await?;
    let stored = db.get_profile(user_id).await?.expect("profile stored");
    assert_eq!(stored.match_count, 7);
    assert_eq!(stored.responses[&question.id].value, AnswerValue::Like);
    assert!(db
        .list_profiles_except(user_id)
        .await?
        .iter()
        .all(|p| p.user_id != user_id));

    assert!(db.delete_profile(user_id).await?);
    db.remove_question(question.id).await?;
    cleanup_test_category(&db).await
}
