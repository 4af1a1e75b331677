use chrono::{Duration, Utc};
use uuid::Uuid;

use toolhub_catalog::domain::challenge::{ChallengeKey, MAX_ATTEMPTS};
use toolhub_catalog::error::CatalogError;
use toolhub_catalog::usecase::challenge::{
    IssueChallengeInput, IssueChallengeUseCase, VerifyChallengeUseCase,
};

use crate::helpers::{MockChallengeRepo, MockNotifier, cheap_hasher};

fn issuer(
    repo: &MockChallengeRepo,
    notifier: &MockNotifier,
) -> IssueChallengeUseCase<MockChallengeRepo, MockNotifier> {
    IssueChallengeUseCase {
        challenges: repo.clone(),
        notifier: notifier.clone(),
        hasher: cheap_hasher(),
    }
}

fn verifier(repo: &MockChallengeRepo) -> VerifyChallengeUseCase<MockChallengeRepo> {
    VerifyChallengeUseCase {
        challenges: repo.clone(),
        hasher: cheap_hasher(),
    }
}

fn issue_input(key: ChallengeKey) -> IssueChallengeInput {
    IssueChallengeInput {
        key,
        deliver_to: "backend@toolhub.test".to_owned(),
        tool_name: "Schema Diff Watcher".to_owned(),
    }
}

/// A six-digit code guaranteed to differ from `code`.
fn wrong_code(code: &str) -> String {
    if code == "000000" {
        "000001".to_owned()
    } else {
        "000000".to_owned()
    }
}

#[tokio::test]
async fn should_store_only_hash_and_deliver_plaintext() {
    let repo = MockChallengeRepo::empty();
    let notifier = MockNotifier::new();
    let key = ChallengeKey::delete_tool(Uuid::new_v4(), Uuid::new_v4());

    issuer(&repo, &notifier).execute(issue_input(key)).await.unwrap();

    let sent = notifier.sent_handle();
    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "backend@toolhub.test");
    assert_eq!(sent[0].tool_name, "Schema Diff Watcher");
    assert_eq!(sent[0].code.len(), 6);
    assert!(sent[0].code.chars().all(|c| c.is_ascii_digit()));

    let challenges = repo.challenges_handle();
    let challenges = challenges.lock().unwrap();
    assert_eq!(challenges.len(), 1);
    let stored = &challenges[0];
    assert_eq!(stored.key, key);
    assert_eq!(stored.attempts, 0);
    assert!(stored.consumed_at.is_none());
    assert_ne!(stored.code_hash, sent[0].code, "plaintext must not be stored");
    assert!(stored.code_hash.starts_with("$argon2id$"));
}

#[tokio::test]
async fn should_authorize_correct_code_exactly_once() {
    let repo = MockChallengeRepo::empty();
    let notifier = MockNotifier::new();
    let key = ChallengeKey::delete_tool(Uuid::new_v4(), Uuid::new_v4());

    issuer(&repo, &notifier).execute(issue_input(key)).await.unwrap();
    let code = notifier.sent_handle().lock().unwrap()[0].code.clone();

    let verify = verifier(&repo);
    verify.execute(key, &code).await.unwrap();

    let again = verify.execute(key, &code).await;
    assert!(
        matches!(again, Err(CatalogError::NoActiveChallenge)),
        "expected NoActiveChallenge on replay, got {again:?}"
    );
}

#[tokio::test]
async fn should_reject_when_no_challenge_was_issued() {
    let repo = MockChallengeRepo::empty();
    let key = ChallengeKey::delete_tool(Uuid::new_v4(), Uuid::new_v4());

    let result = verifier(&repo).execute(key, "123456").await;

    assert!(
        matches!(result, Err(CatalogError::NoActiveChallenge)),
        "expected NoActiveChallenge, got {result:?}"
    );
}

#[tokio::test]
async fn should_invalidate_previous_code_on_reissue() {
    let repo = MockChallengeRepo::empty();
    let notifier = MockNotifier::new();
    let key = ChallengeKey::delete_tool(Uuid::new_v4(), Uuid::new_v4());
    let issue = issuer(&repo, &notifier);

    issue.execute(issue_input(key)).await.unwrap();
    issue.execute(issue_input(key)).await.unwrap();

    let (first, second) = {
        let sent = notifier.sent_handle();
        let sent = sent.lock().unwrap();
        (sent[0].code.clone(), sent[1].code.clone())
    };
    assert_eq!(
        repo.challenges_handle().lock().unwrap().len(),
        1,
        "reissue must leave a single unconsumed challenge"
    );

    let verify = verifier(&repo);
    if first != second {
        let stale = verify.execute(key, &first).await;
        assert!(
            matches!(stale, Err(CatalogError::InvalidCode)),
            "expected InvalidCode for superseded code, got {stale:?}"
        );
    }
    verify.execute(key, &second).await.unwrap();
}

#[tokio::test]
async fn should_keep_challenges_for_other_tuples_separate() {
    let repo = MockChallengeRepo::empty();
    let notifier = MockNotifier::new();
    let user_id = Uuid::new_v4();
    let first_key = ChallengeKey::delete_tool(user_id, Uuid::new_v4());
    let second_key = ChallengeKey::delete_tool(user_id, Uuid::new_v4());
    let issue = issuer(&repo, &notifier);

    issue.execute(issue_input(first_key)).await.unwrap();
    issue.execute(issue_input(second_key)).await.unwrap();

    assert_eq!(repo.challenges_handle().lock().unwrap().len(), 2);
    let code = notifier.sent_handle().lock().unwrap()[0].code.clone();
    verifier(&repo).execute(first_key, &code).await.unwrap();
}

#[tokio::test]
async fn should_lock_after_max_wrong_attempts() {
    let repo = MockChallengeRepo::empty();
    let notifier = MockNotifier::new();
    let key = ChallengeKey::delete_tool(Uuid::new_v4(), Uuid::new_v4());

    issuer(&repo, &notifier).execute(issue_input(key)).await.unwrap();
    let code = notifier.sent_handle().lock().unwrap()[0].code.clone();
    let wrong = wrong_code(&code);
    let verify = verifier(&repo);

    for attempt in 1..=MAX_ATTEMPTS {
        let result = verify.execute(key, &wrong).await;
        assert!(
            matches!(result, Err(CatalogError::InvalidCode)),
            "attempt {attempt}: expected InvalidCode, got {result:?}"
        );
    }

    let next = verify.execute(key, &wrong).await;
    assert!(
        matches!(next, Err(CatalogError::TooManyAttempts)),
        "expected TooManyAttempts once attempts are spent, got {next:?}"
    );

    // The correct code no longer helps once locked.
    let locked = verify.execute(key, &code).await;
    assert!(
        matches!(locked, Err(CatalogError::TooManyAttempts)),
        "expected TooManyAttempts after lock, got {locked:?}"
    );
    assert_eq!(
        repo.challenges_handle().lock().unwrap()[0].attempts,
        MAX_ATTEMPTS
    );
}

#[tokio::test]
async fn should_reject_expired_challenge() {
    let repo = MockChallengeRepo::empty();
    let notifier = MockNotifier::new();
    let key = ChallengeKey::delete_tool(Uuid::new_v4(), Uuid::new_v4());

    issuer(&repo, &notifier).execute(issue_input(key)).await.unwrap();
    let code = notifier.sent_handle().lock().unwrap()[0].code.clone();
    repo.challenges_handle().lock().unwrap()[0].expires_at = Utc::now() - Duration::seconds(1);

    let result = verifier(&repo).execute(key, &code).await;

    assert!(
        matches!(result, Err(CatalogError::ChallengeExpired)),
        "expected ChallengeExpired, got {result:?}"
    );
    assert!(repo.challenges_handle().lock().unwrap()[0].consumed_at.is_none());
}

#[tokio::test]
async fn should_keep_challenge_when_delivery_fails() {
    let repo = MockChallengeRepo::empty();
    let notifier = MockNotifier::failing();
    let key = ChallengeKey::delete_tool(Uuid::new_v4(), Uuid::new_v4());

    let result = issuer(&repo, &notifier).execute(issue_input(key)).await;

    assert!(
        matches!(result, Err(CatalogError::DeliveryFailed(_))),
        "expected DeliveryFailed, got {result:?}"
    );
    assert_eq!(repo.challenges_handle().lock().unwrap().len(), 1);
}
