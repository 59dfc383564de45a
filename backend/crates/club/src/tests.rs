//! Club use case tests against the in-memory stores

use std::sync::Arc;

use kernel::id::{PostId, UserId};
use membership::InMemoryMembershipRepository;
use membership::MembershipError;
use membership::domain::entity::user::User;
use membership::domain::repository::UserRepository;
use membership::models::{Email, SubscriptionStatus, UserRole};
use parking_lot::{Mutex, RwLock};

use crate::application::{
    ClubConfig, CreatePostInput, CreatePostUseCase, DeletePostUseCase, ListPostsUseCase,
    PuzzleStatusUseCase, SubmitAnswerUseCase,
};
use crate::domain::entities::{Post, Puzzle, PuzzleAttempt};
use crate::domain::value_objects::PuzzleProgress;
use crate::domain::notifier::{PushError, PushMessage, PushSender};
use crate::domain::repository::{AppendOutcome, PostRepository, PuzzleAttemptRepository};
use crate::domain::services::EXHAUSTED_MESSAGE;
use crate::error::{ClubError, ClubResult};
use crate::infra::InMemoryClubRepository;

#[derive(Clone, Default)]
struct RecordingSender {
    sent: Arc<Mutex<Vec<PushMessage>>>,
}

impl PushSender for RecordingSender {
    async fn send(&self, message: &PushMessage) -> Result<(), PushError> {
        self.sent.lock().push(message.clone());
        if message.to.ends_with("[dead]") {
            return Err(PushError::Rejected("DeviceNotRegistered".to_string()));
        }
        Ok(())
    }
}

fn user(email: &str, role: UserRole, status: SubscriptionStatus) -> User {
    let mut user = User::provision(Email::new(email).unwrap(), email.to_string(), None);
    user.role = role;
    user.subscription_status = status;
    user
}

fn owner() -> User {
    user("owner@club.org", UserRole::Owner, SubscriptionStatus::Inactive)
}

fn active_member() -> User {
    user("member@club.org", UserRole::Member, SubscriptionStatus::Active)
}

fn puzzle_input(answer: &str) -> CreatePostInput {
    CreatePostInput {
        title: "Mate in one".to_string(),
        content: "White to move".to_string(),
        is_puzzle: true,
        puzzle_answer: Some(answer.to_string()),
        ..CreatePostInput::default()
    }
}

async fn seed_puzzle(repo: &InMemoryClubRepository, answer: &str, failure: Option<&str>) -> Post {
    let post = Post::new(
        "Puzzle".to_string(),
        String::new(),
        None,
        Some(Puzzle {
            answer: answer.to_string(),
            success_message: None,
            failure_message: failure.map(str::to_string),
        }),
        UserId::new(),
    );
    repo.create_post(&post).await.unwrap();
    post
}

// ============================================================================
// Puzzle attempt engine
// ============================================================================

#[tokio::test]
async fn test_third_submission_is_rejected_without_a_record() {
    let repo = Arc::new(InMemoryClubRepository::new());
    let post = seed_puzzle(&repo, "Qh5", Some("It was Qh5")).await;
    let member = active_member();
    let engine = SubmitAnswerUseCase::new(repo.clone());
    let id = post.post_id.to_string();

    let first = engine.execute(&member, &id, "Nf3".into()).await.unwrap();
    assert!(!first.is_correct);
    assert_eq!(first.attempts_remaining, 1);
    assert_eq!(first.message, "Incorrect. You have 1 attempt(s) remaining.");

    let second = engine.execute(&member, &id, "Bc4".into()).await.unwrap();
    assert_eq!(second.attempts_remaining, 0);
    assert_eq!(second.message, "It was Qh5");

    let third = engine.execute(&member, &id, "Qh5".into()).await.unwrap();
    assert!(!third.success);
    assert!(!third.is_correct);
    assert_eq!(third.attempts_remaining, 0);
    assert_eq!(third.message, EXHAUSTED_MESSAGE);

    let log = repo.attempts_for(&member.user_id, &post.post_id).await.unwrap();
    let numbers: Vec<u8> = log.iter().map(|a| a.attempt_number.get()).collect();
    assert_eq!(numbers, vec![1, 2]);
}

#[tokio::test]
async fn test_correct_first_attempt_keeps_second_slot() {
    let repo = Arc::new(InMemoryClubRepository::new());
    let post = seed_puzzle(&repo, "Qh5", None).await;
    let member = active_member();
    let engine = SubmitAnswerUseCase::new(repo.clone());
    let id = post.post_id.to_string();

    let first = engine.execute(&member, &id, " qh5 ".into()).await.unwrap();
    assert!(first.success && first.is_correct);
    assert_eq!(first.message, "Correct! Well done!");
    assert_eq!(first.attempts_remaining, 1);

    let second = engine.execute(&member, &id, "nonsense".into()).await.unwrap();
    assert!(!second.is_correct);
    assert_eq!(second.message, "Incorrect. No more attempts remaining.");

    let status = PuzzleStatusUseCase::new(repo.clone())
        .execute(&member, &id)
        .await
        .unwrap();
    assert_eq!(status.attempts_used, 2);
    assert!(status.has_solved);
    assert_eq!(status.attempts_remaining(), 0);
}

#[tokio::test]
async fn test_status_of_malformed_post_id_is_zero() {
    let repo = Arc::new(InMemoryClubRepository::new());
    seed_puzzle(&repo, "Qh5", None).await;

    let status = PuzzleStatusUseCase::new(repo.clone())
        .execute(&active_member(), "not-a-uuid")
        .await
        .unwrap();
    assert_eq!(status, PuzzleProgress::default());
    assert_eq!(status.attempts_used, 0);
    assert!(!status.has_solved);
    assert_eq!(status.attempts_remaining(), 2);
}

#[tokio::test]
async fn test_attempts_are_per_user() {
    let repo = Arc::new(InMemoryClubRepository::new());
    let post = seed_puzzle(&repo, "Qh5", None).await;
    let engine = SubmitAnswerUseCase::new(repo.clone());
    let id = post.post_id.to_string();

    let alice = user("alice@club.org", UserRole::Member, SubscriptionStatus::Active);
    let bob = user("bob@club.org", UserRole::Member, SubscriptionStatus::Active);

    engine.execute(&alice, &id, "a".into()).await.unwrap();
    engine.execute(&alice, &id, "b".into()).await.unwrap();
    let bob_first = engine.execute(&bob, &id, "Qh5".into()).await.unwrap();
    assert_eq!(bob_first.attempts_remaining, 1);
    assert!(bob_first.is_correct);
}

#[tokio::test]
async fn test_submit_errors() {
    let repo = Arc::new(InMemoryClubRepository::new());
    let engine = SubmitAnswerUseCase::new(repo.clone());
    let member = active_member();

    let missing = engine
        .execute(&member, &PostId::new().to_string(), "e4".into())
        .await;
    assert!(matches!(missing, Err(ClubError::PostNotFound)));

    let malformed = engine.execute(&member, "post_123", "e4".into()).await;
    assert!(matches!(malformed, Err(ClubError::PostNotFound)));

    let article = Post::new(
        "News".to_string(),
        "Tournament on Sunday".to_string(),
        None,
        None,
        UserId::new(),
    );
    repo.create_post(&article).await.unwrap();
    let not_puzzle = engine
        .execute(&member, &article.post_id.to_string(), "e4".into())
        .await;
    assert!(matches!(not_puzzle, Err(ClubError::NotAPuzzle)));
}

#[tokio::test]
async fn test_status_is_idempotent() {
    let repo = Arc::new(InMemoryClubRepository::new());
    let post = seed_puzzle(&repo, "Qh5", None).await;
    let member = active_member();
    let id = post.post_id.to_string();
    SubmitAnswerUseCase::new(repo.clone())
        .execute(&member, &id, "Qh5".into())
        .await
        .unwrap();

    let status = PuzzleStatusUseCase::new(repo.clone());
    let first = status.execute(&member, &id).await.unwrap();
    let second = status.execute(&member, &id).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.attempts_used, 1);
    assert_eq!(
        repo.attempts_for(&member.user_id, &post.post_id)
            .await
            .unwrap()
            .len(),
        1
    );
}

/// Lets a rival submission claim the slot right before the engine does
#[derive(Clone, Default)]
struct RacingRepo {
    inner: InMemoryClubRepository,
    raced: Arc<RwLock<bool>>,
}

impl PostRepository for RacingRepo {
    async fn create_post(&self, post: &Post) -> ClubResult<()> {
        self.inner.create_post(post).await
    }

    async fn find_post(&self, post_id: &PostId) -> ClubResult<Option<Post>> {
        self.inner.find_post(post_id).await
    }

    async fn list_posts_newest_first(&self, limit: u32) -> ClubResult<Vec<Post>> {
        self.inner.list_posts_newest_first(limit).await
    }

    async fn delete_post(&self, post_id: &PostId) -> ClubResult<bool> {
        self.inner.delete_post(post_id).await
    }
}

impl PuzzleAttemptRepository for RacingRepo {
    async fn attempts_for(
        &self,
        user_id: &UserId,
        post_id: &PostId,
    ) -> ClubResult<Vec<PuzzleAttempt>> {
        self.inner.attempts_for(user_id, post_id).await
    }

    async fn append_attempt(&self, attempt: &PuzzleAttempt) -> ClubResult<AppendOutcome> {
        let race_now = !std::mem::replace(&mut *self.raced.write(), true);
        if race_now {
            let rival = PuzzleAttempt::record(
                attempt.user_id,
                attempt.post_id,
                "rival".to_string(),
                false,
                attempt.attempt_number,
            );
            self.inner.append_attempt(&rival).await?;
        }
        self.inner.append_attempt(attempt).await
    }
}

#[tokio::test]
async fn test_lost_race_takes_next_slot() {
    let repo = Arc::new(RacingRepo::default());
    let post = seed_puzzle(&repo.inner, "Qh5", None).await;
    let member = active_member();

    let outcome = SubmitAnswerUseCase::new(repo.clone())
        .execute(&member, &post.post_id.to_string(), "Qh5".into())
        .await
        .unwrap();

    assert!(outcome.is_correct);
    assert_eq!(outcome.attempts_remaining, 0);

    let log = repo
        .attempts_for(&member.user_id, &post.post_id)
        .await
        .unwrap();
    let numbers: Vec<u8> = log.iter().map(|a| a.attempt_number.get()).collect();
    assert_eq!(numbers, vec![1, 2]);
    assert_eq!(log[0].answer, "rival");
}

// ============================================================================
// Posts
// ============================================================================

struct Fixture {
    members: Arc<InMemoryMembershipRepository>,
    repo: Arc<InMemoryClubRepository>,
    push: Arc<RecordingSender>,
}

impl Fixture {
    fn new() -> Self {
        Self {
            members: Arc::new(InMemoryMembershipRepository::new()),
            repo: Arc::new(InMemoryClubRepository::new()),
            push: Arc::new(RecordingSender::default()),
        }
    }

    fn create_post(
        &self,
    ) -> CreatePostUseCase<InMemoryMembershipRepository, InMemoryClubRepository, RecordingSender>
    {
        CreatePostUseCase::new(
            self.members.clone(),
            self.repo.clone(),
            self.push.clone(),
            Arc::new(ClubConfig::default()),
        )
    }
}

#[tokio::test]
async fn test_only_owners_create_posts() {
    let fx = Fixture::new();
    let err = fx
        .create_post()
        .execute(&active_member(), puzzle_input("Qh5"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ClubError::Membership(MembershipError::OwnerRequired("Only owners can create posts"))
    ));
    assert!(fx.repo.list_posts_newest_first(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_post_validation() {
    let fx = Fixture::new();
    let owner = owner();

    let blank_title = CreatePostInput {
        title: "   ".to_string(),
        ..puzzle_input("Qh5")
    };
    assert!(matches!(
        fx.create_post().execute(&owner, blank_title).await,
        Err(ClubError::InvalidPost(_))
    ));

    assert!(matches!(
        fx.create_post().execute(&owner, puzzle_input("  ")).await,
        Err(ClubError::InvalidPost(_))
    ));

    // Puzzle fields on an ordinary post are dropped
    let article = CreatePostInput {
        is_puzzle: false,
        ..puzzle_input("Qh5")
    };
    let output = fx.create_post().execute(&owner, article).await.unwrap();
    assert!(!output.post.is_puzzle());
    assert!(output.post.puzzle.is_none());
    assert!(output.notification.is_none());
}

#[tokio::test]
async fn test_puzzle_notifies_active_members_only() {
    let fx = Fixture::new();

    let mut active = active_member();
    active.set_push_token("ExponentPushToken[live]".to_string());
    let mut dead = user("dead@club.org", UserRole::Member, SubscriptionStatus::Active);
    dead.set_push_token("ExponentPushToken[dead]".to_string());
    let mut lapsed = user("lapsed@club.org", UserRole::Member, SubscriptionStatus::Inactive);
    lapsed.set_push_token("ExponentPushToken[lapsed]".to_string());
    for u in [&active, &dead, &lapsed] {
        fx.members.create(u).await.unwrap();
    }

    let output = fx
        .create_post()
        .execute(&owner(), puzzle_input("Qh5"))
        .await
        .unwrap();

    let report = output.notification.unwrap();
    assert_eq!(report.successful, 1);
    assert_eq!(report.failed, 1);

    let sent = fx.push.sent.lock().clone();
    assert_eq!(sent.len(), 2);
    assert!(sent.iter().all(|m| m.title == "🧩 New Daily Puzzle!"));
    assert!(sent.iter().all(|m| m.body == "Mate in one"));
    assert!(sent.iter().all(|m| m.sound == "default"));
    assert_eq!(sent[0].data["type"], "puzzle");
    assert_eq!(sent[0].data["post_id"], output.post.post_id.to_string());
    assert!(!sent.iter().any(|m| m.to.contains("lapsed")));
}

#[tokio::test]
async fn test_list_posts_gate_and_order() {
    let repo = Arc::new(InMemoryClubRepository::new());
    let older = seed_puzzle(&repo, "Qh5", None).await;
    let mut newer = Post::new(
        "Club news".to_string(),
        String::new(),
        None,
        None,
        UserId::new(),
    );
    newer.created_at = older.created_at + chrono::Duration::minutes(5);
    repo.create_post(&newer).await.unwrap();

    let list = ListPostsUseCase::new(repo.clone(), Arc::new(ClubConfig::default()));

    let inactive = user("m@club.org", UserRole::Member, SubscriptionStatus::Inactive);
    assert!(matches!(
        list.execute(&inactive).await,
        Err(ClubError::Membership(MembershipError::SubscriptionInactive))
    ));

    // Owners see content regardless of their own subscription
    let posts = list.execute(&owner()).await.unwrap();
    let ids: Vec<PostId> = posts.iter().map(|p| p.post_id).collect();
    assert_eq!(ids, vec![newer.post_id, older.post_id]);

    let posts = list.execute(&active_member()).await.unwrap();
    assert_eq!(posts.len(), 2);
}

#[tokio::test]
async fn test_delete_post_keeps_attempts() {
    let fx = Fixture::new();
    let owner = owner();
    let member = active_member();
    let post = seed_puzzle(&fx.repo, "Qh5", None).await;
    let id = post.post_id.to_string();

    SubmitAnswerUseCase::new(fx.repo.clone())
        .execute(&member, &id, "Qh5".into())
        .await
        .unwrap();

    let delete = DeletePostUseCase::new(fx.repo.clone());
    assert!(matches!(
        delete.execute(&member, &id).await,
        Err(ClubError::Membership(MembershipError::OwnerRequired(_)))
    ));
    delete.execute(&owner, &id).await.unwrap();
    assert!(matches!(
        delete.execute(&owner, &id).await,
        Err(ClubError::PostNotFound)
    ));

    assert!(fx.repo.find_post(&post.post_id).await.unwrap().is_none());
    let attempts = fx
        .repo
        .attempts_for(&member.user_id, &post.post_id)
        .await
        .unwrap();
    assert_eq!(attempts.len(), 1);
}

#[tokio::test]
async fn test_list_posts_is_capped() {
    let repo = Arc::new(InMemoryClubRepository::new());
    let start = chrono::Utc::now();
    let mut newest = Vec::new();
    for i in 0..5 {
        let mut post = Post::new(format!("News {i}"), String::new(), None, None, UserId::new());
        post.created_at = start + chrono::Duration::minutes(i);
        repo.create_post(&post).await.unwrap();
        newest.push(post.post_id);
    }
    newest.reverse();

    let config = Arc::new(ClubConfig {
        post_list_limit: 3,
        ..ClubConfig::default()
    });
    let posts = ListPostsUseCase::new(repo.clone(), config)
        .execute(&owner())
        .await
        .unwrap();
    let ids: Vec<PostId> = posts.iter().map(|p| p.post_id).collect();
    assert_eq!(ids, newest[..3]);

    let all = ListPostsUseCase::new(repo, Arc::new(ClubConfig::default()))
        .execute(&owner())
        .await
        .unwrap();
    assert_eq!(all.len(), 5);
    assert_eq!(ClubConfig::default().post_list_limit, 100);
}
