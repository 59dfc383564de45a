//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{AttemptId, PostId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{Post, Puzzle, PuzzleAttempt};
use crate::domain::repository::{AppendOutcome, PostRepository, PuzzleAttemptRepository};
use crate::domain::value_objects::AttemptNumber;
use crate::error::{ClubError, ClubResult};

const POST_COLUMNS: &str = r#"
    post_id,
    title,
    content,
    image,
    is_puzzle,
    puzzle_answer,
    success_message,
    failure_message,
    created_by,
    created_at
"#;

/// PostgreSQL-backed club repository
#[derive(Clone)]
pub struct PgClubRepository {
    pool: PgPool,
}

impl PgClubRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Post Repository Implementation
// ============================================================================

impl PostRepository for PgClubRepository {
    async fn create_post(&self, post: &Post) -> ClubResult<()> {
        let puzzle = post.puzzle.as_ref();

        sqlx::query(
            r#"
            INSERT INTO posts (
                post_id,
                title,
                content,
                image,
                is_puzzle,
                puzzle_answer,
                success_message,
                failure_message,
                created_by,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(post.post_id.as_uuid())
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.image)
        .bind(post.is_puzzle())
        .bind(puzzle.map(|p| p.answer.as_str()))
        .bind(puzzle.and_then(|p| p.success_message.as_deref()))
        .bind(puzzle.and_then(|p| p.failure_message.as_deref()))
        .bind(post.created_by.as_uuid())
        .bind(post.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_post(&self, post_id: &PostId) -> ClubResult<Option<Post>> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE post_id = $1");
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(post_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(PostRow::into_post).transpose()
    }

    async fn list_posts_newest_first(&self, limit: u32) -> ClubResult<Vec<Post>> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC LIMIT $1");
        let rows = sqlx::query_as::<_, PostRow>(&sql)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(PostRow::into_post).collect()
    }

    async fn delete_post(&self, post_id: &PostId) -> ClubResult<bool> {
        let deleted = sqlx::query("DELETE FROM posts WHERE post_id = $1")
            .bind(post_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Puzzle Attempt Repository Implementation
// ============================================================================

impl PuzzleAttemptRepository for PgClubRepository {
    async fn attempts_for(
        &self,
        user_id: &UserId,
        post_id: &PostId,
    ) -> ClubResult<Vec<PuzzleAttempt>> {
        let rows = sqlx::query_as::<_, AttemptRow>(
            r#"
            SELECT
                attempt_id,
                user_id,
                post_id,
                answer,
                is_correct,
                attempt_number,
                created_at
            FROM puzzle_attempts
            WHERE user_id = $1 AND post_id = $2
            ORDER BY attempt_number
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(post_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(AttemptRow::into_attempt).collect()
    }

    async fn append_attempt(&self, attempt: &PuzzleAttempt) -> ClubResult<AppendOutcome> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO puzzle_attempts (
                attempt_id,
                user_id,
                post_id,
                answer,
                is_correct,
                attempt_number,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id, post_id, attempt_number) DO NOTHING
            "#,
        )
        .bind(attempt.attempt_id.as_uuid())
        .bind(attempt.user_id.as_uuid())
        .bind(attempt.post_id.as_uuid())
        .bind(&attempt.answer)
        .bind(attempt.is_correct)
        .bind(i16::from(attempt.attempt_number.get()))
        .bind(attempt.created_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(if inserted == 1 {
            AppendOutcome::Appended
        } else {
            AppendOutcome::SlotTaken
        })
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct PostRow {
    post_id: Uuid,
    title: String,
    content: String,
    image: Option<String>,
    is_puzzle: bool,
    puzzle_answer: Option<String>,
    success_message: Option<String>,
    failure_message: Option<String>,
    created_by: Uuid,
    created_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self) -> ClubResult<Post> {
        let puzzle = if self.is_puzzle {
            let answer = self.puzzle_answer.ok_or_else(|| {
                ClubError::Internal(format!("Puzzle {} has no answer", self.post_id))
            })?;
            Some(Puzzle {
                answer,
                success_message: self.success_message,
                failure_message: self.failure_message,
            })
        } else {
            None
        };

        Ok(Post {
            post_id: PostId::from_uuid(self.post_id),
            title: self.title,
            content: self.content,
            image: self.image,
            puzzle,
            created_by: UserId::from_uuid(self.created_by),
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AttemptRow {
    attempt_id: Uuid,
    user_id: Uuid,
    post_id: Uuid,
    answer: String,
    is_correct: bool,
    attempt_number: i16,
    created_at: DateTime<Utc>,
}

impl AttemptRow {
    fn into_attempt(self) -> ClubResult<PuzzleAttempt> {
        let attempt_number = AttemptNumber::from_db(self.attempt_number).ok_or_else(|| {
            ClubError::Internal(format!("Invalid attempt_number: {}", self.attempt_number))
        })?;

        Ok(PuzzleAttempt {
            attempt_id: AttemptId::from_uuid(self.attempt_id),
            user_id: UserId::from_uuid(self.user_id),
            post_id: PostId::from_uuid(self.post_id),
            answer: self.answer,
            is_correct: self.is_correct,
            attempt_number,
            created_at: self.created_at,
        })
    }
}
