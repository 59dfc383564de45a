//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{session::Session, user::User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    subscription::{Subscription, SubscriptionStatus},
    user_role::UserRole,
};
use crate::error::{MembershipError, MembershipResult};

const USER_COLUMNS: &str = r#"
    user_id,
    email,
    name,
    picture,
    user_role,
    subscription_status,
    subscription_expires_at,
    push_token,
    created_at
"#;

/// PostgreSQL-backed membership repository
#[derive(Clone)]
pub struct PgMembershipRepository {
    pool: PgPool,
}

impl PgMembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgMembershipRepository {
    async fn create(&self, user: &User) -> MembershipResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                email,
                name,
                picture,
                user_role,
                subscription_status,
                subscription_expires_at,
                push_token,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(&user.name)
        .bind(&user.picture)
        .bind(user.role.id())
        .bind(user.subscription_status.id())
        .bind(user.subscription_expires_at)
        .bind(&user.push_token)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                MembershipError::EmailTaken
            } else {
                MembershipError::from(e)
            }
        })?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> MembershipResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> MembershipResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn refresh_profile(
        &self,
        user_id: &UserId,
        name: &str,
        picture: Option<&str>,
    ) -> MembershipResult<Option<User>> {
        let sql = format!(
            "UPDATE users SET name = $2, picture = $3 WHERE user_id = $1 RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_id.as_uuid())
            .bind(name)
            .bind(picture)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn set_push_token(
        &self,
        user_id: &UserId,
        push_token: &str,
    ) -> MembershipResult<Option<User>> {
        let sql = format!(
            "UPDATE users SET push_token = $2 WHERE user_id = $1 RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_id.as_uuid())
            .bind(push_token)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn set_role(&self, user_id: &UserId, role: UserRole) -> MembershipResult<Option<User>> {
        let sql = format!(
            "UPDATE users SET user_role = $2 WHERE user_id = $1 RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_id.as_uuid())
            .bind(role.id())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn set_subscription(
        &self,
        user_id: &UserId,
        subscription: &Subscription,
    ) -> MembershipResult<Option<User>> {
        let sql = format!(
            r#"
            UPDATE users SET
                subscription_status = $2,
                subscription_expires_at = $3
            WHERE user_id = $1
            RETURNING {USER_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_id.as_uuid())
            .bind(subscription.status.id())
            .bind(subscription.expires_at)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn list_newest_first(&self) -> MembershipResult<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    async fn push_tokens_of_active_members(&self) -> MembershipResult<Vec<String>> {
        let tokens = sqlx::query_scalar::<_, String>(
            r#"
            SELECT push_token
            FROM users
            WHERE subscription_status = $1
              AND user_role = $2
              AND push_token IS NOT NULL
              AND push_token <> ''
            "#,
        )
        .bind(SubscriptionStatus::Active.id())
        .bind(UserRole::Member.id())
        .fetch_all(&self.pool)
        .await?;

        Ok(tokens)
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgMembershipRepository {
    async fn create_session(&self, session: &Session) -> MembershipResult<()> {
        sqlx::query(
            r#"
            INSERT INTO user_sessions (
                token_digest,
                user_id,
                expires_at,
                created_at
            ) VALUES ($1, $2, $3, $4)
            ON CONFLICT (token_digest) DO UPDATE SET
                user_id = EXCLUDED.user_id,
                expires_at = EXCLUDED.expires_at,
                created_at = EXCLUDED.created_at
            "#,
        )
        .bind(&session.token_digest)
        .bind(session.user_id.as_uuid())
        .bind(session.expires_at)
        .bind(session.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_session(&self, digest: &[u8]) -> MembershipResult<Option<Session>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT
                token_digest,
                user_id,
                expires_at,
                created_at
            FROM user_sessions
            WHERE token_digest = $1
            "#,
        )
        .bind(digest)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SessionRow::into_session))
    }

    async fn delete_session(&self, digest: &[u8]) -> MembershipResult<bool> {
        let deleted = sqlx::query("DELETE FROM user_sessions WHERE token_digest = $1")
            .bind(digest)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn cleanup_expired_sessions(&self) -> MembershipResult<u64> {
        let deleted = sqlx::query("DELETE FROM user_sessions WHERE expires_at < $1")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired sessions");

        Ok(deleted)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    email: String,
    name: String,
    picture: Option<String>,
    user_role: i16,
    subscription_status: i16,
    subscription_expires_at: Option<DateTime<Utc>>,
    push_token: Option<String>,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> MembershipResult<User> {
        let role = UserRole::from_id(self.user_role).ok_or_else(|| {
            MembershipError::Internal(format!("Invalid user_role: {}", self.user_role))
        })?;
        let subscription_status =
            SubscriptionStatus::from_id(self.subscription_status).ok_or_else(|| {
                MembershipError::Internal(format!(
                    "Invalid subscription_status: {}",
                    self.subscription_status
                ))
            })?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            name: self.name,
            picture: self.picture,
            role,
            subscription_status,
            subscription_expires_at: self.subscription_expires_at,
            push_token: self.push_token,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    token_digest: Vec<u8>,
    user_id: Uuid,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> Session {
        Session {
            user_id: UserId::from_uuid(self.user_id),
            token_digest: self.token_digest,
            expires_at: self.expires_at,
            created_at: self.created_at,
        }
    }
}
