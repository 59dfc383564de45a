//! Update Subscription Use Case
//!
//! Owner-only subscription management. There is no billing: owners toggle
//! membership by hand.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::UserId;

use crate::application::resolve_session::require_owner;
use crate::domain::entity::user::User;
use crate::domain::repository::MemberStore;
use crate::domain::value_object::subscription::{MAX_MONTHS, SubscriptionAction};
use crate::error::{MembershipError, MembershipResult};

/// Update subscription input
#[derive(Debug, Clone)]
pub struct UpdateSubscriptionInput {
    /// Raw path segment; malformed ids are unknown members
    pub member_id: String,
    pub action: String,
    pub months: i64,
}

/// Update subscription use case
pub struct UpdateSubscriptionUseCase<R>
where
    R: MemberStore,
{
    repo: Arc<R>,
}

impl<R> UpdateSubscriptionUseCase<R>
where
    R: MemberStore,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        caller: &User,
        input: UpdateSubscriptionInput,
    ) -> MembershipResult<(User, SubscriptionAction)> {
        require_owner(caller, "Only owners can manage subscriptions")?;

        let action: SubscriptionAction = input
            .action
            .parse()
            .map_err(|_| MembershipError::InvalidAction(input.action.clone()))?;
        let months = u32::try_from(input.months)
            .ok()
            .filter(|m| (1..=MAX_MONTHS).contains(m))
            .ok_or_else(|| {
                MembershipError::InvalidArgument(format!(
                    "months must be between 1 and {MAX_MONTHS}"
                ))
            })?;

        let member_id: UserId = input
            .member_id
            .parse()
            .map_err(|_| MembershipError::MemberNotFound)?;
        let member = self
            .repo
            .find_by_id(&member_id)
            .await?
            .ok_or(MembershipError::MemberNotFound)?;

        let subscription = member
            .subscription()
            .apply(action, months, Utc::now())
            .map_err(|e| MembershipError::InvalidArgument(e.to_string()))?;
        let member = self
            .repo
            .set_subscription(&member.user_id, &subscription)
            .await?
            .ok_or(MembershipError::MemberNotFound)?;

        tracing::info!(
            owner_id = %caller.user_id,
            member_id = %member.user_id,
            action = %action,
            months = months,
            status = %member.subscription_status,
            "Subscription updated"
        );

        Ok((member, action))
    }
}
