//! Subscription Value Objects
//!
//! Membership is toggled by owners; there is no billing behind it. The
//! expiry timestamp is informational and does not flip the status by itself.

use chrono::{DateTime, Duration, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Length of one subscription "month"
pub const DAYS_PER_MONTH: i64 = 30;

/// Largest period one action may grant (ten years)
pub const MAX_MONTHS: u32 = 120;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum SubscriptionStatus {
    /// New users start here; no trial period
    #[default]
    #[display("inactive")]
    Inactive = 0,
    #[display("active")]
    Active = 1,
}

impl SubscriptionStatus {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn is_active(&self) -> bool {
        matches!(self, SubscriptionStatus::Active)
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(SubscriptionStatus::Inactive),
            1 => Some(SubscriptionStatus::Active),
            _ => None,
        }
    }
}

/// Owner-initiated subscription change
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionAction {
    /// Active, expiry restarts from now
    #[display("activate")]
    Activate,
    /// Active, expiry compounds from the current expiry when it is still ahead
    #[display("extend")]
    Extend,
    /// Inactive, expiry untouched
    #[display("deactivate")]
    Deactivate,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid action: {0}")]
pub struct UnknownSubscriptionAction(pub String);

impl FromStr for SubscriptionAction {
    type Err = UnknownSubscriptionAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "activate" => Ok(SubscriptionAction::Activate),
            "extend" => Ok(SubscriptionAction::Extend),
            "deactivate" => Ok(SubscriptionAction::Deactivate),
            other => Err(UnknownSubscriptionAction(other.to_string())),
        }
    }
}

/// Expiry would fall outside the representable time range
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("subscription expiry out of range")]
pub struct ExpiryOutOfRange;

/// Subscription state of one user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Subscription {
    pub status: SubscriptionStatus,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Subscription {
    /// Apply an owner action at `now`, returning the new state
    pub fn apply(
        self,
        action: SubscriptionAction,
        months: u32,
        now: DateTime<Utc>,
    ) -> Result<Self, ExpiryOutOfRange> {
        let period = || {
            DAYS_PER_MONTH
                .checked_mul(i64::from(months))
                .and_then(Duration::try_days)
                .ok_or(ExpiryOutOfRange)
        };

        let next = match action {
            SubscriptionAction::Activate => Self {
                status: SubscriptionStatus::Active,
                expires_at: Some(now.checked_add_signed(period()?).ok_or(ExpiryOutOfRange)?),
            },
            SubscriptionAction::Extend => {
                let base = match self.expires_at {
                    Some(current) if current >= now => current,
                    _ => now,
                };
                Self {
                    status: SubscriptionStatus::Active,
                    expires_at: Some(base.checked_add_signed(period()?).ok_or(ExpiryOutOfRange)?),
                }
            }
            SubscriptionAction::Deactivate => Self {
                status: SubscriptionStatus::Inactive,
                expires_at: self.expires_at,
            },
        };

        Ok(next)
    }
}
