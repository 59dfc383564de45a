//! Application Configuration
//!
//! Configuration for the club application layer.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Expo push endpoint used when none is configured
pub const DEFAULT_EXPO_PUSH_URL: &str = "https://exp.host/--/api/v2/push/send";

/// Most posts one list request returns
pub const DEFAULT_POST_LIST_LIMIT: u32 = 100;

/// Public club information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubInfo {
    pub name: String,
    pub is_open: bool,
    pub timings: String,
}

impl Default for ClubInfo {
    fn default() -> Self {
        Self {
            name: "Warje Chess Club".to_string(),
            is_open: true,
            timings: "Mon-Sat: 6:00 PM - 9:00 PM, Sun: 10:00 AM - 1:00 PM".to_string(),
        }
    }
}

/// Club application configuration
#[derive(Debug, Clone)]
pub struct ClubConfig {
    pub club_info: ClubInfo,
    /// Expo push API endpoint
    pub expo_push_url: String,
    /// Upper bound for one push request
    pub push_timeout: Duration,
    /// Title of the new-puzzle notification
    pub puzzle_notification_title: String,
    /// Cap on the newest-first post list
    pub post_list_limit: u32,
}

impl Default for ClubConfig {
    fn default() -> Self {
        Self {
            club_info: ClubInfo::default(),
            expo_push_url: DEFAULT_EXPO_PUSH_URL.to_string(),
            push_timeout: Duration::from_secs(10),
            puzzle_notification_title: "🧩 New Daily Puzzle!".to_string(),
            post_list_limit: DEFAULT_POST_LIST_LIMIT,
        }
    }
}
