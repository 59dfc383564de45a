//! Server Configuration
//!
//! Everything the binary reads from the environment. `.env` is loaded
//! before this runs.

use std::env;
use std::net::SocketAddr;

use anyhow::Context;
use club::{ClubConfig, ClubInfo};
use membership::MembershipConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8001";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// No database means the in-memory store
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub membership: MembershipConfig,
    pub club: ClubConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = non_empty_var("DATABASE_URL");

        let bind_addr = non_empty_var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address like 0.0.0.0:8001")?;

        let frontend_origins = parse_origins(
            &non_empty_var("FRONTEND_ORIGINS").unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string()),
        );

        let mut membership = if cfg!(debug_assertions) {
            MembershipConfig::development()
        } else {
            MembershipConfig::default()
        };
        if let Some(url) = non_empty_var("IDENTITY_GATEWAY_URL") {
            membership.identity_gateway_url = url;
        }
        if let Some(secure) = non_empty_var("COOKIE_SECURE") {
            membership.cookie_secure = parse_bool("COOKIE_SECURE", &secure)?;
        }
        membership.owner_bootstrap_secret = non_empty_var("OWNER_BOOTSTRAP_SECRET");

        let mut club = ClubConfig::default();
        if let Some(url) = non_empty_var("EXPO_PUSH_URL") {
            club.expo_push_url = url;
        }
        club.club_info = club_info_from_env(club.club_info)?;
        if let Some(limit) = non_empty_var("POST_LIST_LIMIT") {
            club.post_list_limit = limit
                .parse()
                .ok()
                .filter(|n| *n > 0)
                .context("POST_LIST_LIMIT must be a positive integer")?;
        }

        Ok(Self {
            database_url,
            bind_addr,
            frontend_origins,
            membership,
            club,
        })
    }
}

fn club_info_from_env(defaults: ClubInfo) -> anyhow::Result<ClubInfo> {
    let is_open = match non_empty_var("CLUB_IS_OPEN") {
        Some(value) => parse_bool("CLUB_IS_OPEN", &value)?,
        None => defaults.is_open,
    };

    Ok(ClubInfo {
        name: non_empty_var("CLUB_NAME").unwrap_or(defaults.name),
        is_open,
        timings: non_empty_var("CLUB_TIMINGS").unwrap_or(defaults.timings),
    })
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(key: &str, value: &str) -> anyhow::Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("{key} must be a boolean, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_skips_blanks() {
        assert_eq!(
            parse_origins(" https://club.app , ,http://localhost:3000"),
            vec!["https://club.app", "http://localhost:3000"]
        );
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("X", "TRUE").unwrap());
        assert!(!parse_bool("X", "off").unwrap());
        assert!(parse_bool("X", "maybe").is_err());
    }
}
