pub mod latency;

use anyhow::{anyhow, Result};
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::app::realtime::AttachPolicy;
use crate::app::window::WindowLayout;
use crate::config::latency::{LatencyProfile, MockLatency};
use crate::domain::user::SessionUser;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub http_addr: String,
    pub app_mode: String,
    pub debounce_ms: u64,
    pub realtime_attach_delay_ms: u64,
    pub realtime_retry_interval_ms: u64,
    pub realtime_max_attempts: u32,
    pub list_item_height: u32,
    pub list_overscan: usize,
    pub viewport_height: u32,
    pub mock_latency: LatencyProfile,
    pub session_user_id: String,
    pub session_user_name: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let http_addr = env_or("HTTP_ADDR", "0.0.0.0:8080");
        let _parsed_http_addr = SocketAddr::from_str(&http_addr)
            .map_err(|err| anyhow!("invalid HTTP_ADDR: {}", err))?;
        let app_mode = env_or("APP_MODE", "api");

        let list_item_height: u32 = env_or_parse("LIST_ITEM_HEIGHT", "68")?;
        if list_item_height == 0 {
            return Err(anyhow!("invalid LIST_ITEM_HEIGHT: must be positive"));
        }
        let realtime_max_attempts: u32 = env_or_parse("REALTIME_MAX_ATTEMPTS", "5")?;
        if realtime_max_attempts == 0 {
            return Err(anyhow!("invalid REALTIME_MAX_ATTEMPTS: must be positive"));
        }

        Ok(Self {
            http_addr,
            app_mode,
            debounce_ms: env_or_parse("NOTIFY_DEBOUNCE_MS", "50")?,
            realtime_attach_delay_ms: env_or_parse("REALTIME_ATTACH_DELAY_MS", "2000")?,
            realtime_retry_interval_ms: env_or_parse("REALTIME_RETRY_INTERVAL_MS", "1000")?,
            realtime_max_attempts,
            list_item_height,
            list_overscan: env_or_parse("LIST_OVERSCAN", "2")?,
            viewport_height: env_or_parse("VIEWPORT_HEIGHT", "680")?,
            mock_latency: env_or_parse("MOCK_LATENCY", "realistic")?,
            session_user_id: env_or("SESSION_USER_ID", "user-1"),
            session_user_name: env_or("SESSION_USER_NAME", "Shombhunath Karan"),
        })
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn attach_policy(&self) -> AttachPolicy {
        AttachPolicy {
            initial_delay: Duration::from_millis(self.realtime_attach_delay_ms),
            retry_interval: Duration::from_millis(self.realtime_retry_interval_ms),
            max_attempts: self.realtime_max_attempts,
        }
    }

    pub fn window_layout(&self) -> WindowLayout {
        WindowLayout {
            item_height: self.list_item_height,
            overscan: self.list_overscan,
        }
    }

    pub fn latency(&self) -> MockLatency {
        MockLatency::for_profile(self.mock_latency)
    }

    pub fn session_user(&self) -> SessionUser {
        SessionUser {
            id: self.session_user_id.clone(),
            name: self.session_user_name.clone(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_or_parse<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    let value = std::env::var(key).unwrap_or_else(|_| default.to_string());
    value
        .parse::<T>()
        .map_err(|err| anyhow!("invalid {}: {}", key, err))
}
