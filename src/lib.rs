pub mod app;
pub mod config;
pub mod domain;
pub mod http;
pub mod infra;

use crate::infra::mock_api::MockNotificationApi;

#[derive(Clone)]
pub struct AppState {
    pub api: MockNotificationApi,
}
