use anyhow::anyhow;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::mpsc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use incampus::app::panel::NotificationPanel;
use incampus::app::session::{Session, SessionSettings};
use incampus::app::window::RenderedList;
use incampus::config::AppConfig;
use incampus::domain::notification::unix_millis;
use incampus::infra::{mock_api::MockNotificationApi, mock_socket::MockSocket};
use incampus::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    let api = MockNotificationApi::new(config.latency());

    match config.app_mode.as_str() {
        "api" => {
            let state = AppState { api };
            let app = incampus::http::router(state).layer(TraceLayer::new_for_http());
            let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
            tracing::info!("listening on {}", config.http_addr);

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }
        "session" => run_session(&config, api).await,
        other => return Err(anyhow!("unknown APP_MODE: {}", other)),
    }

    Ok(())
}

async fn run_session(config: &AppConfig, api: MockNotificationApi) {
    let socket = Arc::new(MockSocket::new(true));
    let session = Session::start(
        config.session_user(),
        Arc::new(api),
        socket.clone(),
        SessionSettings {
            debounce: config.debounce(),
            attach: config.attach_policy(),
        },
    );
    let demo = socket.spawn_demo_events();

    let (navigate_tx, mut navigate_rx) = mpsc::unbounded_channel();
    let mut panel = NotificationPanel::new(session.store().clone(), config.window_layout(), navigate_tx);
    panel.open();
    panel.mount(config.viewport_height);

    let mut updates = session.store().subscribe();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                log_panel(&panel);
            }
            Some(target) = navigate_rx.recv() => {
                tracing::info!(page = target.page, tab = ?target.tab, "navigate");
            }
            _ = &mut shutdown => break,
        }
    }

    demo.abort();
    session.end();
}

fn log_panel(panel: &NotificationPanel) {
    let view = panel.render(unix_millis(OffsetDateTime::now_utc()));
    match view.list {
        RenderedList::Empty(empty) => tracing::info!(title = empty.title, "notification panel empty"),
        RenderedList::Window {
            window,
            top_filler,
            rows,
            bottom_filler,
        } => {
            tracing::info!(
                unread = view.unread_badge.unwrap_or(0),
                start = window.start_index,
                end = window.end_index,
                top_filler,
                bottom_filler,
                "notification panel"
            );
            for row in rows {
                tracing::info!(
                    id = %row.id,
                    unread = row.unread,
                    when = %row.relative_time,
                    "{}",
                    row.message
                );
            }
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
