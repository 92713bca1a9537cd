//! Focus Flow - A local productivity dashboard
//! 
//! This is the main entry point for the focus-flow application.

use std::{future::IntoFuture, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, warn};

use focus_flow::{
    config::Config,
    state::AppState,
    store::DashboardStore,
    api::create_router,
    services::{check_notify_send_available, LocationResolver},
    tasks::{completion_notifier_task, location_lookup_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("focus_flow={},tower_http=info", config.log_level()))
        .init();

    info!("Starting focus-flow v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, focus={}min, short={}min, long={}min",
          config.host, config.port, config.focus_minutes,
          config.short_break_minutes, config.long_break_minutes);

    // Notifications are optional; a missing notify-send only disables them
    let mut notify = !config.no_notify;
    if notify {
        if let Err(e) = check_notify_send_available().await {
            warn!("{}", e);
            notify = false;
        }
    }

    let data_dir = config.data_dir();
    let store = DashboardStore::new(&data_dir)?;

    // Create application state
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.durations(),
        store,
    )?);

    // Start background tasks
    let notifier_state = Arc::clone(&state);
    tokio::spawn(async move {
        completion_notifier_task(notifier_state, notify).await;
    });

    let resolver = LocationResolver::new(config.geocode_url.clone(), config.coordinates());
    let location_state = Arc::clone(&state);
    tokio::spawn(async move {
        location_lookup_task(location_state, resolver).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Dashboard running on http://{}", addr);
    info!("Data directory: {} (theme: {:?})", data_dir.display(), state.current_theme());
    info!("Endpoints:");
    info!("  GET  /timer, /session, /session/events, /clock, /status, /health");
    info!("  POST /timer/{{start,pause,reset,mode,custom,dismiss,restart,break}}");
    info!("  GET|POST /tasks, POST /tasks/:id/toggle, DELETE /tasks/:id");
    info!("  GET  /calendar, POST /calendar/{{select,next,prev}}");
    info!("  GET  /music, POST /music/{{show,close,toggle,stop,next,prev,minimize,volume}}");
    info!("  GET  /preferences, POST /preferences/{{theme,animation}}");

    // Setup graceful shutdown
    let server = axum::serve(listener, app).into_future();

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
