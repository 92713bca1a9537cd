//! One-shot location lookup for the header clock

use std::sync::Arc;
use tracing::{error, info};

use crate::{services::LocationResolver, state::AppState};

/// Resolve the display location once and store it for the clock widget
pub async fn location_lookup_task(state: Arc<AppState>, resolver: LocationResolver) {
    info!("Starting location lookup task");

    let location = resolver.resolve().await;
    if let Err(e) = state.set_location(location) {
        error!("Failed to store resolved location: {}", e);
    }
}
