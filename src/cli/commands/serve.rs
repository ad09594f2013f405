use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace};

use crate::config::{ServiceConfig, initialize_app_state};
use crate::router::create_router;

pub async fn serve(config: ServiceConfig) -> Result<()> {
    trace!("Entering serve function");
    info!("tempcast forecast service starting up");
    debug!("Service configuration: {:?}", config);

    let bind_address = config.bind_address.clone();

    // Initialize application state
    trace!("Initializing application state");
    let state = initialize_app_state(config)?;
    debug!("Application state initialized with model '{}'", state.forecaster.name());

    // Create router
    trace!("Creating application router");
    let app = create_router(state);
    debug!("Router created successfully");

    // Start server
    info!("Starting server on {}", bind_address);
    let listener = match TcpListener::bind(&bind_address).await {
        Ok(listener) => {
            debug!("Successfully bound to address: {}", bind_address);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", bind_address, e);
            return Err(e.into());
        }
    };

    info!("Forecast endpoint available at http://{}/forecast", bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}
