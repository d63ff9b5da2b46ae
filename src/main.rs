//! Petvitals - health-status trends for pet vitals.
//!
//! # API Endpoints
//!
//! - `GET /pets/:pet_id/health-trend` - Latest checkup and 12-month status chart
//! - `GET /pets/:pet_id/bmi-trend` - Rolling pet vs breed BMI
//! - `GET /pets/:pet_id/vitals?month=&year=` - Vitals card for one month
//! - `GET /health` - Health check

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use petvitals::api::{AppState, router};
use petvitals::config::Config;
use petvitals::data_sources::PetCareClient;
use petvitals::trend::TrendService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("petvitals=info".parse()?))
        .init();

    let config = Config::from_env();

    info!(
        port = config.port,
        backend = %config.api_base_url,
        window_length = config.trend.window_length,
        request_timeout_secs = config.trend.request_timeout.as_secs(),
        "Starting petvitals"
    );

    let client = PetCareClient::with_base_url(&config.api_base_url, config.api_token.clone());
    let state = AppState {
        trends: TrendService::new(client, config.trend),
    };

    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;

    info!(%addr, "Petvitals is listening");

    axum::serve(listener, app).await?;

    Ok(())
}
