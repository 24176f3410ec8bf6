use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_telemetry(rust_log: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(rust_log).unwrap_or_else(|_| "hotels_backend=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
