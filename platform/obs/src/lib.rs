//! Tracing setup for the EmployeeAce binaries.
//!
//! Events go to stderr so that whatever a command prints on stdout stays
//! machine-readable. Spans are exported over OTLP when an endpoint is known;
//! the returned [`TracingGuard`] flushes them before the process exits.

use anyhow::{Result, anyhow};
use once_cell::sync::OnceCell;
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::{Protocol, SpanExporter, WithExportConfig};
use opentelemetry_sdk::{Resource, trace::SdkTracerProvider};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: OnceCell<()> = OnceCell::new();

#[derive(Clone, Debug)]
pub struct ObsConfig {
    pub service_name: &'static str,
    /// Explicit filter directive; beats `RUST_LOG` and the verbosity default.
    pub env_filter: Option<String>,
    pub otlp_endpoint: Option<String>,
    /// Number of `-v` flags given on the command line.
    pub verbosity: u8,
}

impl Default for ObsConfig {
    fn default() -> Self {
        Self {
            service_name: "employee-ace",
            env_filter: None,
            otlp_endpoint: None,
            verbosity: 0,
        }
    }
}

impl ObsConfig {
    pub fn verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    fn default_directive(&self) -> &'static str {
        match self.verbosity {
            0 => "warn,products_hr=info,employee_ace=info",
            1 => "info,reqwest=warn,hyper=warn",
            2 => "debug,reqwest=info,hyper=info,h2=info,rustls=info",
            _ => "trace",
        }
    }

    fn filter_directive(&self) -> String {
        self.env_filter
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| self.default_directive().to_string())
    }
}

/// Keeps the OTLP pipeline alive; dropping it flushes pending spans.
#[must_use = "dropping the guard shuts the span exporter down"]
pub struct TracingGuard {
    provider: Option<SdkTracerProvider>,
}

impl TracingGuard {
    pub fn exporting(&self) -> bool {
        self.provider.is_some()
    }
}

impl Drop for TracingGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(err) = provider.shutdown() {
                tracing::warn!(error = %err, "failed to flush spans");
            }
        }
    }
}

/// Install the fmt subscriber and, when configured, the OTLP span exporter.
/// A second call is a no-op.
pub fn init_tracing(config: ObsConfig) -> Result<TracingGuard> {
    if INIT.get().is_some() {
        return Ok(TracingGuard { provider: None });
    }

    let env_filter = EnvFilter::try_new(config.filter_directive())?;
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(config.verbosity > 1)
        .with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer);

    let otlp_endpoint = config
        .otlp_endpoint
        .or_else(|| std::env::var("OTLP_ENDPOINT").ok())
        .filter(|endpoint| !endpoint.trim().is_empty());

    let provider = match otlp_endpoint {
        Some(endpoint) => {
            let exporter = SpanExporter::builder()
                .with_http()
                .with_protocol(Protocol::HttpBinary)
                .with_endpoint(endpoint)
                .build()?;
            let provider = SdkTracerProvider::builder()
                .with_resource(Resource::builder().with_service_name(config.service_name).build())
                .with_batch_exporter(exporter)
                .build();
            registry
                .with(tracing_opentelemetry::layer().with_tracer(provider.tracer(config.service_name)))
                .try_init()?;
            Some(provider)
        }
        None => {
            registry.try_init()?;
            None
        }
    };

    INIT.set(())
        .map_err(|_| anyhow!("tracing already initialized"))?;
    Ok(TracingGuard { provider })
}
