use std::io;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer};

/// Provides a tracing layer for emitting logs to STDERR.
pub fn layer<S>() -> impl tracing_subscriber::Layer<S>
where
	S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
	tracing_subscriber::fmt::layer()
		.with_writer(io::stderr)
		.with_span_events(FmtSpan::ACTIVE)
		.pretty()
		.with_filter(EnvFilter::from_default_env())
}
