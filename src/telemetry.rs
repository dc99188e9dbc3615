//! src/telemetry.rs
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;

/// Installs the global subscriber. `RUST_LOG` wins over `default_level`.
///
/// Events go to `sink`, which for the binary is stderr: stdout is reserved
/// for records.
pub fn init_tracing<Sink>(default_level: &str, sink: Sink) -> anyhow::Result<()>
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(sink)
                .with_file(true)
                .with_line_number(true)
                .with_target(false),
        )
        .try_init()?;

    Ok(())
}
