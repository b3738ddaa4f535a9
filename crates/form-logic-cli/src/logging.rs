use tracing_subscriber::EnvFilter;

/// Installs the stderr subscriber. `level` is already resolved by clap:
/// `--log-level`, then `FORM_LOGIC_LOG`, then `warn`. `RUST_LOG` is not consulted.
pub fn init(level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_new(level)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| err.to_string().into())
}
