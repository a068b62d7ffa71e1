use std::io;

use shannon_chess::{config::EngineConfig, engine::Engine, uci};

fn main() -> io::Result<()> {
    // Logs go to stderr so stdout carries only protocol output
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shannon_chess=info".into()),
        )
        .init();

    let config = match EngineConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "falling back to default configuration");
            EngineConfig::default()
        }
    };

    let mut engine = Engine::new(config.search_settings());
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    uci::uci_loop(&mut engine, stdin.lock(), &mut stdout)
}
