//! Kibitz UCI chess engine

use kibitz::uci::Uci;
use tracing_subscriber::EnvFilter;

fn main() {
    // stdout belongs to the UCI conversation, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut uci = Uci::new();
    uci.run();
}
