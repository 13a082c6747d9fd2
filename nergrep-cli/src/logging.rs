use tracing_subscriber::{fmt, EnvFilter};

/// Inicializa o `tracing_subscriber` lendo o filtro de `RUST_LOG`.
///
/// Sem `RUST_LOG`, apenas avisos e erros aparecem. Os logs vão para stderr;
/// stdout fica reservado às entidades renderizadas.
pub fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    tracing::debug!("Logging inicializado");
}
