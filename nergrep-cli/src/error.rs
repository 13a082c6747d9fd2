use std::path::PathBuf;

use nergrep_core::NerError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("não foi possível ler {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuração inválida em {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Ner(#[from] NerError),

    #[error("falha ao escrever a saída: {0}")]
    Output(#[source] std::io::Error),
}
