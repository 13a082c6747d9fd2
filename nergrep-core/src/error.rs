//! # Erros do núcleo
//!
//! Apenas falhas de inicialização (recurso do modelo ausente ou malformado) e
//! critérios inválidos chegam aqui. Regex inválida no filtro **não** é erro:
//! o estágio correspondente deixa tudo passar.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NerError {
    #[error("não foi possível carregar o gazetteer em {}: {source}", .path.display())]
    ModelLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("gazetteer malformado em {}: {source}", .path.display())]
    ModelParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("limiar de similaridade fora do intervalo 0-100: {0}")]
    InvalidThreshold(f64),

    #[error("limites de comprimento inválidos: mínimo {min} > máximo {max}")]
    InvalidLengthBounds { min: usize, max: usize },

    #[error("opção desconhecida: {0}")]
    InvalidOption(String),

    #[error("falha ao serializar a saída: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NerError>;
