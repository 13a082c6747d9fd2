//! # Modelo de Reconhecimento
//!
//! O modelo encapsula os [`Gazetteers`] e o [`RuleEngine`] construído sobre
//! eles. É imutável depois de construído, então um único handle pode ser
//! compartilhado por todo o processo.
//!
//! ## Inicialização
//!
//! - [`NerModel::build`]: listas embutidas, nunca falha.
//! - [`NerModel::load`]: listas lidas de um JSON; falha se o arquivo estiver
//!   ausente ou malformado.
//! - [`NerModel::shared`]: handle único do processo, criado na primeira
//!   chamada. Respeita a variável `NERGREP_GAZETTEER`; se a construção falhar,
//!   o erro volta para quem chamou e a próxima chamada tenta de novo.

use std::path::Path;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::info;

use crate::error::{NerError, Result};
use crate::gazetteer::Gazetteers;
use crate::rule_based::RuleEngine;

/// Variável de ambiente com o caminho de um gazetteer JSON para o handle compartilhado
pub const GAZETTEER_ENV: &str = "NERGREP_GAZETTEER";

static SHARED: OnceCell<Arc<NerModel>> = OnceCell::new();

/// O modelo de reconhecimento embutido.
#[derive(Debug, Clone)]
pub struct NerModel {
    /// Motor de regras para aplicação de dicionários e padrões
    pub rule_engine: RuleEngine,
}

impl NerModel {
    /// Constrói o modelo com as listas embutidas.
    pub fn build() -> Self {
        Self::with_gazetteers(Gazetteers::builtin())
    }

    pub fn with_gazetteers(gazetteers: Gazetteers) -> Self {
        Self {
            rule_engine: RuleEngine::new(gazetteers),
        }
    }

    /// Constrói o modelo a partir de um gazetteer JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let gazetteers = Gazetteers::load(path)?;
        info!("Gazetteer carregado de {}", path.display());
        Ok(Self::with_gazetteers(gazetteers))
    }

    /// Handle compartilhado do processo, inicializado na primeira chamada.
    pub fn shared() -> Result<Arc<NerModel>> {
        SHARED
            .get_or_try_init(|| {
                let model = match std::env::var_os(GAZETTEER_ENV) {
                    Some(path) => Self::load(Path::new(&path))?,
                    None => Self::build(),
                };
                info!("Modelo NER inicializado");
                Ok::<_, NerError>(Arc::new(model))
            })
            .map(Arc::clone)
    }

    pub fn gazetteers(&self) -> &Gazetteers {
        self.rule_engine.gazetteers()
    }
}

impl Default for NerModel {
    fn default() -> Self {
        Self::build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_shared_returns_same_instance() {
        let a = NerModel::shared().unwrap();
        let b = NerModel::shared().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_load_replaces_lists() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"organizations": ["Initech"]}}"#).unwrap();

        let model = NerModel::load(file.path()).unwrap();
        assert!(model.gazetteers().organizations.contains("initech"));
        assert!(!model.gazetteers().organizations.contains("microsoft"));
    }

    #[test]
    fn test_load_failure_is_reported() {
        assert!(NerModel::load(Path::new("/nonexistent/model.json")).is_err());
    }
}
