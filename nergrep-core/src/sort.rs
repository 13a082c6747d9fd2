//! Ordenação estável das entidades por um único eixo.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entity::EntityOccurrence;
use crate::error::NerError;

/// Eixo de ordenação
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Texto em minúsculas
    Text,
    /// (rótulo, texto em minúsculas)
    Label,
    /// Offset inicial crescente
    Position,
    /// Comprimento do texto em caracteres, crescente
    Length,
    /// Ocorrências de (texto em minúsculas, rótulo), decrescente
    Frequency,
}

impl SortKey {
    pub fn name(&self) -> &'static str {
        match self {
            SortKey::Text => "text",
            SortKey::Label => "label",
            SortKey::Position => "position",
            SortKey::Length => "length",
            SortKey::Frequency => "frequency",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortKey {
    type Err = NerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(SortKey::Text),
            "label" => Ok(SortKey::Label),
            "position" => Ok(SortKey::Position),
            "length" => Ok(SortKey::Length),
            "frequency" => Ok(SortKey::Frequency),
            other => Err(NerError::InvalidOption(format!("chave de ordenação '{}'", other))),
        }
    }
}

/// Ordena no lugar. Empates mantêm a ordem de entrada.
pub fn sort_entities(entities: &mut [EntityOccurrence], key: SortKey) {
    match key {
        SortKey::Text => entities.sort_by_cached_key(|e| e.folded_text()),
        SortKey::Label => entities.sort_by_cached_key(|e| (e.label.clone(), e.folded_text())),
        SortKey::Position => entities.sort_by_key(|e| e.start),
        SortKey::Length => entities.sort_by_key(|e| e.char_len()),
        SortKey::Frequency => {
            let mut counts: HashMap<(String, String), usize> = HashMap::new();
            for e in entities.iter() {
                *counts.entry((e.folded_text(), e.label.clone())).or_insert(0) += 1;
            }
            entities.sort_by_cached_key(|e| {
                let folded = e.folded_text();
                let count = counts.get(&(folded.clone(), e.label.clone())).copied().unwrap_or(0);
                (std::cmp::Reverse(count), folded)
            });
        }
    }
}
