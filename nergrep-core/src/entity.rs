//! # Ocorrência de Entidade
//!
//! Valor imutável que representa um trecho detectado no texto. É criado uma
//! vez por chamada de extração e depois apenas lido pelos filtros, pela
//! ordenação e pela formatação.
//!
//! Os offsets são **índices de caractere** (não de byte) no texto original,
//! no intervalo semiaberto `[start, end)`.

use serde::{Deserialize, Serialize};

/// Uma entidade encontrada no texto.
///
/// O `label` é um vocabulário aberto: qualquer string emitida pelo extrator é
/// válida (ex: "PERSON", "ORG", "GPE", "DATE").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityOccurrence {
    /// Texto literal reconhecido (ex: "Apple Inc.")
    pub text: String,
    /// Tipo da entidade
    pub label: String,
    /// Sentença que contém a entidade, sem espaços nas bordas
    pub sentence: String,
    /// Offset de caractere inicial (inclusivo)
    pub start: usize,
    /// Offset de caractere final (exclusivo)
    pub end: usize,
}

impl EntityOccurrence {
    pub fn new(
        text: impl Into<String>,
        label: impl Into<String>,
        sentence: impl Into<String>,
        start: usize,
        end: usize,
    ) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
            sentence: sentence.into(),
            start,
            end,
        }
    }

    /// Comprimento do texto em caracteres (não em bytes).
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Texto em minúsculas, usado nas comparações insensíveis a caixa.
    pub fn folded_text(&self) -> String {
        self.text.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_len_counts_characters() {
        let e = EntityOccurrence::new("São Paulo", "GPE", "Fui a São Paulo.", 6, 15);
        assert_eq!(e.char_len(), 9);
        assert_eq!(e.text.len(), 10);
    }

    #[test]
    fn test_folded_text() {
        let e = EntityOccurrence::new("NASA", "ORG", "NASA launched it.", 0, 4);
        assert_eq!(e.folded_text(), "nasa");
    }
}
