//! # Padrões Literais
//!
//! Frases fixas (ex: nomes de organizações que o reconhecedor não conhece)
//! casadas sem diferenciar maiúsculas de minúsculas, token a token. Todas as
//! ocorrências são reportadas, inclusive as aninhadas: "The Python Software
//! Foundation" e "Python Software Foundation" produzem dois spans.

use serde::{Deserialize, Serialize};

use crate::tokenizer::{tokenize, Token};

/// Padrões embutidos, todos com rótulo ORG
pub const DEFAULT_ORG_PATTERNS: &[&str] = &[
    "Python Software Foundation",
    "The Python Software Foundation",
    "CWI",
    "PSF",
];

/// Rótulo usado quando uma linha de padrões não informa nenhum
pub const DEFAULT_PATTERN_LABEL: &str = "ORG";

/// Uma frase literal com seu rótulo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhrasePattern {
    pub label: String,
    pub phrase: String,
}

impl PhrasePattern {
    pub fn new(label: impl Into<String>, phrase: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            phrase: phrase.into(),
        }
    }

    /// Lê padrões de um texto: uma frase por linha, opcionalmente `RÓTULO<TAB>frase`.
    ///
    /// Linhas vazias e linhas iniciadas por `#` são ignoradas.
    pub fn parse_lines(contents: &str) -> Vec<PhrasePattern> {
        contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| match line.split_once('\t') {
                Some((label, phrase)) => PhrasePattern::new(label.trim(), phrase.trim()),
                None => PhrasePattern::new(DEFAULT_PATTERN_LABEL, line),
            })
            .collect()
    }
}

/// Uma ocorrência de padrão no texto
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseMatch {
    pub label: String,
    /// Posição de byte inicial no texto original
    pub start: usize,
    /// Posição de byte final no texto original
    pub end: usize,
}

/// Casador de frases literais
#[derive(Debug, Clone, Default)]
pub struct PhraseMatcher {
    /// (rótulo, tokens da frase em minúsculas)
    patterns: Vec<(String, Vec<String>)>,
}

impl PhraseMatcher {
    pub fn new(patterns: impl IntoIterator<Item = PhrasePattern>) -> Self {
        let mut matcher = Self::default();
        matcher.extend(patterns);
        matcher
    }

    /// Padrões embutidos ([`DEFAULT_ORG_PATTERNS`]).
    pub fn builtin() -> Self {
        Self::new(
            DEFAULT_ORG_PATTERNS
                .iter()
                .map(|p| PhrasePattern::new(DEFAULT_PATTERN_LABEL, *p)),
        )
    }

    pub fn extend(&mut self, patterns: impl IntoIterator<Item = PhrasePattern>) {
        for pattern in patterns {
            let words: Vec<String> = tokenize(&pattern.phrase)
                .into_iter()
                .map(|t| t.text.to_lowercase())
                .collect();
            if words.is_empty() || pattern.label.is_empty() {
                continue;
            }
            let entry = (pattern.label, words);
            if !self.patterns.contains(&entry) {
                self.patterns.push(entry);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Encontra todas as ocorrências, ordenadas por `(start, end)`.
    ///
    /// Dois padrões que casam exatamente o mesmo trecho geram uma única
    /// ocorrência, com o rótulo do padrão registrado primeiro.
    pub fn find(&self, tokens: &[Token]) -> Vec<PhraseMatch> {
        let lowered: Vec<String> = tokens.iter().map(|t| t.text.to_lowercase()).collect();
        let mut matches: Vec<PhraseMatch> = Vec::new();

        for i in 0..tokens.len() {
            for (label, words) in &self.patterns {
                let end = i + words.len();
                if end > tokens.len() || lowered[i..end] != words[..] {
                    continue;
                }
                let (start_byte, end_byte) = (tokens[i].start, tokens[end - 1].end);
                if matches.iter().any(|m| m.start == start_byte && m.end == end_byte) {
                    continue;
                }
                matches.push(PhraseMatch {
                    label: label.clone(),
                    start: start_byte,
                    end: end_byte,
                });
            }
        }

        matches.sort_by_key(|m| (m.start, m.end));
        matches
    }
}
