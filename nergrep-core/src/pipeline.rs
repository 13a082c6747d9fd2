//! # Pipeline de Extração
//!
//! Adaptador entre o texto bruto e a lista de [`EntityOccurrence`] consumida
//! pelos filtros. O pipeline coordena:
//!
//! 1. Tokenização e segmentação em sentenças.
//! 2. **Passo customizado**: padrões literais ([`PhraseMatcher`]).
//! 3. **Passo do modelo**: motor de regras aplicado sentença a sentença,
//!    tags BIO agrupadas em spans.
//! 4. Conversão de offsets de byte para offsets de caractere e anexação da
//!    sentença de cada entidade.
//!
//! A saída traz primeiro as ocorrências customizadas, depois as do modelo,
//! cada grupo na ordem do texto.
//!
//! ## Sobreposição entre os passos
//!
//! Um span do modelo com exatamente os mesmos offsets de um span customizado é
//! sempre descartado. Sobreposições parciais dependem do [`OverlapPolicy`].

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::entity::EntityOccurrence;
use crate::error::{NerError, Result};
use crate::model::NerModel;
use crate::phrase::{PhraseMatch, PhraseMatcher};
use crate::sentence::{sentence_at, split_sentences, SentenceSpan};
use crate::tagger::{tokens_to_spans, EntitySpan, Tag, TaggedToken};
use crate::tokenizer::{tokenize, Token};

/// Contrato do extrator: texto e tipos permitidos entram, ocorrências saem.
///
/// Garantias: offsets são índices de caractere válidos no texto; `sentence`
/// nunca é vazia quando o texto não é vazio.
pub trait EntityRecognizer {
    fn extract(&self, text: &str, allowed_types: Option<&HashSet<String>>) -> Vec<EntityOccurrence>;
}

/// Como resolver spans do modelo que se sobrepõem parcialmente a um span customizado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Remove só duplicatas de offsets idênticos; sobreposições parciais
    /// produzem as duas ocorrências.
    #[default]
    KeepBoth,
    /// Span do modelo que toca qualquer span customizado é descartado.
    PreferCustom,
}

impl fmt::Display for OverlapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlapPolicy::KeepBoth => f.write_str("keep-both"),
            OverlapPolicy::PreferCustom => f.write_str("prefer-custom"),
        }
    }
}

impl FromStr for OverlapPolicy {
    type Err = NerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "keep-both" => Ok(OverlapPolicy::KeepBoth),
            "prefer-custom" => Ok(OverlapPolicy::PreferCustom),
            other => Err(NerError::InvalidOption(format!("política de sobreposição '{}'", other))),
        }
    }
}

/// O pipeline de extração principal.
#[derive(Debug, Clone)]
pub struct NerPipeline {
    pub model: Arc<NerModel>,
    pub phrases: PhraseMatcher,
    pub overlap: OverlapPolicy,
}

impl NerPipeline {
    /// Pipeline sobre um modelo já construído, com os padrões embutidos.
    pub fn new(model: Arc<NerModel>) -> Self {
        Self {
            model,
            phrases: PhraseMatcher::builtin(),
            overlap: OverlapPolicy::default(),
        }
    }

    /// Pipeline sobre o handle compartilhado do processo ([`NerModel::shared`]).
    pub fn shared() -> Result<Self> {
        Ok(Self::new(NerModel::shared()?))
    }

    pub fn with_phrases(mut self, phrases: PhraseMatcher) -> Self {
        self.phrases = phrases;
        self
    }

    pub fn with_overlap_policy(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }

    /// Passo do modelo: aplica as regras sentença a sentença, para que
    /// "início de frase" tenha o significado esperado.
    fn tag_tokens(&self, tokens: &[Token], sentences: &[SentenceSpan]) -> Vec<TaggedToken> {
        let mut tagged = Vec::with_capacity(tokens.len());
        let mut i = 0;

        while i < tokens.len() {
            // Tokens cujo início cai na mesma sentença
            let sentence = sentence_at(sentences, tokens[i].start).copied();
            let mut j = i + 1;
            while j < tokens.len() && sentence.map_or(false, |s| s.contains(tokens[j].start)) {
                j += 1;
            }

            let slice = &tokens[i..j];
            let matches = self.model.rule_engine.apply(slice);
            for (token, rule) in slice.iter().zip(matches) {
                let tag = match rule {
                    Some(m) => {
                        trace!("Regra {} aplicada a '{}'", m.rule_name, token.text);
                        m.tag
                    }
                    None => Tag::Outside,
                };
                tagged.push(TaggedToken {
                    token: token.clone(),
                    tag,
                });
            }
            i = j;
        }

        tagged
    }

    /// Conjunto vazio equivale a nenhum filtro de tipo.
    fn is_allowed(label: &str, allowed_types: Option<&HashSet<String>>) -> bool {
        allowed_types.map_or(true, |types| types.is_empty() || types.contains(label))
    }

    fn model_span_conflicts(&self, span: &EntitySpan, custom: &[PhraseMatch]) -> bool {
        custom.iter().any(|c| match self.overlap {
            OverlapPolicy::KeepBoth => c.start == span.start && c.end == span.end,
            OverlapPolicy::PreferCustom => c.start < span.end && span.start < c.end,
        })
    }
}

impl EntityRecognizer for NerPipeline {
    fn extract(&self, text: &str, allowed_types: Option<&HashSet<String>>) -> Vec<EntityOccurrence> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let tokens = tokenize(text);
        let sentences = split_sentences(text);
        let offsets = CharOffsets::new(text);

        let sentence_of = |byte_start: usize| -> String {
            sentence_at(&sentences, byte_start)
                .map(|s| s.trimmed(text))
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| text.trim())
                .to_string()
        };

        // Passo customizado
        let custom: Vec<PhraseMatch> = self
            .phrases
            .find(&tokens)
            .into_iter()
            .filter(|m| Self::is_allowed(&m.label, allowed_types))
            .collect();

        // Passo do modelo
        let tagged = self.tag_tokens(&tokens, &sentences);
        let spans = tokens_to_spans(&tagged, text);
        let model_spans: Vec<&EntitySpan> = spans
            .iter()
            .filter(|s| Self::is_allowed(s.label.name(), allowed_types))
            .filter(|s| !self.model_span_conflicts(s, &custom))
            .collect();

        debug!(
            "Extração: {} tokens, {} sentenças, {} padrões, {} spans do modelo ({} após sobreposição)",
            tokens.len(),
            sentences.len(),
            custom.len(),
            spans.len(),
            model_spans.len()
        );

        let mut entities = Vec::with_capacity(custom.len() + model_spans.len());
        for m in &custom {
            entities.push(EntityOccurrence::new(
                &text[m.start..m.end],
                m.label.as_str(),
                sentence_of(m.start),
                offsets.char_index(m.start),
                offsets.char_index(m.end),
            ));
        }
        for s in model_spans {
            entities.push(EntityOccurrence::new(
                s.text.as_str(),
                s.label.name(),
                sentence_of(s.start),
                offsets.char_index(s.start),
                offsets.char_index(s.end),
            ));
        }
        entities
    }
}

/// Tabela de conversão de offset de byte para offset de caractere.
struct CharOffsets {
    starts: Vec<usize>,
}

impl CharOffsets {
    fn new(text: &str) -> Self {
        Self {
            starts: text.char_indices().map(|(b, _)| b).collect(),
        }
    }

    /// Número de caracteres que começam antes do byte informado.
    fn char_index(&self, byte: usize) -> usize {
        self.starts.partition_point(|&b| b < byte)
    }
}
