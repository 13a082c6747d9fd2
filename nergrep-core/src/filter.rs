//! # Pipeline de Filtros
//!
//! Dada uma lista de [`EntityOccurrence`] e um [`FilterCriteria`], produz o
//! subconjunto que satisfaz **todos** os critérios configurados.
//!
//! ## Ordem fixa dos estágios
//!
//! 1. **Tipo**: rótulo pertence ao conjunto permitido (exato, sensível a caixa).
//! 2. **Blacklist**: remove se o texto, em minúsculas, é igual a algum termo.
//! 3. **Whitelist**: mantém se o texto, em minúsculas, é igual a algum termo.
//! 4. **Fuzzy**: mantém se `partial_ratio(texto, padrão) >= limiar`.
//! 5. **Regex**: mantém se o padrão (sem diferenciar caixa) casa em algum ponto.
//! 6. **Parcial**: mantém se a palavra aparece como substring (sem diferenciar caixa).
//! 7. **Comprimento**: `min <= caracteres <= max` (limites inclusivos).
//!
//! Como a blacklist roda antes da whitelist, um termo presente nas duas é
//! excluído. Estágios sem critério não entram no pipeline; coleções vazias e
//! strings vazias contam como "não configurado".
//!
//! Regex inválida não é erro: o estágio registra um aviso e deixa tudo passar.
//!
//! ```rust
//! use nergrep_core::entity::EntityOccurrence;
//! use nergrep_core::filter::{filter_all, FilterCriteria};
//!
//! let entities = vec![
//!     EntityOccurrence::new("Apple Inc.", "ORG", "", 0, 10),
//!     EntityOccurrence::new("John Smith", "PERSON", "", 11, 21),
//! ];
//! let criteria = FilterCriteria::default().with_types(["ORG"]);
//! let kept = filter_all(entities, &criteria);
//! assert_eq!(kept.len(), 1);
//! ```

use std::collections::HashSet;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::entity::EntityOccurrence;
use crate::error::{NerError, Result};
use crate::fuzzy::partial_ratio;

/// Limiar padrão do filtro fuzzy
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 80.0;

/// Critérios de filtragem de uma execução. Todos os campos começam desligados.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub entity_types: Option<HashSet<String>>,
    pub blacklist: Option<HashSet<String>>,
    pub whitelist: Option<HashSet<String>>,
    pub fuzzy_match: Option<String>,
    pub fuzzy_threshold: f64,
    pub regex_pattern: Option<String>,
    pub partial_word: Option<String>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            entity_types: None,
            blacklist: None,
            whitelist: None,
            fuzzy_match: None,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            regex_pattern: None,
            partial_word: None,
            min_length: None,
            max_length: None,
        }
    }
}

fn to_set<I, S>(items: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

impl FilterCriteria {
    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entity_types = Some(to_set(types));
        self
    }

    pub fn with_blacklist<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blacklist = Some(to_set(terms));
        self
    }

    pub fn with_whitelist<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.whitelist = Some(to_set(terms));
        self
    }

    pub fn with_fuzzy(mut self, pattern: impl Into<String>) -> Self {
        self.fuzzy_match = Some(pattern.into());
        self
    }

    pub fn with_fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }

    pub fn with_regex(mut self, pattern: impl Into<String>) -> Self {
        self.regex_pattern = Some(pattern.into());
        self
    }

    pub fn with_partial_word(mut self, word: impl Into<String>) -> Self {
        self.partial_word = Some(word.into());
        self
    }

    pub fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Verifica limiar (0-100) e limites de comprimento (min <= max).
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.fuzzy_threshold) {
            return Err(NerError::InvalidThreshold(self.fuzzy_threshold));
        }
        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if min > max {
                return Err(NerError::InvalidLengthBounds { min, max });
            }
        }
        Ok(())
    }

    /// Estágios configurados, na ordem fixa de aplicação.
    pub fn stages(&self) -> Vec<FilterStage> {
        let mut stages = Vec::new();
        if let Some(types) = &self.entity_types {
            stages.push(FilterStage::Types(types.clone()));
        }
        if let Some(terms) = &self.blacklist {
            stages.push(FilterStage::blacklist(terms));
        }
        if let Some(terms) = &self.whitelist {
            stages.push(FilterStage::whitelist(terms));
        }
        if let Some(pattern) = &self.fuzzy_match {
            stages.push(FilterStage::fuzzy(pattern, self.fuzzy_threshold));
        }
        if let Some(pattern) = &self.regex_pattern {
            stages.push(FilterStage::regex(pattern));
        }
        if let Some(word) = &self.partial_word {
            stages.push(FilterStage::partial(word));
        }
        stages.push(FilterStage::Length {
            min: self.min_length,
            max: self.max_length,
        });

        stages.retain(FilterStage::is_configured);
        stages
    }

    /// Nenhum estágio configurado: o pipeline é a identidade.
    pub fn is_empty(&self) -> bool {
        self.stages().is_empty()
    }
}

/// Um estágio independente do pipeline.
///
/// Termos de blacklist/whitelist e a palavra parcial já são guardados em
/// minúsculas. `Regex(None)` é uma regex que não compilou: o estágio é
/// considerado configurado mas aceita tudo.
#[derive(Debug, Clone)]
pub enum FilterStage {
    Types(HashSet<String>),
    Blacklist(HashSet<String>),
    Whitelist(HashSet<String>),
    Fuzzy { pattern: String, threshold: f64 },
    Regex(Option<Regex>),
    Partial(String),
    Length { min: Option<usize>, max: Option<usize> },
}

fn folded(terms: &HashSet<String>) -> HashSet<String> {
    terms.iter().map(|t| t.to_lowercase()).collect()
}

impl FilterStage {
    pub fn blacklist(terms: &HashSet<String>) -> Self {
        FilterStage::Blacklist(folded(terms))
    }

    pub fn whitelist(terms: &HashSet<String>) -> Self {
        FilterStage::Whitelist(folded(terms))
    }

    pub fn fuzzy(pattern: &str, threshold: f64) -> Self {
        FilterStage::Fuzzy {
            pattern: pattern.to_lowercase(),
            threshold,
        }
    }

    /// Compila o padrão sem diferenciar caixa; se falhar, o estágio deixa tudo passar.
    pub fn regex(pattern: &str) -> Self {
        match RegexBuilder::new(pattern).case_insensitive(true).build() {
            Ok(re) => FilterStage::Regex(Some(re)),
            Err(e) => {
                warn!("Regex inválida '{}', filtro ignorado: {}", pattern, e);
                FilterStage::Regex(None)
            }
        }
    }

    pub fn partial(word: &str) -> Self {
        FilterStage::Partial(word.to_lowercase())
    }

    /// Nome curto do estágio, para logs
    pub fn name(&self) -> &'static str {
        match self {
            FilterStage::Types(_) => "type",
            FilterStage::Blacklist(_) => "blacklist",
            FilterStage::Whitelist(_) => "whitelist",
            FilterStage::Fuzzy { .. } => "fuzzy",
            FilterStage::Regex(_) => "regex",
            FilterStage::Partial(_) => "partial",
            FilterStage::Length { .. } => "length",
        }
    }

    /// O estágio filtra alguma coisa? Coleções e strings vazias não filtram.
    pub fn is_configured(&self) -> bool {
        match self {
            FilterStage::Types(set) | FilterStage::Blacklist(set) | FilterStage::Whitelist(set) => !set.is_empty(),
            FilterStage::Fuzzy { pattern, .. } => !pattern.is_empty(),
            FilterStage::Regex(_) => true,
            FilterStage::Partial(word) => !word.is_empty(),
            FilterStage::Length { min, max } => min.is_some() || max.is_some(),
        }
    }

    /// A entidade sobrevive a este estágio?
    pub fn accepts(&self, entity: &EntityOccurrence) -> bool {
        match self {
            FilterStage::Types(types) => types.contains(&entity.label),
            FilterStage::Blacklist(terms) => !terms.contains(&entity.folded_text()),
            FilterStage::Whitelist(terms) => terms.contains(&entity.folded_text()),
            FilterStage::Fuzzy { pattern, threshold } => {
                partial_ratio(&entity.folded_text(), pattern) >= *threshold
            }
            FilterStage::Regex(Some(re)) => re.is_match(&entity.text),
            FilterStage::Regex(None) => true,
            FilterStage::Partial(word) => entity.folded_text().contains(word.as_str()),
            FilterStage::Length { min, max } => {
                let len = entity.char_len();
                min.map_or(true, |m| len >= m) && max.map_or(true, |m| len <= m)
            }
        }
    }

    /// Aplica o estágio preservando a ordem relativa dos sobreviventes.
    pub fn apply(&self, entities: Vec<EntityOccurrence>) -> Vec<EntityOccurrence> {
        if !self.is_configured() {
            return entities;
        }
        entities.into_iter().filter(|e| self.accepts(e)).collect()
    }
}

/// Aplica todos os critérios configurados, na ordem fixa.
pub fn filter_all(entities: Vec<EntityOccurrence>, criteria: &FilterCriteria) -> Vec<EntityOccurrence> {
    criteria.stages().iter().fold(entities, |acc, stage| {
        let before = acc.len();
        let kept = stage.apply(acc);
        debug!("Filtro {}: {} -> {} entidades", stage.name(), before, kept.len());
        kept
    })
}

pub fn filter_by_type(entities: Vec<EntityOccurrence>, allowed_types: &HashSet<String>) -> Vec<EntityOccurrence> {
    FilterStage::Types(allowed_types.clone()).apply(entities)
}

pub fn filter_by_blacklist(entities: Vec<EntityOccurrence>, blacklist: &HashSet<String>) -> Vec<EntityOccurrence> {
    FilterStage::blacklist(blacklist).apply(entities)
}

pub fn filter_by_whitelist(entities: Vec<EntityOccurrence>, whitelist: &HashSet<String>) -> Vec<EntityOccurrence> {
    FilterStage::whitelist(whitelist).apply(entities)
}

pub fn filter_by_fuzzy_match(entities: Vec<EntityOccurrence>, pattern: &str, threshold: f64) -> Vec<EntityOccurrence> {
    FilterStage::fuzzy(pattern, threshold).apply(entities)
}

pub fn filter_by_regex(entities: Vec<EntityOccurrence>, pattern: &str) -> Vec<EntityOccurrence> {
    FilterStage::regex(pattern).apply(entities)
}

pub fn filter_by_partial_word(entities: Vec<EntityOccurrence>, word: &str) -> Vec<EntityOccurrence> {
    FilterStage::partial(word).apply(entities)
}

pub fn filter_by_length(
    entities: Vec<EntityOccurrence>,
    min_length: Option<usize>,
    max_length: Option<usize>,
) -> Vec<EntityOccurrence> {
    FilterStage::Length {
        min: min_length,
        max: max_length,
    }
    .apply(entities)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(text: &str, label: &str, sentence: &str, start: usize, end: usize) -> EntityOccurrence {
        EntityOccurrence::new(text, label, sentence, start, end)
    }

    fn sample_entities() -> Vec<EntityOccurrence> {
        vec![
            entity("Apple Inc.", "ORG", "Apple Inc. is a company.", 0, 10),
            entity("Microsoft", "ORG", "Microsoft develops software.", 0, 9),
            entity("John Smith", "PERSON", "John Smith is a developer.", 0, 10),
            entity("New York", "GPE", "They are based in New York.", 18, 26),
            entity("Google", "ORG", "Google is a search engine.", 0, 6),
            entity("Jane Doe", "PERSON", "Jane Doe works there.", 0, 8),
            entity("London", "GPE", "The office is in London.", 17, 23),
        ]
    }

    fn texts(entities: &[EntityOccurrence]) -> Vec<&str> {
        entities.iter().map(|e| e.text.as_str()).collect()
    }

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_criteria_is_identity() {
        let criteria = FilterCriteria::default();
        assert!(criteria.is_empty());
        assert_eq!(filter_all(sample_entities(), &criteria), sample_entities());
    }

    #[test]
    fn test_empty_collections_are_not_configured() {
        let criteria = FilterCriteria::default()
            .with_types(Vec::<String>::new())
            .with_blacklist(Vec::<String>::new())
            .with_whitelist(Vec::<String>::new())
            .with_fuzzy("")
            .with_partial_word("");
        assert!(criteria.is_empty());
        assert_eq!(filter_all(sample_entities(), &criteria).len(), 7);
    }

    #[test]
    fn test_filter_by_type() {
        let filtered = filter_by_type(sample_entities(), &set(&["ORG"]));
        assert_eq!(filtered.len(), 3);
        assert!(filtered.iter().all(|e| e.label == "ORG"));
    }

    #[test]
    fn test_filter_by_type_is_case_sensitive() {
        assert!(filter_by_type(sample_entities(), &set(&["org"])).is_empty());
    }

    #[test]
    fn test_filter_by_blacklist_case_insensitive() {
        let filtered = filter_by_blacklist(sample_entities(), &set(&["microsoft", "NEW YORK"]));
        assert_eq!(filtered.len(), 5);
        assert!(!texts(&filtered).contains(&"Microsoft"));
        assert!(!texts(&filtered).contains(&"New York"));
    }

    #[test]
    fn test_blacklist_is_exact_not_substring() {
        let entities = vec![entity("New York City", "GPE", "", 0, 13)];
        assert_eq!(filter_by_blacklist(entities, &set(&["New York"])).len(), 1);
    }

    #[test]
    fn test_filter_by_whitelist_case_insensitive() {
        let filtered = filter_by_whitelist(sample_entities(), &set(&["apple inc.", "GOOGLE", "London"]));
        assert_eq!(texts(&filtered), vec!["Apple Inc.", "Google", "London"]);
    }

    #[test]
    fn test_filter_by_fuzzy_match() {
        let filtered = filter_by_fuzzy_match(sample_entities(), "micro", DEFAULT_FUZZY_THRESHOLD);
        assert_eq!(texts(&filtered), vec!["Microsoft"]);
    }

    #[test]
    fn test_fuzzy_threshold_zero_keeps_everything() {
        assert_eq!(filter_by_fuzzy_match(sample_entities(), "micro", 0.0).len(), 7);
    }

    #[test]
    fn test_filter_by_regex() {
        assert_eq!(filter_by_regex(sample_entities(), r"^[A-Z]").len(), 7);

        let filtered = filter_by_regex(sample_entities(), r"apple");
        assert_eq!(texts(&filtered), vec!["Apple Inc."]);
    }

    #[test]
    fn test_invalid_regex_fails_open() {
        assert_eq!(filter_by_regex(sample_entities(), r"["), sample_entities());

        let criteria = FilterCriteria::default().with_regex("[");
        assert!(!criteria.is_empty());
        assert_eq!(filter_all(sample_entities(), &criteria), sample_entities());
    }

    #[test]
    fn test_filter_by_partial_word() {
        assert_eq!(texts(&filter_by_partial_word(sample_entities(), "soft")), vec!["Microsoft"]);
        assert_eq!(texts(&filter_by_partial_word(sample_entities(), "APPLE")), vec!["Apple Inc."]);
    }

    #[test]
    fn test_filter_by_length() {
        assert_eq!(filter_by_length(sample_entities(), Some(6), None).len(), 7);

        let filtered = filter_by_length(sample_entities(), None, Some(6));
        assert_eq!(texts(&filtered), vec!["Google", "London"]);

        let filtered = filter_by_length(sample_entities(), Some(6), Some(8));
        assert_eq!(texts(&filtered), vec!["New York", "Google", "Jane Doe", "London"]);
    }

    #[test]
    fn test_length_counts_characters() {
        let entities = vec![entity("Zürich", "GPE", "", 0, 6)];
        assert_eq!(filter_by_length(entities, Some(6), Some(6)).len(), 1);
    }

    #[test]
    fn test_filter_all_with_multiple_filters() {
        let criteria = FilterCriteria::default()
            .with_types(["ORG"])
            .with_blacklist(["Microsoft"])
            .with_whitelist(["Google"])
            .with_fuzzy("goo")
            .with_regex(r"^[A-Z]")
            .with_min_length(5)
            .with_max_length(6);
        assert_eq!(texts(&filter_all(sample_entities(), &criteria)), vec!["Google"]);
    }

    #[test]
    fn test_blacklist_runs_before_whitelist() {
        let criteria = FilterCriteria::default()
            .with_blacklist(["Microsoft", "Google"])
            .with_whitelist(["Apple Inc.", "Google", "Microsoft"]);
        assert_eq!(texts(&filter_all(sample_entities(), &criteria)), vec!["Apple Inc."]);
    }

    #[test]
    fn test_end_to_end_type_and_blacklist() {
        let entities = vec![
            entity("Apple Inc.", "ORG", "", 0, 10),
            entity("Microsoft", "ORG", "", 11, 20),
            entity("John Smith", "PERSON", "", 21, 31),
            entity("Google", "ORG", "", 32, 38),
        ];
        let criteria = FilterCriteria::default().with_types(["ORG"]).with_blacklist(["Microsoft"]);
        assert_eq!(texts(&filter_all(entities, &criteria)), vec!["Apple Inc.", "Google"]);
    }

    #[test]
    fn test_stage_order() {
        let criteria = FilterCriteria::default()
            .with_max_length(10)
            .with_partial_word("a")
            .with_types(["ORG"])
            .with_whitelist(["x"]);
        let names: Vec<&str> = criteria.stages().iter().map(FilterStage::name).collect();
        assert_eq!(names, vec!["type", "whitelist", "partial", "length"]);
    }

    #[test]
    fn test_validate() {
        assert!(FilterCriteria::default().validate().is_ok());
        assert!(matches!(
            FilterCriteria::default().with_fuzzy_threshold(120.0).validate(),
            Err(NerError::InvalidThreshold(_))
        ));
        assert!(matches!(
            FilterCriteria::default().with_min_length(5).with_max_length(2).validate(),
            Err(NerError::InvalidLengthBounds { min: 5, max: 2 })
        ));
    }

    #[test]
    fn test_criteria_from_json_defaults() {
        let criteria: FilterCriteria = serde_json::from_str(r#"{"blacklist": ["Acme"], "min_length": 3}"#).unwrap();
        assert_eq!(criteria.fuzzy_threshold, DEFAULT_FUZZY_THRESHOLD);
        assert_eq!(criteria.min_length, Some(3));
        assert!(criteria.entity_types.is_none());
    }
}
