//! # Motor de Regras: Gazetteers e Padrões
//!
//! Reconhecedor embutido: dispensa modelo estatístico e marca tokens com tags
//! BIO a partir de conhecimento explícito (listas de [`Gazetteers`]) e de
//! padrões ortográficos.
//!
//! ## Ordem das regras
//!
//! 1. **Datas**: anos ("1991"), décadas ("the 1970s"), séculos
//!    ("the 5th century"), meses com dia/ano ("June 5, 1999").
//! 2. **Sequências capitalizadas**: palavras capitalizadas consecutivas
//!    (aceitando conectores como "of" e "van" no meio) viram um candidato,
//!    classificado por gazetteer, sufixo ("Band" → ORG), prefixo
//!    ("Mount" → LOC), título anterior ("Dr." → PERSON), primeiro nome,
//!    sigla ("NASA" → ORG) ou pela forma (2-3 palavras → PERSON).
//!
//! Tokens já marcados por uma regra anterior não são reavaliados.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::gazetteer::Gazetteers;
use crate::tagger::{EntityLabel, Tag};
use crate::tokenizer::Token;

static YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(1[0-9]{3}|20[0-9]{2})$").expect("Failed to compile YEAR_RE"));

static DECADE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^((1[0-9]{3}|20[0-9]{2})s|'?[0-9]0s)$").expect("Failed to compile DECADE_RE")
});

static DAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([1-9]|[12][0-9]|3[01])(st|nd|rd|th)?$").expect("Failed to compile DAY_RE")
});

static ORDINAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^([0-9]+(st|nd|rd|th)|first|second|third|fourth|fifth|sixth|seventh|eighth|ninth|tenth|eleventh|twelfth|thirteenth|fourteenth|fifteenth|sixteenth|seventeenth|eighteenth|nineteenth|twentieth|twenty-first)$",
    )
    .expect("Failed to compile ORDINAL_RE")
});

const PERIOD_NOUNS: &[&str] = &["century", "centuries", "millennium"];

/// Uma correspondência de regra: a tag atribuída e a regra que disparou
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleMatch {
    pub tag: Tag,
    pub rule_name: String,
}

/// Motor de regras sobre gazetteers e padrões
#[derive(Debug, Clone)]
pub struct RuleEngine {
    gazetteers: Gazetteers,
}

impl RuleEngine {
    pub fn new(gazetteers: Gazetteers) -> Self {
        Self { gazetteers }
    }

    pub fn gazetteers(&self) -> &Gazetteers {
        &self.gazetteers
    }

    /// Aplica todas as regras à sequência de tokens.
    ///
    /// O resultado é alinhado com a entrada: posição `i` traz a tag do token `i`,
    /// ou `None` quando nenhuma regra disparou. Para melhores resultados a
    /// sequência deve corresponder a uma única sentença.
    pub fn apply(&self, tokens: &[Token]) -> Vec<Option<RuleMatch>> {
        let mut result: Vec<Option<RuleMatch>> = vec![None; tokens.len()];
        self.tag_dates(tokens, &mut result);
        self.tag_capitalized_runs(tokens, &mut result);
        result
    }

    fn tag_dates(&self, tokens: &[Token], result: &mut [Option<RuleMatch>]) {
        let lower = |k: usize| tokens.get(k).map(|t| t.text.to_lowercase());
        let is_period_noun = |k: usize| lower(k).map(|w| PERIOD_NOUNS.contains(&w.as_str())).unwrap_or(false);
        let mut i = 0;

        while i < tokens.len() {
            let text = tokens[i].text.as_str();
            let word = text.to_lowercase();

            // "the 1970s", "the 5th century"
            if word == "the" {
                if let Some(next) = tokens.get(i + 1) {
                    if DECADE_RE.is_match(&next.text) {
                        mark(result, i, i + 2, EntityLabel::Date, "decade_pattern");
                        i += 2;
                        continue;
                    }
                    if ORDINAL_RE.is_match(&next.text) && is_period_noun(i + 2) {
                        mark(result, i, i + 3, EntityLabel::Date, "century_pattern");
                        i += 3;
                        continue;
                    }
                }
            }

            if DECADE_RE.is_match(text) || YEAR_RE.is_match(text) {
                mark(result, i, i + 1, EntityLabel::Date, "year_pattern");
                i += 1;
                continue;
            }

            if ORDINAL_RE.is_match(text) && is_period_noun(i + 1) {
                mark(result, i, i + 2, EntityLabel::Date, "century_pattern");
                i += 2;
                continue;
            }

            if tokens[i].is_capitalized() && self.gazetteers.months.contains(&word) {
                let mut end = i + 1;
                if tokens.get(end).map(|t| DAY_RE.is_match(&t.text)).unwrap_or(false) {
                    end += 1;
                }
                let comma_year = tokens.get(end).map(|t| t.text == ",").unwrap_or(false)
                    && tokens.get(end + 1).map(|t| YEAR_RE.is_match(&t.text)).unwrap_or(false);
                if comma_year {
                    end += 2;
                } else if tokens.get(end).map(|t| YEAR_RE.is_match(&t.text)).unwrap_or(false) {
                    end += 1;
                }
                // "May" sozinho é mais provavelmente um verbo
                if word != "may" || end > i + 1 {
                    mark(result, i, end, EntityLabel::Date, "month_pattern");
                    i = end;
                    continue;
                }
            }

            i += 1;
        }
    }

    fn tag_capitalized_runs(&self, tokens: &[Token], result: &mut [Option<RuleMatch>]) {
        let gaz = &self.gazetteers;
        let mut i = 0;

        while i < tokens.len() {
            let lower = tokens[i].text.to_lowercase();
            if result[i].is_some()
                || !is_name_word(&tokens[i])
                || gaz.stopwords.contains(&lower)
                || gaz.person_titles.contains(&lower)
            {
                i += 1;
                continue;
            }

            let end = self.run_end(tokens, result, i);
            if let Some((label, start, rule)) = self.classify(tokens, result, i, end) {
                mark(result, start, end, label, rule);
            }
            i = end;
        }
    }

    /// Fim (exclusivo) da sequência capitalizada que começa em `start`.
    fn run_end(&self, tokens: &[Token], result: &[Option<RuleMatch>], start: usize) -> usize {
        let gaz = &self.gazetteers;
        let free = |k: usize| k < tokens.len() && result[k].is_none();
        let continues = |k: usize| {
            free(k) && is_name_word(&tokens[k]) && !gaz.stopwords.contains(&tokens[k].text.to_lowercase())
        };

        let mut end = start + 1;
        loop {
            if continues(end) {
                end += 1;
            } else if free(end)
                && gaz.connectors.contains(&tokens[end].text.to_lowercase())
                && continues(end + 1)
            {
                end += 2;
            } else {
                break;
            }
        }

        // "Apple and Microsoft" são duas entidades; "Food and Drug Administration" é uma
        let last = tokens[end - 1].text.to_lowercase();
        if !gaz.org_suffixes.contains(&last) {
            if let Some(k) = (start + 1..end).find(|&k| matches!(tokens[k].text.as_str(), "and" | "&")) {
                end = k;
            }
        }
        end
    }

    /// Decide o rótulo de uma sequência capitalizada.
    ///
    /// Retorna `(rótulo, início efetivo, regra)`; o início pode recuar um token
    /// para incluir o artigo "the" ("The Allman Brothers Band").
    fn classify(
        &self,
        tokens: &[Token],
        result: &[Option<RuleMatch>],
        start: usize,
        end: usize,
    ) -> Option<(EntityLabel, usize, &'static str)> {
        let gaz = &self.gazetteers;
        let words: Vec<String> = tokens[start..end].iter().map(|t| t.text.to_lowercase()).collect();
        let phrase = words.join(" ");
        let first = words[0].as_str();
        let last = words[words.len() - 1].as_str();
        let multiword = words.len() > 1;

        let article_before = start > 0
            && result[start - 1].is_none()
            && tokens[start - 1].text.eq_ignore_ascii_case("the");
        let with_article = if article_before { start - 1 } else { start };

        if gaz.organizations.contains(&phrase) {
            return Some((EntityLabel::Org, start, "org_gazetteer"));
        }
        if gaz.gpe.contains(&phrase) {
            return Some((EntityLabel::Gpe, start, "gpe_gazetteer"));
        }
        if article_before && gaz.loc.contains(&format!("the {}", phrase)) {
            return Some((EntityLabel::Loc, with_article, "loc_gazetteer"));
        }
        if gaz.loc.contains(&phrase) {
            return Some((EntityLabel::Loc, start, "loc_gazetteer"));
        }
        if gaz.norp.contains(&phrase) {
            return Some((EntityLabel::Norp, start, "norp_gazetteer"));
        }
        if multiword && gaz.org_suffixes.contains(last) {
            return Some((EntityLabel::Org, with_article, "org_suffix_pattern"));
        }
        if multiword && gaz.gpe_suffixes.contains(last) {
            return Some((EntityLabel::Gpe, with_article, "gpe_suffix_pattern"));
        }
        if multiword && gaz.loc_prefixes.contains(first) {
            return Some((EntityLabel::Loc, start, "loc_prefix_pattern"));
        }

        let titled = start > 0 && gaz.person_titles.contains(&tokens[start - 1].text.to_lowercase());
        if titled {
            return Some((EntityLabel::Person, start, "title_pattern"));
        }
        if gaz.first_names.contains(first) {
            return Some((EntityLabel::Person, start, "first_name_gazetteer"));
        }
        if !multiword && is_acronym(&tokens[start].text) {
            return Some((EntityLabel::Org, start, "acronym_pattern"));
        }
        // Palavra capitalizada no início da frase não diz nada sobre ser nome
        if !multiword && is_sentence_start(tokens, start) {
            return None;
        }

        let has_inner_connector = words[1..].iter().any(|w| gaz.connectors.contains(w));
        match words.len() {
            2 | 3 if !has_inner_connector || words.iter().any(|w| w == "van" || w == "de") => {
                Some((EntityLabel::Person, start, "name_shape_pattern"))
            }
            1 => Some((EntityLabel::Org, start, "capitalized_word")),
            _ => Some((EntityLabel::Org, start, "capitalized_run")),
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new(Gazetteers::builtin())
    }
}

/// Marca `tokens[start..end]` como uma entidade (B seguido de I).
fn mark(result: &mut [Option<RuleMatch>], start: usize, end: usize, label: EntityLabel, rule: &str) {
    for k in start..end.min(result.len()) {
        result[k] = Some(RuleMatch {
            tag: if k == start { Tag::Begin(label) } else { Tag::Inside(label) },
            rule_name: rule.to_string(),
        });
    }
}

/// Palavra que pode compor um nome próprio: começa com letra maiúscula
fn is_name_word(token: &Token) -> bool {
    token.text.chars().next().map(|c| c.is_alphabetic() && c.is_uppercase()).unwrap_or(false)
}

/// Sigla: ao menos duas letras, todas maiúsculas ("NASA", "U.S.", "AT&T")
fn is_acronym(text: &str) -> bool {
    let letters = text.chars().filter(|c| c.is_alphabetic()).count();
    letters >= 2
        && letters <= 6
        && text.chars().all(|c| (c.is_alphabetic() && c.is_uppercase()) || c == '.' || c == '&')
}

/// O token abre uma frase (ignorando aspas e parênteses de abertura)?
fn is_sentence_start(tokens: &[Token], index: usize) -> bool {
    let mut k = index;
    while k > 0 {
        match tokens[k - 1].text.as_str() {
            "\"" | "\u{201c}" | "(" | "'" | "\u{2018}" => k -= 1,
            "." | "!" | "?" | ":" | ";" => return true,
            _ => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagger::{tokens_to_spans, TaggedToken};
    use crate::tokenizer::tokenize;

    /// Executa o motor e devolve (texto, rótulo) de cada entidade
    fn entities(text: &str) -> Vec<(String, &'static str)> {
        let engine = RuleEngine::default();
        let tokens = tokenize(text);
        let matches = engine.apply(&tokens);
        let tagged: Vec<TaggedToken> = tokens
            .into_iter()
            .zip(matches)
            .map(|(token, m)| match m {
                Some(rm) => TaggedToken { token, tag: rm.tag },
                None => TaggedToken { token, tag: Tag::Outside },
            })
            .collect();
        tokens_to_spans(&tagged, text)
            .into_iter()
            .map(|s| (s.text, s.label.name()))
            .collect()
    }

    fn has(found: &[(String, &str)], text: &str, label: &str) -> bool {
        found.iter().any(|(t, l)| t == text && *l == label)
    }

    #[test]
    fn test_org_suffix_and_unknown_word() {
        let found = entities("Apple Inc. is working with Microsoft on new projects.");
        assert!(has(&found, "Apple Inc.", "ORG"), "{:?}", found);
        assert!(has(&found, "Microsoft", "ORG"), "{:?}", found);
    }

    #[test]
    fn test_article_is_kept_for_suffix_orgs() {
        let found = entities("He joined the Canadian Space Agency in 1991.");
        assert!(has(&found, "the Canadian Space Agency", "ORG"), "{:?}", found);
        assert!(has(&found, "1991", "DATE"), "{:?}", found);
    }

    #[test]
    fn test_and_splits_unless_org_suffix() {
        let found = entities("Reports from Apple and Google reached The U.S. Food and Drug Administration.");
        assert!(has(&found, "Apple", "ORG"), "{:?}", found);
        assert!(has(&found, "Google", "ORG"), "{:?}", found);
        assert!(has(&found, "The U.S. Food and Drug Administration", "ORG"), "{:?}", found);
    }

    #[test]
    fn test_person_rules() {
        let found = entities("Python was created by Guido van Rossum while Dr. Hoffmann watched.");
        assert!(has(&found, "Guido van Rossum", "PERSON"), "{:?}", found);
        assert!(has(&found, "Hoffmann", "PERSON"), "{:?}", found);
        assert!(!found.iter().any(|(t, _)| t == "Python"), "{:?}", found);
    }

    #[test]
    fn test_locations() {
        let found = entities("They climbed Mount Everest and toured the Hellenic Republic and Europe.");
        assert!(has(&found, "Mount Everest", "LOC"), "{:?}", found);
        assert!(has(&found, "the Hellenic Republic", "GPE"), "{:?}", found);
        assert!(has(&found, "Europe", "LOC"), "{:?}", found);
    }

    #[test]
    fn test_dates() {
        let found = entities("Rock grew in the 1970s, much as poetry did in the 5th century and on June 5, 1999.");
        assert!(has(&found, "the 1970s", "DATE"), "{:?}", found);
        assert!(has(&found, "the 5th century", "DATE"), "{:?}", found);
        assert!(has(&found, "June 5, 1999", "DATE"), "{:?}", found);
    }

    #[test]
    fn test_acronym_at_sentence_start() {
        let found = entities("NASA and ESA signed the deal.");
        assert!(has(&found, "NASA", "ORG"), "{:?}", found);
        assert!(has(&found, "ESA", "ORG"), "{:?}", found);
    }

    #[test]
    fn test_stopwords_and_may() {
        let found = entities("The team may win. Both teams played.");
        assert!(found.is_empty(), "{:?}", found);
    }

    #[test]
    fn test_empty_gazetteers_still_use_shape() {
        let engine = RuleEngine::new(Gazetteers::empty());
        let tokens = tokenize("we met Ada Lovelace yesterday");
        let matches = engine.apply(&tokens);
        assert_eq!(matches[2].as_ref().map(|m| m.tag), Some(Tag::Begin(EntityLabel::Person)));
        assert_eq!(matches[3].as_ref().map(|m| m.tag), Some(Tag::Inside(EntityLabel::Person)));
        assert!(matches[0].is_none());
    }
}
