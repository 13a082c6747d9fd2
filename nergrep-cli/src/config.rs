//! Leitura de arquivos e montagem dos critérios de filtragem.
//!
//! Precedência: valores padrão < arquivo `--config` < flags da linha de comando.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use nergrep_core::{FilterCriteria, PhrasePattern};

use crate::error::CliError;

/// Lê o texto de entrada; `-` significa stdin.
pub fn read_input(path: &Path) -> Result<String, CliError> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|source| CliError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        return Ok(text);
    }
    read_file(path)
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Lê uma lista de termos, um por linha. Linhas vazias são ignoradas.
pub fn read_terms(path: &Path) -> Result<HashSet<String>, CliError> {
    let contents = read_file(path)?;
    Ok(contents
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Lê padrões literais (`frase` ou `RÓTULO<TAB>frase` por linha).
pub fn read_patterns(path: &Path) -> Result<Vec<PhrasePattern>, CliError> {
    Ok(PhrasePattern::parse_lines(&read_file(path)?))
}

/// Carrega critérios de um JSON; sem arquivo, usa os padrões.
pub fn load_criteria(path: Option<&Path>) -> Result<FilterCriteria, CliError> {
    match path {
        Some(path) => {
            let raw = read_file(path)?;
            serde_json::from_str(&raw).map_err(|source| CliError::Config {
                path: path.to_path_buf(),
                source,
            })
        }
        None => Ok(FilterCriteria::default()),
    }
}

/// Divide a lista de tipos separada por vírgulas ("PERSON,ORG").
/// Lista sem nenhum tipo equivale a não passar a flag.
pub fn parse_types(raw: &str) -> Option<HashSet<String>> {
    let types: HashSet<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    (!types.is_empty()).then_some(types)
}

/// Valores vindos da linha de comando. `None` mantém o valor do arquivo.
#[derive(Debug, Default)]
pub struct CriteriaOverrides {
    pub entity_types: Option<HashSet<String>>,
    pub blacklist: Option<HashSet<String>>,
    pub whitelist: Option<HashSet<String>>,
    pub fuzzy_match: Option<String>,
    pub fuzzy_threshold: Option<f64>,
    pub regex_pattern: Option<String>,
    pub partial_word: Option<String>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl CriteriaOverrides {
    pub fn apply(self, mut base: FilterCriteria) -> FilterCriteria {
        if self.entity_types.is_some() {
            base.entity_types = self.entity_types;
        }
        if self.blacklist.is_some() {
            base.blacklist = self.blacklist;
        }
        if self.whitelist.is_some() {
            base.whitelist = self.whitelist;
        }
        if self.fuzzy_match.is_some() {
            base.fuzzy_match = self.fuzzy_match;
        }
        if let Some(threshold) = self.fuzzy_threshold {
            base.fuzzy_threshold = threshold;
        }
        if self.regex_pattern.is_some() {
            base.regex_pattern = self.regex_pattern;
        }
        if self.partial_word.is_some() {
            base.partial_word = self.partial_word;
        }
        if self.min_length.is_some() {
            base.min_length = self.min_length;
        }
        if self.max_length.is_some() {
            base.max_length = self.max_length;
        }
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn temp_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_terms_skips_empty_lines() {
        let file = temp_file("Microsoft\n\nGoogle\n");
        let terms = read_terms(file.path()).unwrap();
        assert_eq!(terms.len(), 2);
        assert!(terms.contains("Microsoft"));
        assert!(terms.contains("Google"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_terms(&PathBuf::from("/nonexistent/blacklist.txt")).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }

    #[test]
    fn test_load_criteria_from_json() {
        let file = temp_file(r#"{"entity_types": ["ORG"], "fuzzy_match": "micro", "fuzzy_threshold": 70}"#);
        let criteria = load_criteria(Some(file.path())).unwrap();
        assert_eq!(criteria.fuzzy_match.as_deref(), Some("micro"));
        assert_eq!(criteria.fuzzy_threshold, 70.0);
        assert!(criteria.entity_types.unwrap().contains("ORG"));
    }

    #[test]
    fn test_malformed_config_is_config_error() {
        let file = temp_file("{ not json");
        let err = load_criteria(Some(file.path())).unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let base = FilterCriteria::default()
            .with_fuzzy("micro")
            .with_fuzzy_threshold(70.0)
            .with_min_length(3);
        let overrides = CriteriaOverrides {
            fuzzy_match: Some("goo".to_string()),
            max_length: Some(10),
            ..Default::default()
        };
        let criteria = overrides.apply(base);
        assert_eq!(criteria.fuzzy_match.as_deref(), Some("goo"));
        assert_eq!(criteria.fuzzy_threshold, 70.0);
        assert_eq!(criteria.min_length, Some(3));
        assert_eq!(criteria.max_length, Some(10));
    }

    #[test]
    fn test_parse_types() {
        let types = parse_types("PERSON, ORG,,GPE").unwrap();
        assert_eq!(types.len(), 3);
        assert!(types.contains("ORG"));
    }

    #[test]
    fn test_parse_types_without_names_is_unset() {
        assert_eq!(parse_types(""), None);
        assert_eq!(parse_types(","), None);
        assert_eq!(parse_types(" , "), None);

        let criteria = CriteriaOverrides {
            entity_types: parse_types(""),
            ..Default::default()
        }
        .apply(FilterCriteria::default().with_types(["ORG"]));
        assert!(criteria.entity_types.unwrap().contains("ORG"));
    }

    #[test]
    fn test_read_patterns() {
        let file = temp_file("Acme Corp\nPRODUCT\tWidget\n");
        let patterns = read_patterns(file.path()).unwrap();
        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns[1].label, "PRODUCT");
    }
}
