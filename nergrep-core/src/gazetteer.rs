//! # Gazetteers
//!
//! Listas de conhecimento explícito usadas pelo motor de regras: nomes
//! conhecidos, sufixos que denunciam organizações, títulos que precedem
//! pessoas, palavras funcionais que nunca são entidade.
//!
//! As listas embutidas cobrem inglês jornalístico comum. Um arquivo JSON pode
//! substituir qualquer subconjunto dos campos; os campos ausentes mantêm os
//! valores embutidos.
//!
//! ```json
//! { "first_names": ["guido", "ada"], "organizations": ["acme corp."] }
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NerError, Result};

/// Listas de gazetteer, sempre em minúsculas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gazetteers {
    /// Primeiros nomes de pessoas
    pub first_names: HashSet<String>,
    /// Organizações conhecidas (podem ter várias palavras)
    pub organizations: HashSet<String>,
    /// Países, estados e cidades
    pub gpe: HashSet<String>,
    /// Locais não políticos: continentes, montanhas, regiões
    pub loc: HashSet<String>,
    /// Nacionalidades e grupos
    pub norp: HashSet<String>,
    /// Última palavra que indica organização ("Inc.", "Band", "Agency")
    pub org_suffixes: HashSet<String>,
    /// Última palavra que indica entidade geopolítica ("Republic", "Empire")
    pub gpe_suffixes: HashSet<String>,
    /// Primeira palavra que indica local ("Mount", "Lake")
    pub loc_prefixes: HashSet<String>,
    /// Títulos que precedem nomes de pessoas
    pub person_titles: HashSet<String>,
    /// Palavras minúsculas permitidas dentro de um nome ("of", "van")
    pub connectors: HashSet<String>,
    /// Palavras funcionais que, mesmo capitalizadas, não iniciam entidade
    pub stopwords: HashSet<String>,
    /// Nomes e abreviações de meses
    pub months: HashSet<String>,
}

fn set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_lowercase()).collect()
}

impl Gazetteers {
    /// Gazetteers vazios (nenhuma regra baseada em lista dispara).
    pub fn empty() -> Self {
        Self {
            first_names: HashSet::new(),
            organizations: HashSet::new(),
            gpe: HashSet::new(),
            loc: HashSet::new(),
            norp: HashSet::new(),
            org_suffixes: HashSet::new(),
            gpe_suffixes: HashSet::new(),
            loc_prefixes: HashSet::new(),
            person_titles: HashSet::new(),
            connectors: HashSet::new(),
            stopwords: HashSet::new(),
            months: HashSet::new(),
        }
    }

    /// Listas embutidas.
    pub fn builtin() -> Self {
        Self {
            first_names: set(&[
                "alexander", "bill", "clint", "edmund", "elon", "felix", "george",
                "guido", "henry", "jane", "john", "paul", "quentin", "ringo",
                "robert", "rowland", "sergio", "tenzing", "james", "mary", "michael",
                "david", "william", "richard", "thomas", "charles", "elizabeth",
                "susan", "sarah", "emma", "anna", "peter", "mark", "steve", "steven",
                "tim", "jeff", "larry", "sergey", "barack", "donald", "joe", "angela",
                "ada", "alan", "grace", "linus", "marie", "albert", "isaac", "neil",
            ]),
            organizations: set(&[
                "apple", "microsoft", "google", "amazon", "facebook", "meta",
                "instagram", "spotify", "netflix", "tesla", "spacex", "nasa", "esa",
                "bayer", "ibm", "intel", "nvidia", "twitter", "youtube", "royal mail",
                "united nations", "european union", "nato", "fbi", "cia", "un",
            ]),
            gpe: set(&[
                "albuquerque", "athens", "australia", "berlin", "brazil", "california",
                "canada", "china", "england", "florida", "france", "germany", "india",
                "italy", "jacksonville", "japan", "liverpool", "london", "los angeles",
                "mexico", "netherlands", "new mexico", "new york", "new york city",
                "paris", "redmond", "russia", "san francisco", "seattle",
                "south carolina", "spain", "texas", "tokyo", "u.k.", "u.s.",
                "united kingdom", "united states", "washington", "nepal", "tibet",
            ]),
            loc: set(&[
                "africa", "antarctica", "asia", "europe", "north america",
                "south america", "the alps", "the himalayas", "silicon valley",
                "the middle east", "the pacific", "the atlantic",
            ]),
            norp: set(&[
                "american", "americans", "british", "canadian", "chinese", "dutch",
                "english", "european", "french", "german", "greek", "indian",
                "italian", "japanese", "mexican", "russian", "spanish", "christian",
                "muslim", "jewish", "democrats", "republicans",
            ]),
            org_suffixes: set(&[
                "inc.", "inc", "corp.", "corp", "corporation", "company", "co.",
                "ltd.", "ltd", "llc", "plc", "bros.", "band", "foundation", "agency",
                "administration", "organization", "organisation", "university",
                "institute", "association", "studios", "bank", "group", "station",
                "society", "council", "committee", "department", "ministry", "party",
                "league", "club", "records", "airlines", "motors", "technologies",
                "systems", "labs", "laboratories", "college", "school", "museum",
                "hospital", "church", "commission", "court", "senate", "congress",
            ]),
            gpe_suffixes: set(&["republic", "kingdom", "empire", "region", "province", "emirates"]),
            loc_prefixes: set(&["mount", "mt.", "lake", "cape", "gulf", "river", "sea"]),
            person_titles: set(&[
                "mr.", "mrs.", "ms.", "dr.", "prof.", "sir", "dame", "lord", "lady",
                "president", "senator", "sen.", "governor", "gov.", "king", "queen",
                "prince", "princess", "pope", "saint", "general", "gen.", "captain",
                "capt.", "judge", "minister", "chancellor", "mayor",
            ]),
            connectors: set(&["of", "van", "von", "de", "der", "da", "del", "la", "le", "the", "and", "&"]),
            stopwords: set(&[
                "the", "a", "an", "this", "that", "these", "those", "it", "its", "he",
                "she", "they", "we", "i", "you", "his", "her", "their", "our", "my",
                "your", "in", "on", "at", "by", "for", "from", "with", "to", "of",
                "after", "before", "during", "both", "when", "while", "although",
                "however", "but", "and", "or", "if", "as", "there", "here", "today",
                "yesterday", "tomorrow", "many", "some", "most", "all", "each",
                "every", "no", "not", "one", "what", "which", "who", "where", "why",
                "how", "also", "then", "meanwhile", "later", "since", "under",
                "over", "is", "was", "are", "were", "be", "been", "did", "does", "do",
                "can", "could", "would", "should", "will", "yes", "so", "thus",
                "born", "founded", "located", "based",
            ]),
            months: set(&[
                "january", "february", "march", "april", "may", "june", "july",
                "august", "september", "october", "november", "december", "jan.",
                "feb.", "mar.", "apr.", "jun.", "jul.", "aug.", "sep.", "sept.",
                "oct.", "nov.", "dec.",
            ]),
        }
    }

    /// Carrega gazetteers de um arquivo JSON. Campos ausentes usam as listas embutidas.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| NerError::ModelLoad {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed: Gazetteers = serde_json::from_str(&raw).map_err(|source| NerError::ModelParse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(parsed.normalized())
    }

    /// Converte todas as entradas para minúsculas e colapsa espaços internos.
    pub fn normalized(self) -> Self {
        fn norm(items: HashSet<String>) -> HashSet<String> {
            items
                .into_iter()
                .map(|s| s.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase())
                .filter(|s| !s.is_empty())
                .collect()
        }
        Self {
            first_names: norm(self.first_names),
            organizations: norm(self.organizations),
            gpe: norm(self.gpe),
            loc: norm(self.loc),
            norp: norm(self.norp),
            org_suffixes: norm(self.org_suffixes),
            gpe_suffixes: norm(self.gpe_suffixes),
            loc_prefixes: norm(self.loc_prefixes),
            person_titles: norm(self.person_titles),
            connectors: norm(self.connectors),
            stopwords: norm(self.stopwords),
            months: norm(self.months),
        }
    }
}

impl Default for Gazetteers {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_is_lowercase() {
        let gaz = Gazetteers::builtin();
        assert!(gaz.gpe.contains("new york"));
        assert!(gaz.org_suffixes.contains("inc."));
        assert!(gaz.first_names.iter().all(|n| n == &n.to_lowercase()));
    }

    #[test]
    fn test_load_partial_file_keeps_builtin_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"first_names": ["Zaphod", "  Ford  "]}}"#).unwrap();

        let gaz = Gazetteers::load(file.path()).unwrap();
        assert_eq!(gaz.first_names.len(), 2);
        assert!(gaz.first_names.contains("zaphod"));
        assert!(gaz.first_names.contains("ford"));
        // Campo não informado: permanece o embutido
        assert!(gaz.gpe.contains("florida"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Gazetteers::load(Path::new("/nonexistent/gazetteer.json")).unwrap_err();
        assert!(matches!(err, NerError::ModelLoad { .. }));
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = Gazetteers::load(file.path()).unwrap_err();
        assert!(matches!(err, NerError::ModelParse { .. }));
    }
}
