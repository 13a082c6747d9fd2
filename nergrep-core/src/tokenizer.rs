//! # Tokenizador
//!
//! Divide o texto bruto em tokens (palavras e pontuações). Cada token
//! preserva sua posição original no texto (offset em bytes) para que as
//! entidades possam ser recortadas do texto sem alterar sua formatação.
//!
//! ## Regras
//!
//! - Espaços separam tokens; pontuação vira token próprio.
//! - Abreviações conhecidas mantêm o ponto ("Inc.", "Dr.", "Bros.").
//! - Siglas pontuadas ficam juntas ("U.S.", "J.R.R.").
//! - Hífens e apóstrofos dentro da palavra são preservados ("Leone's", "co-founder").
//! - Números com separador decimal ou de milhar ficam juntos ("1.5", "1,000").
//!
//! ```rust
//! use nergrep_core::tokenizer::tokenize;
//!
//! let tokens = tokenize("Apple Inc. hired Dr. Smith.");
//! let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, vec!["Apple", "Inc.", "hired", "Dr.", "Smith", "."]);
//! ```

use serde::{Deserialize, Serialize};

/// Um token extraído do texto original.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    /// O texto do token (ex: "Apple", ",", "Inc.").
    pub text: String,
    /// Índice de byte inicial no texto original (inclusive).
    pub start: usize,
    /// Índice de byte final no texto original (exclusivo).
    pub end: usize,
}

impl Token {
    /// Primeiro caractere é maiúsculo.
    pub fn is_capitalized(&self) -> bool {
        self.text.chars().next().map(char::is_uppercase).unwrap_or(false)
    }
}

/// Abreviações em inglês cujo ponto pertence ao token
pub const ABBREVIATIONS: &[&str] = &[
    "Inc", "Corp", "Co", "Ltd", "Bros", "Mr", "Mrs", "Ms", "Dr", "St", "Jr", "Sr",
    "Prof", "Gen", "Gov", "Sen", "Rep", "Mt", "Ft", "Capt", "Col", "Lt", "Sgt",
    "vs", "etc", "No", "Jan", "Feb", "Mar", "Apr", "Jun", "Jul", "Aug", "Sep",
    "Sept", "Oct", "Nov", "Dec",
];

/// Tokeniza um texto.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current_start = 0;
    let mut current_text = String::new();
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut i = 0;

    while i < chars.len() {
        let (byte_pos, ch) = chars[i];
        let next = chars.get(i + 1).map(|(_, c)| *c);

        if ch.is_alphanumeric() {
            if current_text.is_empty() {
                current_start = byte_pos;
            }
            current_text.push(ch);
        } else if (ch == '-' || ch == '\'' || ch == '\u{2019}')
            && !current_text.is_empty()
            && next.map(char::is_alphanumeric).unwrap_or(false)
        {
            current_text.push(ch);
        } else if ch == '.' && !current_text.is_empty() && keeps_period(&current_text, next) {
            current_text.push('.');
        } else if ch == ','
            && current_text.chars().all(|c| c.is_ascii_digit())
            && !current_text.is_empty()
            && next.map(|c| c.is_ascii_digit()).unwrap_or(false)
        {
            current_text.push(',');
        } else if ch.is_whitespace() {
            flush_token(&mut tokens, &mut current_text, current_start, byte_pos);
        } else {
            flush_token(&mut tokens, &mut current_text, current_start, byte_pos);
            push_token(&mut tokens, ch.to_string(), byte_pos, byte_pos + ch.len_utf8());
        }
        i += 1;
    }

    flush_token(&mut tokens, &mut current_text, current_start, text.len());
    tokens
}

/// Decide se o ponto encontrado após `current` faz parte do token.
fn keeps_period(current: &str, next: Option<char>) -> bool {
    if ABBREVIATIONS.contains(&current) {
        return true;
    }
    // Número decimal (ex: 1.5)
    if current.chars().all(|c| c.is_ascii_digit()) {
        return next.map(|c| c.is_ascii_digit()).unwrap_or(false);
    }
    // Sigla pontuada: letras isoladas separadas por ponto (U.S., J.R.R.)
    let is_acronym_so_far = current
        .split('.')
        .all(|part| part.chars().count() == 1 && part.chars().all(char::is_uppercase));
    if is_acronym_so_far {
        return current.contains('.') || next.map(char::is_uppercase).unwrap_or(false);
    }
    false
}

/// Fecha o token acumulado e adiciona à lista (se não vazio)
fn flush_token(tokens: &mut Vec<Token>, text: &mut String, start: usize, end: usize) {
    if !text.is_empty() {
        tokens.push(Token {
            text: text.clone(),
            start,
            end,
        });
        text.clear();
    }
}

/// Adiciona um token de pontuação diretamente
fn push_token(tokens: &mut Vec<Token>, text: String, start: usize, end: usize) {
    tokens.push(Token {
        text,
        start,
        end,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &str) -> Vec<String> {
        tokenize(input).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_tokenize_basic() {
        let tokens = tokenize("Apple Inc. and Microsoft are tech companies.");
        assert_eq!(tokens.len(), 8);
        assert_eq!(tokens[1].text, "Inc.");
        assert_eq!((tokens[0].start, tokens[1].end), (0, 10));
        assert_eq!(tokens[3].text, "Microsoft");
        assert_eq!((tokens[3].start, tokens[3].end), (15, 24));
    }

    #[test]
    fn test_tokenize_acronym_and_possessive() {
        assert_eq!(
            texts("The U.S. Food and Drug Administration approved Leone's film."),
            vec!["The", "U.S.", "Food", "and", "Drug", "Administration", "approved", "Leone's", "film", "."]
        );
    }

    #[test]
    fn test_tokenize_numbers() {
        assert_eq!(texts("It cost 1,000 dollars or 2.5 each."), vec![
            "It", "cost", "1,000", "dollars", "or", "2.5", "each", "."
        ]);
    }

    #[test]
    fn test_tokenize_trailing_hyphen_is_separate_token() {
        assert_eq!(texts("co-founder -"), vec!["co-founder", "-"]);
    }

    #[test]
    fn test_tokenize_offsets_slice_original_text() {
        let text = "One, two; three.";
        for token in tokenize(text) {
            assert_eq!(&text[token.start..token.end], token.text);
        }
    }

    #[test]
    fn test_tokenize_multibyte_offsets() {
        let text = "Visitei São Paulo.";
        let tokens = tokenize(text);
        assert_eq!(&text[tokens[1].start..tokens[1].end], "São");
    }
}
