//! # Segmentação de Sentenças
//!
//! Usa as fronteiras de sentença do Unicode (UAX #29, via `unicode-segmentation`)
//! e depois desfaz as quebras que caem logo após títulos e siglas que não
//! encerram frase ("Dr. Smith", "U.S. Food and Drug Administration").
//!
//! Cada sentença é representada por seu intervalo de bytes no texto original,
//! incluindo o espaço à direita; o texto exposto ao usuário é sempre aparado.

use unicode_segmentation::UnicodeSegmentation;

/// Abreviações após as quais a UAX #29 quebraria, mas a frase continua
const NON_TERMINAL: &[&str] = &[
    "Mr.", "Mrs.", "Ms.", "Dr.", "St.", "Mt.", "Ft.", "Prof.", "Gen.", "Gov.",
    "Sen.", "Rep.", "Capt.", "Col.", "Lt.", "Sgt.", "U.S.", "U.K.", "vs.", "No.",
];

/// Intervalo de bytes `[start, end)` de uma sentença.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceSpan {
    pub start: usize,
    pub end: usize,
}

impl SentenceSpan {
    /// Texto da sentença sem espaços nas bordas.
    pub fn trimmed<'a>(&self, text: &'a str) -> &'a str {
        text[self.start..self.end].trim()
    }

    pub fn contains(&self, byte_offset: usize) -> bool {
        self.start <= byte_offset && byte_offset < self.end
    }
}

/// Divide o texto em sentenças, cobrindo o texto inteiro sem lacunas.
pub fn split_sentences(text: &str) -> Vec<SentenceSpan> {
    let mut spans: Vec<SentenceSpan> = Vec::new();
    let mut glue_next = false;

    for (start, segment) in text.split_sentence_bound_indices() {
        let end = start + segment.len();
        match spans.last_mut() {
            Some(last) if glue_next => last.end = end,
            _ => spans.push(SentenceSpan { start, end }),
        }
        glue_next = ends_with_non_terminal(segment);
    }

    spans
}

/// Encontra a sentença que contém o offset (em bytes) informado.
pub fn sentence_at(spans: &[SentenceSpan], byte_offset: usize) -> Option<&SentenceSpan> {
    // As sentenças são contíguas e ordenadas
    let idx = spans.partition_point(|s| s.end <= byte_offset);
    spans.get(idx).filter(|s| s.contains(byte_offset))
}

fn ends_with_non_terminal(segment: &str) -> bool {
    let last_word = match segment.split_whitespace().last() {
        Some(w) => w,
        None => return false,
    };
    if NON_TERMINAL.contains(&last_word) {
        return true;
    }
    // Inicial de nome: "George R. Martin"
    let mut chars = last_word.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(c), Some('.'), None) if c.is_uppercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(text: &str) -> Vec<&str> {
        split_sentences(text).iter().map(|s| s.trimmed(text)).collect()
    }

    #[test]
    fn test_split_multiline() {
        let text = "Apple Inc. is a technology company.\n    Microsoft is their competitor.\n    Both companies are based in the United States.";
        assert_eq!(
            sentences(text),
            vec![
                "Apple Inc. is a technology company.",
                "Microsoft is their competitor.",
                "Both companies are based in the United States.",
            ]
        );
    }

    #[test]
    fn test_title_does_not_break() {
        let text = "Dr. Smith met Mr. Jones. They talked.";
        assert_eq!(sentences(text), vec!["Dr. Smith met Mr. Jones.", "They talked."]);
    }

    #[test]
    fn test_spans_cover_text() {
        let text = "One. Two! Three?";
        let spans = split_sentences(text);
        assert_eq!(spans.first().map(|s| s.start), Some(0));
        assert_eq!(spans.last().map(|s| s.end), Some(text.len()));
        for pair in spans.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn test_sentence_at() {
        let text = "First one. Second one.";
        let spans = split_sentences(text);
        let second = sentence_at(&spans, 11).map(|s| s.trimmed(text));
        assert_eq!(second, Some("Second one."));
        assert!(sentence_at(&spans, text.len()).is_none());
    }

    #[test]
    fn test_empty_text() {
        assert!(split_sentences("").is_empty());
    }
}
