//! # Formatação de Saída
//!
//! Três formatos, todos com a inclusão da sentença como opção independente:
//!
//! - **text**: `Apple Inc. (ORG) in: <sentença>` ou `Apple Inc. (ORG)`
//! - **json**: array de objetos `{text, label, sentence, start, end}`;
//!   sem sentença, `sentence` vira `""` (o campo não some)
//! - **csv**: cabeçalho e uma linha por entidade, campos de texto entre aspas;
//!   sem sentença, a coluna `sentence` sai do cabeçalho e das linhas

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entity::EntityOccurrence;
use crate::error::{NerError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        };
        f.write_str(name)
    }
}

impl FromStr for OutputFormat {
    type Err = NerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(NerError::InvalidOption(format!("formato de saída '{}'", other))),
        }
    }
}

/// Registro JSON de uma entidade
#[derive(Serialize)]
struct JsonRecord<'a> {
    text: &'a str,
    label: &'a str,
    sentence: &'a str,
    start: usize,
    end: usize,
}

/// Renderiza as entidades no formato pedido. Texto e CSV terminam com `\n`
/// por linha; lista vazia em texto produz string vazia.
pub fn render(entities: &[EntityOccurrence], format: OutputFormat, include_sentence: bool) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(entities, include_sentence)),
        OutputFormat::Json => render_json(entities, include_sentence),
        OutputFormat::Csv => Ok(render_csv(entities, include_sentence)),
    }
}

fn render_text(entities: &[EntityOccurrence], include_sentence: bool) -> String {
    let mut out = String::new();
    for e in entities {
        if include_sentence {
            out.push_str(&format!("{} ({}) in: {}\n", e.text, e.label, e.sentence));
        } else {
            out.push_str(&format!("{} ({})\n", e.text, e.label));
        }
    }
    out
}

fn render_json(entities: &[EntityOccurrence], include_sentence: bool) -> Result<String> {
    let records: Vec<JsonRecord> = entities
        .iter()
        .map(|e| JsonRecord {
            text: &e.text,
            label: &e.label,
            sentence: if include_sentence { e.sentence.as_str() } else { "" },
            start: e.start,
            end: e.end,
        })
        .collect();
    let mut out = serde_json::to_string_pretty(&records)?;
    out.push('\n');
    Ok(out)
}

fn render_csv(entities: &[EntityOccurrence], include_sentence: bool) -> String {
    let mut out = String::new();
    if include_sentence {
        out.push_str("text,label,sentence,start,end\n");
    } else {
        out.push_str("text,label,start,end\n");
    }
    for e in entities {
        let mut fields = vec![quote(&e.text), quote(&e.label)];
        if include_sentence {
            fields.push(quote(&e.sentence));
        }
        fields.push(e.start.to_string());
        fields.push(e.end.to_string());
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

/// Campo CSV entre aspas, com aspas internas duplicadas
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
