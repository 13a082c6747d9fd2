//! # Esquema de Tags BIO e Tipos de Entidade
//!
//! Define o esquema de anotação **BIO** (Beginning-Inside-Outside) usado pelo
//! reconhecedor embutido para rotular tokens, e a conversão das tags em spans.
//!
//! ## Categorias de Entidades
//!
//! | Rótulo  | Significado                     | Exemplos                        |
//! |---------|---------------------------------|---------------------------------|
//! | PERSON  | Pessoa                          | Guido van Rossum, Elon Musk     |
//! | ORG     | Organização                     | Microsoft Corporation, NASA     |
//! | GPE     | País, estado, cidade            | Florida, Netherlands, Athens    |
//! | LOC     | Local não político              | Europe, Mount Everest           |
//! | NORP    | Nacionalidade, grupo            | British, American               |
//! | DATE    | Data ou período                 | 1991, the 1970s, the 5th century|
//!
//! ## Esquema BIO
//!
//! - `B-TAG`: Begin: primeiro token de uma entidade
//! - `I-TAG`: Inside: tokens subsequentes da mesma entidade
//! - `O`: Outside: não é parte de nenhuma entidade

use serde::{Deserialize, Serialize};

use crate::tokenizer::Token;

/// Rótulos emitidos pelo reconhecedor embutido.
///
/// As ocorrências carregam o rótulo como `String` (vocabulário aberto); este
/// enum existe apenas para o motor de regras não errar a grafia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityLabel {
    Person,
    Org,
    Gpe,
    Loc,
    Norp,
    Date,
}

impl EntityLabel {
    /// Nome do rótulo como aparece na saída (ex: "PERSON")
    pub fn name(&self) -> &'static str {
        match self {
            EntityLabel::Person => "PERSON",
            EntityLabel::Org => "ORG",
            EntityLabel::Gpe => "GPE",
            EntityLabel::Loc => "LOC",
            EntityLabel::Norp => "NORP",
            EntityLabel::Date => "DATE",
        }
    }
}

/// Tag BIO aplicada a um token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tag {
    /// **Begin**: INÍCIO de uma entidade. Ex: **New** (B-GPE) York.
    Begin(EntityLabel),
    /// **Inside**: CONTINUAÇÃO de uma entidade. Ex: New **York** (I-GPE).
    Inside(EntityLabel),
    /// **Outside**: o token não faz parte de nenhuma entidade.
    Outside,
}

/// Um token com sua tag BIO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggedToken {
    pub token: Token,
    pub tag: Tag,
}

/// Uma entidade identificada no texto (span de um ou mais tokens)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpan {
    /// Texto da entidade recortado do original (ex: "New York")
    pub text: String,
    pub label: EntityLabel,
    /// Posição de byte inicial no texto original
    pub start: usize,
    /// Posição de byte final no texto original
    pub end: usize,
}

/// Converte uma sequência de tokens classificados (BIO) em spans de entidades.
///
/// - Inicia uma nova entidade ao encontrar `B-XXX`.
/// - Continua a entidade enquanto encontrar `I-XXX` da **mesma** categoria.
/// - Finaliza a entidade ao encontrar `O`, `B-YYY` ou `I-YYY` (de outra categoria).
///
/// `[B-PERSON, I-PERSON, O, B-GPE]` -> `[EntitySpan(PERSON), EntitySpan(GPE)]`
pub fn tokens_to_spans(tagged: &[TaggedToken], original_text: &str) -> Vec<EntitySpan> {
    let mut spans = Vec::new();
    let mut i = 0;

    while i < tagged.len() {
        if let Tag::Begin(label) = tagged[i].tag {
            let start_byte = tagged[i].token.start;
            let mut end_byte = tagged[i].token.end;

            // Acumula tokens I-XXX consecutivos da mesma categoria
            let mut j = i + 1;
            while j < tagged.len() {
                if tagged[j].tag == Tag::Inside(label) {
                    end_byte = tagged[j].token.end;
                    j += 1;
                    continue;
                }
                break;
            }

            spans.push(EntitySpan {
                text: original_text[start_byte..end_byte].to_string(),
                label,
                start: start_byte,
                end: end_byte,
            });

            i = j;
        } else {
            i += 1;
        }
    }

    spans
}
