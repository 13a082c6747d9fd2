//! # nergrep-core: Extração e Filtragem de Entidades Nomeadas
//!
//! Este crate extrai entidades nomeadas de texto livre em inglês e as filtra
//! por um conjunto configurável de critérios (tipo, blacklist/whitelist,
//! similaridade aproximada, regex, substring, comprimento).
//!
//! ## Arquitetura do Sistema
//!
//! O dado flui por um pipeline linear em lote:
//!
//! 1.  **Entrada**: Texto bruto (String).
//! 2.  **Extração** ([`pipeline`]): tokenização ([`tokenizer`]), sentenças
//!     ([`sentence`]), padrões literais ([`phrase`]) e o modelo de regras
//!     ([`model`], [`rule_based`], [`gazetteer`]) produzem uma lista de
//!     [`EntityOccurrence`].
//! 3.  **Filtragem** ([`filter`]): estágios independentes aplicados em ordem fixa.
//! 4.  **Ordenação** ([`sort`]) e **formatação** ([`format`]): texto, JSON ou CSV.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use nergrep_core::{filter_all, EntityRecognizer, FilterCriteria, NerPipeline};
//!
//! // 1. Instancia o pipeline sobre o modelo compartilhado
//! let pipeline = NerPipeline::shared().unwrap();
//!
//! // 2. Extrai as entidades
//! let text = "Apple Inc. and Microsoft are tech companies.";
//! let entities = pipeline.extract(text, None);
//!
//! // 3. Mantém apenas organizações, exceto Microsoft
//! let criteria = FilterCriteria::default()
//!     .with_types(["ORG"])
//!     .with_blacklist(["Microsoft"]);
//! let kept = filter_all(entities, &criteria);
//!
//! assert_eq!(kept.len(), 1);
//! assert_eq!(kept[0].text, "Apple Inc.");
//! ```

pub mod entity;
pub mod error;
pub mod filter;
pub mod format;
pub mod fuzzy;
pub mod gazetteer;
pub mod model;
pub mod phrase;
pub mod pipeline;
pub mod rule_based;
pub mod sentence;
pub mod sort;
pub mod tagger;
pub mod tokenizer;

pub use entity::EntityOccurrence;
pub use error::{NerError, Result};
pub use filter::{filter_all, FilterCriteria, FilterStage};
pub use format::{render, OutputFormat};
pub use model::NerModel;
pub use phrase::{PhraseMatcher, PhrasePattern};
pub use pipeline::{EntityRecognizer, NerPipeline, OverlapPolicy};
pub use sort::{sort_entities, SortKey};
pub use tagger::{EntitySpan, Tag, TaggedToken};
pub use tokenizer::Token;
