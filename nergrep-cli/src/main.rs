//! `nergrep`: extrai entidades nomeadas de um arquivo de texto e as filtra.

mod config;
mod error;
mod logging;

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use nergrep_core::{
    filter_all, render, sort_entities, EntityRecognizer, NerModel, NerPipeline, OutputFormat, OverlapPolicy,
    PhraseMatcher, SortKey,
};
use tracing::{debug, info};

use config::CriteriaOverrides;
use error::CliError;

/// Extrai entidades nomeadas de texto, com filtros opcionais
#[derive(Parser, Debug)]
#[command(name = "nergrep", author, version, about, long_about = None)]
struct Args {
    /// Arquivo de texto de entrada (`-` para stdin)
    input: PathBuf,

    /// Tipos de entidade permitidos, separados por vírgula (ex: PERSON,ORG,GPE)
    #[arg(short, long)]
    types: Option<String>,

    /// Padrão de busca aproximada
    #[arg(short, long)]
    fuzzy: Option<String>,

    /// Similaridade mínima da busca aproximada (0-100, padrão 80)
    #[arg(long)]
    threshold: Option<f64>,

    /// Arquivo com termos a excluir, um por linha
    #[arg(short, long)]
    blacklist: Option<PathBuf>,

    /// Arquivo com os únicos termos permitidos, um por linha
    #[arg(short, long)]
    whitelist: Option<PathBuf>,

    /// Expressão regular aplicada ao texto da entidade
    #[arg(short, long)]
    regex: Option<String>,

    /// Palavra que deve aparecer no texto da entidade
    #[arg(short, long)]
    partial: Option<String>,

    /// Comprimento mínimo do texto da entidade
    #[arg(long)]
    min_length: Option<usize>,

    /// Comprimento máximo do texto da entidade
    #[arg(long)]
    max_length: Option<usize>,

    /// Formato de saída: text, json ou csv
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Omite a sentença de contexto
    #[arg(long)]
    no_sentence: bool,

    /// Ordena por: text, label, position, length ou frequency
    #[arg(short, long)]
    sort: Option<SortKey>,

    /// Critérios de filtragem em JSON; as flags têm precedência
    #[arg(long)]
    config: Option<PathBuf>,

    /// Gazetteer JSON que substitui as listas embutidas
    #[arg(long)]
    gazetteer: Option<PathBuf>,

    /// Padrões literais adicionais (`frase` ou `RÓTULO<TAB>frase` por linha)
    #[arg(long)]
    patterns: Option<PathBuf>,

    /// Sobreposição entre padrões e modelo: keep-both ou prefer-custom
    #[arg(long, default_value = "keep-both")]
    overlap: OverlapPolicy,
}

fn main() {
    logging::setup_logging();

    let args = Args::parse();
    if let Err(e) = run(args) {
        debug!("Erro: {:?}", e);
        eprintln!("nergrep: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    debug!("Argumentos: {:?}", args);

    // 1. Entrada e listas
    let text = config::read_input(&args.input)?;
    let entity_types = args.types.as_deref().and_then(config::parse_types);
    let overrides = CriteriaOverrides {
        entity_types: entity_types.clone(),
        blacklist: args.blacklist.as_deref().map(config::read_terms).transpose()?,
        whitelist: args.whitelist.as_deref().map(config::read_terms).transpose()?,
        fuzzy_match: args.fuzzy.clone(),
        fuzzy_threshold: args.threshold,
        regex_pattern: args.regex.clone(),
        partial_word: args.partial.clone(),
        min_length: args.min_length,
        max_length: args.max_length,
    };
    let criteria = overrides.apply(config::load_criteria(args.config.as_deref())?);
    criteria.validate()?;

    // 2. Modelo e pipeline
    let model = match &args.gazetteer {
        Some(path) => Arc::new(NerModel::load(path)?),
        None => NerModel::shared()?,
    };
    let mut phrases = PhraseMatcher::builtin();
    if let Some(path) = &args.patterns {
        phrases.extend(config::read_patterns(path)?);
    }
    let pipeline = NerPipeline::new(model)
        .with_phrases(phrases)
        .with_overlap_policy(args.overlap);

    // 3. Extração, filtros e ordenação
    let entities = pipeline.extract(&text, entity_types.as_ref());
    let extracted = entities.len();
    let mut entities = filter_all(entities, &criteria);
    info!("{} entidades extraídas, {} após os filtros", extracted, entities.len());

    if let Some(key) = args.sort {
        sort_entities(&mut entities, key);
    }

    // 4. Saída
    let rendered = render(&entities, args.format, !args.no_sentence)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes()).map_err(CliError::Output)?;
    stdout.flush().map_err(CliError::Output)?;

    Ok(())
}
