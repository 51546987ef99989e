//! Document cache commands

use clap::{Args, Subcommand};
use kbkit_core::config::KbConfig;
use kbkit_core::{
    logger, Blob, BlobParser, ConsoleOutput, Document, DocumentCache, DocumentCacheParserFactory,
    Factory, FsDocumentCache, TableOptions,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheCommand,
}

#[derive(Debug, Subcommand)]
pub enum CacheCommand {
    /// Cache a text file as a document
    Put(PutArgs),
    /// Print the document cached at a path
    Show(ShowArgs),
    /// Tabulate every cached document
    List(ListArgs),
}

#[derive(Debug, Args)]
pub struct PutArgs {
    pub file: PathBuf,

    /// Cache root (overrides configuration)
    #[arg(long)]
    pub root: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Cache entry, absolute or relative to the cache root
    pub path: PathBuf,

    #[arg(long)]
    pub root: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub root: Option<PathBuf>,
}

pub fn execute(args: CacheArgs, config: &KbConfig) -> Result<(), Box<dyn std::error::Error>> {
    let output = ConsoleOutput::from_config(logger!(), &config.output);

    match args.command {
        CacheCommand::Put(put) => execute_put(put, config, &output),
        CacheCommand::Show(show) => execute_show(show, config, &output),
        CacheCommand::List(list) => execute_list(list, config, &output),
    }
}

fn open_cache(root: Option<PathBuf>, config: &KbConfig) -> FsDocumentCache {
    FsDocumentCache::new(root.unwrap_or_else(|| config.cache.root.clone()))
}

fn build_parser(cache: &FsDocumentCache) -> kbkit_core::Result<Box<dyn BlobParser>> {
    let shared: Arc<dyn DocumentCache> = Arc::new(cache.clone());
    DocumentCacheParserFactory::new(shared).build(&())
}

fn execute_put(
    args: PutArgs,
    config: &KbConfig,
    output: &ConsoleOutput,
) -> Result<(), Box<dyn std::error::Error>> {
    let cache = open_cache(args.root, config);
    let text = std::fs::read_to_string(&args.file)
        .map_err(|e| format!("Cannot read {}: {}", args.file.display(), e))?;

    let document = Document::new(text).with_source(args.file.display().to_string());
    output.verbose_print(format_args!(
        "Caching {} ({} chars)",
        args.file.display(),
        document.page_content.chars().count()
    ));

    let path = cache.store(&document)?;
    println!("{}", path.display());
    Ok(())
}

fn execute_show(
    args: ShowArgs,
    config: &KbConfig,
    output: &ConsoleOutput,
) -> Result<(), Box<dyn std::error::Error>> {
    let cache = open_cache(args.root, config);
    let parser = build_parser(&cache)?;

    for document in parser.lazy_parse(&Blob::from_path(&args.path)) {
        let document = document?;
        if let Some(source) = document.source() {
            output.verbose_print(format_args!("source: {}", source));
        }
        println!("{}", document.page_content);
    }
    Ok(())
}

fn execute_list(
    args: ListArgs,
    config: &KbConfig,
    output: &ConsoleOutput,
) -> Result<(), Box<dyn std::error::Error>> {
    let cache = open_cache(args.root, config);
    let parser = build_parser(&cache)?;

    let documents = output.try_status("Loading cached documents", || {
        let mut documents = Vec::new();
        for blob in cache.blobs()? {
            documents.extend(parser.parse(&blob)?);
        }
        Ok::<_, kbkit_core::KbError>(documents)
    })?;

    output.print_table(
        &documents,
        &["#", "source", "chars"],
        |index, document| {
            vec![
                index.to_string(),
                document.source().unwrap_or("-").to_string(),
                document.page_content.chars().count().to_string(),
            ]
        },
        &TableOptions::default().with_title(format!("Cache {}", cache.root().display())),
    );
    output.print(format_args!("{} cached documents", documents.len()));
    Ok(())
}
