//! `invidx`: build and query inverted indexes from the command line.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use inverted_index::{
    clear_output, run, Formatter, IndexConfig, IndexReader, OutputFormat, Tokenizer,
};

#[derive(Parser)]
#[command(name = "invidx", version, about = "Build inverted indexes over document corpora")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index a corpus and write the result to a new output directory
    Build(BuildArgs),
    /// Print posting lists for words from a written index
    Lookup {
        /// Index output directory
        #[arg(long)]
        index: PathBuf,
        /// Words to look up (normalized like corpus text)
        #[arg(required = true)]
        words: Vec<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        #[arg(long, default_value = "\t")]
        separator: String,
    },
    /// Delete an output location so it can be rebuilt
    Clear {
        output: PathBuf,
    },
}

#[derive(Args)]
struct BuildArgs {
    /// TOML config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Corpus file or directory of `(documentId, text)` lines
    #[arg(long)]
    input: Option<PathBuf>,
    /// Output directory (must not exist)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Additional stop-word list, one word per line
    #[arg(long)]
    stop_words: Option<PathBuf>,
    /// Do not use the built-in English stop words
    #[arg(long)]
    no_builtin_stop_words: bool,
    /// Delete the output location first if it exists
    #[arg(long)]
    clear_output: bool,
    #[arg(long)]
    partitions: Option<usize>,
    #[arg(long)]
    shards: Option<usize>,
    /// Worker threads (0 = one per core)
    #[arg(long)]
    threads: Option<usize>,
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
    #[arg(long)]
    separator: Option<String>,
    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

impl BuildArgs {
    fn into_config(self) -> anyhow::Result<(IndexConfig, bool)> {
        let mut config = match &self.config {
            Some(path) => IndexConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => IndexConfig::default(),
        };
        if self.input.is_some() {
            config.input = self.input;
        }
        if self.output.is_some() {
            config.output = self.output;
        }
        if self.stop_words.is_some() {
            config.stop_words_file = self.stop_words;
        }
        if self.no_builtin_stop_words {
            config.builtin_stop_words = false;
        }
        if self.clear_output {
            config.clear_output = true;
        }
        if let Some(partitions) = self.partitions {
            config.partitions = partitions;
        }
        if let Some(shards) = self.shards {
            config.shards = shards;
        }
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(separator) = self.separator {
            config.separator = separator;
        }
        Ok((config, self.json))
    }
}

fn cmd_build(args: BuildArgs) -> anyhow::Result<()> {
    let (config, json) = args.into_config()?;
    let summary = run(&config).context("indexing run failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let report = &summary.report;
        println!("Output:         {}", summary.output.display());
        println!("Part files:     {}", summary.parts);
        println!("Documents:      {}", report.documents);
        println!("Malformed:      {}", report.malformed_lines);
        println!("Tokens seen:    {}", report.tokens_seen);
        println!("Tokens dropped: {}", report.tokens_dropped);
        println!("Count entries:  {}", report.count_entries);
        println!("Words:          {}", report.words);
    }
    Ok(())
}

fn cmd_lookup(
    index: PathBuf,
    words: Vec<String>,
    format: OutputFormat,
    separator: String,
) -> anyhow::Result<()> {
    let formatter = Formatter::new(format, separator);
    let idx = IndexReader::new(formatter.clone())
        .read(&index)
        .with_context(|| format!("reading index {}", index.display()))?;

    let tokenizer = Tokenizer::new();
    for query in &words {
        let tokens = tokenizer.tokenize(query);
        for word in tokens.iter() {
            match idx.posting(word) {
                Some(entry) => println!("{}", formatter.format(entry)?),
                None => eprintln!("{}: not indexed", word),
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Build(args) => cmd_build(args),
        Commands::Lookup {
            index,
            words,
            format,
            separator,
        } => cmd_lookup(index, words, format, separator),
        Commands::Clear { output } => clear_output(&output)
            .map(|removed| {
                if removed {
                    println!("Cleared {}", output.display());
                } else {
                    println!("Nothing at {}", output.display());
                }
            })
            .map_err(anyhow::Error::from),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
