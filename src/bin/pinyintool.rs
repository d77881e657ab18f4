use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use pinyin_transform::expand::Expander;
use pinyin_transform::filter::{FilterConfig, OutputKind, PinyinTransformFilter};
use pinyin_transform::romanize::{LayeredRomanizer, PinyinRomanizer, Romanizer, TableRomanizer};
use pinyin_transform::settings::{self, Settings};
use pinyin_transform::token::Token;
use pinyin_transform::tokenizer::{LineTokenizer, WhitespaceTokenizer};
use pinyin_transform::trace_init;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

#[derive(Parser)]
#[command(name = "pinyintool", about = "Pinyin token filter diagnostics")]
struct Cli {
    /// Log filter decisions to stderr (needs the `trace` feature)
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Write JSON-lines logs to this directory instead of stderr (needs the `trace` feature)
    #[arg(long, global = true)]
    trace_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run whitespace-separated text through the filter
    Analyze {
        /// Text to analyze (reads stdin line by line if omitted)
        text: Option<String>,
        /// Path to a settings TOML file (optional)
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Path to a reading table TOML that overrides the built-in data (optional)
        #[arg(long)]
        table: Option<PathBuf>,
        /// pinyin, abbreviation or both
        #[arg(long)]
        output: Option<OutputKind>,
        /// Minimum number of Chinese characters to expand
        #[arg(long)]
        min_length: Option<usize>,
        /// Polyphone branch cap (0 = unlimited)
        #[arg(long)]
        max_branches: Option<usize>,
        /// Do not emit the original tokens
        #[arg(long)]
        no_original: bool,
        /// Output JSON lines instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show every full form and abbreviation of a word
    Expand {
        word: String,
        /// Path to a settings TOML file (optional)
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Path to a reading table TOML that overrides the built-in data (optional)
        #[arg(long)]
        table: Option<PathBuf>,
        /// Polyphone branch cap (0 = unlimited)
        #[arg(long)]
        max_branches: Option<usize>,
    },

    /// Print the default settings TOML
    SettingsExport,

    /// Check a settings TOML file
    SettingsValidate { file: PathBuf },

    /// Check a reading table TOML file
    TableValidate { file: PathBuf },
}

fn load_settings(path: Option<&Path>) -> Settings {
    match path {
        Some(p) => die!(Settings::open(p), "Failed to load settings from {}: {}", p.display()),
        None => Settings::default(),
    }
}

fn build_romanizer(settings: &Settings, table: Option<&Path>) -> Arc<dyn Romanizer> {
    let pinyin = PinyinRomanizer::new(settings.format);
    match table {
        Some(p) => {
            let table = die!(
                TableRomanizer::open(p),
                "Failed to load reading table {}: {}",
                p.display()
            );
            let layers: Vec<Arc<dyn Romanizer>> = vec![Arc::new(table), Arc::new(pinyin)];
            Arc::new(LayeredRomanizer::new(layers))
        }
        None => Arc::new(pinyin),
    }
}

fn write_token(out: &mut impl Write, token: &Token, json: bool) -> io::Result<()> {
    if json {
        let line = serde_json::to_string(token).map_err(io::Error::other)?;
        writeln!(out, "{line}")
    } else {
        writeln!(
            out,
            "{}\t+{}\t{}..{}\t{}",
            token.text, token.position_increment, token.start_offset, token.end_offset, token.token_type
        )
    }
}

fn run_analyze(
    input: Box<dyn Iterator<Item = io::Result<Token>>>,
    romanizer: Arc<dyn Romanizer>,
    config: FilterConfig,
    json: bool,
) {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for token in PinyinTransformFilter::new(input, romanizer, config) {
        let token = die!(token, "Failed to read input: {}");
        die!(write_token(&mut out, &token, json), "Failed to write: {}");
    }
    die!(out.flush(), "Failed to write: {}");
}

fn init_logging(verbose: bool, trace_dir: Option<&Path>) {
    if !verbose && trace_dir.is_none() {
        return;
    }
    let installed = match trace_dir {
        Some(dir) => trace_init::init_tracing(dir),
        None => trace_init::init_stderr_tracing(),
    };
    if !installed {
        eprintln!("Logging not enabled: built without the `trace` feature");
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.trace_dir.as_deref());

    match cli.command {
        Command::Analyze {
            text,
            settings,
            table,
            output,
            min_length,
            max_branches,
            no_original,
            json,
        } => {
            let s = load_settings(settings.as_deref());
            let romanizer = build_romanizer(&s, table.as_deref());

            let mut config = s.filter;
            if let Some(output) = output {
                config = config.with_output(output);
            }
            if let Some(n) = min_length {
                config = config.with_min_term_length(n);
            }
            if let Some(n) = max_branches {
                config = config.with_max_polyphone_branches(n);
            }
            if no_original {
                config = config.with_emit_original(false);
            }

            let input: Box<dyn Iterator<Item = io::Result<Token>>> = match text {
                Some(text) => {
                    let tokens: Vec<io::Result<Token>> =
                        WhitespaceTokenizer::new(&text).map(Ok).collect();
                    Box::new(tokens.into_iter())
                }
                None => Box::new(LineTokenizer::new(io::stdin().lock())),
            };
            run_analyze(input, romanizer, config, json);
        }

        Command::Expand {
            word,
            settings,
            table,
            max_branches,
        } => {
            let s = load_settings(settings.as_deref());
            let romanizer = build_romanizer(&s, table.as_deref());
            let cap = max_branches.unwrap_or(s.filter.max_polyphone_branches);
            let expander = Expander::new(romanizer.as_ref(), cap);

            let full = die!(expander.full(&word), "Failed to expand {word}: {}");
            let abbreviations = die!(expander.abbreviations(&word), "Failed to expand {word}: {}");

            println!("=== Full ({}) ===", full.len());
            for f in &full {
                println!("  {f}");
            }
            println!("=== Abbreviation ({}) ===", abbreviations.len());
            for a in &abbreviations {
                println!("  {a}");
            }
        }

        Command::SettingsExport => {
            print!("{}", settings::default_toml());
        }

        Command::SettingsValidate { file } => {
            let s = die!(Settings::open(&file), "Error: {}");
            if let Err(e) = s.format.validate() {
                eprintln!("Warning: {e}; every lookup will fail and no pinyin will be emitted");
            }
            println!(
                "OK: filter.output={:?}, filter.min_term_length={}, filter.max_polyphone_branches={}",
                s.filter.output, s.filter.min_term_length, s.filter.max_polyphone_branches
            );
        }

        Command::TableValidate { file } => {
            let content = die!(fs::read_to_string(&file), "Error reading {}: {}", file.display());
            let map = die!(pinyin_transform::romanize::parse_table_toml(&content), "Error: {}");
            let polyphones = map.values().filter(|r| r.len() > 1).count();
            println!("OK: {} characters, {} polyphones", map.len(), polyphones);
        }
    }
}
