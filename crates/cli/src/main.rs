use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use overview_core::checklist::DISCLAIMER;
use overview_core::{
    AnalysisDispatcher, Checklist, ContentInput, ContentStore, CriteriaSet, ExtractedContent, FetchConfig,
    GeminiBackend, GeminiConfig, ModelCatalog, ModelClient, ReadinessChecker, UsageTally, default_criteria_path,
    extract_paragraphs, fetch_content, guide,
};
use owo_colors::OwoColorize;

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit code for "not ready yet" warnings (missing key, content or topic).
const EXIT_NOT_READY: u8 = 2;

/// Check web content against AI Overview criteria with Gemini
#[derive(Parser, Debug)]
#[command(name = "overview")]
#[command(version)]
#[command(about = "Check web content against AI Overview criteria", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable progress output on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a page and print its paragraph text
    Fetch {
        /// URL to fetch, local HTML file, or "-" for stdin
        #[arg(value_name = "INPUT")]
        input: String,

        /// Print only the first 1000 characters
        #[arg(long)]
        preview: bool,

        /// Print the extraction as JSON
        #[arg(long)]
        json: bool,

        /// HTTP timeout in seconds
        #[arg(long, default_value = "10", value_name = "SECS")]
        timeout: u64,
    },
    /// Analyze content against one or more criteria
    Analyze(AnalyzeArgs),
    /// Score the AI Overview readiness checklists for a topic
    Assess {
        /// Target query or content topic
        #[arg(long)]
        topic: String,

        /// Query checklist questions answered yes, by number (1-6)
        #[arg(long, value_delimiter = ',', value_name = "N")]
        when: Vec<usize>,

        /// Content checklist questions answered yes, by number (1-5)
        #[arg(long, value_delimiter = ',', value_name = "N")]
        content: Vec<usize>,
    },
    /// List selectable models
    Models,
    /// List analysis criteria
    Criteria {
        /// Criteria JSON file replacing the built-in set
        #[arg(long, value_name = "FILE")]
        criteria: Option<PathBuf>,
    },
    /// Print the AI Overview guide and checklist questions
    Guide,
    /// Generate shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
#[group(id = "source", required = true, multiple = false)]
struct SourceArgs {
    /// Page URL to fetch
    #[arg(long)]
    url: Option<String>,

    /// Local HTML file, or "-" for stdin; paragraphs are extracted
    #[arg(long, value_name = "FILE")]
    html: Option<String>,

    /// Text analyzed exactly as given
    #[arg(long)]
    text: Option<String>,

    /// Topic or target query
    #[arg(long)]
    topic: Option<String>,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Criterion id; repeat for several (default: all)
    #[arg(short, long = "criterion", value_name = "ID")]
    criteria_ids: Vec<String>,

    /// Model id or label
    #[arg(short, long)]
    model: Option<String>,

    /// Google AI API key
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Criteria JSON file replacing the built-in set
    #[arg(long, value_name = "FILE")]
    criteria: Option<PathBuf>,

    /// Gemini API base URL
    #[arg(long, env = "OVERVIEW_GEMINI_BASE_URL", hide = true)]
    gemini_base_url: Option<String>,

    /// HTTP timeout for page fetches in seconds
    #[arg(long, default_value = "10", value_name = "SECS")]
    timeout: u64,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        echo::print_banner();
    }

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            echo::print_error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Command::Fetch { input, preview, json, timeout } => {
            let extracted = read_page(&input, &FetchConfig { timeout, ..Default::default() }, cli.verbose).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&extracted)?);
            } else if preview {
                println!("{}", overview_core::store::preview(&extracted.text, overview_core::store::PREVIEW_CHARS));
            } else {
                println!("{}", extracted.text);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Analyze(args) => analyze(args, cli.verbose).await,
        Command::Assess { topic, when, content } => assess(&topic, &when, &content),
        Command::Models => {
            let catalog = ModelCatalog::default();
            for (i, option) in catalog.options().iter().enumerate() {
                let marker = if i == 0 { " (default)".dimmed().to_string() } else { String::new() };
                println!("{:<28} {}{}", option.id.bright_white(), option.label, marker);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Criteria { criteria } => {
            for criterion in load_criteria(criteria.as_deref())?.iter() {
                println!("{:<16} {}", criterion.id.bright_white(), criterion.name);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Guide => {
            println!("{}\n", guide::INTRO);
            for section in guide::sections() {
                echo::print_guide_section(&section);
            }
            let checker = ReadinessChecker::default();
            for list in [&checker.query, &checker.content] {
                print_questions(list);
            }
            println!("{}", DISCLAIMER.dimmed());
            Ok(ExitCode::SUCCESS)
        }
        Command::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "overview", &mut io::stdout());
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Reads a page from a URL, a local file, or stdin and extracts its paragraphs.
async fn read_page(input: &str, config: &FetchConfig, verbose: bool) -> anyhow::Result<ExtractedContent> {
    let extracted = if input == "-" {
        if verbose {
            echo::print_step(1, 2, "Reading from stdin");
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).context("Failed to read from stdin")?;
        extract_paragraphs(&buffer)
    } else if input.starts_with("http://") || input.starts_with("https://") {
        if verbose {
            echo::print_step(1, 2, &format!("Fetching from {}", input.bright_white().underline()));
        }
        fetch_content(input, config).await.context("Failed to fetch URL")?
    } else {
        if verbose {
            echo::print_step(1, 2, &format!("Reading from file {}", input.bright_white()));
        }
        let html = fs::read_to_string(input).with_context(|| format!("Failed to read file: {}", input))?;
        extract_paragraphs(&html)
    };

    if verbose {
        echo::print_step(2, 2, "Extracted paragraph text");
        if let Some(title) = &extracted.title {
            eprintln!("  {} {}", "Title:".dimmed(), title.bright_white());
        }
        eprintln!("  {} {}", "Paragraphs:".dimmed(), extracted.paragraphs.to_string().bright_white());
        eprintln!("  {} {}\n", "Size:".dimmed(), echo::format_size(extracted.text.len()).bright_white());
    }
    if extracted.is_empty() {
        echo::print_warning("No paragraph text was found.");
    }
    Ok(extracted)
}

fn load_criteria(path: Option<&Path>) -> anyhow::Result<CriteriaSet> {
    let path = match path {
        Some(path) => Some(path.to_path_buf()),
        None => default_criteria_path().filter(|p| p.exists()),
    };
    match path {
        Some(path) => CriteriaSet::from_json_file(&path)
            .with_context(|| format!("Failed to load criteria from {}", path.display())),
        None => Ok(CriteriaSet::builtin()),
    }
}

async fn analyze(args: AnalyzeArgs, verbose: bool) -> anyhow::Result<ExitCode> {
    let fetch = FetchConfig { timeout: args.timeout, ..Default::default() };
    let mut store = ContentStore::new();

    let SourceArgs { url, html, text, topic } = args.source;
    if let Some(url) = url {
        if verbose {
            echo::print_step(1, 2, &format!("Fetching from {}", url.bright_white().underline()));
        }
        let outcome = fetch_content(&url, &fetch).await;
        store.record_fetch(&outcome.as_ref().map(|extracted| extracted.text.clone()));
        outcome.context("Failed to fetch URL")?;
    } else if let Some(html) = html {
        store.set(read_page(&html, &fetch, verbose).await?.text);
    } else {
        let input = match (text, topic) {
            (Some(text), _) => ContentInput::Text(text),
            (None, Some(topic)) => ContentInput::Topic(topic),
            (None, None) => bail!("No content source given"),
        };
        store.apply_direct(&input);
    }

    let catalog = ModelCatalog::default();
    let model = match &args.model {
        Some(model) => catalog.select(model)?,
        None => catalog.default_selection(),
    };

    let mut gemini = GeminiConfig::default();
    if let Some(base_url) = args.gemini_base_url {
        gemini.base_url = base_url.trim_end_matches('/').to_string();
    }
    let tally = Arc::new(UsageTally::new());
    let mut client = ModelClient::new(Arc::new(GeminiBackend::new(gemini)?)).with_hook(tally.clone());
    if let Some(key) = &args.api_key {
        client.configure(key)?;
    }

    let dispatcher = AnalysisDispatcher::new(load_criteria(args.criteria.as_deref())?);
    let ids: Vec<String> = if args.criteria_ids.is_empty() {
        dispatcher.criteria().iter().map(|c| c.id.clone()).collect()
    } else {
        args.criteria_ids
    };

    if verbose {
        echo::print_info(&format!("Using model: {} ({})", model.label(), model.id()));
    }

    let mut analyses = Vec::new();
    for id in &ids {
        match dispatcher.analyze(&client, id, store.get(), model.id()).await {
            Ok(analysis) => {
                if verbose {
                    echo::print_success(&format!("Analyzed {}", analysis.name));
                }
                analyses.push(analysis);
            }
            Err(e) if e.is_warning() => {
                echo::print_warning(&e.to_string());
                return Ok(ExitCode::from(EXIT_NOT_READY));
            }
            Err(e) => return Err(e.into()),
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analyses)?);
    } else {
        analyses.iter().for_each(echo::print_analysis);
    }

    if verbose {
        let usage = tally.snapshot();
        echo::print_info(&format!(
            "{} call(s), {} prompt tokens, {} output tokens",
            usage.calls, usage.prompt_tokens, usage.output_tokens
        ));
    }
    Ok(ExitCode::SUCCESS)
}

fn assess(topic: &str, when: &[usize], content: &[usize]) -> anyhow::Result<ExitCode> {
    let checker = ReadinessChecker::default();
    let query = checker.query.answers_from_flags(&flags(&checker.query, when)?);
    let content = checker.content.answers_from_flags(&flags(&checker.content, content)?);

    let assessment = match checker.assess(topic, &query, &content) {
        Ok(assessment) => assessment,
        Err(e) => {
            echo::print_warning(&e.to_string());
            return Ok(ExitCode::from(EXIT_NOT_READY));
        }
    };

    echo::print_checklist(&assessment.query);
    echo::print_checklist(&assessment.content);
    println!("{}", assessment.disclaimer.dimmed());
    Ok(ExitCode::SUCCESS)
}

/// Turns 1-based question numbers into positional flags.
fn flags(list: &Checklist, numbers: &[usize]) -> anyhow::Result<Vec<bool>> {
    let mut flags = vec![false; list.questions.len()];
    for &n in numbers {
        match n.checked_sub(1).and_then(|i| flags.get_mut(i)) {
            Some(flag) => *flag = true,
            None => bail!("Question {} does not exist in \"{}\" (1-{})", n, list.title, list.questions.len()),
        }
    }
    Ok(flags)
}

fn print_questions(list: &Checklist) {
    println!("{}", list.title.bold());
    for (i, question) in list.questions.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, question.text);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_from_numbers() {
        let list = Checklist::content_characteristics();
        assert_eq!(flags(&list, &[1, 3]).unwrap(), vec![true, false, true, false, false]);
        assert!(flags(&list, &[0]).is_err());
        assert!(flags(&list, &[6]).is_err());
    }
}
