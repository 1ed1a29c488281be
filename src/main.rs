use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use testscout::catalog::{
    framework_profile, is_code_file, language_profile, test_file_name,
    validate_framework_choice, FrameworkLabel, Language,
};
use testscout::config::Config;
use testscout::detect::{
    classify_framework_or_degrade, classify_targets, RepoSignals, TargetClassification,
};
use testscout::suggest::prompts::{build_messages, FileExcerpt};
use testscout::suggest::SuggestionExtractor;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(
    name = "testscout",
    about = "Detect test frameworks and extract test-case suggestions from model output",
    version
)]
struct Args {
    /// Log decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pick the test framework for one or more target files
    Classify {
        /// Files to classify (repository-relative)
        #[arg(required = true)]
        targets: Vec<String>,

        /// Newline-separated repository listing ("-" for stdin)
        #[arg(long, conflicts_with = "repo")]
        files_from: Option<PathBuf>,

        /// Walk a local checkout to build the listing
        #[arg(long)]
        repo: Option<PathBuf>,

        /// Print the deciding rule and evidence as JSON
        #[arg(long)]
        explain: bool,

        /// Print target and framework pairs as JSON
        #[arg(long)]
        json: bool,
    },

    /// Turn model output into numbered test-case suggestions (JSON)
    Suggest {
        /// Framework label; inferred from --file when omitted
        #[arg(short, long)]
        framework: Option<String>,

        /// Representative source file named in fallback suggestions
        #[arg(long)]
        file: Option<String>,

        /// File holding the model text (stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Reject a framework that does not fit the file type
        #[arg(long)]
        validate: bool,
    },

    /// Show language, default and available frameworks for a file (JSON)
    Frameworks {
        file: String,
    },

    /// Print the model messages that would request suggestions for local files
    Prompt {
        #[arg(short, long)]
        framework: Option<String>,

        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Show the config location and effective values
    Config {
        /// Write the effective config to disk
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    let config = Config::load();

    match args.command {
        Command::Classify {
            targets,
            files_from,
            repo,
            explain,
            json,
        } => run_classify(&targets, files_from.as_deref(), repo.as_deref(), explain, json),
        Command::Suggest {
            framework,
            file,
            input,
            validate,
        } => run_suggest(&config, framework.as_deref(), file, input.as_deref(), validate),
        Command::Frameworks { file } => run_frameworks(&config, &file),
        Command::Prompt { framework, files } => run_prompt(&config, framework.as_deref(), &files),
        Command::Config { init } => run_config(&config, init),
    }
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "testscout=debug" } else { "testscout=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_framework(raw: Option<&str>) -> Result<Option<FrameworkLabel>> {
    raw.map(|s| s.parse::<FrameworkLabel>())
        .transpose()
        .map_err(anyhow::Error::from)
}

fn run_classify(
    targets: &[String],
    files_from: Option<&Path>,
    repo: Option<&Path>,
    explain: bool,
    json: bool,
) -> Result<()> {
    let results: Vec<TargetClassification> = match load_listing(files_from, repo) {
        Ok(files) => {
            let signals = RepoSignals::scan(&files);
            classify_targets(&signals, targets)
        }
        Err(err) => {
            let reason = format!("{:#}", err);
            targets
                .iter()
                .map(|target| TargetClassification {
                    target: target.clone(),
                    classification: classify_framework_or_degrade(
                        Err::<Vec<String>, _>(&reason),
                        target,
                    ),
                })
                .collect()
        }
    };

    if explain {
        return print_json(&results);
    }
    if json {
        return print_json(&framework_rows(&results));
    }

    if let [only] = results.as_slice() {
        println!("{}", only.classification.framework);
    } else {
        for result in &results {
            println!("{}\t{}", result.target, result.classification.framework);
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct TargetFramework<'a> {
    target: &'a str,
    framework: FrameworkLabel,
}

fn framework_rows(results: &[TargetClassification]) -> Vec<TargetFramework<'_>> {
    results
        .iter()
        .map(|r| TargetFramework {
            target: &r.target,
            framework: r.classification.framework,
        })
        .collect()
}

/// Repository listing from a file, stdin or a local checkout. Empty when no source is given.
fn load_listing(files_from: Option<&Path>, repo: Option<&Path>) -> Result<Vec<String>> {
    if let Some(root) = repo {
        return walk_repo(root);
    }

    let Some(source) = files_from else {
        return Ok(Vec::new());
    };

    let content = if source == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read listing from stdin")?;
        buf
    } else {
        fs::read_to_string(source)
            .with_context(|| format!("Failed to read listing {}", source.display()))?
    };

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn walk_repo(root: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.file_name() != ".git")
    {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if entry.file_type().is_file() {
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            files.push(relative.to_string_lossy().replace('\\', "/"));
        }
    }
    Ok(files)
}

fn run_suggest(
    config: &Config,
    framework: Option<&str>,
    file: Option<String>,
    input: Option<&Path>,
    validate: bool,
) -> Result<()> {
    let framework = parse_framework(framework)?;

    if let (true, Some(fw), Some(path)) = (validate, framework, file.as_deref()) {
        validate_framework_choice(path, fw)?;
    }

    let model_text = match input {
        Some(path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read model text {}", path.display()))?,
        ),
        None if !io::stdin().is_terminal() => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read model text from stdin")?;
            Some(buf)
        }
        None => None,
    };

    let file = file.unwrap_or_else(|| config.fallback_file_placeholder.clone());
    let extractor = SuggestionExtractor::new(config.parse_options());
    let suggestions = extractor.extract(model_text.as_deref(), framework, Some(&file));

    let resolved = suggestions
        .first()
        .map(|s| s.framework)
        .unwrap_or(FrameworkLabel::Pytest);

    print_json(&json!({
        "framework": resolved,
        "suggestions": suggestions,
    }))
}

fn run_frameworks(config: &Config, file: &str) -> Result<()> {
    let profile = language_profile(file);
    let details: BTreeMap<_, _> = profile
        .available_frameworks
        .iter()
        .map(|fw| (fw.as_str(), framework_profile(*fw)))
        .collect();

    print_json(&json!({
        "file_path": file,
        "language": profile.language,
        "default_framework": profile.default_framework,
        "available_frameworks": profile.available_frameworks,
        "code_file": is_code_file(file, &config.excluded_patterns),
        "test_file_name": test_file_name(file, profile.default_framework),
        "framework_details": details,
    }))
}

fn run_prompt(config: &Config, framework: Option<&str>, files: &[PathBuf]) -> Result<()> {
    let mut sources = Vec::with_capacity(files.len());
    for path in files {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        sources.push((path.to_string_lossy().replace('\\', "/"), content));
    }

    let framework = match parse_framework(framework)? {
        Some(fw) => fw,
        None => sources
            .first()
            .map(|(path, _)| Language::from_path(path).default_framework())
            .unwrap_or(FrameworkLabel::Generic),
    };

    let excerpts: Vec<FileExcerpt> = sources
        .iter()
        .map(|(path, content)| FileExcerpt {
            path: path.as_str(),
            content: content.as_str(),
        })
        .collect();

    print_json(&build_messages(framework, &excerpts, config.max_prompt_tokens))
}

fn run_config(config: &Config, init: bool) -> Result<()> {
    if init {
        let path = config.save()?;
        eprintln!("  + Config written to {}", path.display());
    }
    eprintln!("  Config: {}", Config::config_location());
    print_json(config)
}
