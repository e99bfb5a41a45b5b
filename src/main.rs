//! Domain Pilot - AI-assisted business name brainstorming
//!
//! Thin terminal front end: collects input, runs the pipeline, prints the
//! suggestions with a purchase link for each.

use anyhow::Context;
use domain_pilot::{
    domain::purchase_link,
    input::QUESTIONS,
    AppConfig, AvailabilityStatus, DescriptionInput, DomainSuggestion, PipelineInput, PurchaseLinkTemplate,
    QuestionnaireInput,
};
use indicatif::{ProgressBar, ProgressStyle};
use inquire::Text;
use std::env;
use std::process;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Parsed command line
struct CliArgs {
    verbosity: u8,
    description: Option<String>,
    keywords: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(message) => {
            eprintln!("❌ {}", message);
            eprintln!("   Use --help for usage information");
            process::exit(2);
        }
    };

    init_logging(cli.verbosity);
    domain_pilot::init()?;

    if let Err(e) = run(cli).await {
        eprintln!("❌ Error: {:#}", e);
        process::exit(1);
    }

    Ok(())
}

fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_args(args: &[String]) -> std::result::Result<CliArgs, String> {
    let mut cli = CliArgs {
        verbosity: 0,
        description: None,
        keywords: None,
    };
    let mut words = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-k" | "--keywords" => {
                let value = iter.next().ok_or("--keywords needs a value")?;
                cli.keywords = Some(value.clone());
            }
            "-v" => cli.verbosity = cli.verbosity.saturating_add(1),
            "-vv" => cli.verbosity = cli.verbosity.saturating_add(2),
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(format!("Unknown option: {}", flag));
            }
            word => words.push(word.to_string()),
        }
    }

    if !words.is_empty() {
        cli.description = Some(words.join(" "));
    }
    if cli.keywords.is_some() && cli.description.is_none() {
        return Err("--keywords requires a business description".to_string());
    }

    Ok(cli)
}

async fn run(cli: CliArgs) -> anyhow::Result<()> {
    println!("🧭 Domain Pilot - find a name and a domain to go with it");
    println!("═══════════════════════════════════════════════════════");
    println!();

    let config = AppConfig::from_env().context("Failed to read configuration")?;
    let pipeline = domain_pilot::pipeline_from_config(&config)?;

    let input = match cli.description {
        Some(description) => {
            let keywords = match cli.keywords {
                Some(keywords) => keywords,
                None => Text::new("Keywords:")
                    .with_placeholder("e.g., sustainable, dog, play, eco")
                    .prompt()?,
            };
            PipelineInput::Description(DescriptionInput::new(description, keywords))
        }
        None => PipelineInput::Questionnaire(ask_questionnaire()?),
    };

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Brainstorming names and checking domains...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = pipeline.run_with_cancellation(input, &cancel).await;
    spinner.finish_and_clear();

    match result {
        Ok(suggestions) => {
            display_suggestions(&suggestions, &config.purchase_link);
            Ok(())
        }
        Err(e) => {
            println!("❌ {}", e);
            if e.is_recoverable() && !e.is_cancelled() {
                println!("💡 Adjust your answers and try again.");
            }
            process::exit(1);
        }
    }
}

fn ask_questionnaire() -> anyhow::Result<QuestionnaireInput> {
    let total = QUESTIONS.len();
    let mut answers = Vec::with_capacity(total);
    for (index, (question, placeholder)) in QUESTIONS.iter().enumerate() {
        let label = format!("[{}/{}] {}", index + 1, total, question);
        let answer = Text::new(&label).with_placeholder(placeholder).prompt()?;
        answers.push(answer);
    }
    Ok(QuestionnaireInput::new(answers))
}

fn display_suggestions(suggestions: &[DomainSuggestion], links: &PurchaseLinkTemplate) {
    println!("✨ Suggestions ({}):", suggestions.len());
    println!("═══════════════════");
    println!();

    for suggestion in suggestions {
        println!("🔹 {}", suggestion.base_name);
        for entry in &suggestion.tlds {
            let domain = suggestion.base_name.with_tld(&entry.tld);
            let marker = match entry.status {
                AvailabilityStatus::Available => "✅ available",
                AvailabilityStatus::Taken => "❌ taken",
                AvailabilityStatus::Unknown => "⚠️  unknown",
            };
            println!("   {:<28} {}", domain, marker);
        }
        match purchase_link(suggestion, links) {
            Some(link) => println!("   🛒 Buy now: {}", link),
            None => println!("   🛒 Buy now: unavailable"),
        }
        println!();
    }

    let with_options = suggestions.iter().filter(|s| s.has_available()).count();
    println!("📈 Summary:");
    println!("   🔹 Names: {}", suggestions.len());
    println!("   ✅ With at least one available domain: {}", with_options);
}

/// Print help information
fn print_help() {
    println!("🧭 Domain Pilot - find a name and a domain to go with it");
    println!();
    println!("USAGE:");
    println!("    domain-pilot [OPTIONS]                                   # Answer 4 questions");
    println!("    domain-pilot [OPTIONS] <DESCRIPTION> [--keywords <K>]    # Describe your business");
    println!();
    println!("OPTIONS:");
    println!("    -k, --keywords <K>   Comma-separated keywords (description mode)");
    println!("    -v, -vv              More log output (info, debug)");
    println!("    -h, --help           Show this help");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    OPENAI_API_KEY           OpenAI API key (OPENAI_MODEL, OPENAI_BASE_URL)");
    println!("    ANTHROPIC_API_KEY        Anthropic API key (ANTHROPIC_MODEL)");
    println!("    GEMINI_API_KEY           Google Gemini API key (GEMINI_MODEL)");
    println!("    OLLAMA_MODEL             Local Ollama model (OLLAMA_BASE_URL)");
    println!("    DOMAIN_PILOT_RESOLVER    simulated (default) or rdap");
    println!("    DOMAIN_PILOT_LATENCY_MS  Simulated lookup delay (default 1500)");
    println!("    PURCHASE_URL_TEMPLATE    Cart URL with a {{domain}} placeholder");
    println!("    RUST_LOG                 Log filter when no -v is given");
}
