//! Command-line prompt enhancer backed by Gemini.

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use prompt_enhancer::adapters::gemini::{
    DEFAULT_GEMINI_MODEL, GEMINI_API_KEY_ENV, GeminiConfig, GeminiGenerator,
};
use prompt_enhancer::{Credential, Enhancer, PlainTextRenderer, PromptComponents, PromptRenderer};
use tracing::info;
use tracing_subscriber::EnvFilter;

const EXAMPLE_ROLE: &str = "Technical Project Manager";
const EXAMPLE_CONTEXT: &str = "Working with a remote team on a new mobile app";
const EXAMPLE_TASK: &str = "Create a project timeline and resource allocation plan";

#[derive(Debug, Parser)]
#[command(
    name = "enhance-cli",
    version,
    about = "Turn a role, context and task into a well-structured LLM prompt"
)]
struct Cli {
    /// Persona the model should adopt, e.g. "Senior Software Engineer".
    #[arg(long, default_value = "")]
    role: String,

    /// Situation or background.
    #[arg(long, default_value = "")]
    context: String,

    /// What needs to be accomplished.
    #[arg(long, default_value = "")]
    task: String,

    /// Use the built-in sample input instead of --role/--context/--task.
    #[arg(long)]
    example: bool,

    /// Gemini API key. Kept in memory only.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Gemini model identifier.
    #[arg(long, default_value = DEFAULT_GEMINI_MODEL)]
    model: String,

    /// Override the API base URL.
    #[arg(long)]
    base_url: Option<String>,

    /// Give up on the request after this many seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Print the instruction that would be sent and exit without calling the API.
    #[arg(long)]
    print_prompt: bool,

    /// Echo the input components above the result.
    #[arg(long)]
    show_input: bool,
}

impl Cli {
    fn components(&self) -> PromptComponents {
        if self.example {
            PromptComponents::new(EXAMPLE_ROLE, EXAMPLE_CONTEXT, EXAMPLE_TASK)
        } else {
            PromptComponents::new(&self.role, &self.context, &self.task)
        }
    }

    fn gemini_config(&self) -> Result<GeminiConfig> {
        let mut config = GeminiConfig::new(&self.model);
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url)?;
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(env::var(EnvFilter::DEFAULT_ENV).ok()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();
    Ok(run(&cli, &mut stdout).await?.into())
}

/// `RUST_LOG` directives when set and valid, `info` otherwise.
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Outcome {
    Success,
    GenerationFailed,
    MissingApiKey,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => Self::SUCCESS,
            Outcome::GenerationFailed => Self::FAILURE,
            Outcome::MissingApiKey => Self::from(2_u8),
        }
    }
}

/// Runs one enhancement and writes the rendered result to `out`.
async fn run(cli: &Cli, out: &mut impl Write) -> Result<Outcome> {
    let components = cli.components();

    let generator = GeminiGenerator::new(cli.gemini_config()?)?;
    let enhancer = Enhancer::new(Arc::new(generator));

    if cli.print_prompt {
        write!(out, "{}", enhancer.build_prompt(&components))?;
        out.flush()?;
        return Ok(Outcome::Success);
    }

    let Some(api_key) = cli.api_key.as_deref().filter(|key| !key.trim().is_empty()) else {
        eprintln!(
            "warning: please supply your Gemini API key with --api-key or {GEMINI_API_KEY_ENV} to get started."
        );
        eprintln!();
        eprintln!("Example input:");
        eprintln!("  --role {EXAMPLE_ROLE:?}");
        eprintln!("  --context {EXAMPLE_CONTEXT:?}");
        eprintln!("  --task {EXAMPLE_TASK:?}");
        return Ok(Outcome::MissingApiKey);
    };
    let credential = Credential::new(api_key).context("invalid API key")?;

    info!(model = %cli.model, "enhancing your prompt...");
    let enhanced = enhancer.enhance(&credential, &components).await;

    let renderer = if cli.show_input {
        PlainTextRenderer::new().with_input()
    } else {
        PlainTextRenderer::new()
    };
    write!(out, "{}", renderer.render(&components, &enhanced))?;
    out.flush()?;

    Ok(if enhanced.is_error() {
        Outcome::GenerationFailed
    } else {
        Outcome::Success
    })
}

#[cfg(test)]
mod tests {
    use prompt_enhancer::build_prompt;

    use super::*;

    #[test]
    fn example_flag_uses_sample_components() {
        let cli = Cli::parse_from(["enhance-cli", "--example", "--role", "ignored"]);
        let components = cli.components();
        assert_eq!(components.role, EXAMPLE_ROLE);
        assert_eq!(components.context, EXAMPLE_CONTEXT);
        assert_eq!(components.task, EXAMPLE_TASK);
    }

    #[test]
    fn fields_default_to_empty() {
        let cli = Cli::parse_from(["enhance-cli", "--task", "Write a test plan"]);
        assert_eq!(
            cli.components(),
            PromptComponents::new("", "", "Write a test plan")
        );
        assert_eq!(cli.model, DEFAULT_GEMINI_MODEL);
    }

    #[test]
    fn bad_base_url_is_rejected() {
        let cli = Cli::parse_from(["enhance-cli", "--base-url", "example.com"]);
        assert!(cli.gemini_config().is_err());
    }

    #[tokio::test]
    async fn blank_api_key_exits_with_code_two() {
        let cli = Cli::parse_from(["enhance-cli", "--example", "--api-key", "  "]);
        let mut out = Vec::new();

        let outcome = run(&cli, &mut out).await.unwrap();

        assert_eq!(outcome, Outcome::MissingApiKey);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn print_prompt_writes_built_prompt_only() {
        let cli = Cli::parse_from(["enhance-cli", "--print-prompt", "--example"]);
        let mut out = Vec::new();

        let outcome = run(&cli, &mut out).await.unwrap();

        assert_eq!(outcome, Outcome::Success);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            build_prompt(EXAMPLE_ROLE, EXAMPLE_CONTEXT, EXAMPLE_TASK)
        );
    }

    #[tokio::test]
    async fn generation_failure_exits_with_failure() {
        let cli = Cli::parse_from([
            "enhance-cli",
            "--example",
            "--api-key",
            "test-key",
            "--base-url",
            "http://127.0.0.1:9",
            "--timeout-secs",
            "5",
        ]);
        let mut out = Vec::new();

        let outcome = run(&cli, &mut out).await.unwrap();

        assert_eq!(outcome, Outcome::GenerationFailed);
        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.contains("Error generating enhanced prompt: "));
    }

    #[test]
    fn logging_defaults_to_info() {
        assert_eq!(log_filter(None).to_string(), "info");
        assert_eq!(log_filter(Some("debug".to_owned())).to_string(), "debug");
    }

    #[test]
    fn outcomes_map_to_exit_codes() {
        assert_eq!(
            format!("{:?}", ExitCode::from(Outcome::MissingApiKey)),
            format!("{:?}", ExitCode::from(2_u8))
        );
        assert_eq!(
            format!("{:?}", ExitCode::from(Outcome::GenerationFailed)),
            format!("{:?}", ExitCode::FAILURE)
        );
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
