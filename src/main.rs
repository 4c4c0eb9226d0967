use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use workout_form::config::ClientConfig;
use workout_form::core::value::{FieldValue, FileUpload};
use workout_form::form::{self, FormField, FormState};
use workout_form::logging;
use workout_form::runtime::{ActivationEvent, ActivationSource, EventLoop, FormSession, Listener, Runtime};
use workout_form::submission::{SubmissionHandler, SubmissionOutcome};
use workout_form::task::SubmitExecutor;
use workout_form::terminal::Terminal;
use workout_form::widgets::{ButtonInput, FormView};

#[derive(Debug, Parser)]
#[command(name = "workout-form", version, about = "Log workouts against the fitness API")]
struct Cli {
    /// YAML client configuration.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Overrides `base_url` from the configuration.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Mode>,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Edit the form in the terminal and submit it with Enter.
    Interactive,
    /// Fill the form from arguments, submit once and wait for the outcome.
    Submit(SubmitArgs),
}

#[derive(Debug, Args)]
struct SubmitArgs {
    /// Text field value as `name=value`. Repeatable.
    #[arg(long = "field", value_name = "NAME=VALUE", value_parser = parse_pair)]
    fields: Vec<(String, String)>,

    /// File field as `name=path`. Repeatable.
    #[arg(long = "file", value_name = "NAME=PATH", value_parser = parse_pair)]
    files: Vec<(String, String)>,
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{raw}'")),
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command.unwrap_or(Mode::Interactive) {
        Mode::Interactive => run_interactive(config),
        Mode::Submit(args) => run_submit(config, args),
    }
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::default(),
    };
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    config.validate()?;
    Ok(config)
}

fn executor(config: &ClientConfig) -> SubmitExecutor {
    SubmitExecutor::threaded(Arc::new(config.transport()))
}

fn run_interactive(config: ClientConfig) -> Result<()> {
    let _guard = logging::init_file(&config.log_filter, &config.log_file)
        .context("failed to initialise logging")?;
    info!(base_url = %config.base_url, endpoint = %config.endpoint, "starting interactive form");

    let state = config.build_form();
    let view = FormView::new(&state, ButtonInput::new(config.submit_id.as_str(), "Submit"));
    let shared = form::shared(state);

    let handler = SubmissionHandler::new(config.submit_id.as_str(), shared.clone(), executor(&config))
        .with_endpoint(config.endpoint.as_str())
        .with_policy(config.concurrency);
    let mut events = EventLoop::new();
    events.bind(config.submit_id.as_str(), Box::new(handler));

    let session = FormSession::new(shared, view, events);
    let terminal = Terminal::new().context("failed to open terminal")?;
    Runtime::new(session, terminal)
        .run()
        .context("terminal session failed")
}

fn run_submit(config: ClientConfig, args: SubmitArgs) -> Result<()> {
    logging::init_stderr(&config.log_filter).context("failed to initialise logging")?;

    let mut state = config.build_form();
    for (name, value) in args.fields {
        set_or_append(&mut state, name, FieldValue::from(value));
    }
    for (name, path) in args.files {
        let path = PathBuf::from(path);
        let bytes = fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        set_or_append(&mut state, name, FieldValue::from(FileUpload::new(filename, bytes)));
    }

    let mut handler = SubmissionHandler::new(config.submit_id.as_str(), state, executor(&config))
        .with_endpoint(config.endpoint.as_str());
    let mut activation = ActivationEvent::new(config.submit_id.as_str(), ActivationSource::Programmatic);
    handler.on_activate(&mut activation);

    for outcome in handler.wait_idle() {
        match outcome {
            SubmissionOutcome::Created { response, .. } => println!("{response}"),
            SubmissionOutcome::Failed { error, .. } => bail!("error creating workout: {error}"),
        }
    }
    Ok(())
}

fn set_or_append(state: &mut FormState, name: String, value: FieldValue) {
    if let Some(field) = state.field_mut(&name) {
        field.set_value(value);
        return;
    }
    let mut field = FormField::text(name.clone(), name);
    field.set_value(value);
    state.push_field(field);
}
