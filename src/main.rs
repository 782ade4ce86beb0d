/*!
# Moodlens

Command-line entry point: record mood check-ins, review the patterns they
form and talk things through with a local support chat.

## Usage

```
moodlens [OPTIONS] <COMMAND>

Commands:
  checkin   Record how today went and show updated insights
  insights  Show patterns and suggestions from recent check-ins
  chat      Talk things through with the support chat

Options:
      --session <SESSION>        Session id (overrides MOODLENS_SESSION)
      --log-format <LOG_FORMAT>  Log output format [default: text] [possible values: text, json]
      --log-level <LOG_LEVEL>    Log level used when RUST_LOG is not set [default: info]
```

## Configuration

See `moodlens::config` for the `MOODLENS_*` environment variables.
*/

use clap::Parser;
use moodlens::ai::OllamaClient;
use moodlens::cli::{CliArgs, Command};
use moodlens::config::Config;
use moodlens::constants::{
    CHAT_INSIGHT_DELAY, LOG_FORMAT_JSON, TRACING_ROOT_SPAN_NAME, TRACING_SERVICE_NAME,
};
use moodlens::db::Database;
use moodlens::errors::AppResult;
use moodlens::insights::{DeliverySession, InsightEngine};
use moodlens::ops::{self, ChatOptions, CheckinInput};
use std::fs;
use std::io;
use tracing::{debug, error, info, info_span};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(log_format: &str, log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format == LOG_FORMAT_JSON {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}

/// Runs one invocation: loads configuration, opens the store and dispatches
/// the subcommand.
fn run(args: CliArgs) -> AppResult<()> {
    let mut config = Config::load()?;
    if let Some(session) = args.session.clone() {
        config.session_id = Some(session);
    }
    config.validate()?;
    debug!("Configuration: {:?}", config);

    if let Some(parent) = config.database_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let db = Database::open(&config.database_path)?;
    db.initialize_schema()?;

    let session_id = config.resolve_session_id()?;
    let engine = InsightEngine::new(&db).with_window(config.analysis_window);
    let client = OllamaClient::new(&config.ollama_url);
    let mut delivery = DeliverySession::new();
    let stdout = io::stdout();

    match args.command {
        Command::Checkin(checkin) => {
            let input = CheckinInput {
                routine: checkin.routine.into(),
                stress: checkin.stress,
                dejected: checkin.dejected,
                notes: checkin.notes,
            };
            let outcome = ops::submit_checkin(&db, &engine, &session_id, input, &mut delivery)?;
            ops::render_outcome(&outcome, &mut stdout.lock())?;

            if checkin.chat {
                let options = ChatOptions {
                    model: config.chat_model.clone(),
                    insight_delay: CHAT_INSIGHT_DELAY,
                    opening_message: Some(outcome.chat_opener),
                };
                ops::run_chat(
                    &engine,
                    &client,
                    &session_id,
                    &mut delivery,
                    &options,
                    io::stdin().lock(),
                    &mut stdout.lock(),
                )?;
            }
        }
        Command::Insights(insights) => {
            ops::show_insights(&engine, &session_id, insights.json, &mut stdout.lock())?;
        }
        Command::Chat => {
            let options = ChatOptions {
                model: config.chat_model.clone(),
                insight_delay: CHAT_INSIGHT_DELAY,
                opening_message: None,
            };
            ops::run_chat(
                &engine,
                &client,
                &session_id,
                &mut delivery,
                &options,
                io::stdin().lock(),
                &mut stdout.lock(),
            )?;
        }
    }

    Ok(())
}

fn main() -> AppResult<()> {
    let args = CliArgs::parse();
    init_tracing(&args.log_format, &args.log_level);

    let correlation_id = uuid::Uuid::new_v4().to_string();
    let root_span = info_span!(
        TRACING_ROOT_SPAN_NAME,
        service_name = TRACING_SERVICE_NAME,
        correlation_id = %correlation_id
    );
    let _guard = root_span.enter();

    info!("Starting {}", TRACING_SERVICE_NAME);

    let result = run(args);
    if let Err(e) = &result {
        error!("{}", e);
    }
    result
}
