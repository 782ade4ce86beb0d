//! Interactive support chat with pattern-aware prompts.
//!
//! Every outgoing message is augmented with the session's current
//! suggestions before it reaches the model. When the chat opens, one
//! proactive "Pattern Insight" may be shown after a short pause.

use crate::ai::{ChatHistory, Message, OllamaClient, APOLOGY_MESSAGE, WELCOME_MESSAGE};
use crate::errors::AppResult;
use crate::insights::{DeliverySession, InsightEngine};
use crate::store::CheckinStore;
use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Settings for one chat session.
#[derive(Debug, Clone)]
pub struct ChatOptions {
    pub model: String,
    /// Pause between the welcome message and the proactive insight.
    pub insight_delay: Duration,
    /// Sent as the first user message, e.g. the opener after a check-in.
    pub opening_message: Option<String>,
}

/// Runs the chat loop until the user ends it.
///
/// # Flow
///
/// 1. Print the welcome message
/// 2. After `insight_delay`, print a "Pattern Insight" if one is due
/// 3. Send `opening_message`, if any
/// 4. Read lines from `input`; each one is augmented and sent to the model
/// 5. Exit on "quit", "exit", empty input or end of input
///
/// Model failures print an apology and the loop continues.
///
/// # Errors
///
/// Returns an error only if reading `input` or writing `out` fails.
pub fn run_chat<S, R, W>(
    engine: &InsightEngine<'_, S>,
    client: &OllamaClient,
    session_id: &str,
    delivery: &mut DeliverySession,
    options: &ChatOptions,
    mut input: R,
    out: &mut W,
) -> AppResult<()>
where
    S: CheckinStore + ?Sized,
    R: BufRead,
    W: Write,
{
    info!("Starting chat session");

    writeln!(out, "\n🧠 Dr. Sarah: {}\n", WELCOME_MESSAGE)?;
    out.flush()?;

    if !options.insight_delay.is_zero() {
        thread::sleep(options.insight_delay);
    }
    if let Some(insight) = engine.chat_insight(session_id, delivery) {
        writeln!(out, "💡 Pattern Insight: {}\n", insight.message)?;
    }

    let mut history = ChatHistory::new();

    if let Some(opening) = &options.opening_message {
        writeln!(out, "You: {}", opening)?;
        send_turn(engine, client, session_id, options, &mut history, opening, out)?;
    }

    loop {
        write!(out, "You: ")?;
        out.flush()?;

        let mut line = String::new();
        let read = input.read_line(&mut line)?;
        let user_input = line.trim();

        if read == 0
            || user_input.is_empty()
            || user_input.eq_ignore_ascii_case("quit")
            || user_input.eq_ignore_ascii_case("exit")
        {
            writeln!(out, "\n👋 Take care. I'm here whenever you want to talk.")?;
            break;
        }

        send_turn(engine, client, session_id, options, &mut history, user_input, out)?;
    }

    info!("Chat session ended");
    Ok(())
}

fn send_turn<S, W>(
    engine: &InsightEngine<'_, S>,
    client: &OllamaClient,
    session_id: &str,
    options: &ChatOptions,
    history: &mut ChatHistory,
    user_input: &str,
    out: &mut W,
) -> AppResult<()>
where
    S: CheckinStore + ?Sized,
    W: Write,
{
    let prompt = engine.augment_outgoing(session_id, user_input);
    debug!("Augmented prompt is {} bytes", prompt.len());
    history.push(Message::user(prompt));

    match client.chat(&options.model, history.messages()) {
        Ok(reply) => {
            writeln!(out, "\n🧠 Dr. Sarah: {}\n", reply.trim())?;
            history.push(Message::assistant(reply));
        }
        Err(e) => {
            warn!("Chat model unavailable: {}", e);
            // The failed turn is not kept, so a retry starts clean.
            history.pop();
            writeln!(out, "\n🧠 Dr. Sarah: {}\n", APOLOGY_MESSAGE)?;
        }
    }
    Ok(())
}
