//! Interactive terminal driver for the translation session.
//!
//! A thin frontend over the session controller: stdin lines become input
//! events, view updates are printed as they arrive. Takes no CLI flags —
//! everything comes from the config file and environment.
//!
//! Line grammar:
//! - `:reply <text>` — set the drafted Japanese reply
//! - `:check` — translate and critique the current reply
//! - `:quit` — exit
//! - anything else — the received English message (auto-translated after a
//!   quiet pause)
//!
//! Tracing goes to stderr so the conversation output stays readable.

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use smartbridge::config::AppConfig;
use smartbridge::controller::{InputEvent, SessionController, SessionHandle, ViewUpdate};
use smartbridge::llm::{GeminiClient, GeminiConfig, ModelInvoker};
use smartbridge::service::TranslationService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("smartbridge=info")),
        )
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;
    let api_key = config
        .llm
        .api_key
        .resolve()
        .context("no API key available")?;

    let client = GeminiClient::new(
        GeminiConfig::new(api_key).with_base_url(config.llm.base_url.clone()),
    );
    let invoker = ModelInvoker::new(Arc::new(client), config.llm.model_fallback.clone());
    let service = TranslationService::new(invoker);

    let (controller, handle) = SessionController::new(service, config.debounce());
    let SessionHandle {
        events,
        mut updates,
    } = handle;
    let controller_task = tokio::spawn(controller.run());

    // Render view updates as they arrive.
    let printer = tokio::spawn(async move {
        while let Some(update) = updates.recv().await {
            render(&update);
        }
    });

    println!("smartbridge — type the received English message, `:reply <text>` to draft,");
    println!("`:check` to translate and critique, `:quit` to exit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim_end().to_owned();
        if line == ":quit" {
            break;
        }
        let event = if let Some(reply) = line.strip_prefix(":reply ") {
            InputEvent::ReplyTextChanged(reply.to_owned())
        } else if line == ":check" {
            InputEvent::SubmitReply
        } else {
            InputEvent::ReceivedTextChanged(line)
        };
        if events.send(event).await.is_err() {
            break;
        }
    }

    drop(events);
    let _ = controller_task.await;
    let _ = printer.await;
    Ok(())
}

fn render(update: &ViewUpdate) {
    match update {
        ViewUpdate::AutoTranslationPending => println!("… 翻訳中"),
        ViewUpdate::AutoTranslationUpdated { translation } => {
            println!("日本語訳: {translation}");
        }
        ViewUpdate::AutoTranslationCleared => println!("(訳をクリアしました)"),
        ViewUpdate::CritiqueStarted => println!("… 分析中"),
        ViewUpdate::CritiqueReady(result) => {
            if result.is_appropriate {
                println!("✅ 適切な表現です — {}", result.critique);
            } else {
                println!("⚠️ 改善のアドバイス — {}", result.critique);
            }
            println!("英訳: {}", result.translated_text);
            println!("戻し翻訳: {}", result.back_translation);
            for suggestion in &result.suggestions {
                println!("  [{}] {}", suggestion.label, suggestion.text);
                println!("      戻し翻訳: {}", suggestion.back_translation);
            }
        }
        ViewUpdate::CritiqueFailed { message } => {
            println!("処理中にエラーが発生しました。({message})");
        }
    }
}
