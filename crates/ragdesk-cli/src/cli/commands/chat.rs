//! Question, extraction, and interactive chat handlers.
//!
//! Every answer is laid out through the response formatter. Questions require
//! a selected document, like the dashboard's chat tab.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use ragdesk_core::client::{Credentials, Extraction, RagClient};
use ragdesk_core::config::Config;
use ragdesk_core::format::format_response;
use ragdesk_core::store::{Store, UploadedFile};
use ragdesk_core::transcript::Transcript;

use crate::render::render_to_string;

const QUIT_COMMAND: &str = ":q";
const PROMPT_PREFIX: &str = "you> ";

fn require_selected_file() -> Result<UploadedFile> {
    let store = Store::open().context("open local state")?;
    store.selected_file()?.context(
        "No document selected. Upload one with `ragdesk upload` or pick one with `ragdesk files select`",
    )
}

pub async fn ask(config: &Config, creds: &Credentials, question: &str) -> Result<()> {
    let file = require_selected_file()?;
    let client = RagClient::from_config(config)?;
    tracing::debug!(file = %file.name, "asking question");

    let answer = client
        .ask(creds, question)
        .await
        .context("Failed to retrieve answer")?;
    println!("{}", render_to_string(&format_response(&answer), None));
    Ok(())
}

pub async fn extract(config: &Config, creds: &Credentials, extraction: Extraction) -> Result<()> {
    let file = require_selected_file()?;
    let client = RagClient::from_config(config)?;

    let answer = client
        .extract(creds, extraction)
        .await
        .with_context(|| format!("Failed to extract from {}", file.name))?;
    println!("Analysis for {}:\n", file.name);
    println!("{}", render_to_string(&format_response(&answer), None));
    Ok(())
}

pub async fn run(config: &Config, creds: &Credentials) -> Result<()> {
    let file = require_selected_file()?;
    let client = RagClient::from_config(config)?;
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    run_chat(stdin.lock(), &mut stdout, &client, creds, &file).await
}

/// Runs the chat loop.
///
/// Reads questions from `input`, writes formatted answers to `output`.
/// Exits on `:q` or EOF. Failed questions show fallback text and the loop
/// continues.
pub async fn run_chat<R, W>(
    input: R,
    output: &mut W,
    client: &RagClient,
    creds: &Credentials,
    file: &UploadedFile,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut transcript = Transcript::new();

    writeln!(output, "ragdesk chat about {} (:q to quit)", file.name)?;
    write!(output, "{PROMPT_PREFIX}")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed == QUIT_COMMAND {
            writeln!(output, "Goodbye!")?;
            return Ok(());
        }

        if trimmed.is_empty() {
            write!(output, "{PROMPT_PREFIX}")?;
            output.flush()?;
            continue;
        }

        // Trimming only decides blank or quit; the message goes out as typed.
        let result = client.ask(creds, &line).await;
        transcript.push_user(line);
        let reply = transcript.push_ai_result(result);
        if let Some(blocks) = reply.blocks() {
            writeln!(output, "{}", render_to_string(blocks, None))?;
        }

        writeln!(output)?;
        write!(output, "{PROMPT_PREFIX}")?;
        output.flush()?;
    }

    writeln!(output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use ragdesk_core::store::Role;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn doc() -> UploadedFile {
        UploadedFile::new("report.pdf", "alice", Role::Admin)
    }

    async fn run_with_input(server_uri: &str, input: &str) -> String {
        let client = RagClient::new(server_uri, None).unwrap();
        let creds = Credentials::new("alice", "secret");
        let mut output = Vec::new();
        run_chat(input.as_bytes(), &mut output, &client, &creds, &doc())
            .await
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn test_chat_formats_answers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"answer": "Findings: * first point * second point"}),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let out = run_with_input(&server.uri(), "what did you find?\n:q\n").await;
        assert!(out.contains("report.pdf"));
        assert!(out.contains("Findings:\n\n• first point\n\n• second point"));
        assert!(out.contains("Goodbye!"));
    }

    #[tokio::test]
    async fn test_chat_skips_blank_lines() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"answer": "ok"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let out = run_with_input(&server.uri(), "\n\nhello\n:q\n").await;
        assert!(out.contains("ok"));
    }

    #[tokio::test]
    async fn test_chat_sends_message_as_typed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(body_string_contains("message=++hello++"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"answer": "hi"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let out = run_with_input(&server.uri(), "  hello  \n:q\n").await;
        assert!(out.contains("hi"));
        assert!(!out.contains("Failed to retrieve answer"));
    }

    #[tokio::test]
    async fn test_chat_shows_fallback_and_continues_on_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(500))
            .expect(2)
            .mount(&server)
            .await;

        let out = run_with_input(&server.uri(), "one\ntwo\n:q\n").await;
        assert_eq!(out.matches("Failed to retrieve answer").count(), 2);
        assert!(out.contains("Goodbye!"));
    }

    #[tokio::test]
    async fn test_chat_ends_on_eof() {
        let server = MockServer::start().await;
        let out = run_with_input(&server.uri(), "").await;
        assert!(out.contains(":q to quit"));
        assert!(!out.contains("Goodbye!"));
    }
}
