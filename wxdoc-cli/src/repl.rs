//! The interactive `wxdoc chat` loop.

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::config::AppConfig;
use crate::error::{AssistantError, Result};
use crate::session::Session;

const PROMPT: &str = "wxdoc> ";

/// Help shown on start and for `:help`.
pub const HELP: &str = "Ask about the weather (\"weather in Pune\") or about the uploaded PDF.
  :upload <path>  make a PDF the active document
  :clear          forget the active document
  :keys           show which API keys are set
  :help           show this help
  :quit           leave";

/// One line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ask(String),
    Upload(String),
    Clear,
    Keys,
    Help,
    Quit,
    Unknown(String),
}

/// Lines starting with `:` are commands, everything else is a question.
pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let Some(command) = line.strip_prefix(':') else {
        return Command::Ask(line.to_string());
    };

    let (name, argument) = match command.split_once(char::is_whitespace) {
        Some((name, argument)) => (name, argument.trim()),
        None => (command, ""),
    };
    match name.to_ascii_lowercase().as_str() {
        "upload" | "u" => Command::Upload(argument.to_string()),
        "clear" | "c" => Command::Clear,
        "keys" | "k" => Command::Keys,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

/// Read lines until `:quit`, Ctrl-C or Ctrl-D, answering each in turn.
pub async fn run(session: &mut Session, config: &AppConfig) -> Result<()> {
    let mut editor = DefaultEditor::new().map_err(|e| AssistantError::Terminal(e.to_string()))?;

    println!("{HELP}\n");
    if let Some(document) = session.document() {
        println!("Active document: {}\n", document.name);
    }

    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(AssistantError::Terminal(e.to_string())),
        };
        if line.trim().is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(line.as_str());

        let reply = match parse_command(&line) {
            Command::Ask(query) => session.ask(&query).await,
            Command::Upload(path) if path.is_empty() => "Usage: :upload <path-to-pdf>".to_string(),
            Command::Upload(path) => session.upload(path).await,
            Command::Clear => session.clear().await,
            Command::Keys => config.keys_report(),
            Command::Help => HELP.to_string(),
            Command::Quit => break,
            Command::Unknown(input) => format!("Unknown command {input}; type :help"),
        };
        println!("{reply}\n");
    }

    Ok(())
}
