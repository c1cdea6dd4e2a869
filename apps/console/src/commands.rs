//! Parsing of console input lines into session actions.

use std::path::PathBuf;

use client_core::ActiveView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Query(String),
    ListCases,
    SelectCase(String),
    SwitchView(ActiveView),
    Ingest,
    Upload(PathBuf),
    Status,
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  <text>                ask a question about the evidence
  /cases                list known cases
  /case <name|All>      select the case for timeline and trace
  /view <board|timeline|trace>
  /ingest               re-index the evidence folder
  /upload <path>        upload a plain-text evidence file
  /status               connection and session status
  /show                 print the active view
  /help                 this text
  /quit";

/// Returns `Ok(None)` for blank input.
pub fn parse_line(line: &str) -> Result<Option<ConsoleCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Some(ConsoleCommand::Query(line.to_string())));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };
    let command = match name.to_ascii_lowercase().as_str() {
        "cases" => ConsoleCommand::ListCases,
        "case" if !arg.is_empty() => ConsoleCommand::SelectCase(arg.to_string()),
        "case" => return Err("usage: /case <name|All>".to_string()),
        "view" => ConsoleCommand::SwitchView(arg.parse()?),
        "board" => ConsoleCommand::SwitchView(ActiveView::Board),
        "timeline" => ConsoleCommand::SwitchView(ActiveView::Timeline),
        "trace" => ConsoleCommand::SwitchView(ActiveView::Trace),
        "ingest" => ConsoleCommand::Ingest,
        "upload" if !arg.is_empty() => ConsoleCommand::Upload(PathBuf::from(arg)),
        "upload" => return Err("usage: /upload <path>".to_string()),
        "status" => ConsoleCommand::Status,
        "show" => ConsoleCommand::Show,
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" | "q" => ConsoleCommand::Quit,
        other => return Err(format!("unknown command '/{other}' (try /help)")),
    };
    Ok(Some(command))
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
