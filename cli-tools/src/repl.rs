//! Interactive chat driven by the session controller

use anyhow::Result;
use chat_session_lib::{
    perform, Capabilities, ChatController, ChatEvent, DiagnosisForm, Effect, KeyValueStore,
    Presenter, Tab,
};
use colored::Colorize;
use shared::HealthChatApi;
use tracing::debug;

use crate::ui::{self, TerminalPresenter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Send(String),
    Form,
    Suggest(String),
    /// 1-based index into the last suggestion list
    Pick(usize),
    Rerun,
    Tips,
    History,
    Clear,
    Reset,
    Help,
    Quit,
    Unknown(String),
    Empty,
}

pub fn parse_command(line: &str) -> ReplCommand {
    let line = line.trim();
    if line.is_empty() {
        return ReplCommand::Empty;
    }
    let Some(rest) = line.strip_prefix('/') else {
        return ReplCommand::Send(line.to_string());
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name {
        "form" => ReplCommand::Form,
        "suggest" if !arg.is_empty() => ReplCommand::Suggest(arg.to_string()),
        "pick" => match arg.parse::<usize>() {
            Ok(n) if n > 0 => ReplCommand::Pick(n),
            _ => ReplCommand::Unknown(line.to_string()),
        },
        "rerun" => ReplCommand::Rerun,
        "tips" => ReplCommand::Tips,
        "history" => ReplCommand::History,
        "clear" => ReplCommand::Clear,
        "reset" => ReplCommand::Reset,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" | "q" => ReplCommand::Quit,
        _ => ReplCommand::Unknown(line.to_string()),
    }
}

/// Feed one event through the controller and run requests until it settles
async fn drive<S: KeyValueStore, A: HealthChatApi>(
    api: &A,
    controller: &mut ChatController<S>,
    view: &mut TerminalPresenter,
    event: ChatEvent,
) {
    let mut pending = controller.handle(event, view);
    while let Some(effect) = pending.pop() {
        match effect {
            Effect::Request(request) => {
                let completion = perform(api, request).await;
                pending.extend(controller.handle(completion, view));
            }
            other => debug!("No speech engine in the terminal, skipping {:?}", other),
        }
    }
}

fn read_optional_number(prompt: &str) -> Result<Option<u32>> {
    loop {
        let Some(raw) = ui::read_line(prompt)? else {
            return Ok(None);
        };
        if raw.is_empty() {
            return Ok(None);
        }
        match raw.parse() {
            Ok(n) => return Ok(Some(n)),
            Err(_) => ui::print_error("Please enter a whole number"),
        }
    }
}

fn read_form() -> Result<DiagnosisForm> {
    Ok(DiagnosisForm {
        symptom: ui::read_line("  Symptom: ")?.unwrap_or_default(),
        known_disease: ui::read_line("  Known disease (optional): ")?.unwrap_or_default(),
        days: read_optional_number("  Days (default 1): ")?,
        age: read_optional_number("  Age (optional): ")?,
    })
}

/// Ask each pending follow-up question until the answers are accepted or
/// the user gives up
async fn answer_followup<S: KeyValueStore, A: HealthChatApi>(
    api: &A,
    controller: &mut ChatController<S>,
    view: &mut TerminalPresenter,
) -> Result<()> {
    while let Some(form) = view.pending_followup().cloned() {
        for (index, question) in form.questions.iter().enumerate() {
            let Some(answer) = ui::read_line(&format!("  {} ", question.bright_white()))? else {
                return Ok(());
            };
            drive(
                api,
                controller,
                view,
                ChatEvent::FollowupAnswerChanged { index, answer },
            )
            .await;
        }

        drive(api, controller, view, ChatEvent::SubmitFollowup).await;

        if view.pending_followup().is_some() && !view.confirm("Try answering again?") {
            drive(api, controller, view, ChatEvent::ResetForm).await;
        }
    }
    Ok(())
}

pub async fn run<S: KeyValueStore, A: HealthChatApi>(api: &A, store: S, server: &str) -> Result<()> {
    let mut controller = ChatController::new(store, Capabilities::default());
    let mut view = TerminalPresenter::new();

    ui::print_startup_banner(server);
    controller.start(&mut view);

    loop {
        let prompt = format!("{} ", "you>".bright_cyan().bold());
        let line = match view.take_prefill() {
            Some(prefill) => {
                // Enter sends the prefilled text; anything typed is appended
                let extra = ui::read_line(&format!("{}{} ", prompt, prefill))?;
                extra.map(|rest| format!("{} {}", prefill, rest).trim().to_string())
            }
            None => ui::read_line(&prompt)?,
        };
        let Some(line) = line else {
            break;
        };

        let event = match parse_command(&line) {
            ReplCommand::Empty => continue,
            ReplCommand::Quit => break,
            ReplCommand::Help => {
                ui::print_help();
                continue;
            }
            ReplCommand::Unknown(cmd) => {
                ui::print_error(&format!("Unknown command: {}", cmd));
                continue;
            }
            ReplCommand::Send(text) => ChatEvent::Submit(text),
            ReplCommand::Form => ChatEvent::SubmitDiagnosisForm(read_form()?),
            ReplCommand::Suggest(text) => ChatEvent::SymptomInputChanged(text),
            ReplCommand::Pick(n) => ChatEvent::SuggestionPicked(n - 1),
            ReplCommand::Rerun => ChatEvent::ShowTab(Tab::Diagnosis),
            ReplCommand::Tips => ChatEvent::ShowTab(Tab::HealthTips),
            ReplCommand::History => ChatEvent::ShowTab(Tab::History),
            ReplCommand::Clear => ChatEvent::ClearHistory,
            ReplCommand::Reset => ChatEvent::ResetForm,
        };

        drive(api, &mut controller, &mut view, event).await;
        answer_followup(api, &mut controller, &mut view).await?;
    }

    println!("{}", "Take care!".bright_green());
    Ok(())
}
