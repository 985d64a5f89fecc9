//! Terminal rendering for the chat REPL and one-shot commands.

use std::io::{self, BufRead, Write};

use chat_session_lib::{
    highlight_terms, DiagnosisReport, ErrorBanner, FollowupForm, Message, Panel, Presenter,
    Sender,
};
use colored::Colorize;
use shared::humanize_symptom;

/// Print the startup banner
pub fn print_startup_banner(server: &str) {
    println!();
    println!("{}", "╭──────────────────────────────────────╮".bright_blue());
    println!("{}", "│        MediChat Symptom Checker      │".bright_blue());
    println!("{}", "╰──────────────────────────────────────╯".bright_blue());
    println!("  {} {}", "Server:".dimmed(), server.bright_white());
    println!("  Type {} for commands.", "/help".bright_yellow());
    println!();
}

pub fn print_help() {
    println!("  {}", "Commands:".bold());
    for (cmd, what) in [
        ("/form", "structured diagnosis (symptom, disease, days, age)"),
        ("/suggest <text>", "look up matching symptoms"),
        ("/pick <n>", "use suggestion n as the next input"),
        ("/rerun", "diagnose the last symptoms again"),
        ("/tips", "show health tips"),
        ("/history", "show recent messages"),
        ("/clear", "clear chat history"),
        ("/reset", "abandon the current diagnosis"),
        ("/quit", "exit"),
    ] {
        println!("    {:<18} {}", cmd.bright_yellow(), what.dimmed());
    }
    println!("  Anything else is sent as a symptom description or health question.");
    println!();
}

/// Text with medical terms emphasised
pub fn highlighted(text: &str) -> String {
    highlight_terms(text)
        .into_iter()
        .map(|segment| {
            if segment.highlighted {
                segment.text.bright_yellow().bold().to_string()
            } else {
                segment.text.to_string()
            }
        })
        .collect()
}

pub fn print_report(report: &DiagnosisReport) {
    println!();
    if let Some(symptoms) = &report.detected_symptoms {
        println!("  {} {}", "Detected symptoms:".dimmed(), symptoms);
    }
    println!(
        "  {} {}",
        "Possible condition:".dimmed(),
        report.disease.bright_white().bold()
    );
    println!("  {} {}", "Description:".dimmed(), highlighted(&report.description));
    if !report.other_diseases.is_empty() {
        println!(
            "  {} {}",
            "Other possibilities:".dimmed(),
            report.other_diseases.join(", ")
        );
    }
    println!(
        "  {} {}",
        "Confidence:".dimmed(),
        report.confidence_label().bright_cyan()
    );
    if let Some(condition) = &report.condition {
        println!("  {} {}", "!".bright_red(), condition.bright_red());
    }
    println!("  {}", "Precautions:".dimmed());
    for precaution in &report.precautions {
        println!("    {} {}", "•".bright_green(), precaution);
    }
    println!();
}

pub fn print_suggestions(suggestions: &[String]) {
    if suggestions.is_empty() {
        println!("  {}", "No matching symptoms".dimmed());
        return;
    }
    for (i, token) in suggestions.iter().enumerate() {
        println!("  {} {}", format!("{}.", i + 1).dimmed(), humanize_symptom(token));
    }
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.red());
}

/// Read one trimmed line from stdin; `None` at end of input
pub fn read_line(prompt: &str) -> io::Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Presenter for the interactive chat
#[derive(Debug, Default)]
pub struct TerminalPresenter {
    /// Questionnaire still waiting for answers
    followup: Option<FollowupForm>,
    /// Text placed in the input by a picked suggestion
    prefill: Option<String>,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_followup(&self) -> Option<&FollowupForm> {
        self.followup.as_ref()
    }

    pub fn take_prefill(&mut self) -> Option<String> {
        self.prefill.take()
    }
}

impl Presenter for TerminalPresenter {
    fn render_message(&mut self, message: &Message) {
        // Typed input is already on screen
        if message.sender() == Sender::Bot {
            println!(
                "{} {} {}",
                message.timestamp().dimmed(),
                "MediChat:".bright_green().bold(),
                highlighted(message.text())
            );
        }
    }

    fn render_welcome(&mut self) {
        println!("  {}", "Welcome to MediChat".bold());
        println!("  Ask me about symptoms, diseases, health tips, and more!");
        println!(
            "  {} I have fever · How to manage stress · Sleep tips · Diet advice",
            "Try:".dimmed()
        );
        println!();
    }

    fn render_result(&mut self, report: &DiagnosisReport) {
        print_report(report);
    }

    fn render_answer(&mut self, _answer: &str) {
        // Already shown as the bot message
    }

    fn render_clarification(&mut self, _prompt: &str) {}

    fn render_followup_form(&mut self, form: &FollowupForm) {
        println!();
        match &form.disease {
            Some(disease) => println!(
                "  {} {}",
                "A few more questions to check for".bold(),
                disease.bright_white().bold()
            ),
            None => println!("  {}", "A few more questions".bold()),
        }
        self.followup = Some(form.clone());
    }

    fn close_followup_form(&mut self) {
        self.followup = None;
    }

    fn render_error(&mut self, banner: &ErrorBanner) {
        print_error(&banner.message);
    }

    fn render_validation(&mut self, message: &str) {
        println!("  {} {}", "!".bright_yellow(), message.bright_yellow());
    }

    fn render_suggestions(&mut self, suggestions: &[String]) {
        if !suggestions.is_empty() {
            print_suggestions(suggestions);
        }
    }

    fn set_input(&mut self, text: &str) {
        self.prefill = (!text.is_empty()).then(|| text.to_string());
    }

    fn render_panel(&mut self, panel: &Panel) {
        println!();
        match panel {
            Panel::HealthTips(tips) => {
                for tip in tips.iter() {
                    println!("  {} {}", tip.icon, tip.title.bold());
                    println!("     {}", tip.text.dimmed());
                }
            }
            Panel::History(entries) if entries.is_empty() => {
                println!("  {}", "No chat history yet".dimmed());
            }
            Panel::History(entries) => {
                for entry in entries {
                    let who = match entry.sender {
                        Sender::User => "You".bright_cyan(),
                        Sender::Bot => "MediChat".bright_green(),
                    };
                    println!("  {} {} {}", entry.timestamp.dimmed(), who, entry.preview);
                }
            }
        }
        println!();
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        match read_line(&format!("{} [y/N] ", prompt)) {
            Ok(Some(answer)) => matches!(answer.to_lowercase().as_str(), "y" | "yes"),
            _ => false,
        }
    }
}
