//! medichat - terminal client for the MediChat symptom checker
//!
//! `medichat chat` runs the same interaction controller as the web widget;
//! the other subcommands call one backend endpoint each, useful for testing
//! and debugging a MediChat server.

mod client;
mod repl;
mod store;
mod ui;

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chat_session_lib::session::{DEFAULT_DURATION_DAYS, EMPTY_FORM_MESSAGE};
use chat_session_lib::{DiagnosisOutcome, DiagnosisReport, Sender, Transcript};
use clap::{Parser, Subcommand};
use colored::Colorize;
use shared::api::HealthChatApi;
use shared::{humanize_symptom, DiagnoseRequest, FollowupRequest, HealthQaRequest, SuggestRequest};
use tabled::{Table, Tabled};

use client::NativeApiClient;
use store::FileStore;

#[derive(Parser)]
#[command(name = "medichat")]
#[command(about = "Terminal client for the MediChat symptom checker", long_about = None)]
struct Cli {
    /// Server URL
    #[arg(short, long, env = "MEDICHAT_SERVER", default_value = "http://localhost:5000")]
    server: String,

    /// Chat history and preference file
    #[arg(long, env = "MEDICHAT_STORE")]
    store: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "pretty")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, Default, PartialEq, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
    Table,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat (default)
    Chat,

    /// Diagnose symptoms once
    Diagnose {
        /// Free-text symptom description
        text: Vec<String>,

        /// Known disease, overrides the symptom text
        #[arg(long)]
        disease: Option<String>,

        /// How many days the symptoms have lasted
        #[arg(long)]
        days: Option<u32>,

        #[arg(long)]
        age: Option<u32>,
    },

    /// Submit follow-up answers for a disease hypothesis
    Followup {
        /// Disease the questions were asked about
        #[arg(long)]
        disease: Option<String>,

        #[arg(long)]
        age: Option<u32>,

        /// Answers as "question=answer", repeatable
        #[arg(short, long = "answer", required = true)]
        answers: Vec<String>,
    },

    /// Ask a health question
    Ask {
        question: Vec<String>,
    },

    /// Look up symptoms matching a partial input
    Suggest {
        text: String,
    },

    /// List every symptom the server knows
    Symptoms,

    /// Show or clear the saved chat history
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// Show the saved messages
    Show,
    /// Delete the saved messages
    Clear {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "From")]
    sender: String,
    #[tabled(rename = "Message")]
    text: String,
}

#[derive(Tabled)]
struct SymptomRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Symptom")]
    symptom: String,
    #[tabled(rename = "Token")]
    token: String,
}

fn parse_answers(raw: &[String]) -> Result<BTreeMap<String, String>> {
    raw.iter()
        .map(|pair| match pair.split_once('=') {
            Some((question, answer)) if !question.trim().is_empty() => {
                Ok((question.trim().to_string(), answer.trim().to_string()))
            }
            _ => bail!("Expected question=answer, got {:?}", pair),
        })
        .collect()
}

/// Build a diagnosis request, rejecting empty input before any network call.
/// Any of `--disease`, `--days` or `--age` selects the structured form.
fn diagnose_request(
    text: &str,
    disease: Option<String>,
    days: Option<u32>,
    age: Option<u32>,
) -> Result<DiagnoseRequest> {
    let text = text.trim();
    let disease = disease
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    if text.is_empty() && disease.is_none() {
        bail!(EMPTY_FORM_MESSAGE);
    }

    if disease.is_none() && days.is_none() && age.is_none() {
        return Ok(DiagnoseRequest::free_text(text));
    }

    Ok(DiagnoseRequest {
        symptom: (!text.is_empty()).then(|| text.to_string()),
        known_disease: disease,
        days: Some(days.unwrap_or(DEFAULT_DURATION_DAYS)),
        age,
        symptoms: None,
    })
}

fn open_store(path: Option<PathBuf>) -> Result<FileStore> {
    let path = match path {
        Some(path) => path,
        None => FileStore::default_path()?,
    };
    FileStore::open(path).context("Failed to open chat store")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = NativeApiClient::new(&cli.server).context("Failed to create HTTP client")?;

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let store = open_store(cli.store)?;
            repl::run(&client, store, &cli.server).await?;
        }

        Commands::Diagnose {
            text,
            disease,
            days,
            age,
        } => {
            let text = text.join(" ");
            let req = diagnose_request(&text, disease, days, age)?;

            let resp = client.diagnose(&req).await?;
            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&resp)?);
                return Ok(());
            }

            match DiagnosisOutcome::of(&resp) {
                DiagnosisOutcome::Rejected(message) => ui::print_error(&message),
                DiagnosisOutcome::FollowupRequired { disease, questions } => {
                    println!("{}", "More information needed:".bold());
                    for question in &questions {
                        println!("  {} {}", "?".bright_yellow(), question);
                    }
                    println!();
                    println!("Answer with:");
                    println!(
                        "  medichat followup{} -a \"<question>=<answer>\" ...",
                        disease
                            .map(|d| format!(" --disease {:?}", d))
                            .unwrap_or_default()
                    );
                }
                DiagnosisOutcome::Resolved(disease) => {
                    let report = DiagnosisReport::from_diagnosis(&resp, &disease, &text);
                    ui::print_report(&report);
                    println!("{}", report.result_message.bright_green());
                }
                DiagnosisOutcome::Unrecognized => {
                    println!("{}", chat_session_lib::session::CLARIFICATION_PROMPT);
                }
            }
        }

        Commands::Followup {
            disease,
            age,
            answers,
        } => {
            let req = FollowupRequest {
                answers: parse_answers(&answers)?,
                disease: disease.clone(),
                age,
            };
            let resp = client.diagnose_followup(&req).await?;
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&resp)?),
                OutputFormat::Pretty | OutputFormat::Table => {
                    if let Some(error) = resp.error.as_deref().filter(|e| !e.is_empty()) {
                        ui::print_error(error);
                    } else {
                        let report = DiagnosisReport::from_followup(&resp, disease.as_deref());
                        ui::print_report(&report);
                        println!("{}", report.result_message.bright_green());
                    }
                }
            }
        }

        Commands::Ask { question } => {
            let question = question.join(" ");
            if question.trim().is_empty() {
                bail!("Ask a question");
            }
            let resp = client.health_qa(&HealthQaRequest { question }).await?;
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&resp)?),
                OutputFormat::Pretty | OutputFormat::Table => {
                    println!("{}", ui::highlighted(&resp.answer));
                }
            }
        }

        Commands::Suggest { text } => {
            let resp = client.suggest_symptoms(&SuggestRequest { text }).await?;
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&resp)?),
                OutputFormat::Pretty | OutputFormat::Table => {
                    ui::print_suggestions(&resp.suggestions)
                }
            }
        }

        Commands::Symptoms => {
            let resp = client.list_symptoms().await?;
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&resp)?),
                OutputFormat::Table => {
                    let rows: Vec<SymptomRow> = resp
                        .symptoms
                        .iter()
                        .enumerate()
                        .map(|(i, token)| SymptomRow {
                            index: i + 1,
                            symptom: humanize_symptom(token),
                            token: token.clone(),
                        })
                        .collect();
                    println!("{}", Table::new(rows));
                }
                OutputFormat::Pretty => {
                    println!("{} {} symptom(s):", "Known".bold(), resp.symptoms.len());
                    ui::print_suggestions(&resp.symptoms);
                }
            }
        }

        Commands::History { action } => {
            let mut store = open_store(cli.store)?;
            match action.unwrap_or(HistoryAction::Show) {
                HistoryAction::Show => {
                    let transcript = Transcript::load(&store);
                    match cli.format {
                        OutputFormat::Json => {
                            println!("{}", serde_json::to_string_pretty(transcript.messages())?)
                        }
                        _ if transcript.is_empty() => println!("No chat history yet"),
                        OutputFormat::Table => {
                            let rows: Vec<HistoryRow> = transcript
                                .messages()
                                .iter()
                                .map(|m| HistoryRow {
                                    time: m.timestamp().to_string(),
                                    sender: m.sender().as_str().to_string(),
                                    text: m.text().to_string(),
                                })
                                .collect();
                            println!("{}", Table::new(rows));
                        }
                        OutputFormat::Pretty => {
                            for m in transcript.messages() {
                                let who = match m.sender() {
                                    Sender::User => "You".bright_cyan(),
                                    Sender::Bot => "MediChat".bright_green(),
                                };
                                println!("{} {} {}", m.timestamp().dimmed(), who, m.text());
                            }
                        }
                    }
                }
                HistoryAction::Clear { yes } => {
                    if !yes {
                        let answer = ui::read_line(&format!(
                            "{} [y/N] ",
                            chat_session_lib::session::CLEAR_HISTORY_PROMPT
                        ))?;
                        if !matches!(answer.as_deref(), Some("y") | Some("yes")) {
                            println!("Cancelled");
                            return Ok(());
                        }
                    }
                    let mut transcript = Transcript::load(&store);
                    transcript
                        .clear(&mut store)
                        .context("Failed to clear chat history")?;
                    println!(
                        "{} Chat history cleared ({})",
                        "✓".green(),
                        store.path().display()
                    );
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answers() {
        let answers =
            parse_answers(&["Q1=yes".to_string(), "How long? = 3 days".to_string()]).unwrap();
        assert_eq!(answers.get("Q1").map(String::as_str), Some("yes"));
        assert_eq!(answers.get("How long?").map(String::as_str), Some("3 days"));
    }

    #[test]
    fn test_parse_answers_rejects_missing_separator() {
        assert!(parse_answers(&["just an answer".to_string()]).is_err());
        assert!(parse_answers(&["=orphan".to_string()]).is_err());
    }

    #[test]
    fn test_diagnose_request_rejects_empty_input() {
        let err = diagnose_request("  ", None, Some(3), Some(40)).unwrap_err();
        assert_eq!(err.to_string(), EMPTY_FORM_MESSAGE);
        assert!(diagnose_request("", Some("  ".into()), None, None).is_err());
    }

    #[test]
    fn test_diagnose_request_shapes() {
        assert_eq!(
            diagnose_request("I have fever", None, None, None).unwrap(),
            DiagnoseRequest::free_text("I have fever")
        );

        let req = diagnose_request("", Some("Flu".into()), None, Some(70)).unwrap();
        assert_eq!(req.known_disease.as_deref(), Some("Flu"));
        assert_eq!(req.symptom, None);
        assert_eq!(req.days, Some(DEFAULT_DURATION_DAYS));
        assert_eq!(req.age, Some(70));
        assert_eq!(req.symptoms, None);
    }

    #[test]
    fn test_cli_defaults_to_chat() {
        let cli = Cli::try_parse_from(["medichat"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.format == OutputFormat::Pretty);

        let cli = Cli::try_parse_from(["medichat", "-f", "json", "diagnose", "I", "have", "fever"])
            .unwrap();
        assert!(matches!(cli.command, Some(Commands::Diagnose { ref text, .. }) if text.len() == 3));
    }
}
