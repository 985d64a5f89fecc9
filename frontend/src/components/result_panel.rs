//! Results region: a diagnosis report, a Q&A answer, or a clarification prompt

use chat_session_lib::DiagnosisReport;
use yew::prelude::*;

use super::{CopyButton, Highlighted};
use crate::view_state::ResultView;

#[derive(Properties, PartialEq)]
pub struct ResultPanelProps {
    pub result: ResultView,
    /// Read the given text aloud
    pub on_read: Callback<String>,
}

/// Plain-text rendering used by the copy and read actions
pub fn report_text(report: &DiagnosisReport) -> String {
    let mut lines = vec![
        format!("Disease: {}", report.disease),
        format!("Description: {}", report.description),
        format!("Confidence: {}", report.confidence_label()),
    ];
    if let Some(symptoms) = &report.detected_symptoms {
        lines.insert(0, format!("Detected symptoms: {}", symptoms));
    }
    if !report.other_diseases.is_empty() {
        lines.push(format!(
            "Other possible conditions: {}",
            report.other_diseases.join(", ")
        ));
    }
    if let Some(condition) = &report.condition {
        lines.push(condition.clone());
    }
    lines.push(format!("Precautions: {}", report.precautions.join("; ")));
    lines.join("\n")
}

fn actions(text: String, on_read: &Callback<String>) -> Html {
    let on_read = on_read.clone();
    let spoken = text.clone();
    html! {
        <div class="result-actions">
            <CopyButton {text} />
            <button class="read-button" type="button" onclick={move |_| on_read.emit(spoken.clone())}>
                { "\u{1F50A} Read" }
            </button>
        </div>
    }
}

fn render_report(report: &DiagnosisReport, on_read: &Callback<String>) -> Html {
    html! {
        <div class="result-card diagnosis">
            if let Some(symptoms) = &report.detected_symptoms {
                <div class="result-section">
                    <div class="result-label">{ "Detected symptoms" }</div>
                    <div class="result-value">{ symptoms }</div>
                </div>
            }
            <div class="result-section">
                <div class="result-label">{ "Possible condition" }</div>
                <div class="result-value disease-name">{ &report.disease }</div>
            </div>
            <div class="result-section">
                <div class="result-label">{ "Description" }</div>
                <div class="result-value">
                    <Highlighted text={AttrValue::from(report.description.clone())} />
                </div>
            </div>
            if !report.other_diseases.is_empty() {
                <div class="result-section">
                    <div class="result-label">{ "Other possible conditions" }</div>
                    <div class="result-value">{ report.other_diseases.join(", ") }</div>
                </div>
            }
            <div class="result-section">
                <div class="result-label">{ "Confidence" }</div>
                <div class="result-value confidence">{ report.confidence_label() }</div>
            </div>
            if let Some(condition) = &report.condition {
                <div class="result-section condition">{ condition }</div>
            }
            <div class="result-section">
                <div class="result-label">{ "Precautions" }</div>
                <ul class="precautions">
                    { for report.precautions.iter().map(|p| html! { <li>{ p }</li> }) }
                </ul>
            </div>
            { actions(report_text(report), on_read) }
        </div>
    }
}

#[function_component(ResultPanel)]
pub fn result_panel(props: &ResultPanelProps) -> Html {
    match &props.result {
        ResultView::Diagnosis(report) => render_report(report, &props.on_read),
        ResultView::Answer(answer) => html! {
            <div class="result-card answer">
                <div class="result-label">{ "Answer" }</div>
                <div class="result-value">
                    <Highlighted text={AttrValue::from(answer.clone())} />
                </div>
                { actions(answer.clone(), &props.on_read) }
            </div>
        },
        ResultView::Clarification(prompt) => html! {
            <div class="result-card clarification">{ prompt }</div>
        },
    }
}
