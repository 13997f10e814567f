use panel_core::{AnalyzeBlocker, PanelViewModel};

const GAUGE_CELLS: i64 = 20;
const PREVIEW_CHARS: usize = 60;

pub fn render(view: &PanelViewModel) -> Vec<String> {
    let mut lines = vec!["== 📄 ATS Score Checker ==".to_string()];

    if !view.upload_status.is_empty() {
        lines.push(view.upload_status.clone());
    }
    lines.push(format!("Resume: {}", summarize(&view.resume_text)));
    lines.push(format!("Job description: {}", summarize(&view.job_description)));
    lines.push(button_line(view));

    if let Some(error) = &view.analysis_error {
        lines.push(format!("❌ Scoring failed: {error}"));
    }

    if let Some(score) = view.score {
        lines.push(format!("Score: {} {}%", gauge(score), score));
        lines.push(format!(
            "Matched Keywords: {}",
            view.matched_keywords.join(", ")
        ));
        if !view.missing_keywords.is_empty() {
            lines.push(format!(
                "Missing Keywords: {}",
                view.missing_keywords.join(", ")
            ));
        }
        push_list(&mut lines, "Strengths:", &view.strengths);
        push_list(&mut lines, "Weaknesses:", &view.weaknesses);
        push_list(&mut lines, "Suggestions:", &view.suggestions);
    }

    lines
}

fn push_list(lines: &mut Vec<String>, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(heading.to_string());
    lines.extend(items.iter().map(|item| format!("  - {item}")));
}

fn button_line(view: &PanelViewModel) -> String {
    match view.analyze_blocker {
        None => format!("[ {} ]", view.analyze_label),
        Some(blocker) => format!(
            "[ {} ] (disabled: {})",
            view.analyze_label,
            blocker_reason(blocker)
        ),
    }
}

pub fn blocker_reason(blocker: AnalyzeBlocker) -> &'static str {
    match blocker {
        AnalyzeBlocker::RequestInFlight => "waiting for the backend",
        AnalyzeBlocker::MissingResume => "upload a résumé first",
        AnalyzeBlocker::MissingJobDescription => "paste a job description first",
    }
}

fn summarize(text: &str) -> String {
    if text.is_empty() {
        return "(empty)".to_string();
    }
    let count = text.chars().count();
    let mut preview: String = text
        .chars()
        .take(PREVIEW_CHARS)
        .map(|ch| if ch.is_whitespace() { ' ' } else { ch })
        .collect();
    if count > PREVIEW_CHARS {
        preview.push('…');
    }
    format!("{} chars | \"{}\"", format_with_commas(count as u64), preview)
}

/// Text rendition of the score ring; out-of-range scores are clamped for display only.
fn gauge(score: i64) -> String {
    let clamped = score.clamp(0, 100);
    let filled = ((clamped * GAUGE_CELLS + 50) / 100) as usize;
    let empty = GAUGE_CELLS as usize - filled;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(empty))
}

fn format_with_commas(value: u64) -> String {
    let mut out = String::new();
    for (i, ch) in value.to_string().chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}
