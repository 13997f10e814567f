use std::sync::Once;

use panel_core::{
    update, AnalysisRequest, AnalysisResult, AnalyzeBlocker, Effect, Msg, PanelState, PhaseKind,
    ResumeFile, UploadStatus, ANALYZE_LABEL, BUSY_MESSAGE, PARSED_MESSAGE, REJECTED_FILE_MESSAGE,
    SCORING_LABEL,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(panel_logging::initialize_for_tests);
}

/// Uploads `resume_text` as request 1 and sets the job description.
fn ready(resume_text: &str, job_description: &str) -> PanelState {
    let (state, _) = update(
        PanelState::new(),
        Msg::FileSelected(Some(ResumeFile::new("resume.pdf"))),
    );
    let (state, _) = update(
        state,
        Msg::UploadFinished {
            request: 1,
            outcome: Ok(resume_text.to_string()),
        },
    );
    let (state, _) = update(
        state,
        Msg::JobDescriptionChanged(job_description.to_string()),
    );
    state
}

fn scored(score: i64, keywords: &[&str]) -> AnalysisResult {
    AnalysisResult {
        score,
        matched_keywords: keywords.iter().map(|k| k.to_string()).collect(),
        ..AnalysisResult::default()
    }
}

#[test]
fn analyze_emits_score_effect_and_loads() {
    init_logging();
    let (state, effects) = update(ready("X", "Y"), Msg::AnalyzeClicked);

    assert_eq!(
        effects,
        vec![Effect::ScoreResume {
            request: 2,
            payload: AnalysisRequest {
                resume_text: "X".to_string(),
                job_description: "Y".to_string(),
            },
        }]
    );
    let view = state.view();
    assert!(view.is_loading);
    assert_eq!(view.score, None);
    assert!(view.matched_keywords.is_empty());
    assert_eq!(view.analyze_label, SCORING_LABEL);
    assert_eq!(view.analyze_blocker, Some(AnalyzeBlocker::RequestInFlight));
}

#[test]
fn scoring_response_is_stored_exactly() {
    init_logging();
    let (state, _) = update(ready("X", "Y"), Msg::AnalyzeClicked);
    let (state, effects) = update(
        state,
        Msg::AnalysisFinished {
            request: 2,
            outcome: Ok(scored(82, &["python", "sql"])),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.score(), Some(82));
    assert_eq!(state.matched_keywords(), ["python", "sql"]);
    assert!(!state.is_loading());
    assert_eq!(state.phase().kind(), PhaseKind::Scored);
    assert_eq!(state.view().analyze_label, ANALYZE_LABEL);
}

#[test]
fn out_of_range_scores_are_not_validated() {
    init_logging();
    let (state, _) = update(ready("X", "Y"), Msg::AnalyzeClicked);
    let (state, _) = update(
        state,
        Msg::AnalysisFinished {
            request: 2,
            outcome: Ok(scored(140, &[])),
        },
    );

    assert_eq!(state.score(), Some(140));
}

#[test]
fn analyze_is_blocked_without_inputs() {
    init_logging();
    let (state, effects) = update(PanelState::new(), Msg::AnalyzeClicked);
    assert!(effects.is_empty());
    assert_eq!(state.analyze_blocker(), Some(AnalyzeBlocker::MissingResume));

    let (state, _) = update(state, Msg::JobDescriptionChanged("Y".to_string()));
    let (state, effects) = update(state, Msg::AnalyzeClicked);
    assert!(effects.is_empty());
    assert_eq!(state.analyze_blocker(), Some(AnalyzeBlocker::MissingResume));

    let state = ready("X", "");
    let (state, effects) = update(state, Msg::AnalyzeClicked);
    assert!(effects.is_empty());
    assert_eq!(
        state.analyze_blocker(),
        Some(AnalyzeBlocker::MissingJobDescription)
    );
    assert_eq!(state.phase().kind(), PhaseKind::Uploaded);
}

#[test]
fn second_analyze_while_loading_is_ignored() {
    init_logging();
    let (state, _) = update(ready("X", "Y"), Msg::AnalyzeClicked);
    let (state, effects) = update(state, Msg::AnalyzeClicked);

    assert!(effects.is_empty());
    assert!(state.is_loading());
}

#[test]
fn analyze_is_blocked_while_uploading() {
    init_logging();
    let state = ready("X", "Y");
    let (state, _) = update(
        state,
        Msg::FileSelected(Some(ResumeFile::new("other.pdf"))),
    );
    let (state, effects) = update(state, Msg::AnalyzeClicked);

    assert!(effects.is_empty());
    assert_eq!(state.analyze_blocker(), Some(AnalyzeBlocker::RequestInFlight));
}

#[test]
fn job_description_edits_are_accepted_while_loading() {
    init_logging();
    let (state, _) = update(ready("X", "Y"), Msg::AnalyzeClicked);
    let (mut state, _) = update(state, Msg::JobDescriptionChanged("Y2".to_string()));

    assert_eq!(state.job_description(), "Y2");
    assert!(state.is_loading());
    assert!(state.consume_dirty());
}

#[test]
fn file_selection_is_deferred_while_analyzing() {
    init_logging();
    let (mut state, _) = update(ready("X", "Y"), Msg::AnalyzeClicked);
    state.consume_dirty();
    let (mut state, effects) = update(
        state,
        Msg::FileSelected(Some(ResumeFile::new("other.pdf"))),
    );

    assert!(effects.is_empty());
    assert!(state.is_loading());
    assert!(state.consume_dirty());
    assert_eq!(state.upload_status(), &UploadStatus::Busy);
    assert_eq!(state.view().upload_status, BUSY_MESSAGE);
    assert_eq!(state.resume_text(), "X");

    // Once the analysis settles the panel goes back to the parsed notice.
    let (state, _) = update(
        state,
        Msg::AnalysisFinished {
            request: 2,
            outcome: Ok(scored(82, &["python"])),
        },
    );
    assert_eq!(state.upload_status(), &UploadStatus::Parsed);
    assert_eq!(state.view().upload_status, PARSED_MESSAGE);
}

#[test]
fn non_pdf_selection_is_rejected_while_analyzing() {
    init_logging();
    let (state, _) = update(ready("X", "Y"), Msg::AnalyzeClicked);
    let (state, effects) = update(
        state,
        Msg::FileSelected(Some(ResumeFile::new("resume.docx"))),
    );

    assert!(effects.is_empty());
    assert!(state.is_loading());
    assert_eq!(state.upload_status(), &UploadStatus::Rejected);
    assert_eq!(state.view().upload_status, REJECTED_FILE_MESSAGE);
    assert_eq!(state.resume_text(), "X");
}

#[test]
fn scoring_failure_resets_loading_and_reports() {
    init_logging();
    let (state, _) = update(ready("X", "Y"), Msg::AnalyzeClicked);
    let (state, _) = update(
        state,
        Msg::AnalysisFinished {
            request: 2,
            outcome: Err("http status 500: Missing input".to_string()),
        },
    );

    let view = state.view();
    assert!(!view.is_loading);
    assert_eq!(view.score, None);
    assert_eq!(view.phase, PhaseKind::Uploaded);
    assert_eq!(
        view.analysis_error.as_deref(),
        Some("http status 500: Missing input")
    );
    assert!(view.can_analyze());

    // A fresh attempt clears the previous error.
    let (state, _) = update(state, Msg::AnalyzeClicked);
    assert_eq!(state.analysis_error(), None);
}

#[test]
fn reanalyze_clears_previous_score() {
    init_logging();
    let (state, _) = update(ready("X", "Y"), Msg::AnalyzeClicked);
    let (state, _) = update(
        state,
        Msg::AnalysisFinished {
            request: 2,
            outcome: Ok(scored(40, &["go"])),
        },
    );
    let (state, effects) = update(state, Msg::AnalyzeClicked);

    assert_eq!(effects.len(), 1);
    assert_eq!(state.score(), None);
    assert!(state.matched_keywords().is_empty());
}

#[test]
fn repeated_analysis_with_same_response_is_idempotent() {
    init_logging();
    let run = |state: PanelState, request| {
        let (state, _) = update(state, Msg::AnalyzeClicked);
        let (state, _) = update(
            state,
            Msg::AnalysisFinished {
                request,
                outcome: Ok(scored(82, &["python", "sql"])),
            },
        );
        state
    };

    let once = run(ready("X", "Y"), 2);
    let twice = run(once.clone(), 3);

    let mut first = once.view();
    let mut second = twice.view();
    first.dirty = false;
    second.dirty = false;
    assert_eq!(first, second);
}

#[test]
fn feedback_lists_are_exposed_in_view() {
    init_logging();
    let (state, _) = update(ready("X", "Y"), Msg::AnalyzeClicked);
    let (state, _) = update(
        state,
        Msg::AnalysisFinished {
            request: 2,
            outcome: Ok(AnalysisResult {
                score: 55,
                matched_keywords: vec!["rust".to_string()],
                missing_keywords: vec!["kubernetes".to_string()],
                strengths: vec!["Clear summary".to_string()],
                weaknesses: vec!["No metrics".to_string()],
                suggestions: vec!["Add a skills section".to_string()],
            }),
        },
    );

    let view = state.view();
    assert_eq!(view.missing_keywords, vec!["kubernetes".to_string()]);
    assert_eq!(view.strengths, vec!["Clear summary".to_string()]);
    assert_eq!(view.weaknesses, vec!["No metrics".to_string()]);
    assert_eq!(view.suggestions, vec!["Add a skills section".to_string()]);
}
