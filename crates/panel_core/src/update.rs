use panel_logging::{panel_debug, panel_info};

use crate::{Effect, Msg, PanelState, PhaseKind};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: PanelState, msg: Msg) -> (PanelState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileSelected(None) => {
            state.reject_file();
            Vec::new()
        }
        Msg::FileSelected(Some(file)) => {
            if !file.is_pdf() {
                panel_info!("Rejected résumé file {:?}", file.file_name());
                state.reject_file();
                return (state, Vec::new());
            }
            // An analysis is bound to the résumé it was issued with; a new
            // upload has to wait until it resolves.
            if state.phase().kind() == PhaseKind::Analyzing {
                panel_debug!("File selection deferred while analyzing");
                state.defer_upload();
                return (state, Vec::new());
            }
            let request = state.begin_upload();
            vec![Effect::UploadResume { request, file }]
        }
        Msg::JobDescriptionChanged(text) => {
            state.set_job_description(text);
            Vec::new()
        }
        Msg::AnalyzeClicked => {
            if let Some(blocker) = state.analyze_blocker() {
                panel_debug!("Analyze ignored: {:?}", blocker);
                return (state, Vec::new());
            }
            let (request, payload) = state.begin_analysis();
            vec![Effect::ScoreResume { request, payload }]
        }
        Msg::ResetClicked => {
            state.reset();
            Vec::new()
        }
        Msg::UploadFinished { request, outcome } => {
            state.apply_upload(request, outcome);
            Vec::new()
        }
        Msg::AnalysisFinished { request, outcome } => {
            state.apply_analysis(request, outcome);
            Vec::new()
        }
    };

    (state, effects)
}
