use crate::{AnalyzeBlocker, PhaseKind};

pub const ANALYZE_LABEL: &str = "Check ATS Match";
pub const SCORING_LABEL: &str = "Scoring...";

/// Everything a renderer needs, detached from the state machine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PanelViewModel {
    pub phase: PhaseKind,
    pub resume_text: String,
    pub job_description: String,
    pub score: Option<i64>,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
    pub is_loading: bool,
    pub upload_status: String,
    pub analysis_error: Option<String>,
    pub analyze_blocker: Option<AnalyzeBlocker>,
    pub analyze_label: &'static str,
    pub dirty: bool,
}

impl PanelViewModel {
    pub fn can_analyze(&self) -> bool {
        self.analyze_blocker.is_none()
    }
}
