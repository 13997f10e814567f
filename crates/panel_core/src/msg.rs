use crate::{AnalysisResult, RequestId, ResumeFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a file in the résumé selector. `None` means the picker was
    /// dismissed without a file.
    FileSelected(Option<ResumeFile>),
    /// User edited the job description box (full replacement text).
    JobDescriptionChanged(String),
    /// User clicked "Check ATS Match".
    AnalyzeClicked,
    /// User asked to clear the panel back to its initial state.
    ResetClicked,
    /// Résumé-parsing endpoint answered (or failed) for `request`.
    UploadFinished {
        request: RequestId,
        outcome: Result<String, String>,
    },
    /// Scoring endpoint answered (or failed) for `request`.
    AnalysisFinished {
        request: RequestId,
        outcome: Result<AnalysisResult, String>,
    },
}
