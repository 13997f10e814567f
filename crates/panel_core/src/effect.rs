use crate::{AnalysisRequest, RequestId, ResumeFile};

/// Side effects requested by [`crate::update`]; executed by the front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the file to the résumé-parsing endpoint.
    UploadResume { request: RequestId, file: ResumeFile },
    /// Send résumé text and job description to the scoring endpoint.
    ScoreResume {
        request: RequestId,
        payload: AnalysisRequest,
    },
}
