use panel_logging::{panel_info, panel_warn};

use crate::http::{build_client, endpoint, map_reqwest_error, read_json};
use crate::wire::{ScoreRequestBody, ScoreResponseBody};
use crate::{ClientError, ClientSettings, RequestId, ScoreReport};

pub const SCORE_PATH: &str = "/score-keywords";

#[async_trait::async_trait]
pub trait ScoringClient: Send + Sync {
    async fn score(
        &self,
        request: RequestId,
        resume: &str,
        jobdesc: &str,
    ) -> Result<ScoreReport, ClientError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestScoringClient {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestScoringClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        let client = build_client(&settings)?;
        Ok(Self { settings, client })
    }
}

#[async_trait::async_trait]
impl ScoringClient for ReqwestScoringClient {
    async fn score(
        &self,
        request: RequestId,
        resume: &str,
        jobdesc: &str,
    ) -> Result<ScoreReport, ClientError> {
        let url = endpoint(&self.settings, SCORE_PATH)?;
        panel_info!(
            "Score request={} resume_len={} jobdesc_len={} url={}",
            request,
            resume.len(),
            jobdesc.len(),
            url
        );

        let response = self
            .client
            .post(url)
            .json(&ScoreRequestBody { resume, jobdesc })
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let report = read_json::<ScoreResponseBody>(response, self.settings.max_response_bytes)
            .await
            .and_then(ScoreReport::try_from)
            .inspect_err(|err| panel_warn!("Score request={} failed: {}", request, err))?;
        panel_info!(
            "Score request={} score={} matched={}",
            request,
            report.score,
            report.matched_keywords.len()
        );
        Ok(report)
    }
}
