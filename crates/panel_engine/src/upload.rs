use std::path::Path;

use panel_logging::{panel_info, panel_warn};
use reqwest::multipart::{Form, Part};

use crate::http::{build_client, endpoint, map_reqwest_error, read_json, too_large};
use crate::wire::UploadResponseBody;
use crate::{ClientError, ClientSettings, FailureKind, ParsedResume, RequestId};

pub const UPLOAD_PATH: &str = "/upload/resume";
/// Multipart field name the parsing endpoint reads the file from.
pub const RESUME_FIELD: &str = "resume";
const PDF_MIME: &str = "application/pdf";

/// Same rule the panel applies to the picker: the file name must end in `.pdf`.
/// The engine does not depend on the panel core, so callers that skip the
/// picker still cannot send anything else to the parsing endpoint.
pub fn is_pdf_path(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().ends_with(".pdf"))
        .unwrap_or(false)
}

#[async_trait::async_trait]
pub trait UploadClient: Send + Sync {
    async fn upload(&self, request: RequestId, path: &Path) -> Result<ParsedResume, ClientError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestUploadClient {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestUploadClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        let client = build_client(&settings)?;
        Ok(Self { settings, client })
    }
}

#[async_trait::async_trait]
impl UploadClient for ReqwestUploadClient {
    async fn upload(&self, request: RequestId, path: &Path) -> Result<ParsedResume, ClientError> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !is_pdf_path(path) {
            return Err(ClientError::new(FailureKind::InvalidFileType, file_name));
        }

        let url = endpoint(&self.settings, UPLOAD_PATH)?;
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|err| ClientError::new(FailureKind::FileRead, err.to_string()))?;
        if bytes.len() as u64 > self.settings.max_upload_bytes {
            return Err(too_large(self.settings.max_upload_bytes, bytes.len() as u64));
        }

        panel_info!(
            "Upload request={} file={:?} bytes={} url={}",
            request,
            file_name,
            bytes.len(),
            url
        );

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(PDF_MIME)
            .map_err(map_reqwest_error)?;
        let form = Form::new().part(RESUME_FIELD, part);
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let body: UploadResponseBody = read_json(response, self.settings.max_response_bytes)
            .await
            .inspect_err(|err| panel_warn!("Upload request={} failed: {}", request, err))?;
        Ok(body.into())
    }
}
