use crate::domain::error::DocError;
use crate::domain::model::{JobHandle, TranslationJob};
use crate::domain::traits::{send_json, ApiRequest, FormField, Payload, Transport};
use reqwest::Method;
use serde::Deserialize;
use tracing::{debug, info, warn};

#[derive(Deserialize)]
struct SubmitResponse {
    document_id: String,
    document_key: String,
}

/// Upload the source document and obtain its handle.
///
/// All local checks run before anything is sent, so a bad file or missing
/// credential never results in a partial upload.
pub async fn submit(
    transport: &dyn Transport,
    job: &TranslationJob,
    api_key: &str,
    formality_supported: bool,
) -> Result<JobHandle, DocError> {
    if api_key.trim().is_empty() {
        return Err(DocError::InvalidInput("API key is empty".to_string()));
    }
    let target_lang = job.target_lang.trim();
    if target_lang.is_empty() {
        return Err(DocError::InvalidInput(
            "Target language must not be empty".to_string(),
        ));
    }
    if transport.endpoint() != &job.endpoint {
        return Err(DocError::InvalidInput(format!(
            "Job targets {} but transport is bound to {}",
            job.endpoint.base_url,
            transport.endpoint().base_url
        )));
    }

    let bytes = tokio::fs::read(&job.source_file).await.map_err(|e| {
        DocError::InvalidInput(format!(
            "Cannot read input file {}: {}",
            job.source_file.display(),
            e
        ))
    })?;
    if bytes.is_empty() {
        return Err(DocError::InvalidInput(format!(
            "Input file {} is empty",
            job.source_file.display()
        )));
    }

    let filename = job
        .source_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            DocError::InvalidInput(format!(
                "Input path {} has no file name",
                job.source_file.display()
            ))
        })?;

    let size = bytes.len();
    let mut fields = vec![
        FormField::File {
            name: "file".to_string(),
            filename: filename.clone(),
            bytes,
        },
        FormField::text("filename", filename.as_str()),
        FormField::text("auth_key", api_key),
        FormField::text("target_lang", target_lang),
        FormField::text("split_sentences", "0"),
    ];
    if let Some(source) = job.effective_source_lang() {
        fields.push(FormField::text("source_lang", source));
    }
    match job.formality {
        Some(formality) if formality_supported => {
            fields.push(FormField::text("formality", formality.as_str()));
        }
        Some(formality) => {
            warn!(
                formality = formality.as_str(),
                "endpoint does not accept a formality hint, sending without it"
            );
        }
        None => {}
    }

    info!(file = %filename, bytes = size, target_lang, "uploading document");
    let request = ApiRequest::new(Method::POST, "document", Payload::Multipart(fields));
    let response: SubmitResponse = send_json(transport, request).await?;

    if response.document_id.is_empty() || response.document_key.is_empty() {
        return Err(DocError::ProtocolViolation(
            "submit response carried an empty document_id or document_key".to_string(),
        ));
    }
    debug!(document_id = %response.document_id, "document accepted");

    Ok(JobHandle {
        document_id: response.document_id,
        document_key: response.document_key,
        endpoint: job.endpoint.clone(),
    })
}
