use crate::domain::error::DocError;
use crate::domain::model::CompletedJob;
use crate::domain::traits::{ensure_same_endpoint, ApiRequest, Payload, Transport};
use reqwest::Method;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Download the translated document of a finished job.
pub async fn fetch(
    transport: &dyn Transport,
    completed: &CompletedJob,
    api_key: &str,
) -> Result<Vec<u8>, DocError> {
    let handle = completed.handle();
    ensure_same_endpoint(transport, handle)?;

    let request = ApiRequest::new(
        Method::POST,
        format!("document/{}/result", handle.document_id),
        Payload::Query(vec![
            ("auth_key".to_string(), api_key.to_string()),
            ("document_key".to_string(), handle.document_key.clone()),
        ]),
    );
    let bytes = transport.send(request).await?;
    if bytes.is_empty() {
        return Err(DocError::ProtocolViolation(format!(
            "result for document {} is empty",
            handle.document_id
        )));
    }
    debug!(document_id = %handle.document_id, bytes = bytes.len(), "result downloaded");
    Ok(bytes)
}

/// Write `bytes` to `path`, replacing any existing file.
///
/// The data goes to a sibling temp file first and is renamed into place, so
/// `path` holds either the old content or the complete new one.
pub async fn persist(path: &Path, bytes: &[u8]) -> Result<(), DocError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let tmp = temp_path(path);
    let written = async {
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.sync_all().await?;
        tokio::fs::rename(&tmp, path).await
    }
    .await;

    if let Err(e) = written {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(DocError::Io(e));
    }

    info!(path = %path.display(), bytes = bytes.len(), "translated document written");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    path.with_file_name(format!(".{}.part", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn persist_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("doc.de.html");
        std::fs::write(&out, b"old content that is longer").unwrap();

        persist(&out, b"new").await.unwrap();

        assert_eq!(std::fs::read(&out).unwrap(), b"new");
        assert!(!temp_path(&out).exists());
    }

    #[tokio::test]
    async fn persist_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("out.docx");

        persist(&out, &[0x50, 0x4B]).await.unwrap();

        assert_eq!(std::fs::read(&out).unwrap(), vec![0x50, 0x4B]);
    }
}
