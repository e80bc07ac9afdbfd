use crate::config::DataSource;
use std::time::Duration;
use theft_dashboard_core::{resolve, DataOrigin, LoadError, LoadOutcome};
use tracing::{debug, info, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches the raw document: one attempt, no retries.
pub async fn fetch(source: &DataSource) -> Result<Vec<u8>, LoadError> {
    match source {
        DataSource::Http(url) => fetch_http(url).await,
        DataSource::File(path) => tokio::fs::read(path)
            .await
            .map_err(|e| LoadError::Transport(format!("{}: {e}", path.display()))),
    }
}

async fn fetch_http(url: &str) -> Result<Vec<u8>, LoadError> {
    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(transport)?;

    let response = client.get(url).send().await.map_err(transport)?;
    let status = response.status();
    debug!(%url, status = status.as_u16(), "received response");

    if !status.is_success() {
        return Err(LoadError::Status {
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await.map_err(transport)?;
    Ok(body.to_vec())
}

fn transport(error: reqwest::Error) -> LoadError {
    LoadError::Transport(error.to_string())
}

/// Loads the dashboard dataset, substituting the sample dataset when the
/// source is unavailable or malformed.
pub async fn load(source: &DataSource) -> LoadOutcome {
    info!(%source, "loading dashboard data");
    let outcome = resolve(fetch(source).await);

    match &outcome.origin {
        DataOrigin::Remote => info!(%source, "dashboard data loaded"),
        DataOrigin::Fallback { reason, detail } => {
            warn!(%source, reason = reason.as_str(), %detail, "using sample data");
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use theft_dashboard_core::{sample_dataset, FallbackReason};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answers exactly one request with `response` and returns the URL.
    async fn serve_once(response: String) -> std::io::Result<String> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buffer = [0_u8; 4096];
                let _ = socket.read(&mut buffer).await;
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        Ok(format!("http://{addr}/dashboard_data.json"))
    }

    fn http_response(status_line: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    #[tokio::test]
    async fn server_error_uses_sample_data() -> Result<(), Box<dyn std::error::Error>> {
        let url = serve_once(http_response("500 Internal Server Error", "")).await?;

        let outcome = load(&DataSource::Http(url)).await;
        assert!(outcome.is_fallback());
        assert_eq!(outcome.fallback_reason(), Some(FallbackReason::HttpError));
        assert_eq!(outcome.dataset.key_metrics.total_thefts, 4553);
        assert_eq!(outcome.dataset, sample_dataset());
        Ok(())
    }

    #[tokio::test]
    async fn successful_response_is_adopted() -> Result<(), Box<dyn std::error::Error>> {
        let mut dataset = sample_dataset();
        dataset.key_metrics.total_thefts = 5120;
        let body = serde_json::to_string(&dataset)?;
        let url = serve_once(http_response("200 OK", &body)).await?;

        let outcome = load(&DataSource::Http(url)).await;
        assert!(!outcome.is_fallback());
        assert_eq!(outcome.dataset.key_metrics.total_thefts, 5120);
        Ok(())
    }

    #[tokio::test]
    async fn html_body_is_parse_error() -> Result<(), Box<dyn std::error::Error>> {
        let url = serve_once(http_response("200 OK", "<!doctype html><p>index</p>")).await?;

        let outcome = load(&DataSource::Http(url)).await;
        assert_eq!(outcome.fallback_reason(), Some(FallbackReason::ParseError));
        Ok(())
    }

    #[tokio::test]
    async fn reads_document_from_disk() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::NamedTempFile::new()?;
        let mut dataset = sample_dataset();
        dataset.last_updated = "September 2026".to_string();
        file.write_all(serde_json::to_string(&dataset)?.as_bytes())?;

        let outcome = load(&DataSource::File(file.path().to_path_buf())).await;
        assert!(!outcome.is_fallback());
        assert_eq!(outcome.dataset.last_updated, "September 2026");
        Ok(())
    }

    #[tokio::test]
    async fn missing_file_uses_sample_data() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let source = DataSource::File(dir.path().join("dashboard_data.json"));

        let outcome = load(&source).await;
        assert_eq!(outcome.fallback_reason(), Some(FallbackReason::HttpError));
        assert_eq!(outcome.dataset, sample_dataset());
        Ok(())
    }

    #[tokio::test]
    async fn every_load_fetches_again() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"not json")?;
        let source = DataSource::File(file.path().to_path_buf());
        assert!(load(&source).await.is_fallback());

        std::fs::write(file.path(), serde_json::to_vec(&sample_dataset())?)?;
        assert!(!load(&source).await.is_fallback());
        Ok(())
    }
}
