//! File exports.

use pulse_types::{ClientError, ExportFile, ExportFormat, ExportKind, ExportParams};
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE, HeaderName};

use crate::client::PulseClient;
use crate::error::map_reqwest_error;

impl PulseClient {
    /// Download `kind` as `format`.
    ///
    /// Pairs the backend does not serve fail with
    /// [`ClientError::UnsupportedExport`] before any request is sent.
    pub async fn export(
        &self,
        kind: ExportKind,
        format: ExportFormat,
        params: &ExportParams,
    ) -> Result<ExportFile, ClientError> {
        let path = kind
            .endpoint(format)
            .ok_or_else(|| ClientError::UnsupportedExport {
                kind: kind.as_str().to_string(),
                format: format.extension().to_string(),
            })?;
        let url = self.url(path);
        tracing::debug!(url = %url, kind = kind.as_str(), "exporting");

        let response = self.send(self.http.get(&url).query(params)).await?;
        let header = |name: HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let content_type = header(CONTENT_TYPE);
        let filename = header(CONTENT_DISPOSITION)
            .as_deref()
            .and_then(disposition_filename)
            .unwrap_or_else(|| format!("{}_export.{}", kind.as_str(), format.extension()));
        let bytes = response
            .bytes()
            .await
            .map_err(|e| map_reqwest_error(e, self.timeout))?;

        Ok(ExportFile {
            bytes: bytes.to_vec(),
            content_type,
            filename,
        })
    }
}

/// The `filename` parameter of a `Content-Disposition` header.
///
/// Accepts quoted and bare values. Path components are stripped so the
/// result is safe to join onto a directory.
pub(crate) fn disposition_filename(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| {
            let (key, value) = part.split_once('=')?;
            key.trim().eq_ignore_ascii_case("filename").then_some(value)
        })
        .map(|value| value.trim().trim_matches('"'))
        .and_then(|name| name.rsplit(['/', '\\']).next())
        .filter(|name| !name.is_empty() && *name != "..")
        .map(str::to_string)
}
