/// Builds stream URLs of the form `{base}{stream_path}/{playlist}/{filename}`.
///
/// Both path segments are percent-encoded so names with spaces, slashes or
/// non-ASCII characters survive the trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamLocator {
    base_url: String,
    stream_path: String,
}

impl StreamLocator {
    pub fn new(base_url: &str, stream_path: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let trimmed = stream_path.trim_matches('/');
        let stream_path = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        };
        Self {
            base_url,
            stream_path,
        }
    }

    pub fn track_url(&self, playlist: &str, filename: &str) -> String {
        format!(
            "{}{}/{}/{}",
            self.base_url,
            self.stream_path,
            urlencoding::encode(playlist),
            urlencoding::encode(filename)
        )
    }
}
