use crate::core::client::BitlyClient;
use crate::core::{parser, token, ConfigProvider, ExpandReport, OutputRow, ShortLinkRecord, Storage};
use crate::domain::ports::ExpandMode;
use crate::utils::error::{ExpandError, Result};

pub struct ExpandPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ExpandPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

fn render_csv(rows: &[OutputRow]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    for row in rows {
        writer.write_record([row.raw.as_str(), row.link.as_str(), row.long_url.as_str()])?;
    }
    writer.flush()?;
    let bytes = writer
        .into_inner()
        .map_err(|_| ExpandError::ProcessingError {
            message: "failed to finalize the CSV buffer".to_string(),
        })?;
    String::from_utf8(bytes).map_err(|_| ExpandError::ProcessingError {
        message: "CSV output is not valid UTF-8".to_string(),
    })
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> crate::core::Pipeline for ExpandPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<ShortLinkRecord>> {
        let path = self.config.input_path();
        let bytes = self.storage.read_file(path).await?;
        let text = String::from_utf8(bytes).map_err(|_| ExpandError::ProcessingError {
            message: format!("input file {} is not valid UTF-8", path),
        })?;

        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        let relevant = parser::filter_relevant(&lines, self.config.marker());
        tracing::debug!(
            "{} of {} input lines contain marker {:?}",
            relevant.len(),
            lines.len(),
            self.config.marker()
        );

        // A relevant line that fails to parse aborts the run; there is no
        // partial-success mode.
        relevant
            .into_iter()
            .map(|line| parser::parse_record(line))
            .collect()
    }

    async fn transform(&self, records: Vec<ShortLinkRecord>) -> Result<ExpandReport> {
        // Resolve the credential before touching the network so a missing
        // token never costs a remote call.
        let token = token::resolve_token(self.config.token_env(), self.config.token_file())?;

        let hashes: Vec<String> = records.iter().map(|r| r.hash.clone()).collect();
        let client = BitlyClient::new(
            self.config.api_url(),
            token,
            self.config.batch_size(),
            self.config.politeness(),
        );

        let urls = match self.config.mode() {
            ExpandMode::Batch => client.expand_all(&hashes).await?,
            ExpandMode::Single => client.expand_each(&hashes).await?,
        };

        // Pairing is positional; the client guarantees one result per hash.
        let rows: Vec<OutputRow> = records
            .into_iter()
            .zip(urls)
            .map(|(record, long_url)| OutputRow {
                raw: record.raw,
                link: record.link,
                long_url,
            })
            .collect();

        let csv_output = render_csv(&rows)?;
        Ok(ExpandReport { rows, csv_output })
    }

    async fn load(&self, report: ExpandReport) -> Result<String> {
        let output_path = format!(
            "{}/{}",
            self.config.output_path().trim_end_matches('/'),
            self.config.output_file()
        );
        self.storage
            .write_file(&output_path, report.csv_output.as_bytes())
            .await?;
        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Pipeline;
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put_file(&self, path: &str, data: &[u8]) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files
                .get(path)
                .cloned()
                .ok_or_else(|| ExpandError::InputNotFound {
                    path: path.to_string(),
                })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        api_url: String,
        token_env: String,
        token_file: String,
        mode: ExpandMode,
    }

    impl MockConfig {
        fn new(api_url: String, token_env: &str) -> Self {
            Self {
                api_url,
                token_env: token_env.to_string(),
                token_file: "/nonexistent/token/file".to_string(),
                mode: ExpandMode::Batch,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn input_path(&self) -> &str {
            "input/shortened_links"
        }

        fn output_path(&self) -> &str {
            "output"
        }

        fn output_file(&self) -> &str {
            "bitly_expansions.csv"
        }

        fn api_url(&self) -> &str {
            &self.api_url
        }

        fn marker(&self) -> &str {
            "bit.ly"
        }

        fn token_env(&self) -> &str {
            &self.token_env
        }

        fn token_file(&self) -> &str {
            &self.token_file
        }

        fn mode(&self) -> ExpandMode {
            self.mode
        }

        fn batch_size(&self) -> usize {
            15
        }

        fn politeness(&self) -> Duration {
            Duration::ZERO
        }
    }

    #[tokio::test]
    async fn extract_filters_and_parses_relevant_lines() {
        let storage = MockStorage::new();
        storage
            .put_file(
                "input/shortened_links",
                b"http,bit.ly,/abc123,2024-01-01\nnot-a-bitly-line\nhttps,bit.ly,/def456,note\n",
            )
            .await;
        let config = MockConfig::new("http://unused.test".to_string(), "PIPE_TEST_UNSET_ENV_1");
        let pipeline = ExpandPipeline::new(storage, config);

        let records = pipeline.extract().await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].hash, "abc123");
        assert_eq!(records[0].link, "http://bit.ly/abc123");
        assert_eq!(records[1].hash, "def456");
        assert_eq!(records[1].raw, "https,bit.ly,/def456,note");
    }

    #[tokio::test]
    async fn extract_missing_input_is_input_not_found() {
        let storage = MockStorage::new();
        let config = MockConfig::new("http://unused.test".to_string(), "PIPE_TEST_UNSET_ENV_2");
        let pipeline = ExpandPipeline::new(storage, config);

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, ExpandError::InputNotFound { .. }));
    }

    #[tokio::test]
    async fn extract_malformed_relevant_line_aborts() {
        let storage = MockStorage::new();
        storage
            .put_file("input/shortened_links", b"bit.ly without any shape\n")
            .await;
        let config = MockConfig::new("http://unused.test".to_string(), "PIPE_TEST_UNSET_ENV_3");
        let pipeline = ExpandPipeline::new(storage, config);

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, ExpandError::MalformedRecord { .. }));
    }

    #[tokio::test]
    async fn transform_zips_records_with_results_in_order() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/v3/expand").query_param("hash", "abc123");
            then.status(200).json_body(serde_json::json!({
                "data": { "expand": [
                    { "hash": "abc123", "long_url": "https://example.com/long-a" },
                    { "hash": "def456", "long_url": "https://example.com/long-b" }
                ]}
            }));
        });

        let env_var = "PIPE_TEST_TOKEN_TRANSFORM";
        std::env::set_var(env_var, "test-token");

        let config = MockConfig::new(server.base_url(), env_var);
        let pipeline = ExpandPipeline::new(MockStorage::new(), config);

        let records = vec![
            ShortLinkRecord {
                raw: "http,bit.ly,/abc123,2024-01-01".to_string(),
                hash: "abc123".to_string(),
                link: "http://bit.ly/abc123".to_string(),
            },
            ShortLinkRecord {
                raw: "https,bit.ly,/def456,note".to_string(),
                hash: "def456".to_string(),
                link: "https://bit.ly/def456".to_string(),
            },
        ];

        let report = pipeline.transform(records).await.unwrap();
        std::env::remove_var(env_var);

        api_mock.assert();
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].long_url, "https://example.com/long-a");
        assert_eq!(report.rows[1].long_url, "https://example.com/long-b");
        assert_eq!(report.rows[0].link, "http://bit.ly/abc123");

        // Raw lines contain commas, so every raw field is quoted.
        let first_line = report.csv_output.lines().next().unwrap();
        assert_eq!(
            first_line,
            "\"http,bit.ly,/abc123,2024-01-01\",http://bit.ly/abc123,https://example.com/long-a"
        );
    }

    #[tokio::test]
    async fn transform_without_credential_makes_no_network_call() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/v3/expand");
            then.status(200).body("");
        });

        let config = MockConfig::new(server.base_url(), "PIPE_TEST_UNSET_ENV_4");
        let pipeline = ExpandPipeline::new(MockStorage::new(), config);

        let records = vec![ShortLinkRecord {
            raw: "http,bit.ly,/abc123,2024-01-01".to_string(),
            hash: "abc123".to_string(),
            link: "http://bit.ly/abc123".to_string(),
        }];

        let err = pipeline.transform(records).await.unwrap_err();
        assert!(matches!(err, ExpandError::MissingCredential));
        api_mock.assert_hits(0);
    }

    #[tokio::test]
    async fn transform_empty_records_yields_empty_report() {
        let env_var = "PIPE_TEST_TOKEN_EMPTY";
        std::env::set_var(env_var, "test-token");

        let config = MockConfig::new("http://unused.test".to_string(), env_var);
        let pipeline = ExpandPipeline::new(MockStorage::new(), config);

        let report = pipeline.transform(vec![]).await.unwrap();
        std::env::remove_var(env_var);

        assert!(report.rows.is_empty());
        assert!(report.csv_output.is_empty());
    }

    #[tokio::test]
    async fn load_writes_csv_to_output_path() {
        let storage = MockStorage::new();
        let config = MockConfig::new("http://unused.test".to_string(), "PIPE_TEST_UNSET_ENV_5");
        let pipeline = ExpandPipeline::new(storage.clone(), config);

        let report = ExpandReport {
            rows: vec![],
            csv_output: "\"a,b\",link,url\n".to_string(),
        };

        let path = pipeline.load(report).await.unwrap();
        assert_eq!(path, "output/bitly_expansions.csv");

        let written = storage.get_file("output/bitly_expansions.csv").await.unwrap();
        assert_eq!(written, b"\"a,b\",link,url\n");
    }

    #[test]
    fn render_csv_escapes_quotes_by_doubling() {
        let rows = vec![OutputRow {
            raw: "say \"hi\",bit.ly,/x".to_string(),
            link: "say \"hi\"://bit.ly/x".to_string(),
            long_url: "https://example.com/plain".to_string(),
        }];

        let csv = render_csv(&rows).unwrap();
        assert_eq!(
            csv,
            "\"say \"\"hi\"\",bit.ly,/x\",\"say \"\"hi\"\"://bit.ly/x\",https://example.com/plain\n"
        );
    }

    #[test]
    fn render_csv_of_no_rows_is_empty() {
        assert!(render_csv(&[]).unwrap().is_empty());
    }
}
