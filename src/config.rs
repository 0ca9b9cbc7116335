use crate::error::ConfigError;
use std::env;
use std::time::Duration;

/// Signed upload URLs are valid for one minute.
pub const DEFAULT_PRESIGN_EXPIRY_SECS: u64 = 60;

/// How long the success banner stays up before the uploader clears itself.
pub const DEFAULT_RESET_DELAY_MS: u64 = 3000;

/// Static credentials and target of the S3 credential broker.
#[derive(Debug, Clone)]
pub struct S3Config {
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket: String,
    /// S3-compatible endpoint (MinIO, R2, ...). Forces path-style addressing.
    pub endpoint_url: Option<String>,
}

/// Where upload URLs come from.
#[derive(Debug, Clone)]
pub enum BrokerConfig {
    S3(S3Config),
    Remote { url: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub broker: BrokerConfig,
    pub presign_expiry: Duration,
    pub reset_delay: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// When `BROKER_URL` is set the S3 variables are not read at all.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let broker = match lookup("BROKER_URL").filter(|v| !v.trim().is_empty()) {
            Some(url) => BrokerConfig::Remote { url },
            None => BrokerConfig::S3(S3Config {
                region: required("AWS_REGION")?,
                access_key_id: required("AWS_ACCESS_KEY_ID")?,
                secret_access_key: required("AWS_SECRET_ACCESS_KEY")?,
                bucket: required("AWS_BUCKET_NAME")?,
                endpoint_url: lookup("AWS_ENDPOINT_URL").filter(|v| !v.trim().is_empty()),
            }),
        };

        let presign_expiry = Duration::from_secs(parse_or(
            &lookup,
            "PRESIGN_EXPIRY_SECS",
            DEFAULT_PRESIGN_EXPIRY_SECS,
        )?);
        let reset_delay =
            Duration::from_millis(parse_or(&lookup, "RESET_DELAY_MS", DEFAULT_RESET_DELAY_MS)?);

        Ok(Self {
            broker,
            presign_expiry,
            reset_delay,
        })
    }
}

fn parse_or<F>(lookup: &F, key: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn s3_broker_with_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("AWS_REGION", "us-east-1"),
            ("AWS_ACCESS_KEY_ID", "test-key"),
            ("AWS_SECRET_ACCESS_KEY", "test-secret"),
            ("AWS_BUCKET_NAME", "test-bucket"),
        ]))
        .unwrap();

        match config.broker {
            BrokerConfig::S3(s3) => {
                assert_eq!(s3.bucket, "test-bucket");
                assert_eq!(s3.region, "us-east-1");
                assert!(s3.endpoint_url.is_none());
            }
            other => panic!("expected S3 broker, got {:?}", other),
        }
        assert_eq!(config.presign_expiry, Duration::from_secs(60));
        assert_eq!(config.reset_delay, Duration::from_millis(3000));
    }

    #[test]
    fn remote_broker_skips_s3_settings() {
        let config = AppConfig::from_lookup(lookup_from(&[(
            "BROKER_URL",
            "http://localhost:3000/api/upload-url",
        )]))
        .unwrap();

        assert!(matches!(config.broker, BrokerConfig::Remote { .. }));
    }

    #[test]
    fn missing_bucket_is_reported() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("AWS_REGION", "us-east-1"),
            ("AWS_ACCESS_KEY_ID", "test-key"),
            ("AWS_SECRET_ACCESS_KEY", "test-secret"),
        ]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::Missing("AWS_BUCKET_NAME")));
    }

    #[test]
    fn invalid_delay_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("BROKER_URL", "http://localhost:3000"),
            ("RESET_DELAY_MS", "soon"),
        ]))
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "RESET_DELAY_MS",
                ..
            }
        ));
    }
}
