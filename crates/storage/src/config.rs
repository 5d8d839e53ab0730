/// Which object storage backend to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    S3(S3Config),
}

/// S3 connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible services (MinIO, R2, ...).
    pub endpoint: Option<String>,
    /// Static credentials. When absent the default AWS provider chain is used.
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

/// Storage configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Base URL that public object URLs are built from.
    pub public_base_url: String,
}

impl StorageConfig {
    /// Load storage configuration from environment variables.
    ///
    /// | Env Var                | Default                          |
    /// |------------------------|----------------------------------|
    /// | `STORAGE_BACKEND`      | `memory` (`s3` to use S3)        |
    /// | `S3_BUCKET`            | required when backend is `s3`    |
    /// | `S3_REGION`            | `us-east-1`                      |
    /// | `S3_ENDPOINT`          | unset                            |
    /// | `S3_ACCESS_KEY_ID`     | unset                            |
    /// | `S3_SECRET_ACCESS_KEY` | unset                            |
    /// | `STORAGE_PUBLIC_URL`   | derived from bucket and endpoint |
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Panics on invalid settings.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let backend_name = get("STORAGE_BACKEND").unwrap_or_else(|| "memory".into());

        let backend = match backend_name.trim().to_lowercase().as_str() {
            "memory" => StorageBackend::Memory,
            "s3" => StorageBackend::S3(S3Config {
                bucket: get("S3_BUCKET").expect("S3_BUCKET must be set when STORAGE_BACKEND=s3"),
                region: get("S3_REGION").unwrap_or_else(|| "us-east-1".into()),
                endpoint: get("S3_ENDPOINT").filter(|s| !s.is_empty()),
                access_key_id: get("S3_ACCESS_KEY_ID").filter(|s| !s.is_empty()),
                secret_access_key: get("S3_SECRET_ACCESS_KEY").filter(|s| !s.is_empty()),
            }),
            other => panic!("STORAGE_BACKEND must be 'memory' or 's3', got '{other}'"),
        };

        let public_base_url = get("STORAGE_PUBLIC_URL")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| default_public_url(&backend));

        Self {
            backend,
            public_base_url,
        }
    }
}

fn default_public_url(backend: &StorageBackend) -> String {
    match backend {
        StorageBackend::Memory => "http://localhost:3001/files".into(),
        StorageBackend::S3(s3) => match &s3.endpoint {
            Some(endpoint) => format!("{}/{}", endpoint.trim_end_matches('/'), s3.bucket),
            None => format!("https://{}.s3.{}.amazonaws.com", s3.bucket, s3.region),
        },
    }
}
