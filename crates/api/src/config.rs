/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In production,
/// override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Namespace worker pods run in; also the service account name.
    pub jobs_namespace: String,
    /// Runner container image (tag comes from the project).
    pub runner_image: String,
    /// Base URL worker pods call back to report results.
    pub callback_url: String,
    /// Per-batch spec dispatch width; `1` keeps the default sequential loop.
    pub dispatch_parallelism: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                           |
    /// |------------------------|-----------------------------------|
    /// | `HOST`                 | `0.0.0.0`                         |
    /// | `PORT`                 | `3000`                            |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`           |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                              |
    /// | `JOBS_NAMESPACE`       | `cypar-jobs`                      |
    /// | `RUNNER_IMAGE`         | `cypress/included`                |
    /// | `CALLBACK_URL`         | `http://cypar-api.cypar.svc:3000` |
    /// | `DISPATCH_PARALLELISM` | `1`                               |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let jobs_namespace =
            std::env::var("JOBS_NAMESPACE").unwrap_or_else(|_| "cypar-jobs".into());

        let runner_image =
            std::env::var("RUNNER_IMAGE").unwrap_or_else(|_| "cypress/included".into());

        let callback_url = std::env::var("CALLBACK_URL")
            .unwrap_or_else(|_| "http://cypar-api.cypar.svc:3000".into());

        let dispatch_parallelism: usize = std::env::var("DISPATCH_PARALLELISM")
            .unwrap_or_else(|_| "1".into())
            .parse()
            .expect("DISPATCH_PARALLELISM must be a valid usize");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jobs_namespace,
            runner_image,
            callback_url,
            dispatch_parallelism,
        }
    }
}
