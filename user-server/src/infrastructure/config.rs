#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Browser origins allowed by CORS. A `*` anywhere in the list allows all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

impl CorsOrigins {
    fn parse(raw: &str) -> anyhow::Result<Self> {
        let origins: Vec<&str> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        if origins.is_empty() || origins.contains(&"*") {
            return Ok(CorsOrigins::Any);
        }

        origins
            .into_iter()
            .map(|origin| {
                if is_origin(origin) {
                    Ok(origin.to_string())
                } else {
                    Err(anyhow::anyhow!(
                        "invalid CORS_ORIGINS entry: {} (expected scheme://host[:port])",
                        origin
                    ))
                }
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map(CorsOrigins::List)
    }
}

fn is_origin(origin: &str) -> bool {
    let Some(authority) = origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"))
    else {
        return false;
    };
    !authority.is_empty()
        && !authority.starts_with(':')
        && authority
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || ".-:[]".contains(c))
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub log_format: LogFormat,
    pub cors_origins: CorsOrigins,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = var("HOST").unwrap_or_else(|| "127.0.0.1".into());
        let port = var("PORT")
            .unwrap_or_else(|| "8080".into())
            .parse::<u16>()
            .map_err(|e| anyhow::anyhow!("invalid PORT: {}", e))?;
        let database_url =
            var("DATABASE_URL").ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))?;
        let db_max_connections = var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|| "20".into())
            .parse::<u32>()
            .map_err(|e| anyhow::anyhow!("invalid DB_MAX_CONNECTIONS: {}", e))?;
        let log_format = match var("LOG_FORMAT").as_deref() {
            None | Some("json") => LogFormat::Json,
            Some("pretty") => LogFormat::Pretty,
            Some(other) => anyhow::bail!("invalid LOG_FORMAT: {} (expected json or pretty)", other),
        };
        let cors_origins =
            CorsOrigins::parse(&var("CORS_ORIGINS").unwrap_or_else(|| "*".into()))?;

        Ok(Self {
            host,
            port,
            database_url,
            db_max_connections,
            log_format,
            cors_origins,
        })
    }
}
