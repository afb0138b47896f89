use std::{str::FromStr, sync::OnceLock};

use anyhow::{Context, Result, anyhow};
use url::Url;

use super::{
    config_model::{Cloudinary, Cors, DotEnvyConfig, Server, Supabase},
    stage::Stage,
};

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_BODY_LIMIT_MB: u64 = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

static CONFIG: OnceLock<DotEnvyConfig> = OnceLock::new();

/// Process-wide configuration, loaded from the environment on first access.
pub fn get() -> Result<&'static DotEnvyConfig> {
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }

    let config = load()?;
    Ok(CONFIG.get_or_init(|| config))
}

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();
    load_from(|key| std::env::var(key).ok())
}

pub fn load_from<F>(lookup: F) -> Result<DotEnvyConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| {
        lookup(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };

    let server = Server {
        port: parse_or(non_empty("SERVER_PORT"), "SERVER_PORT", DEFAULT_PORT)?,
        body_limit: parse_or(
            non_empty("SERVER_BODY_LIMIT"),
            "SERVER_BODY_LIMIT",
            DEFAULT_BODY_LIMIT_MB,
        )?,
        timeout: parse_or(
            non_empty("SERVER_TIMEOUT"),
            "SERVER_TIMEOUT",
            DEFAULT_TIMEOUT_SECS,
        )?,
    };

    let raw_url = non_empty("SUPABASE_URL").ok_or_else(|| anyhow!("SUPABASE_URL is invalid"))?;
    Url::parse(&raw_url).context("SUPABASE_URL is invalid")?;

    let supabase = Supabase {
        url: raw_url.trim_end_matches('/').to_string(),
        service_key: non_empty("SUPABASE_SERVICE_KEY")
            .or_else(|| non_empty("SUPABASE_SERVICE_ROLE_KEY"))
            .ok_or_else(|| anyhow!("SUPABASE_SERVICE_KEY is invalid"))?,
    };

    let cors = Cors {
        allowed_origins: non_empty("ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|origin| origin.trim().trim_end_matches('/').to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default(),
    };

    let cloudinary = match (
        non_empty("CLOUDINARY_CLOUD_NAME"),
        non_empty("CLOUDINARY_API_KEY"),
        non_empty("CLOUDINARY_API_SECRET"),
    ) {
        (Some(cloud_name), Some(api_key), Some(api_secret)) => Some(Cloudinary {
            cloud_name,
            api_key,
            api_secret,
            upload_preset: non_empty("CLOUDINARY_UPLOAD_PRESET"),
        }),
        _ => None,
    };

    let stage = match non_empty("STAGE") {
        Some(raw) => Stage::try_from(raw.as_str()).context("STAGE is invalid")?,
        None => Stage::default(),
    };

    Ok(DotEnvyConfig {
        server,
        supabase,
        cors,
        cloudinary,
        stage,
    })
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .parse()
            .with_context(|| format!("{} is invalid", key)),
        None => Ok(default),
    }
}
