use super::stage::Stage;

#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub server: Server,
    pub supabase: Supabase,
    pub cors: Cors,
    pub cloudinary: Option<Cloudinary>,
    pub stage: Stage,
}

#[derive(Debug, Clone)]
pub struct Server {
    pub port: u16,
    /// Request body limit in MiB.
    pub body_limit: u64,
    /// Whole-request timeout in seconds.
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Supabase {
    pub url: String,
    pub service_key: String,
}

#[derive(Debug, Clone, Default)]
pub struct Cors {
    /// Empty means any origin is accepted.
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Cloudinary {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub upload_preset: Option<String>,
}
