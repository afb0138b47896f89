use std::sync::Arc;

use tracing::warn;

use crate::{
    config::config_model::DotEnvyConfig,
    domain::{
        repositories::health::HealthRepository,
        value_objects::health::{DbHealthModel, EnvHealthModel},
    },
};

pub struct HealthUseCase<H>
where
    H: HealthRepository + Send + Sync + 'static,
{
    health_repository: Arc<H>,
    env_report: EnvHealthModel,
}

impl<H> HealthUseCase<H>
where
    H: HealthRepository + Send + Sync + 'static,
{
    pub fn new(health_repository: Arc<H>, env_report: EnvHealthModel) -> Self {
        Self {
            health_repository,
            env_report,
        }
    }

    /// Reads one raffle id. Failures are reported in the body, not as an error.
    pub async fn check_db(&self) -> DbHealthModel {
        match self.health_repository.sample_raffles().await {
            Ok(sample) => DbHealthModel {
                ok: true,
                sample: Some(sample),
                detail: None,
            },
            Err(err) => {
                warn!(error = %err, "health: database check failed");
                DbHealthModel {
                    ok: false,
                    sample: None,
                    detail: Some(format!("{:#}", err)),
                }
            }
        }
    }

    pub fn env_report(&self) -> EnvHealthModel {
        self.env_report.clone()
    }
}

pub fn env_report(config: &DotEnvyConfig) -> EnvHealthModel {
    EnvHealthModel {
        ok: true,
        stage: config.stage.to_string(),
        supabase_url: !config.supabase.url.is_empty(),
        supabase_service_key: !config.supabase.service_key.is_empty(),
        cloudinary: config.cloudinary.is_some(),
        cloudinary_upload_preset: config
            .cloudinary
            .as_ref()
            .is_some_and(|cloudinary| cloudinary.upload_preset.is_some()),
        allowed_origins: config.cors.allowed_origins.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{
            config_model::{Cors, Server, Supabase},
            stage::Stage,
        },
        domain::repositories::health::MockHealthRepository,
    };
    use anyhow::anyhow;
    use serde_json::json;

    fn config() -> DotEnvyConfig {
        DotEnvyConfig {
            server: Server {
                port: 8000,
                body_limit: 10,
                timeout: 30,
            },
            supabase: Supabase {
                url: "https://abc.supabase.co".to_string(),
                service_key: "super-secret".to_string(),
            },
            cors: Cors {
                allowed_origins: vec!["https://prizo.app".to_string()],
            },
            cloudinary: None,
            stage: Stage::Production,
        }
    }

    #[test]
    fn env_report_exposes_presence_only() {
        let report = env_report(&config());

        assert!(report.supabase_url);
        assert!(report.supabase_service_key);
        assert!(!report.cloudinary);
        assert_eq!(report.stage, "production");
        assert_eq!(report.allowed_origins, vec!["https://prizo.app"]);
        assert!(!serde_json::to_string(&report).unwrap().contains("super-secret"));
    }

    #[tokio::test]
    async fn db_check_reports_sample_or_detail() {
        let mut repo = MockHealthRepository::new();
        repo.expect_sample_raffles()
            .times(1)
            .returning(|| Box::pin(async { Ok(json!([{ "id": "raf-1" }])) }));

        let usecase = HealthUseCase::new(Arc::new(repo), env_report(&config()));
        let healthy = usecase.check_db().await;
        assert!(healthy.ok);
        assert_eq!(healthy.sample, Some(json!([{ "id": "raf-1" }])));

        let mut repo = MockHealthRepository::new();
        repo.expect_sample_raffles()
            .returning(|| Box::pin(async { Err(anyhow!("connection refused")) }));

        let usecase = HealthUseCase::new(Arc::new(repo), env_report(&config()));
        let unhealthy = usecase.check_db().await;
        assert!(!unhealthy.ok);
        assert_eq!(unhealthy.detail.as_deref(), Some("connection refused"));
    }
}
