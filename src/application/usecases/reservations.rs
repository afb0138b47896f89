use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::{
    application::usecases::errors::{UseCaseError, UseCaseResult},
    domain::{
        repositories::reservations::ReservationRepository,
        value_objects::reservations::{
            ReleaseTicketsModel, ReserveRandomTicketsModel, ReserveTicketsModel,
        },
    },
};

pub struct ReservationUseCase<R>
where
    R: ReservationRepository + Send + Sync + 'static,
{
    reservation_repository: Arc<R>,
}

impl<R> ReservationUseCase<R>
where
    R: ReservationRepository + Send + Sync + 'static,
{
    pub fn new(reservation_repository: Arc<R>) -> Self {
        Self {
            reservation_repository,
        }
    }

    pub async fn reserve_by_ids(&self, params: ReserveTicketsModel) -> UseCaseResult<Value> {
        ensure_session(&params.p_session_id)?;
        let params = params.with_default_minutes();

        info!(
            tickets = params.p_ticket_ids.len(),
            minutes = ?params.p_minutes,
            "reservations: reserving tickets by id"
        );

        self.reservation_repository
            .reserve_tickets(params)
            .await
            .map_err(UseCaseError::relay_upstream)
    }

    pub async fn release(&self, params: ReleaseTicketsModel) -> UseCaseResult<Value> {
        ensure_session(&params.p_session_id)?;

        info!(
            tickets = params.p_ticket_ids.len(),
            "reservations: releasing tickets"
        );

        self.reservation_repository
            .release_tickets(params)
            .await
            .map_err(UseCaseError::relay_upstream)
    }

    /// Reserves `p_quantity` random tickets. The pool size always comes from
    /// the stored raffle, whatever the caller sent as `p_total`.
    pub async fn reserve_random(
        &self,
        params: ReserveRandomTicketsModel,
    ) -> UseCaseResult<Value> {
        ensure_session(&params.p_session_id)?;
        let mut params = params.with_default_minutes();

        let raffle = self
            .reservation_repository
            .find_raffle(params.p_raffle_id.clone())
            .await
            .map_err(UseCaseError::relay_upstream)?
            .ok_or_else(|| {
                warn!(
                    raffle_id = %params.p_raffle_id,
                    "reservations: random reservation for unknown raffle"
                );
                UseCaseError::NotFound("raffle not found".to_string())
            })?;

        if params.p_total != raffle.total_tickets {
            warn!(
                raffle_id = %raffle.id,
                requested_total = params.p_total,
                stored_total = raffle.total_tickets,
                "reservations: p_total mismatch, using stored total_tickets"
            );
        }
        params.p_total = raffle.total_tickets;

        info!(
            raffle_id = %params.p_raffle_id,
            quantity = params.p_quantity,
            total = params.p_total,
            "reservations: reserving random tickets"
        );

        self.reservation_repository
            .reserve_random_tickets(params)
            .await
            .map_err(UseCaseError::relay_upstream)
    }
}

fn ensure_session(session_id: &str) -> UseCaseResult<()> {
    if session_id.trim().is_empty() {
        return Err(UseCaseError::Validation(
            "p_session_id is required".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::raffles::RaffleEntity, errors::UpstreamError,
        repositories::reservations::MockReservationRepository,
    };
    use axum::http::StatusCode;
    use mockall::predicate::eq;
    use serde_json::json;
    use std::{io::Write, sync::Mutex};

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn random_params(p_total: i64) -> ReserveRandomTicketsModel {
        ReserveRandomTicketsModel {
            p_raffle_id: "raf-1".to_string(),
            p_total,
            p_session_id: "sess-1".to_string(),
            p_quantity: 3,
            p_minutes: None,
        }
    }

    #[tokio::test]
    async fn reserve_by_ids_defaults_minutes_to_ten() {
        let mut repo = MockReservationRepository::new();

        repo.expect_reserve_tickets()
            .with(eq(ReserveTicketsModel {
                p_ticket_ids: vec!["t-1".to_string(), "t-2".to_string()],
                p_session_id: "sess-1".to_string(),
                p_minutes: Some(10),
            }))
            .times(1)
            .returning(|_| Box::pin(async { Ok(json!({ "reserved": 2 })) }));

        let usecase = ReservationUseCase::new(Arc::new(repo));
        let data = usecase
            .reserve_by_ids(ReserveTicketsModel {
                p_ticket_ids: vec!["t-1".to_string(), "t-2".to_string()],
                p_session_id: "sess-1".to_string(),
                p_minutes: None,
            })
            .await
            .unwrap();

        assert_eq!(data, json!({ "reserved": 2 }));
    }

    #[tokio::test]
    async fn blank_session_is_rejected_before_any_call() {
        let mut repo = MockReservationRepository::new();
        repo.expect_release_tickets().never();

        let usecase = ReservationUseCase::new(Arc::new(repo));
        let err = usecase
            .release(ReleaseTicketsModel {
                p_ticket_ids: vec!["t-1".to_string()],
                p_session_id: "   ".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn random_reservation_uses_stored_total() {
        let mut repo = MockReservationRepository::new();

        repo.expect_find_raffle()
            .with(eq("raf-1".to_string()))
            .returning(|_| {
                Box::pin(async {
                    Ok(Some(RaffleEntity {
                        id: "raf-1".to_string(),
                        total_tickets: 1000,
                    }))
                })
            });

        repo.expect_reserve_random_tickets()
            .withf(|params| params.p_total == 1000 && params.p_minutes == Some(10))
            .times(1)
            .returning(|_| Box::pin(async { Ok(json!(["t-7", "t-8", "t-9"])) }));

        let usecase = ReservationUseCase::new(Arc::new(repo));
        let data = usecase.reserve_random(random_params(5)).await.unwrap();

        assert_eq!(data, json!(["t-7", "t-8", "t-9"]));
    }

    #[tokio::test]
    async fn total_mismatch_is_logged_as_warning_and_request_succeeds() {
        let mut repo = MockReservationRepository::new();

        repo.expect_find_raffle().returning(|_| {
            Box::pin(async {
                Ok(Some(RaffleEntity {
                    id: "raf-1".to_string(),
                    total_tickets: 1000,
                }))
            })
        });
        repo.expect_reserve_random_tickets()
            .returning(|_| Box::pin(async { Ok(json!(["t-1", "t-2", "t-3"])) }));

        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let usecase = ReservationUseCase::new(Arc::new(repo));
        let result = usecase.reserve_random(random_params(5)).await;

        assert!(result.is_ok());
        let output = logs.contents();
        assert!(output.contains("WARN"));
        assert!(output.contains("requested_total=5"));
        assert!(output.contains("stored_total=1000"));
        assert!(output.contains("p_total mismatch"));
    }

    #[tokio::test]
    async fn unknown_raffle_is_not_found() {
        let mut repo = MockReservationRepository::new();

        repo.expect_find_raffle()
            .returning(|_| Box::pin(async { Ok(None) }));
        repo.expect_reserve_random_tickets().never();

        let usecase = ReservationUseCase::new(Arc::new(repo));
        let err = usecase.reserve_random(random_params(1000)).await.unwrap_err();

        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "raffle not found");
    }

    #[tokio::test]
    async fn upstream_status_is_relayed() {
        let mut repo = MockReservationRepository::new();

        repo.expect_reserve_tickets().returning(|_| {
            Box::pin(async {
                Err(anyhow::Error::new(UpstreamError::Status {
                    status: 409,
                    body: "ticket already reserved".to_string(),
                }))
            })
        });

        let usecase = ReservationUseCase::new(Arc::new(repo));
        let err = usecase
            .reserve_by_ids(ReserveTicketsModel {
                p_ticket_ids: vec!["t-1".to_string()],
                p_session_id: "sess-1".to_string(),
                p_minutes: Some(5),
            })
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.to_string(), "Supabase error: ticket already reserved");
    }

    #[tokio::test]
    async fn transport_failure_is_bad_gateway() {
        let mut repo = MockReservationRepository::new();

        repo.expect_release_tickets().returning(|_| {
            Box::pin(async {
                Err(anyhow::Error::new(UpstreamError::Transport(
                    "connection refused".to_string(),
                )))
            })
        });

        let usecase = ReservationUseCase::new(Arc::new(repo));
        let err = usecase
            .release(ReleaseTicketsModel {
                p_ticket_ids: vec![],
                p_session_id: "sess-1".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }
}
