use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::{
    domain::{
        entities::raffles::RaffleEntity,
        repositories::reservations::ReservationRepository,
        value_objects::reservations::{
            ReleaseTicketsModel, ReserveRandomTicketsModel, ReserveTicketsModel,
        },
    },
    infrastructure::postgrest::{filters, postgrest_client::PostgrestClient},
};

pub struct ReservationPostgrest {
    client: Arc<PostgrestClient>,
}

impl ReservationPostgrest {
    pub fn new(client: Arc<PostgrestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReservationRepository for ReservationPostgrest {
    async fn reserve_tickets(&self, params: ReserveTicketsModel) -> Result<Value> {
        self.client.call_rpc("reserve_tickets", &params).await
    }

    async fn release_tickets(&self, params: ReleaseTicketsModel) -> Result<Value> {
        self.client.call_rpc("release_tickets", &params).await
    }

    async fn reserve_random_tickets(&self, params: ReserveRandomTicketsModel) -> Result<Value> {
        self.client
            .call_rpc("ensure_and_reserve_random_tickets", &params)
            .await
    }

    async fn find_raffle(&self, raffle_id: String) -> Result<Option<RaffleEntity>> {
        let row = self
            .client
            .get_one("raffles", &[("id", filters::eq(&raffle_id))], "id,total_tickets")
            .await?;

        row.map(serde_json::from_value::<RaffleEntity>)
            .transpose()
            .context("raffle row has an unexpected shape")
    }
}
