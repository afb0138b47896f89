use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use serde_json::Value;

use crate::domain::{
    entities::raffles::RaffleEntity,
    value_objects::reservations::{
        ReleaseTicketsModel, ReserveRandomTicketsModel, ReserveTicketsModel,
    },
};

/// Ticket locking lives in the database; these calls only forward parameters
/// to its procedures and hand back whatever they return.
#[async_trait]
#[automock]
pub trait ReservationRepository {
    async fn reserve_tickets(&self, params: ReserveTicketsModel) -> Result<Value>;
    async fn release_tickets(&self, params: ReleaseTicketsModel) -> Result<Value>;
    async fn reserve_random_tickets(&self, params: ReserveRandomTicketsModel) -> Result<Value>;
    async fn find_raffle(&self, raffle_id: String) -> Result<Option<RaffleEntity>>;
}
