//! `reqwest` implementation of the backend seam.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use super::{Envelope, ReservationBackend};
use crate::error::BackendError;
use crate::model::offer::Offer;
use crate::model::reservation::Reservation;
use crate::model::status::StatusChange;

pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// `base_url` is the host collaborator, e.g. `https://api.example.com`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::builder().build().unwrap_or_default(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_data<T: DeserializeOwned>(&self, url: String) -> Result<T, BackendError> {
        debug!("GET {url}");
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status { status: status.as_u16(), url });
        }
        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| BackendError::Decode { url, message: e.to_string() })?;
        Ok(envelope.data)
    }

    async fn put_status(&self, url: String, change: StatusChange) -> Result<(), BackendError> {
        debug!("PUT {url} status={change:?}");
        let response = self
            .client
            .put(&url)
            .json(&json!({ "status": change }))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status { status: status.as_u16(), url });
        }
        Ok(())
    }
}

#[async_trait]
impl ReservationBackend for HttpBackend {
    async fn fetch_reservation(&self, id: &str) -> Result<Reservation, BackendError> {
        self.get_data(self.url(&format!("/reservation/{id}"))).await
    }

    async fn find_reservation_by_time_slot(
        &self,
        time_slot_id: &str,
        consumer_id: &str,
    ) -> Result<Option<Reservation>, BackendError> {
        let url = self.url(&format!(
            "/reservation/find-by-tsid?timeSlotId={}&consumerId={}",
            urlencoding::encode(time_slot_id),
            urlencoding::encode(consumer_id),
        ));
        let mut matches: Vec<Reservation> = self.get_data(url).await?;
        if matches.is_empty() {
            Ok(None)
        } else {
            Ok(Some(matches.swap_remove(0)))
        }
    }

    async fn update_reservation_status(
        &self,
        id: &str,
        change: StatusChange,
    ) -> Result<(), BackendError> {
        self.put_status(self.url(&format!("/reservation/{id}")), change).await
    }

    async fn update_time_table_status(
        &self,
        id: &str,
        change: StatusChange,
    ) -> Result<(), BackendError> {
        self.put_status(self.url(&format!("/time-table/{id}")), change).await
    }

    async fn fetch_offer(&self, id: &str) -> Result<Offer, BackendError> {
        self.get_data(self.url(&format!("/offer/{id}"))).await
    }
}
