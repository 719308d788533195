//! Record gateway: the three user-facing operations over a [`RecordStore`].
//!
//! Each operation is one stateless round trip. Failures are wrapped into the
//! read/write side of [`GatewayError`] and never retried.

use std::sync::Arc;

use tracing::{error, info};

use crate::crm::RecordStore;
use crate::error::{GatewayError, GatewayResult};
use crate::record::{RECORD_PROPERTIES, Record, RecordFields};

pub struct RecordGateway {
    store: Arc<dyn RecordStore>,
}

impl RecordGateway {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Fetch every record with `name`, `publisher` and `price`, unmodified
    /// and in remote order.
    pub async fn list_records(&self) -> GatewayResult<Vec<Record>> {
        self.store
            .list_records(&RECORD_PROPERTIES)
            .await
            .map_err(|e| {
                error!(error = %e, "failed to fetch records from HubSpot");
                GatewayError::UpstreamRead(e)
            })
    }

    /// Forward the submitted fields as a new record.
    pub async fn create_record(&self, fields: &RecordFields) -> GatewayResult<()> {
        self.store.create_record(fields).await.map_err(|e| {
            error!(error = %e, "failed to create record in HubSpot");
            GatewayError::UpstreamWrite(e)
        })?;

        info!(name = ?fields.name, "record created");
        Ok(())
    }
}
