//! CRM API access.
//!
//! [`RecordStore`] is the seam between the gateway and the remote record
//! collection; [`HubSpotClient`] is the production implementation.

mod hubspot;

pub use hubspot::HubSpotClient;

use async_trait::async_trait;

use crate::error::CrmResult;
use crate::record::{Record, RecordFields};

/// Remote collection of custom object records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch the collection, asking for exactly `properties`.
    ///
    /// Records come back in the order the remote system returns them.
    async fn list_records(&self, properties: &[&str]) -> CrmResult<Vec<Record>>;

    /// Create one record from `fields`. The created record is not returned.
    async fn create_record(&self, fields: &RecordFields) -> CrmResult<()>;
}
