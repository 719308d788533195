//! `cobj-gateway`: a server-rendered front-end for one HubSpot custom object.
//!
//! Three routes sit in front of the CRM v3 objects API:
//!
//! | Route | Operation |
//! |-------|-----------|
//! | `GET /` | [`gateway::RecordGateway::list_records`] rendered through [`views::Views::homepage`] |
//! | `GET /update-cobj` | [`views::Views::updates`] |
//! | `POST /update-cobj` | [`gateway::RecordGateway::create_record`], then redirect to `/` |
//!
//! The remote API is reached through the [`crm::RecordStore`] trait so the
//! HTTP layer can be exercised without a network.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use cobj_gateway::config::GatewayConfig;
//! use cobj_gateway::server::GatewayServer;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = GatewayConfig::new("pat-na1-...").with_port(3000);
//!     GatewayServer::new(config).start().await.unwrap();
//! }
//! ```

pub mod config;
pub mod crm;
pub mod error;
pub mod gateway;
pub mod record;
pub mod server;
pub mod views;
