//! Axum-based HTTP server.
//!
//! [`GatewayServer`] wires the record gateway, the page templates and the
//! static file directory into a running axum service.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/` | Record table, or `500` if the CRM read fails. |
//! | `GET`  | `/update-cobj` | Record creation form. |
//! | `POST` | `/update-cobj` | Create a record from a urlencoded or JSON body, then `302` to `/`; `500` if the CRM write fails. |
//! | `GET`  | `/*` | Files from the static directory. |

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{FromRequest, Request, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse},
    routing::get,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::GatewayConfig;
use crate::crm::{HubSpotClient, RecordStore};
use crate::error::GatewayResult;
use crate::gateway::RecordGateway;
use crate::record::RecordFields;
use crate::views::Views;

/// Boxed error returned by [`GatewayServer::start`].
pub type ServerError = Box<dyn std::error::Error + Send + Sync>;

// ─────────────────────────────────────────────────────────────────────────────
// Shared application state
// ─────────────────────────────────────────────────────────────────────────────

/// Shared state injected into every handler via the [`State`] extractor.
#[derive(Clone)]
pub struct AppState {
    gateway: Arc<RecordGateway>,
    views: Arc<Views>,
}

impl AppState {
    pub fn new(gateway: RecordGateway, views: Views) -> Self {
        Self {
            gateway: Arc::new(gateway),
            views: Arc::new(views),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// GatewayServer
// ─────────────────────────────────────────────────────────────────────────────

pub struct GatewayServer {
    config: GatewayConfig,
}

impl GatewayServer {
    pub fn new(config: GatewayConfig) -> Self {
        Self { config }
    }

    /// Build the router around the given record store.
    ///
    /// Tests pass a fake store here; [`start()`](Self::start) passes a
    /// [`HubSpotClient`].
    pub fn build_app(&self, store: Arc<dyn RecordStore>) -> Result<Router, tera::Error> {
        let state = AppState::new(RecordGateway::new(store), Views::new()?);
        Ok(router(state, &self.config))
    }

    /// Bind to `{host}:{port}` and serve until the process exits.
    pub async fn start(self) -> Result<(), ServerError> {
        let client = HubSpotClient::new(&self.config)?;
        info!(
            endpoint = %client.endpoint(),
            object_type_id = %self.config.object_type_id,
            "HubSpot client ready"
        );

        let app = self.build_app(Arc::new(client))?;
        let addr = self.config.bind_addr();
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!(addr = %addr, "listening on http://localhost:{}", self.config.port);
        axum::serve(listener, app).await?;
        Ok(())
    }
}

fn router(state: AppState, config: &GatewayConfig) -> Router {
    Router::new()
        .route("/", get(list_records))
        .route("/update-cobj", get(show_form).post(create_record))
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ─────────────────────────────────────────────────────────────────────────────
// Submission extractor
// ─────────────────────────────────────────────────────────────────────────────

/// Record fields taken from a `POST /update-cobj` body.
///
/// `application/json` bodies are read as JSON, anything else as a urlencoded
/// form. Never rejects: a body that cannot be read yields empty fields, which
/// are still forwarded to the CRM.
pub struct Submission(pub RecordFields);

impl<S> FromRequest<S> for Submission
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| {
                let mime = ct.split(';').next().unwrap_or_default().trim();
                mime == "application/json" || mime.ends_with("+json")
            });

        let fields = if is_json {
            match Json::<RecordFields>::from_request(req, state).await {
                Ok(Json(fields)) => fields,
                Err(rejection) => {
                    warn!(error = %rejection, "unreadable JSON submission, forwarding empty fields");
                    RecordFields::default()
                }
            }
        } else {
            match Form::<Vec<(String, String)>>::from_request(req, state).await {
                Ok(Form(pairs)) => pairs.into_iter().collect(),
                Err(rejection) => {
                    warn!(error = %rejection, "unreadable form submission, forwarding empty fields");
                    RecordFields::default()
                }
            }
        };

        Ok(Self(fields))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// `GET /`: fetch the collection and render the table.
async fn list_records(State(state): State<AppState>) -> GatewayResult<Html<String>> {
    let records = state.gateway.list_records().await?;
    Ok(Html(state.views.homepage(&records)?))
}

/// `GET /update-cobj`: render the creation form. Never calls the CRM.
async fn show_form(State(state): State<AppState>) -> GatewayResult<Html<String>> {
    Ok(Html(state.views.updates()?))
}

/// `POST /update-cobj`: forward the submitted fields and go back home.
async fn create_record(
    State(state): State<AppState>,
    Submission(fields): Submission,
) -> GatewayResult<impl IntoResponse> {
    state.gateway.create_record(&fields).await?;
    Ok((StatusCode::FOUND, [(header::LOCATION, "/")]))
}
