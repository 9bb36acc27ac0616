use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use blastify_core::contact::Contact;
use blastify_core::dispatch::{DeliveryOutcome, DeliveryRequest, DispatchEngine};
use blastify_core::error::EngineError;
use blastify_core::session::Session;
use blastify_core::transport::Channel;
use blastify_ingest::error::IngestError;
use blastify_ingest::{detect_format, parse_contacts};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tracing::info;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
pub struct HttpExtensions {
    pub session: Arc<RwLock<Session>>,
    pub engine: Arc<DispatchEngine>,
}

#[derive(OpenApi)]
#[openapi(
    info(description = "Blastify API"),
    paths(process_file, send_messages, list_contacts, clear_contacts, health)
)]
struct ApiDoc;

pub async fn start(bind: SocketAddr, ext: HttpExtensions) {
    // Bind everything now to catch any errors before spinning up the coroutines
    let listener = TcpListener::bind(bind).await.unwrap();

    let app = router(ext);
    tokio::spawn(async { axum::serve(listener, app).await.unwrap() });
}

fn router(ext: HttpExtensions) -> Router {
    let app = Router::new()
        .route("/process-file/", post(process_file))
        .route("/send-messages/", post(send_messages))
        .route("/contacts/", get(list_contacts).delete(clear_contacts))
        .route("/health", get(health))
        .layer(Extension(ext));

    app.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[derive(Serialize, Deserialize, ToSchema)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

#[derive(Serialize, Deserialize, ToSchema)]
struct ProcessFileResponse {
    contacts: Vec<Contact>,
}

#[utoipa::path(
    post,
    path = "/process-file/",
    description = "Parse an uploaded contact list (CSV or spreadsheet workbook) and replace the session's contacts with it",
    responses(
        (status = 200, body = ProcessFileResponse),
        (status = 400, description = "No file uploaded", body = ErrorResponse),
        (status = 415, description = "Unsupported file format", body = ErrorResponse),
        (status = 422, description = "Unparsable content", body = ErrorResponse)
    )
)]
async fn process_file(
    Extension(ext): Extension<HttpExtensions>,
    mut multipart: Multipart,
) -> Response {
    let mut upload = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() != Some("file") {
                    continue;
                }
                let file_name = field.file_name().map(str::to_owned);
                let content_type = field.content_type().map(str::to_owned);
                match field.bytes().await {
                    Ok(bytes) => {
                        upload = Some((file_name, content_type, bytes));
                        break;
                    }
                    Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
                }
            }
            Ok(None) => break,
            Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
        }
    }

    let Some((file_name, content_type, bytes)) = upload else {
        return error_response(StatusCode::BAD_REQUEST, "No file uploaded");
    };

    let format = detect_format(file_name.as_deref(), content_type.as_deref(), &bytes);
    match parse_contacts(&bytes, format) {
        Ok(contacts) => {
            ext.session
                .write()
                .await
                .contacts
                .replace_all(contacts.clone());
            info!(
                "Ingested {} contacts from upload {:?}",
                contacts.len(),
                file_name.as_deref().unwrap_or("<unnamed>")
            );
            (StatusCode::OK, Json(ProcessFileResponse { contacts })).into_response()
        }
        Err(e @ IngestError::UnsupportedFormat(_)) => {
            error_response(StatusCode::UNSUPPORTED_MEDIA_TYPE, e.to_string())
        }
        Err(e) => error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
struct ContactRef {
    value: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
struct SendMessagesRequest {
    contacts: Vec<ContactRef>,
    message: String,
    method: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct SendMessagesResponse {
    success: bool,
    messages_sent: usize,
    messages_failed: usize,
    failures: Vec<DeliveryOutcome>,
}

#[utoipa::path(
    post,
    path = "/send-messages/",
    description = "Send the message to the referenced contacts over the chosen channel. \
        Per-recipient failures never abort the batch; they are reported in the failure list.",
    responses(
        (status = 200, body = SendMessagesResponse),
        (status = 400, description = "Empty message or unknown delivery method", body = ErrorResponse)
    )
)]
async fn send_messages(
    Extension(ext): Extension<HttpExtensions>,
    Json(payload): Json<SendMessagesRequest>,
) -> Response {
    let channel: Channel = match payload.method.parse() {
        Ok(channel) => channel,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };

    let request = {
        let mut session = ext.session.write().await;
        if let Err(e) = session.composer.set_text(payload.message) {
            return error_response(StatusCode::BAD_REQUEST, e.to_string());
        }
        if session.composer.is_empty() {
            return error_response(
                StatusCode::BAD_REQUEST,
                EngineError::EmptyMessage.to_string(),
            );
        }

        // Ids that do not reference a current contact are stale; drop them.
        let contacts: Vec<Contact> = payload
            .contacts
            .iter()
            .filter_map(|r| session.contacts.get(&r.value).cloned())
            .collect();
        DeliveryRequest::new(contacts, session.composer.text().to_owned(), channel)
    };

    match ext.engine.dispatch(request).await {
        Ok(report) => {
            let failures: Vec<DeliveryOutcome> = report.failures().cloned().collect();
            (
                StatusCode::OK,
                Json(SendMessagesResponse {
                    success: report.failed == 0,
                    messages_sent: report.succeeded,
                    messages_failed: report.failed,
                    failures,
                }),
            )
                .into_response()
        }
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

#[utoipa::path(
    get,
    path = "/contacts/",
    description = "Current contact list",
    responses((status = 200, body = Vec<Contact>))
)]
async fn list_contacts(Extension(ext): Extension<HttpExtensions>) -> Response {
    let session = ext.session.read().await;
    (StatusCode::OK, Json(session.contacts.contacts().to_vec())).into_response()
}

#[utoipa::path(
    delete,
    path = "/contacts/",
    description = "Clear the contact list, selection and composed message",
    responses((status = 204))
)]
async fn clear_contacts(Extension(ext): Extension<HttpExtensions>) -> StatusCode {
    ext.session.write().await.clear_all();
    StatusCode::NO_CONTENT
}

#[utoipa::path(get, path = "/health", responses((status = 200)))]
async fn health() -> Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "healthy" })),
    )
        .into_response()
}
