//! HTTP surface: health, diagnostics and the classify endpoint.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tracing::{debug, info};

use crate::classifier::lexicon::LEXICON_VERSION;
use crate::classifier::{Category, Classification, Classifier, Origin};
use crate::config::ServiceConfig;
use crate::error::{ApiError, UploadError};
use crate::extract::{extract_text, validate_upload};

/// Reply used when the submitted content is empty or unreadable.
pub const EMPTY_CONTENT_REPLY: &str =
    "Mensagem vazia ou ilegível. Por favor, reenviar com mais detalhes.";

/// Multipart slack on top of the upload limit, so oversize is reported by the handler.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<Classifier>,
    pub max_upload_bytes: usize,
}

/// Build the router.
pub fn routes(state: AppState) -> Router {
    let body_limit = state
        .max_upload_bytes
        .saturating_mul(2)
        .saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route("/health", get(health))
        .route("/config", get(diagnostics))
        .route("/classify", post(classify))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the process exits.
pub async fn serve(config: &ServiceConfig, classifier: Arc<Classifier>) -> std::io::Result<()> {
    let app = routes(AppState {
        classifier,
        max_upload_bytes: config.max_upload_bytes,
    });
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!(addr = %listener.local_addr()?, "Classifier API listening");
    axum::serve(listener, app).await
}

// ── Health / diagnostics ────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "inbox-classifier"
    }))
}

async fn diagnostics(State(state): State<AppState>) -> impl IntoResponse {
    let gateway = state.classifier.gateway();
    let cwd = std::env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_default();

    Json(serde_json::json!({
        "build": "local+heuristica",
        "model_path": gateway.path().display().to_string(),
        "model_loaded": gateway.is_loaded(),
        "lexicon_version": LEXICON_VERSION,
        "max_upload_bytes": state.max_upload_bytes,
        "cwd": cwd,
    }))
}

// ── Classify ────────────────────────────────────────────────────────────

/// An uploaded file as received.
struct Upload {
    filename: Option<String>,
    data: Bytes,
}

/// `POST /classify` with multipart fields `texto` and/or `arquivo`.
///
/// The file wins over the text when both are present.
async fn classify(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Classification>, ApiError> {
    let mut text: Option<String> = None;
    let mut upload: Option<Upload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Malformed(e.to_string()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("texto") => {
                text = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| UploadError::Malformed(e.to_string()))?,
                );
            }
            Some("arquivo") => {
                let filename = field.file_name().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| UploadError::Malformed(e.to_string()))?;
                upload = Some(Upload { filename, data });
            }
            other => debug!(field = ?other, "Ignoring unknown multipart field"),
        }
    }

    let classifier = Arc::clone(&state.classifier);
    let max_bytes = state.max_upload_bytes;

    // Extraction and scoring are CPU-bound.
    let result = tokio::task::spawn_blocking(move || {
        resolve_and_classify(&classifier, text, upload, max_bytes)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(Json(result))
}

fn resolve_and_classify(
    classifier: &Classifier,
    text: Option<String>,
    upload: Option<Upload>,
    max_bytes: usize,
) -> Result<Classification, UploadError> {
    let mut content = text.unwrap_or_default().trim().to_string();

    if let Some(upload) = upload {
        let kind = validate_upload(upload.filename.as_deref(), &upload.data, max_bytes)?;
        content = extract_text(kind, &upload.data)?.trim().to_string();
    }

    if content.is_empty() {
        return Ok(Classification {
            category: Category::Improdutivo,
            confidence: 0.5,
            suggested_reply: EMPTY_CONTENT_REPLY.to_string(),
            origin: Origin::Heuristica,
        });
    }

    Ok(classifier.classify(&content))
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Upload(UploadError::TooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Upload(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        debug!(status = %status, error = %self, "Request rejected");
        (status, Json(serde_json::json!({ "detail": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, header};
    use tower::ServiceExt;

    use crate::classifier::responders::{COURTESY_REPLY, PRODUCTIVE_REPLY};

    const BOUNDARY: &str = "XBOUNDARYX";

    fn app(max_upload_bytes: usize) -> (tempfile::TempDir, Router) {
        let dir = tempfile::tempdir().unwrap();
        let classifier = Arc::new(Classifier::new(dir.path().join("model.json")));
        let router = routes(AppState {
            classifier,
            max_upload_bytes,
        });
        (dir, router)
    }

    /// Multipart body from `(name, filename, content)` parts.
    fn multipart_body(parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, filename, content) in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match filename {
                Some(f) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                ),
            }
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    async fn post_classify(
        router: Router,
        parts: &[(&str, Option<&str>, &[u8])],
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/classify")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_endpoint() {
        let (_dir, router) = app(1024);
        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn diagnostics_reports_model_state() {
        let (_dir, router) = app(1024);
        let response = router
            .oneshot(Request::get("/config").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["build"], "local+heuristica");
        assert_eq!(json["model_loaded"], false);
        assert_eq!(json["lexicon_version"], LEXICON_VERSION);
    }

    #[tokio::test]
    async fn classifies_text_field() {
        let (_dir, router) = app(1024);
        let (status, json) = post_classify(
            router,
            &[("texto", None, "Favor verificar o boleto em anexo".as_bytes())],
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["categoria"], "Produtivo");
        assert_eq!(json["origem"], "heuristica");
        assert_eq!(json["resposta_sugerida"], PRODUCTIVE_REPLY);
    }

    #[tokio::test]
    async fn file_takes_priority_over_text() {
        let (_dir, router) = app(1024);
        let (status, json) = post_classify(
            router,
            &[
                ("texto", None, "Favor verificar o protocolo 12".as_bytes()),
                ("arquivo", Some("msg.txt"), "Muito obrigado, bom dia!".as_bytes()),
            ],
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["categoria"], "Improdutivo");
        assert_eq!(json["resposta_sugerida"], COURTESY_REPLY);
    }

    #[tokio::test]
    async fn empty_submission_gets_fixed_reply() {
        let (_dir, router) = app(1024);
        let (status, json) = post_classify(router, &[("texto", None, b"   ")]).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["categoria"], "Improdutivo");
        assert_eq!(json["confianca"], 0.5);
        assert_eq!(json["resposta_sugerida"], EMPTY_CONTENT_REPLY);
        assert_eq!(json["origem"], "heuristica");
    }

    #[tokio::test]
    async fn blank_file_gets_fixed_reply() {
        let (_dir, router) = app(1024);
        let (status, json) =
            post_classify(router, &[("arquivo", Some("blank.txt"), b"   \n\t ")]).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["categoria"], "Improdutivo");
        assert_eq!(json["confianca"], 0.5);
        assert_eq!(json["resposta_sugerida"], EMPTY_CONTENT_REPLY);
        assert_eq!(json["origem"], "heuristica");
    }

    #[test]
    fn blank_upload_short_circuits_before_the_engine() {
        let dir = tempfile::tempdir().unwrap();
        let classifier = Classifier::new(dir.path().join("model.json"));
        let upload = Upload {
            filename: Some("blank.txt".to_string()),
            data: Bytes::from_static(b"   \n\t "),
        };
        let result = resolve_and_classify(&classifier, None, Some(upload), 1024).unwrap();
        assert_eq!(result.suggested_reply, EMPTY_CONTENT_REPLY);
        assert_eq!(result.origin, Origin::Heuristica);
    }

    #[tokio::test]
    async fn empty_file_is_rejected() {
        let (_dir, router) = app(1024);
        let (status, json) = post_classify(router, &[("arquivo", Some("a.txt"), b"")]).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["detail"], "Arquivo vazio.");
    }

    #[tokio::test]
    async fn oversized_file_is_413() {
        let (_dir, router) = app(16);
        let big = vec![b'a'; 17];
        let (status, json) = post_classify(router, &[("arquivo", Some("a.txt"), &big)]).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert!(json["detail"].as_str().unwrap().contains("muito grande"));
    }

    #[tokio::test]
    async fn unsupported_type_is_rejected() {
        let (_dir, router) = app(1024);
        let (status, json) =
            post_classify(router, &[("arquivo", Some("planilha.xlsx"), b"data")]).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["detail"].as_str().unwrap().contains(".txt, .pdf ou .eml"));
    }

    #[tokio::test]
    async fn corrupt_pdf_is_rejected() {
        let (_dir, router) = app(1024);
        let (status, json) =
            post_classify(router, &[("arquivo", Some("fatura.pdf"), b"not a pdf")]).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["detail"].as_str().unwrap().starts_with("Falha ao ler PDF"));
    }
}
