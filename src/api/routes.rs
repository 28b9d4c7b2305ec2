//! # HTTP Routes for the Text Processing API
//!
//! Actix web handlers and server setup. `POST /process-text/` runs the full
//! analysis pipeline on a JSON body `{"text": "..."}` and answers with
//! `{"message": "SUCCESSFULLY PROCESSED", "response": {...}}`, or with a 500
//! and `{"detail": "Error processing text: ..."}` if any stage fails.

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{middleware, web, App, HttpRequest, HttpResponse, HttpServer, Responder};
use log::{error, info};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::config::ServiceConfig;
use crate::pipeline::{Analysis, AnalyzerOptions, TextAnalyzer};
use crate::tagger::english_tokenizer;

pub const SUCCESS_MESSAGE: &str = "SUCCESSFULLY PROCESSED";

/// Request bodies larger than this are rejected before deserialization.
const JSON_LIMIT_BYTES: usize = 1 << 20;

#[derive(Deserialize, Debug)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Serialize)]
struct ProcessResponse<'a> {
    message: &'static str,
    response: &'a Analysis,
}

#[derive(Serialize)]
struct ErrorDetail {
    detail: String,
}

pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({ "message": "Welcome to the Text Processing API!" }))
}

pub async fn docs() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "API documentation",
        "endpoints": [
            { "method": "GET", "path": "/", "description": "Welcome message" },
            { "method": "GET", "path": "/docs", "description": "This document" },
            {
                "method": "POST",
                "path": "/process-text/",
                "description": "Tokens, POS groups, toy grammar, round trip and word \
                                frequencies for {\"text\": string}"
            }
        ]
    }))
}

/// Runs the analysis pipeline on the posted text.
///
/// # Returns
/// - **200 OK** with the analysis wrapped in a success envelope.
/// - **500 Internal Server Error** with the failure message when tokenization,
///   tagging or grammar synthesis fails. No partial result is returned.
pub async fn process_text(
    analyzer: web::Data<TextAnalyzer>,
    request: web::Json<TextRequest>,
) -> HttpResponse {
    let request_id = Uuid::new_v4();
    info!("[{}] Processing text ({} bytes)", request_id, request.text.len());

    match analyzer.analyze(&request.text) {
        Ok(analysis) => {
            info!(
                "[{}] Processed: {} tokens, {} grammar lines",
                request_id,
                analysis.tokens.len(),
                analysis.grammar.lines().count()
            );
            HttpResponse::Ok()
                .json(ProcessResponse { message: SUCCESS_MESSAGE, response: &analysis })
        }
        Err(e) => {
            error!("[{}] Error processing text: {}", request_id, e);
            HttpResponse::InternalServerError().json(ErrorDetail {
                detail: format!("Error processing text: {}", e),
            })
        }
    }
}

fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    let detail = err.to_string();
    info!("Rejected request body on {}: {}", req.path(), detail);
    let response = HttpResponse::UnprocessableEntity().json(ErrorDetail { detail });
    InternalError::from_response(err, response).into()
}

/// Registers the API routes; shared by the server and by tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_LIMIT_BYTES)
            .error_handler(json_error_handler),
    )
    .route("/", web::get().to(index))
    .route("/docs", web::get().to(docs))
    .route("/process-text/", web::post().to(process_text))
    .route("/process-text", web::post().to(process_text));
}

/// Initializes and runs the Actix web server on the configured address.
pub async fn run_server(config: ServiceConfig) -> std::io::Result<()> {
    // Load the tagger model before accepting traffic.
    english_tokenizer().map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    let analyzer = web::Data::new(TextAnalyzer::new(AnalyzerOptions::from(&config)));

    info!(
        "Starting server at http://{}:{}/ (remove_stopwords={}, top_n={})",
        config.host, config.port, config.remove_stopwords, config.top_n
    );
    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(analyzer.clone())
            .configure(configure)
    });
    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }
    server.bind(config.bind_address())?.run().await
}
