#![deny(missing_docs)]

//! # Serve Command
//!
//! Loads a spec, builds the normalized model once, then answers every
//! incoming request with the canned response picked by the matcher. The
//! model is immutable after startup, so it is shared across workers as
//! plain `web::Data` with no locking.

use crate::error::CliResult;
use crate::fetch;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use cannery_core::{find_response, Api, AppError, FindResponseParams, Response, JSON_MEDIA_TYPE};

/// Arguments for the serve command.
#[derive(clap::Args, Debug, Clone)]
pub struct ServeArgs {
    /// Path or URL of the OpenAPI document.
    pub spec: String,

    /// Interface to bind.
    #[clap(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[clap(long, default_value = "8080", env = "CANNERY_PORT")]
    pub port: u16,
}

/// Executes the serve command: acquire, parse, build, then serve forever.
pub fn execute(args: &ServeArgs) -> CliResult<()> {
    let content = fetch::fetch(&args.spec)?;
    let api = cannery_core::parse(&content)?;

    log::info!(
        "loaded {} operations from {}",
        api.operations.len(),
        args.spec
    );
    log::info!("listening on {}:{}", args.host, args.port);

    actix_web::rt::System::new()
        .block_on(run_server(api, args.host.clone(), args.port))
        .map_err(Into::into)
}

async fn run_server(api: Api, host: String, port: u16) -> std::io::Result<()> {
    let api = web::Data::new(api);

    HttpServer::new(move || {
        App::new()
            .app_data(api.clone())
            .default_service(web::route().to(handle))
    })
    .bind((host, port))?
    .run()
    .await
}

/// Catch-all handler: every request goes through the matcher.
async fn handle(req: HttpRequest, body: web::Bytes, api: web::Data<Api>) -> HttpResponse {
    let media_type = header_value(&req, CONTENT_TYPE.as_str()).unwrap_or(JSON_MEDIA_TYPE);

    let params = FindResponseParams {
        path: req.path(),
        method: req.method().as_str(),
        body: Some(body.as_ref()),
        media_type,
    };

    match find_response(api.get_ref(), &params) {
        Ok(response) => render(response, &req),
        Err(err) => render_error(&err),
    }
}

fn render(response: &Response, req: &HttpRequest) -> HttpResponse {
    let status = StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::OK);

    if response.media_type.is_empty() {
        return HttpResponse::build(status).finish();
    }

    // An X-Example header selects a named example; the default chain is
    // named default -> literal example -> schema-assembled value.
    let name = header_value(req, "x-example").unwrap_or("");

    HttpResponse::build(status).json(response.example_value(name))
}

fn render_error(err: &AppError) -> HttpResponse {
    let status = match err {
        AppError::OperationNotFound { .. } => StatusCode::NOT_FOUND,
        AppError::RequestBodyDecode(_) | AppError::MissingRequiredField(_) => {
            StatusCode::BAD_REQUEST
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    log::warn!("{}", err);

    HttpResponse::build(status).json(serde_json::json!({ "error": err.to_string() }))
}

fn header_value<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|value| value.to_str().ok())
}
