use crate::application::{DatasetHistoryUseCase, ReportUseCase, UploadDatasetUseCase};
use crate::domain::error::{AppError, Result};
use actix_cors::Cors;
use actix_multipart::Multipart;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder};
use futures_util::TryStreamExt;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

pub struct AppState {
    pub upload_use_case: UploadDatasetUseCase,
    pub history_use_case: DatasetHistoryUseCase,
    pub report_use_case: ReportUseCase,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(err: AppError) -> HttpResponse {
    match &err {
        AppError::ValidationError(_) | AppError::MissingColumn(_) | AppError::ParseError(_) => {
            HttpResponse::BadRequest().json(ErrorBody {
                error: err.to_string(),
            })
        }
        AppError::NotFound(msg) => HttpResponse::NotFound().json(ErrorBody { error: msg.clone() }),
        _ => {
            error!(error = %err, "Request failed");
            HttpResponse::InternalServerError().json(ErrorBody {
                error: "An unexpected error occurred.".to_string(),
            })
        }
    }
}

#[get("/")]
async fn api_root() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Welcome to the Chemical Visualizer API!",
        "api_endpoints": {
            "upload": "/api/upload/",
            "history": "/api/history/",
            "dataset_detail": "/api/datasets/<id>/",
            "dataset_report": "/api/datasets/<id>/report/"
        }
    }))
}

#[post("/upload/")]
async fn upload(data: web::Data<Arc<AppState>>, payload: Multipart) -> impl Responder {
    let (filename, bytes) = match read_file_part(payload).await {
        Ok(Some(part)) => part,
        Ok(None) => {
            return error_response(AppError::ValidationError(
                "A .csv file is required.".to_string(),
            ))
        }
        Err(err) => return error_response(err),
    };

    info!(filename = %filename, size = bytes.len(), "Processing CSV upload");

    match data.upload_use_case.execute(&filename, &bytes).await {
        Ok(dataset) => HttpResponse::Created().json(dataset),
        Err(err) => error_response(err),
    }
}

/// Pull the `file` part out of the multipart payload.
async fn read_file_part(mut payload: Multipart) -> Result<Option<(String, Vec<u8>)>> {
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::ValidationError(format!("Invalid multipart payload: {}", e)))?
    {
        if field.name() != "file" {
            continue;
        }

        let filename = field
            .content_disposition()
            .get_filename()
            .unwrap_or_default()
            .to_string();

        let mut bytes = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| AppError::ValidationError(format!("Invalid multipart payload: {}", e)))?
        {
            bytes.extend_from_slice(&chunk);
        }

        return Ok(Some((filename, bytes)));
    }

    Ok(None)
}

#[get("/history/")]
async fn history(data: web::Data<Arc<AppState>>) -> impl Responder {
    match data.history_use_case.history().await {
        Ok(datasets) => HttpResponse::Ok().json(datasets),
        Err(err) => error_response(err),
    }
}

#[get("/datasets/{id}/")]
async fn detail(data: web::Data<Arc<AppState>>, path: web::Path<i64>) -> impl Responder {
    match data.history_use_case.get(path.into_inner()).await {
        Ok(dataset) => HttpResponse::Ok().json(dataset),
        Err(err) => error_response(err),
    }
}

#[get("/datasets/{id}/report/")]
async fn report(data: web::Data<Arc<AppState>>, path: web::Path<i64>) -> impl Responder {
    match data.report_use_case.execute(path.into_inner()).await {
        Ok(document) => HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", document.filename),
            ))
            .body(document.bytes),
        Err(err) => error_response(err),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_root).service(
        web::scope("/api")
            .service(upload)
            .service(history)
            .service(detail)
            .service(report),
    );
}

pub fn start_server(state: Arc<AppState>, host: &str, port: u16) -> std::io::Result<Server> {
    let data = web::Data::new(state);

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Browser frontend runs on another origin

        App::new().wrap(cors).app_data(data.clone()).configure(configure)
    })
    .bind((host, port))?
    .run();

    Ok(server)
}
