use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use super::http_server::AppState;

/// GET /connections
///
/// Names of the configured database connections, for the admin UI's
/// connection picker.
pub async fn get_connections(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "connections": state.node.config.connection_names(),
    }))
}
