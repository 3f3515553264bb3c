//! Node wiring and HTTP surface for the schema builder.

pub mod category_routes;
pub mod component_routes;
pub mod content_type_routes;
pub mod http_server;
pub mod node;
pub mod system_routes;

pub use http_server::{AppState, SchemaFoldHttpServer};
pub use node::SchemaFoldNode;

use actix_web::HttpResponse;
use serde_json::json;

use crate::schema::types::SchemaError;

/// Translate a service error to the wire: 404 for missing entities, 400 for
/// everything else, always as an `{"error": ...}` envelope. Validation
/// failures carry the full issue list.
pub(crate) fn error_response(err: &SchemaError) -> HttpResponse {
    match err {
        SchemaError::Validation(issues) => {
            HttpResponse::BadRequest().json(json!({ "error": issues }))
        }
        SchemaError::NotFound(_) => {
            HttpResponse::NotFound().json(json!({ "error": err.to_string() }))
        }
        _ => HttpResponse::BadRequest().json(json!({ "error": err.to_string() })),
    }
}
