use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::schema::types::CategoryBody;

use super::http_server::AppState;
use super::error_response;

/// PUT /component-categories/{name}
pub async fn edit_category(
    path: web::Path<String>,
    body: web::Json<CategoryBody>,
    state: web::Data<AppState>,
) -> impl Responder {
    let name = path.into_inner();

    match state.node.components.edit_category(&name, &body) {
        Ok(new_name) => HttpResponse::Ok().json(json!({ "name": new_name })),
        Err(e) => {
            log::error!("failed to rename component category '{}': {}", name, e);
            error_response(&e)
        }
    }
}

/// DELETE /component-categories/{name}
pub async fn delete_category(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> impl Responder {
    let name = path.into_inner();

    match state.node.components.delete_category(&name) {
        Ok(()) => HttpResponse::Ok().json(json!({ "name": name })),
        Err(e) => {
            log::error!("failed to delete component category '{}': {}", name, e);
            error_response(&e)
        }
    }
}
