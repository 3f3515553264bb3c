use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::schema::types::{ContentTypeRequest, SchemaError, SchemaEntity};
use crate::schema::validator;

use super::http_server::AppState;
use super::error_response;

#[derive(Deserialize)]
pub struct ListContentTypesQuery {
    kind: Option<String>,
}

/// GET /content-types[?kind=collectionType|singleType]
pub async fn get_content_types(
    query: web::Query<ListContentTypesQuery>,
    state: web::Data<AppState>,
) -> impl Responder {
    let kind = match query.kind.as_deref() {
        Some(raw) => match validator::validate_kind_filter(raw) {
            Ok(kind) => Some(kind),
            Err(e) => return error_response(&e),
        },
        None => None,
    };

    match state.node.registry.list_content_types(kind) {
        Ok(content_types) => HttpResponse::Ok().json(json!({ "data": content_types })),
        Err(e) => error_response(&e),
    }
}

/// GET /content-types/{uid}
pub async fn get_content_type(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> impl Responder {
    let uid = path.into_inner();

    match state.node.registry.get(&uid) {
        Ok(Some(SchemaEntity::ContentType(content_type))) => {
            HttpResponse::Ok().json(json!({ "data": content_type }))
        }
        Ok(_) => HttpResponse::NotFound().json(json!({ "error": "contentType.notFound" })),
        Err(e) => error_response(&e),
    }
}

/// POST /content-types
pub async fn create_content_type(
    body: web::Json<ContentTypeRequest>,
    state: web::Data<AppState>,
) -> impl Responder {
    let node = &state.node;
    let was_empty = node.registry.content_type_count().unwrap_or(0) == 0;

    match node.content_types.create(body.into_inner()) {
        Ok(content_type) => {
            let properties = json!({
                "kind": content_type.kind,
                "draftAndPublish": content_type.options.draft_and_publish,
            });
            let event = if was_empty {
                "didCreateFirstContentType"
            } else {
                "didCreateContentType"
            };
            node.telemetry.send(event, properties).await;

            HttpResponse::Created().json(json!({ "data": { "uid": content_type.uid } }))
        }
        Err(e) => {
            log::error!("failed to create content type: {}", e);
            if !matches!(e, SchemaError::Validation(_)) {
                node.telemetry
                    .send("didNotCreateContentType", json!({ "error": e.to_string() }))
                    .await;
            }
            error_response(&e)
        }
    }
}

/// PUT /content-types/{uid}
pub async fn update_content_type(
    path: web::Path<String>,
    body: web::Json<ContentTypeRequest>,
    state: web::Data<AppState>,
) -> impl Responder {
    let uid = path.into_inner();

    match state.node.registry.get(&uid) {
        Ok(Some(SchemaEntity::ContentType(_))) => {}
        Ok(_) => return HttpResponse::NotFound().json(json!({ "error": "contentType.notFound" })),
        Err(e) => return error_response(&e),
    }

    match state.node.content_types.edit(&uid, body.into_inner()) {
        Ok(content_type) => {
            HttpResponse::Created().json(json!({ "data": { "uid": content_type.uid } }))
        }
        Err(e) => {
            log::error!("failed to update content type '{}': {}", uid, e);
            error_response(&e)
        }
    }
}

/// DELETE /content-types/{uid}
pub async fn delete_content_type(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> impl Responder {
    let uid = path.into_inner();

    match state.node.registry.get(&uid) {
        Ok(Some(SchemaEntity::ContentType(_))) => {}
        Ok(_) => return HttpResponse::NotFound().json(json!({ "error": "contentType.notFound" })),
        Err(e) => return error_response(&e),
    }

    match state.node.content_types.delete(&uid) {
        Ok(content_type) => HttpResponse::Ok().json(json!({ "data": { "uid": content_type.uid } })),
        Err(e) => {
            log::error!("failed to delete content type '{}': {}", uid, e);
            error_response(&e)
        }
    }
}
