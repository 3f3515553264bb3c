use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::schema::types::{ComponentRequest, SchemaEntity};

use super::http_server::AppState;
use super::error_response;

/// GET /components
pub async fn get_components(state: web::Data<AppState>) -> impl Responder {
    match state.node.registry.list_components() {
        Ok(components) => HttpResponse::Ok().json(json!({ "data": components })),
        Err(e) => error_response(&e),
    }
}

/// GET /components/{uid}
pub async fn get_component(path: web::Path<String>, state: web::Data<AppState>) -> impl Responder {
    let uid = path.into_inner();

    match state.node.registry.get(&uid) {
        Ok(Some(SchemaEntity::Component(component))) => {
            HttpResponse::Ok().json(json!({ "data": component }))
        }
        Ok(_) => HttpResponse::NotFound().json(json!({ "error": "component.notFound" })),
        Err(e) => error_response(&e),
    }
}

/// POST /components
pub async fn create_component(
    body: web::Json<ComponentRequest>,
    state: web::Data<AppState>,
) -> impl Responder {
    match state.node.components.create(body.into_inner()) {
        Ok(component) => HttpResponse::Created().json(json!({ "data": { "uid": component.uid } })),
        Err(e) => {
            log::error!("failed to create component: {}", e);
            error_response(&e)
        }
    }
}

/// PUT /components/{uid}
pub async fn update_component(
    path: web::Path<String>,
    body: web::Json<ComponentRequest>,
    state: web::Data<AppState>,
) -> impl Responder {
    let uid = path.into_inner();

    match state.node.registry.get(&uid) {
        Ok(Some(SchemaEntity::Component(_))) => {}
        Ok(_) => return HttpResponse::NotFound().json(json!({ "error": "component.notFound" })),
        Err(e) => return error_response(&e),
    }

    match state.node.components.edit(&uid, body.into_inner()) {
        Ok(component) => HttpResponse::Ok().json(json!({ "data": { "uid": component.uid } })),
        Err(e) => {
            log::error!("failed to update component '{}': {}", uid, e);
            error_response(&e)
        }
    }
}

/// DELETE /components/{uid}
pub async fn delete_component(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> impl Responder {
    let uid = path.into_inner();

    match state.node.registry.get(&uid) {
        Ok(Some(SchemaEntity::Component(_))) => {}
        Ok(_) => return HttpResponse::NotFound().json(json!({ "error": "component.notFound" })),
        Err(e) => return error_response(&e),
    }

    match state.node.components.delete(&uid) {
        Ok(component) => HttpResponse::Ok().json(json!({ "data": { "uid": component.uid } })),
        Err(e) => {
            log::error!("failed to delete component '{}': {}", uid, e);
            error_response(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_node;
    use actix_web::test;
    use actix_web::Responder;
    use std::sync::Arc;
    use tempfile::tempdir;

    #[tokio::test]
    async fn create_component_derives_uid_from_category_and_name() {
        let dir = tempdir().unwrap();
        let (node, _trigger) = test_node(dir.path()).unwrap();
        let state = web::Data::new(AppState {
            node: Arc::new(node),
        });

        let body: ComponentRequest = serde_json::from_value(serde_json::json!({
            "component": { "displayName": "Hero", "category": "layout" }
        }))
        .unwrap();

        let req = test::TestRequest::post().to_http_request();
        let resp = create_component(web::Json(body), state.clone())
            .await
            .respond_to(&req);
        assert_eq!(resp.status(), 201);

        let req = test::TestRequest::get().to_http_request();
        let resp = get_component(web::Path::from("layout.hero".to_string()), state)
            .await
            .respond_to(&req);
        assert_eq!(resp.status(), 200);
    }
}
