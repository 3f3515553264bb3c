use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer as ActixHttpServer};
use log::info;

use crate::schema::types::SchemaResult;

use super::node::SchemaFoldNode;
use super::{category_routes, component_routes, content_type_routes, system_routes};

/// Shared application state for the HTTP server.
pub struct AppState {
    pub node: Arc<SchemaFoldNode>,
}

/// HTTP server exposing the schema-builder REST surface.
pub struct SchemaFoldHttpServer {
    node: Arc<SchemaFoldNode>,
    bind_address: String,
}

impl SchemaFoldHttpServer {
    pub fn new(node: Arc<SchemaFoldNode>, bind_address: &str) -> Self {
        Self {
            node,
            bind_address: bind_address.to_string(),
        }
    }

    /// Run the HTTP server until it is shut down.
    pub async fn run(&self) -> SchemaResult<()> {
        info!("HTTP server running on {}", self.bind_address);

        let app_state = web::Data::new(AppState {
            node: self.node.clone(),
        });

        ActixHttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header();

            App::new()
                .app_data(app_state.clone())
                .wrap(cors)
                .configure(configure_routes)
        })
        .bind(&self.bind_address)?
        .run()
        .await?;

        Ok(())
    }
}

/// Register the builder routes on an actix service config.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/content-types",
        web::get().to(content_type_routes::get_content_types),
    )
    .route(
        "/content-types",
        web::post().to(content_type_routes::create_content_type),
    )
    .route(
        "/content-types/{uid}",
        web::get().to(content_type_routes::get_content_type),
    )
    .route(
        "/content-types/{uid}",
        web::put().to(content_type_routes::update_content_type),
    )
    .route(
        "/content-types/{uid}",
        web::delete().to(content_type_routes::delete_content_type),
    )
    .route(
        "/components",
        web::get().to(component_routes::get_components),
    )
    .route(
        "/components",
        web::post().to(component_routes::create_component),
    )
    .route(
        "/components/{uid}",
        web::get().to(component_routes::get_component),
    )
    .route(
        "/components/{uid}",
        web::put().to(component_routes::update_component),
    )
    .route(
        "/components/{uid}",
        web::delete().to(component_routes::delete_component),
    )
    .route(
        "/component-categories/{name}",
        web::put().to(category_routes::edit_category),
    )
    .route(
        "/component-categories/{name}",
        web::delete().to(category_routes::delete_category),
    )
    .route("/connections", web::get().to(system_routes::get_connections));
}
