mod api;
mod database;
mod models;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use database::JobBoardStore;
use dotenv::dotenv;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = utils::Config::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

    log::info!("🚀 Starting Jobbox API...");
    log::info!("📊 Database: {} ({})", config.redacted_uri(), config.database_name);

    let db = database::MongoDB::new(&config.mongodb_uri, &config.database_name)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::ConnectionRefused, e.to_string()))?;

    log::info!("✅ MongoDB connected successfully");

    let store: Arc<dyn JobBoardStore> = Arc::new(db.clone());
    let store_data = web::Data::from(store);

    let bind_address = config.bind_address();
    log::info!("🌐 Server starting on {}", bind_address);
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", bind_address);

    let openapi = api::swagger::ApiDoc::openapi();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(store_data.clone())
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone())
            )
            .configure(api::routes)
    })
    .bind(&bind_address)?
    .run();

    let result = server.await;

    log::info!("🛑 Server stopped, closing database connection");
    db.close().await;

    result
}
