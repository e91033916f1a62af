use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use ninja_service::openapi::ApiDoc;
use ninja_service::{db, handlers, Config};

async fn health(db: web::Data<mongodb::Database>) -> HttpResponse {
    match db::ping(db.get_ref()).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "ninja-service",
            "version": env!("CARGO_PKG_VERSION"),
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("MongoDB ping failed: {}", e),
            "service": "ninja-service",
        })),
    }
}

async fn openapi_json(doc: web::Data<utoipa::openapi::OpenApi>) -> actix_web::Result<HttpResponse> {
    let body = serde_json::to_string(doc.get_ref()).map_err(|e| {
        tracing::error!("OpenAPI serialization failed: {}", e);
        actix_web::error::ErrorInternalServerError("OpenAPI serialization error")
    })?;

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(body))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting ninja-service v{}", env!("CARGO_PKG_VERSION"));

    let database = match db::connect(&config.database).await {
        Ok(database) => database,
        Err(e) => {
            tracing::error!("MongoDB client creation failed: {}", e);
            eprintln!("ERROR: Failed to create MongoDB client: {}", e);
            std::process::exit(1);
        }
    };

    // The nearby query needs the 2dsphere index; the service still serves
    // CRUD if the store is down right now, so this is not fatal.
    if let Err(e) = db::NinjaRepository::new(&database).ensure_indexes().await {
        tracing::error!("Failed to ensure geospatial index: {}", e);
    }

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let database_data = web::Data::new(database);
    let allowed_origins = config.cors.allowed_origins.clone();

    HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        let openapi_doc = ApiDoc::openapi();

        App::new()
            .app_data(database_data.clone())
            .app_data(web::Data::new(openapi_doc.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(TracingLogger::default())
            .service(
                SwaggerUi::new("/api-docs/{_:.*}").url("/api/openapi.json", openapi_doc.clone()),
            )
            .route("/api/openapi.json", web::get().to(openapi_json))
            .route("/health", web::get().to(health))
            .configure(handlers::configure)
    })
    .bind(&bind_address)?
    .run()
    .await
}
