/// HTTP handlers for the ninja endpoints
///
/// `configure` wires the six routes under `/api` and installs the extractor
/// error handlers so body/query/path parse failures land in the error
/// taxonomy instead of actix's default responses.
pub mod ninjas;

pub use ninjas::{
    create_ninja, delete_ninja, find_nearby_ninjas, get_ninja, list_ninjas, update_ninja,
};

use actix_web::web;

use crate::error::AppError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(
        web::scope("/api")
            .service(
                web::resource("/ninjas")
                    .route(web::get().to(ninjas::list_ninjas))
                    .route(web::post().to(ninjas::create_ninja)),
            )
            // Registered before `{id}` so "nearby" is not captured as an id.
            .service(
                web::resource("/ninjas/nearby").route(web::get().to(ninjas::find_nearby_ninjas)),
            )
            .service(
                web::resource("/ninjas/{id}")
                    .route(web::get().to(ninjas::get_ninja))
                    .route(web::put().to(ninjas::update_ninja))
                    .route(web::delete().to(ninjas::delete_ninja)),
            ),
    );
}
