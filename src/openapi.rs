/// OpenAPI documentation for the ninja service
use utoipa::OpenApi;

use crate::handlers::ninjas;
use crate::models::GeoPoint;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ninjas API",
        version = "1.0.0",
        description = "A simple API to locate ninjas",
    ),
    servers(
        (url = "http://localhost:4000", description = "Development server"),
    ),
    paths(
        ninjas::list_ninjas,
        ninjas::find_nearby_ninjas,
        ninjas::get_ninja,
        ninjas::create_ninja,
        ninjas::update_ninja,
        ninjas::delete_ninja,
    ),
    components(schemas(
        GeoPoint,
        ninjas::GeometryInput,
        ninjas::CreateNinjaRequest,
        ninjas::UpdateNinjaRequest,
        ninjas::NinjaPayload,
        ninjas::NinjaResponse,
        ninjas::NinjaListResponse,
        ninjas::ErrorResponse,
    )),
    tags(
        (name = "ninjas", description = "Ninja CRUD and proximity lookup"),
    ),
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_covers_all_six_operations() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = &doc["paths"];

        assert!(paths["/api/ninjas"]["get"].is_object());
        assert!(paths["/api/ninjas"]["post"].is_object());
        assert!(paths["/api/ninjas/nearby"]["get"].is_object());
        assert!(paths["/api/ninjas/{id}"]["get"].is_object());
        assert!(paths["/api/ninjas/{id}"]["put"].is_object());
        assert!(paths["/api/ninjas/{id}"]["delete"].is_object());
    }
}
