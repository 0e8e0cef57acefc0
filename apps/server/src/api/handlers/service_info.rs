//! Service info endpoint: `GET /service-info`.

use axum::Json;

use crate::models::ServiceInfo;

/// Return service metadata.
pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: "Quaero Search API",
        version: env!("CARGO_PKG_VERSION"),
        description: "RESTful API for searching and retrieving BioProject, \
                      BioSample, SRA, and JGA entries.",
    })
}
