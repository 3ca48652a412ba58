use crate::modules::context::status::ServiceStatus;
use poem::{handler, web::Json, IntoResponse};

#[handler]
pub async fn get_status() -> impl IntoResponse {
    Json(ServiceStatus::get())
}
