use actix_web::{get, web};

use crate::{
    api::{error, success},
    modules::relationship::service::RelationshipService,
};

#[get("/live")]
pub async fn live() -> Result<success::Success<()>, error::Error> {
    Ok(success::Success::ok(None).message("Server is running"))
}

#[get("/ready")]
pub async fn ready(
    relationship_service: web::Data<RelationshipService>,
) -> Result<success::Success<()>, error::Error> {
    relationship_service.readiness().await?;
    Ok(success::Success::ok(None).message("Ready"))
}
