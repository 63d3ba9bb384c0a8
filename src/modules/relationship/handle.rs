use actix_web::{delete, get, post, put, web};
use log::info;

use crate::{
    api::{error, success},
    modules::relationship::{
        model::{DetailedRelationship, Relationship, RelationshipBody},
        schema::RelationshipEntity,
        service::RelationshipService,
    },
    utils::ValidatedJson,
};

fn not_found_as(message: &'static str) -> impl FnOnce(error::SystemError) -> error::Error {
    move |e| match e {
        error::SystemError::RelationshipNotFound => error::Error::not_found(message),
        other => other.into(),
    }
}

#[get("/friends/{user_id}")]
pub async fn get_friends_list(
    relationship_service: web::Data<RelationshipService>,
    user_id: web::Path<String>,
) -> Result<success::Success<Vec<DetailedRelationship>>, error::Error> {
    info!("Getting friends list for user {user_id}");
    let friends = relationship_service
        .get_friends_list(&user_id)
        .await
        .map_err(not_found_as("Friends not found"))?;

    Ok(success::Success::ok(Some(friends)))
}

#[get("/invites/{user_id}")]
pub async fn get_invites_list(
    relationship_service: web::Data<RelationshipService>,
    user_id: web::Path<String>,
) -> Result<success::Success<Vec<DetailedRelationship>>, error::Error> {
    info!("Getting invites list for user {user_id}");
    let invites = relationship_service
        .get_invites_list(&user_id)
        .await
        .map_err(not_found_as("Invites not found"))?;

    Ok(success::Success::ok(Some(invites)))
}

#[get("/{id}")]
pub async fn get_relationship(
    relationship_service: web::Data<RelationshipService>,
    id: web::Path<String>,
) -> Result<success::Success<RelationshipEntity>, error::Error> {
    info!("Getting relationship {id}");
    let relationship = relationship_service.get_relationship(&id).await?;
    Ok(success::Success::ok(Some(relationship)))
}

#[post("")]
pub async fn add_relationship(
    relationship_service: web::Data<RelationshipService>,
    body: ValidatedJson<RelationshipBody>,
) -> Result<success::Success<RelationshipEntity>, error::Error> {
    let candidate: Relationship = body.0.try_into()?;
    info!(
        "Adding relationship between {} and {}",
        candidate.user_1.user_id, candidate.user_2.user_id
    );
    let relationship = relationship_service.add_relationship(candidate).await?;

    Ok(success::Success::created(Some(relationship)))
}

#[put("")]
pub async fn update_relationship(
    relationship_service: web::Data<RelationshipService>,
    body: ValidatedJson<RelationshipBody>,
) -> Result<success::Success<RelationshipEntity>, error::Error> {
    let candidate: Relationship = body.0.try_into()?;
    info!("Updating relationship {}", candidate.id.as_deref().unwrap_or("<none>"));
    let relationship = relationship_service.update_relationship(candidate).await?;

    Ok(success::Success::ok(Some(relationship)))
}

#[delete("/{id}")]
pub async fn delete_relationship(
    relationship_service: web::Data<RelationshipService>,
    id: web::Path<String>,
) -> Result<success::Success<()>, error::Error> {
    info!("Deleting relationship {id}");
    relationship_service.delete_relationship(&id).await?;
    Ok(success::Success::no_content())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};

    use crate::{
        modules::relationship::{
            repository_memory::RelationshipRepositoryMemory,
            route,
            schema::{RelationshipEntity, RelationshipType::{Friend, PendingIncoming, PendingOutgoing}},
            service::RelationshipService,
        },
        test::{relationship, FakeConversationRepository, FakeUserRepository},
    };

    fn service(rows: Vec<RelationshipEntity>) -> RelationshipService {
        RelationshipService::with_dependencies(
            Arc::new(RelationshipRepositoryMemory::with_rows(rows)),
            Arc::new(FakeUserRepository::with_users(&["A", "B", "C"])),
            Arc::new(FakeConversationRepository::default()),
            true,
        )
    }

    macro_rules! app {
        ($rows:expr) => {
            test::init_service(
                App::new()
                    .app_data(actix_web::web::Data::new(service($rows)))
                    .configure(route::configure),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_friends_list_ok_and_not_found() {
        let app = app!(vec![relationship("r1", ("A", Friend), ("B", Friend))]);

        let req = test::TestRequest::get().uri("/friends/B").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"][0]["id"], "r1");
        assert_eq!(body["data"][0]["user"]["id"], "A");
        assert_eq!(body["data"][0]["user"]["username"], "user-A");
        assert_eq!(body["data"][0]["user"]["relationship_type"], "Friend");
        assert_eq!(body["data"][0]["created_on"], "2021-03-20T12:00:00Z");

        let req = test::TestRequest::get().uri("/friends/C").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Friends not found");
    }

    #[actix_web::test]
    async fn test_invites_not_found_message() {
        let app = app!(vec![relationship("r1", ("A", PendingOutgoing), ("B", PendingIncoming))]);

        let req = test::TestRequest::get().uri("/invites/B").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/invites/A").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Invites not found");
    }

    #[actix_web::test]
    async fn test_create_then_fetch() {
        let app = app!(vec![]);

        let req = test::TestRequest::post()
            .uri("/relationships")
            .set_json(json!({
                "user_1": {"user_id": "A", "relationship_type": "PendingOutgoing"},
                "user_2": {"user_id": "B", "relationship_type": "PendingIncoming"},
                "created_on": "1999-01-01T00:00:00Z"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let id = body["data"]["id"].as_str().unwrap().to_string();
        assert!(!id.is_empty());
        assert_eq!(body["data"]["conversation_id"], "conv-A-B-1");
        assert_eq!(body["data"]["created_on"], body["data"]["updated_on"]);

        let req = test::TestRequest::get().uri(&format!("/relationships/{id}")).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["user_2"]["user_id"], "B");
    }

    #[actix_web::test]
    async fn test_create_rejects_bad_bodies() {
        let app = app!(vec![relationship("r1", ("A", Friend), ("B", Friend))]);

        let cases = [
            (
                json!({
                    "user_1": {"user_id": "", "relationship_type": "Friend"},
                    "user_2": {"user_id": "B", "relationship_type": "Friend"}
                }),
                StatusCode::BAD_REQUEST,
            ),
            (
                json!({
                    "user_1": {"user_id": "A", "relationship_type": "BestFriend"},
                    "user_2": {"user_id": "C", "relationship_type": "Friend"}
                }),
                StatusCode::BAD_REQUEST,
            ),
            (
                json!({
                    "user_1": {"user_id": "A", "relationship_type": "Friend"},
                    "user_2": {"user_id": "A", "relationship_type": "Friend"}
                }),
                StatusCode::BAD_REQUEST,
            ),
            (
                json!({
                    "user_1": {"user_id": "B", "relationship_type": "Friend"},
                    "user_2": {"user_id": "A", "relationship_type": "Friend"}
                }),
                StatusCode::BAD_REQUEST,
            ),
            (json!({"user_1": "A"}), StatusCode::BAD_REQUEST),
        ];

        for (payload, status) in cases {
            let req = test::TestRequest::post().uri("/relationships").set_json(&payload).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), status, "payload: {payload}");
        }
    }

    #[actix_web::test]
    async fn test_update_and_delete() {
        let app = app!(vec![relationship("r1", ("A", PendingOutgoing), ("B", PendingIncoming))]);

        let req = test::TestRequest::put()
            .uri("/relationships")
            .set_json(json!({
                "id": "r1",
                "user_1": {"user_id": "A", "relationship_type": "Friend"},
                "user_2": {"user_id": "B", "relationship_type": "Friend"}
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["id"], "r1");
        assert_eq!(body["data"]["conversation_id"], "conv-r1");
        assert_eq!(body["data"]["created_on"], "2021-03-20T12:00:00Z");

        let req = test::TestRequest::put()
            .uri("/relationships")
            .set_json(json!({
                "id": "r404",
                "user_1": {"user_id": "A", "relationship_type": "Friend"},
                "user_2": {"user_id": "C", "relationship_type": "Friend"}
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete().uri("/relationships/r1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::delete().uri("/relationships/r1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Relationship not found");
    }
}
