use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};
use futures_util::{future::LocalBoxFuture, FutureExt};
use std::time::Duration;

use crate::api::error;

/// Fails a request with 503 when its handler runs past `timeout`.
pub fn request_timeout<B>(
    timeout: Duration,
) -> impl Fn(
    ServiceRequest,
    Next<B>,
) -> LocalBoxFuture<'static, Result<ServiceResponse<B>, actix_web::Error>>
where
    B: MessageBody + 'static,
{
    move |req: ServiceRequest, next: Next<B>| {
        async move {
            let path = req.path().to_string();
            match tokio::time::timeout(timeout, next.call(req)).await {
                Ok(response) => response,
                Err(_) => {
                    log::warn!("Request to {path} timed out after {timeout:?}");
                    Err(error::Error::service_unavailable("Request timed out").into())
                }
            }
        }
        .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, middleware::from_fn, test, web, App, HttpResponse};

    #[actix_web::test]
    async fn test_slow_handler_is_cut_off() {
        let app = test::init_service(
            App::new()
                .wrap(from_fn(request_timeout(Duration::from_millis(50))))
                .route("/fast", web::get().to(|| async { HttpResponse::Ok().finish() }))
                .route(
                    "/slow",
                    web::get().to(|| async {
                        tokio::time::sleep(Duration::from_secs(5)).await;
                        HttpResponse::Ok().finish()
                    }),
                ),
        )
        .await;

        let req = test::TestRequest::get().uri("/fast").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/slow").to_request();
        let err = test::try_call_service(&app, req).await.unwrap_err();
        assert_eq!(err.as_response_error().status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
