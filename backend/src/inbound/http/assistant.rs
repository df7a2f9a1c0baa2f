//! Housing assistant HTTP handlers.
//!
//! ```text
//! GET  /api/v1/assistant  Greeting and quick questions
//! POST /api/v1/assistant  Submit a message, receive the scripted reply
//! ```
//!
//! The assistant is open to anonymous viewers; no session is consulted.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, assistant};
use crate::inbound::http::ApiResult;

/// Assistant opening payload.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssistantGreeting {
    pub greeting: &'static str,
    pub quick_questions: [&'static str; 4],
}

/// Assistant message body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssistantRequest {
    pub message: String,
}

/// Assistant reply payload.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssistantReply {
    pub reply: &'static str,
}

/// Greeting and quick questions for a fresh conversation.
#[utoipa::path(
    get,
    path = "/api/v1/assistant",
    responses(
        (status = 200, description = "Greeting and quick questions", body = AssistantGreeting)
    ),
    tags = ["assistant"],
    operation_id = "getAssistantGreeting"
)]
#[get("/assistant")]
pub async fn greeting() -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(AssistantGreeting {
        greeting: assistant::GREETING,
        quick_questions: assistant::QUICK_QUESTIONS,
    }))
}

/// Submit a message and receive the scripted reply.
#[utoipa::path(
    post,
    path = "/api/v1/assistant",
    request_body = AssistantRequest,
    responses(
        (status = 200, description = "Scripted reply", body = AssistantReply),
        (status = 400, description = "Blank message", body = crate::domain::Error)
    ),
    tags = ["assistant"],
    operation_id = "askAssistant"
)]
#[post("/assistant")]
pub async fn ask(payload: web::Json<AssistantRequest>) -> ApiResult<HttpResponse> {
    let reply = assistant::reply(&payload.message)
        .ok_or_else(|| Error::invalid_request("message must not be blank"))?;
    Ok(HttpResponse::Ok().json(AssistantReply { reply }))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use actix_web::{App, http::StatusCode, test};
    use serde_json::{Value, json};

    use super::*;

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().service(web::scope("/api/v1").service(greeting).service(ask))
    }

    #[actix_web::test]
    async fn greeting_lists_the_quick_questions() {
        let app = test::init_service(test_app()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/assistant").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(
            body["quickQuestions"]
                .as_array()
                .map(std::vec::Vec::len),
            Some(4)
        );
    }

    #[actix_web::test]
    async fn scripted_questions_get_scripted_answers() {
        let app = test::init_service(test_app()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/assistant")
                .set_json(json!({ "message": "Is parking available?" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = test::read_body_json(res).await;
        let reply = body["reply"].as_str().expect("reply text");
        assert!(reply.contains("parking"));
        assert_ne!(reply, assistant::FALLBACK_REPLY);
    }

    #[actix_web::test]
    async fn unscripted_messages_get_the_fallback() {
        let app = test::init_service(test_app()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/assistant")
                .set_json(json!({ "message": "Do you allow ferrets?" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["reply"].as_str(), Some(assistant::FALLBACK_REPLY));
    }

    #[actix_web::test]
    async fn blank_messages_are_rejected() {
        let app = test::init_service(test_app()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/assistant")
                .set_json(json!({ "message": "   " }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
