use crate::error::RelayError;
use crate::models::chat::{ ChatRequest, ChatResponse, HealthResponse };
use crate::relay::ChatRelay;
use axum::{
    routing::{ get, post },
    Router,
    Json,
    extract::{ State, rejection::JsonRejection },
    response::{ Html, IntoResponse, Response },
    http::StatusCode,
};
use std::sync::Arc;
use tower_http::cors::{ Any, CorsLayer };
use log::warn;

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<ChatRelay>,
    pub page: Arc<str>,
    pub api_key_configured: bool,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/chat", post(chat_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(state)
}

async fn index_handler(State(state): State<AppState>) -> Html<String> {
    Html(state.page.to_string())
}

async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let result = match payload {
        Ok(Json(request)) => state.relay.handle_chat(request).await,
        Err(rejection) => {
            warn!("Rejected chat request: {}", rejection.body_text());
            Err(RelayError::InvalidRequest(rejection.body_text()))
        }
    };

    match result {
        Ok(response) => (StatusCode::OK, Json(ChatResponse::success(response))).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Json(ChatResponse::failure(e))).into_response(),
    }
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        api_key_configured: state.api_key_configured,
    })
}
