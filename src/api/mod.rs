//! API layer - HTTP handlers and routing
//!
//! One module per route group, all JSON. Public routes serve the catalog,
//! news, contact form, assistant relay, site info and the sign-in/sign-up
//! surface; cart, dashboard and account routes sit behind the session
//! middleware.

pub mod assistant;
pub mod auth;
pub mod cart;
pub mod contact;
pub mod dashboard;
pub mod home;
pub mod middleware;
pub mod news;
pub mod responses;
pub mod site;
pub mod tours;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    Router,
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub use middleware::{ApiError, AppState, CurrentSession};

use crate::config::Config;
use crate::datasource::create_data_source;
use crate::services::{AssistantService, CartService, SessionService};

/// Wire application state from configuration: the mode selector picks the
/// data source once, and every service shares it.
pub fn build_state(config: &Config) -> AppState {
    let data = create_data_source(&config.backend);
    let sessions = Arc::new(SessionService::new(&config.backend, data.clone()));
    let cart = Arc::new(CartService::new(data.clone(), config.checkout.clone()));
    let assistant = Arc::new(AssistantService::new(config.assistant.clone()));

    AppState {
        mode: config.backend.mode(),
        data,
        sessions,
        cart,
        assistant,
    }
}

/// Build the main API router
pub fn build_api_router(state: AppState) -> Router<AppState> {
    // Routes that need a signed-in session
    let protected_routes = Router::new()
        .nest("/cart", cart::router())
        .nest("/dashboard", dashboard::router())
        .nest("/auth", auth::protected_router())
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::require_auth,
        ));

    // Public routes
    Router::new()
        .nest("/home", home::router())
        .nest("/tours", tours::router())
        .nest("/news", news::router())
        .nest("/contact", contact::router())
        .nest("/assistant", assistant::router())
        .nest("/site", site::router())
        .nest("/auth", auth::public_router())
        .merge(protected_routes)
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    let allow_origin = match cors_origin.parse::<HeaderValue>() {
        Ok(origin) => AllowOrigin::exact(origin),
        Err(_) => {
            tracing::warn!("Invalid CORS origin {:?}, allowing any", cors_origin);
            AllowOrigin::any()
        }
    };
    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::COOKIE]);

    Router::new()
        .nest("/api/v1", build_api_router(state.clone()))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::assistant::{AskError, AskResponse};
    use crate::api::responses::{CartResponse, CheckoutResponse, DashboardResponse, SessionResponse, TourListResponse};
    use crate::fixtures;
    use axum::http::{HeaderName, HeaderValue as HttpHeaderValue};
    use axum_test::TestServer;
    use serde_json::json;

    /// Server over a fresh demo-mode state
    fn demo_server() -> TestServer {
        let state = build_state(&Config::default());
        TestServer::new(build_router(state, "http://localhost:3000"))
            .expect("failed to start test server")
    }

    fn bearer(token: &str) -> (HeaderName, HttpHeaderValue) {
        (
            HeaderName::from_static("authorization"),
            HttpHeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        )
    }

    async fn sign_in(server: &TestServer) -> SessionResponse {
        let response = server
            .post("/api/v1/auth/signin")
            .json(&json!({ "email": "demo@example.com", "password": "pw" }))
            .await;
        response.assert_status_ok();
        response.json::<SessionResponse>()
    }

    #[tokio::test]
    async fn test_relay_missing_message_is_400() {
        let server = demo_server();
        let response = server.post("/api/v1/assistant").json(&json!({})).await;
        assert_eq!(response.status_code(), 400);
        let body = response.json::<AskError>();
        assert_eq!(body.error, "Message is required");
    }

    #[tokio::test]
    async fn test_relay_blank_message_is_400() {
        let server = demo_server();
        let response = server
            .post("/api/v1/assistant")
            .json(&json!({ "message": "   " }))
            .await;
        assert_eq!(response.status_code(), 400);
    }

    #[tokio::test]
    async fn test_relay_unconfigured_serves_canned_response() {
        let server = demo_server();
        let message = "where should I go next summer?";
        let response = server
            .post("/api/v1/assistant")
            .json(&json!({ "message": message }))
            .await;
        response.assert_status_ok();
        let body = response.json::<AskResponse>();
        assert_eq!(body.response, fixtures::respond(message));
    }

    #[tokio::test]
    async fn test_home_serves_fixtures_in_demo_mode() {
        let server = demo_server();
        let response = server.get("/api/v1/home").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["featured_tours"].as_array().unwrap().len(), 5);
        assert_eq!(body["tour_types"].as_array().unwrap().len(), 6);
        assert_eq!(body["latest_news"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_tour_list_filtering_end_to_end() {
        let server = demo_server();
        let response = server
            .get("/api/v1/tours")
            .add_query_param("country", "switz")
            .await;
        response.assert_status_ok();
        let body = response.json::<TourListResponse>();
        assert_eq!(body.total, 1);
        assert_eq!(body.tours[0].country, "Switzerland");
    }

    #[tokio::test]
    async fn test_tour_detail_and_not_found() {
        let server = demo_server();
        let found = server.get("/api/v1/tours/1").await;
        found.assert_status_ok();

        let missing = server.get("/api/v1/tours/999").await;
        assert_eq!(missing.status_code(), 404);
    }

    #[tokio::test]
    async fn test_news_list_and_detail() {
        let server = demo_server();
        let list = server.get("/api/v1/news").await;
        list.assert_status_ok();

        let detail = server.get("/api/v1/news/1").await;
        detail.assert_status_ok();

        let missing = server.get("/api/v1/news/404").await;
        assert_eq!(missing.status_code(), 404);
    }

    #[tokio::test]
    async fn test_cart_requires_auth() {
        let server = demo_server();
        let response = server.get("/api/v1/cart").await;
        assert_eq!(response.status_code(), 401);
    }

    #[tokio::test]
    async fn test_cart_and_checkout_flow() {
        let server = demo_server();
        let session = sign_in(&server).await;
        let (name, value) = bearer(&session.token);

        // Seeded demo cart: one Bali line, two travelers
        let cart = server
            .get("/api/v1/cart")
            .add_header(name.clone(), value.clone())
            .await
            .json::<CartResponse>();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.summary.subtotal, 2598.0);
        assert!((cart.summary.tax - 259.8).abs() < 1e-9);
        assert!((cart.summary.total - 2857.8).abs() < 1e-9);

        // Checkout books every line and empties the cart
        let checkout = server
            .post("/api/v1/cart/checkout")
            .add_header(name.clone(), value.clone())
            .await
            .json::<CheckoutResponse>();
        assert_eq!(checkout.bookings.len(), 1);
        assert_eq!(checkout.bookings[0].total_price, 2598.0);
        assert_eq!(checkout.summary.total, cart.summary.total);

        let cart_after = server
            .get("/api/v1/cart")
            .add_header(name.clone(), value.clone())
            .await
            .json::<CartResponse>();
        assert!(cart_after.items.is_empty());

        // Second checkout has nothing to book
        let empty = server
            .post("/api/v1/cart/checkout")
            .add_header(name, value)
            .await;
        assert_eq!(empty.status_code(), 400);
    }

    #[tokio::test]
    async fn test_cart_add_validates_travelers() {
        let server = demo_server();
        let session = sign_in(&server).await;
        let (name, value) = bearer(&session.token);

        let too_many = server
            .post("/api/v1/cart")
            .add_header(name.clone(), value.clone())
            .json(&json!({ "tour_id": "2", "travelers": 9 }))
            .await;
        assert_eq!(too_many.status_code(), 400);

        let ok = server
            .post("/api/v1/cart")
            .add_header(name, value)
            .json(&json!({ "tour_id": "2", "travelers": 4 }))
            .await;
        ok.assert_status_ok();
    }

    #[tokio::test]
    async fn test_dashboard_shows_bookings_and_wishlist() {
        let server = demo_server();
        let session = sign_in(&server).await;
        let (name, value) = bearer(&session.token);

        let dashboard = server
            .get("/api/v1/dashboard")
            .add_header(name, value)
            .await
            .json::<DashboardResponse>();
        assert_eq!(dashboard.bookings.len(), 2);
        assert_eq!(dashboard.wishlist.len(), 3);
    }

    #[tokio::test]
    async fn test_contact_form() {
        let server = demo_server();
        let ok = server
            .post("/api/v1/contact")
            .json(&json!({
                "name": "Jan",
                "email": "jan@example.com",
                "message": "Do you run tours in winter?"
            }))
            .await;
        ok.assert_status_ok();

        let empty = server
            .post("/api/v1/contact")
            .json(&json!({ "name": "", "email": "", "message": "" }))
            .await;
        assert_eq!(empty.status_code(), 400);
    }

    #[tokio::test]
    async fn test_site_info_reports_demo_mode() {
        let server = demo_server();
        let body: serde_json::Value = server.get("/api/v1/site").await.json();
        assert_eq!(body["mode"], "demo");
        assert_eq!(body["assistant_enabled"], false);
    }

    #[tokio::test]
    async fn test_profile_update_flow() {
        let server = demo_server();
        let session = sign_in(&server).await;
        let (name, value) = bearer(&session.token);

        let updated = server
            .put("/api/v1/auth/profile")
            .add_header(name.clone(), value.clone())
            .json(&json!({ "first_name": "Maya", "phone": "+48 123 456 789" }))
            .await;
        updated.assert_status_ok();
        let body = updated.json::<SessionResponse>();
        assert_eq!(body.profile.first_name.as_deref(), Some("Maya"));

        let me = server
            .get("/api/v1/auth/me")
            .add_header(name, value)
            .await
            .json::<SessionResponse>();
        assert_eq!(me.profile.phone.as_deref(), Some("+48 123 456 789"));
    }

    #[tokio::test]
    async fn test_sign_out_invalidates_token() {
        let server = demo_server();
        let session = sign_in(&server).await;
        let (name, value) = bearer(&session.token);

        server
            .post("/api/v1/auth/signout")
            .add_header(name.clone(), value.clone())
            .await
            .assert_status_ok();

        let me = server.get("/api/v1/auth/me").add_header(name, value).await;
        assert_eq!(me.status_code(), 401);
    }
}
