use axum::{
    extract::Json,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::handlers::{admin, auth, booking, menu, review, testimonial};
use crate::middleware::auth::{auth_middleware, require_admin, require_user};
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // Public + per-handler auth via the CurrentUser extractor
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/profile", get(auth::profile));

    // Public listing/detail; mutations check role and ownership in-handler
    let menu_routes = Router::new()
        .route("/", get(menu::list_menu).post(menu::create_menu_item))
        .route(
            "/{id}",
            get(menu::get_menu_item)
                .put(menu::update_menu_item)
                .delete(menu::delete_menu_item),
        )
        .route("/admin/my-menu", get(menu::my_menu));

    // Customer booking routes (requires auth + customer role)
    let user_booking_routes = Router::new()
        .route("/", post(booking::create_booking))
        .route("/my-bookings", get(booking::my_bookings))
        .route("/{id}", delete(booking::cancel_booking))
        .layer(middleware::from_fn(require_user))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Admin booking routes (requires auth + admin role; ownership is
    // checked per booking inside the handlers)
    let admin_booking_routes = Router::new()
        .route("/", get(admin::list_bookings))
        .route("/stats", get(admin::booking_stats))
        .route("/{id}/status", put(admin::update_booking_status))
        .route("/{id}", delete(admin::delete_booking))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let review_routes = Router::new()
        .route("/", post(review::create_review))
        .route("/menu/{menu_item_id}", get(review::list_menu_reviews))
        .route(
            "/{id}",
            put(review::update_review).delete(review::delete_review),
        )
        .route("/{id}/reply", put(review::reply_to_review));

    let testimonial_routes = Router::new()
        .route(
            "/",
            get(testimonial::list_approved).post(testimonial::create_testimonial),
        )
        .route("/all", get(testimonial::list_all))
        .route("/{id}/approve", put(testimonial::approve_testimonial))
        .route("/{id}", delete(testimonial::delete_testimonial));

    // The old combined booking surface; kept so stale clients get a
    // clear signal instead of a 404
    let legacy_booking_routes = Router::new().fallback(deprecated_bookings);

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/menu", menu_routes)
        .nest("/api/user/bookings", user_booking_routes)
        .nest("/api/admin/bookings", admin_booking_routes)
        .nest("/api/reviews", review_routes)
        .nest("/api/testimonials", testimonial_routes)
        .nest("/api/bookings", legacy_booking_routes)
        .route("/api/contact", post(contact))
        .route("/api/health", get(health))
        .with_state(state)
}

async fn deprecated_bookings() -> AppError {
    AppError::Gone(
        "This endpoint is deprecated. Use /api/user/bookings or /api/admin/bookings".to_string(),
    )
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Server is running!" }))
}

#[derive(Debug, Deserialize)]
struct ContactRequest {
    name: String,
    email: String,
    message: String,
}

async fn contact(Json(payload): Json<ContactRequest>) -> Json<serde_json::Value> {
    tracing::info!(
        name = %payload.name,
        email = %payload.email,
        message = %payload.message,
        "Contact form submission"
    );

    Json(serde_json::json!({
        "message": "Thank you for your message! We will get back to you soon."
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::config::Config;

    // Requests without credentials are rejected before any query runs,
    // so a disconnected handle is enough here.
    fn test_state() -> AppState {
        AppState {
            db: sea_orm::DatabaseConnection::default(),
            config: Config {
                database_url: String::new(),
                jwt_secret: "test-secret".to_string(),
                jwt_expiration_hours: 24,
                server_host: "127.0.0.1".to_string(),
                server_port: 0,
                notify_webhook_url: None,
                booking_fallback_tenant: true,
            },
            http: reqwest::Client::new(),
        }
    }

    async fn status_of(request: Request<Body>) -> StatusCode {
        create_router(test_state())
            .oneshot(request)
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn missing_token_on_user_routes_is_unauthorized() {
        let request = Request::builder()
            .uri("/api/user/bookings/my-bookings")
            .body(Body::empty())
            .unwrap();

        assert_eq!(status_of(request).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn missing_token_on_admin_routes_is_unauthorized() {
        let request = Request::builder()
            .uri("/api/admin/bookings")
            .body(Body::empty())
            .unwrap();

        assert_eq!(status_of(request).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn garbage_token_is_unauthorized() {
        let request = Request::builder()
            .uri("/api/user/bookings/my-bookings")
            .header("Authorization", "Bearer not.a.jwt")
            .body(Body::empty())
            .unwrap();

        assert_eq!(status_of(request).await, StatusCode::UNAUTHORIZED);
    }
}
