use axum::{
    http::Method,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    model::api::{ErrorDto, MessageDto, PaginationDto},
    server::{
        controller::{
            admin, auth, cafe, chat, health, inventory, loyalty, menu, order, owner, payment,
            user,
        },
        state::AppState,
    },
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SiipCoffee API",
        description = "Cafe ordering backend: menus, orders, payments, inventory, loyalty and a chat concierge."
    ),
    paths(
        health::health,
        auth::register,
        auth::login,
        auth::refresh,
        cafe::list_cafes,
        cafe::get_cafe,
        cafe::get_reviews,
        cafe::create_review,
        owner::create_cafe,
        owner::get_cafe,
        owner::update_cafe,
        owner::toggle_status,
        owner::get_analytics,
        user::get_profile,
        user::update_profile,
        user::change_password,
        user::get_orders,
        user::get_loyalty,
        user::get_favorites,
        user::add_favorite,
        user::remove_favorite,
        user::delete_account,
        menu::list_by_cafe,
        menu::get_categories,
        menu::search,
        menu::get_menu,
        menu::create_menu,
        menu::update_menu,
        menu::delete_menu,
        order::create_order,
        order::list_orders,
        order::get_order,
        order::update_status,
        order::get_receipt,
        payment::process_payment,
        payment::get_status,
        payment::confirm_payment,
        inventory::list_items,
        inventory::create_item,
        inventory::update_item,
        inventory::delete_item,
        inventory::create_movement,
        inventory::list_movements,
        inventory::low_stock_report,
        inventory::expiring_report,
        loyalty::create_program,
        loyalty::get_program,
        loyalty::join_program,
        loyalty::create_reward,
        loyalty::list_rewards,
        loyalty::redeem_reward,
        loyalty::get_member_rewards,
        loyalty::get_transactions,
        chat::send_message,
        chat::get_history,
        chat::chat_socket,
        admin::get_analytics,
        admin::get_orders,
    ),
    components(schemas(ErrorDto, MessageDto, PaginationDto)),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Liveness"),
        (name = "auth", description = "Registration and tokens"),
        (name = "cafe", description = "Public cafe directory and reviews"),
        (name = "owner", description = "Cafe management for owners"),
        (name = "user", description = "Profile, favorites and memberships of the caller"),
        (name = "menu", description = "Menus"),
        (name = "order", description = "Orders and receipts"),
        (name = "payment", description = "Payments"),
        (name = "inventory", description = "Stock items and movements"),
        (name = "loyalty", description = "Loyalty programs, rewards and points"),
        (name = "chat", description = "Chat concierge"),
        (name = "admin", description = "Platform-wide reports"),
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

pub fn router() -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .nest("/api/v1", api_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn api_routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        // Cafes
        .route("/cafes", get(cafe::list_cafes))
        .route("/cafes/{id}", get(cafe::get_cafe))
        .route(
            "/cafes/{id}/reviews",
            get(cafe::get_reviews).post(cafe::create_review),
        )
        .route(
            "/owner/cafe",
            get(owner::get_cafe)
                .post(owner::create_cafe)
                .put(owner::update_cafe),
        )
        .route("/owner/cafe/toggle-status", put(owner::toggle_status))
        .route("/owner/cafe/analytics", get(owner::get_analytics))
        // User
        .route(
            "/user/profile",
            get(user::get_profile).put(user::update_profile),
        )
        .route("/user/password", put(user::change_password))
        .route("/user/orders", get(user::get_orders))
        .route("/user/loyalty", get(user::get_loyalty))
        .route("/user/favorites", get(user::get_favorites))
        .route(
            "/user/favorites/{cafe_id}",
            post(user::add_favorite).delete(user::remove_favorite),
        )
        .route("/user/account", delete(user::delete_account))
        // Menu
        .route("/menu", post(menu::create_menu))
        .route("/menu/categories", get(menu::get_categories))
        .route("/menu/search", get(menu::search))
        .route("/menu/cafe/{cafe_id}", get(menu::list_by_cafe))
        .route(
            "/menu/{id}",
            get(menu::get_menu)
                .put(menu::update_menu)
                .delete(menu::delete_menu),
        )
        // Orders
        .route(
            "/orders",
            get(order::list_orders).post(order::create_order),
        )
        .route("/orders/{id}", get(order::get_order))
        .route("/orders/{id}/status", put(order::update_status))
        .route("/orders/{id}/receipt", get(order::get_receipt))
        // Payment
        .route("/payment/process", post(payment::process_payment))
        .route("/payment/status/{order_id}", get(payment::get_status))
        .route("/payment/{payment_id}/confirm", put(payment::confirm_payment))
        // Inventory
        .route(
            "/inventory",
            get(inventory::list_items).post(inventory::create_item),
        )
        .route(
            "/inventory/{id}",
            put(inventory::update_item).delete(inventory::delete_item),
        )
        .route(
            "/inventory/{id}/movements",
            get(inventory::list_movements).post(inventory::create_movement),
        )
        .route(
            "/inventory/reports/low-stock",
            get(inventory::low_stock_report),
        )
        .route(
            "/inventory/reports/expiring",
            get(inventory::expiring_report),
        )
        // Loyalty
        .route("/loyalty/program", post(loyalty::create_program))
        .route("/loyalty/cafe/{cafe_id}", get(loyalty::get_program))
        .route("/loyalty/cafe/{cafe_id}/join", post(loyalty::join_program))
        .route("/loyalty/cafe/{cafe_id}/rewards", get(loyalty::list_rewards))
        .route(
            "/loyalty/cafe/{cafe_id}/transactions",
            get(loyalty::get_transactions),
        )
        .route(
            "/loyalty/rewards",
            get(loyalty::get_member_rewards).post(loyalty::create_reward),
        )
        .route(
            "/loyalty/rewards/{reward_id}/redeem",
            post(loyalty::redeem_reward),
        )
        // Chat
        .route("/chat/message", post(chat::send_message))
        .route("/chat/history", get(chat::get_history))
        .route("/chat/ws", get(chat::chat_socket))
        // Admin
        .route("/admin/analytics", get(admin::get_analytics))
        .route("/admin/orders", get(admin::get_orders))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use test_utils::builder::TestBuilder;
    use tower::ServiceExt;

    use super::*;
    use crate::server::{concierge::Concierge, model::cafe::CafeInfo, util::token::JwtKeys};

    async fn app() -> Router {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.unwrap();
        let cafe = CafeInfo {
            name: "SiipCoffee".to_string(),
            address: "Jl. Cafe No. 123, Jakarta".to_string(),
            phone: "+62 812-3456-7890".to_string(),
        };
        let state = AppState::new(
            db,
            reqwest::Client::new(),
            JwtKeys::new("test-secret", chrono::Duration::hours(1)),
            Concierge::new(None, cafe),
        );

        router().with_state(state)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn register_request(email: &str) -> Request<Body> {
        Request::post("/api/v1/auth/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({ "name": "Rina", "email": email, "password": "secret123" }).to_string(),
            ))
            .unwrap()
    }

    #[tokio::test]
    async fn health_is_public() {
        let response = app()
            .await
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn protected_route_requires_token() {
        let response = app()
            .await
            .oneshot(
                Request::get("/api/v1/user/profile")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn registered_token_opens_profile() {
        let app = app().await;

        let response = app
            .clone()
            .oneshot(register_request("rina@example.com"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        let token = body["data"]["token"].as_str().unwrap().to_string();

        let profile = Request::get("/api/v1/user/profile")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(profile).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["email"], "rina@example.com");
        assert_eq!(body["data"]["role"], "customer");
    }

    #[tokio::test]
    async fn serves_openapi_document() {
        let response = app()
            .await
            .oneshot(
                Request::get("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["paths"]["/api/v1/orders"].is_object());
    }

    #[tokio::test]
    async fn malformed_body_is_json_bad_request() {
        let request = Request::post("/api/v1/auth/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({ "name": "Rina", "email": "rina@example.com" }).to_string(),
            ))
            .unwrap();

        let response = app().await.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("password"));
    }

    #[tokio::test]
    async fn mistyped_query_is_json_bad_request() {
        let response = app()
            .await
            .oneshot(
                Request::get("/api/v1/cafes?page=first")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn deleted_account_email_can_register_again() {
        let app = app().await;

        let response = app
            .clone()
            .oneshot(register_request("again@example.com"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let token = body_json(response).await["data"]["token"]
            .as_str()
            .unwrap()
            .to_string();

        let delete = Request::delete("/api/v1/user/account")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "password": "secret123" }).to_string()))
            .unwrap();
        let response = app.clone().oneshot(delete).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(register_request("again@example.com"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
