//! End-to-end tests driving the full router against an in-memory database.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use leasehold_common_core::UserId;
use leasehold_server::{
    config::{
        AuthConfig, CorsConfig, DatabaseConfig, LoggingConfig, ServerBindConfig, ServerConfig,
    },
    db::{create_pool, run_migrations},
    middleware::auth::{encode_token, Claims},
    repository::{NewUser, RoleRepository, UserRepository},
    routes::create_router,
    AppState,
};
use serde_json::{json, Value};
use tower::ServiceExt;

const SECRET: &str = "integration_test_secret_32_chars";

struct TestApp {
    router: Router,
    state: AppState,
}

impl TestApp {
    async fn new() -> Self {
        let config = ServerConfig {
            server: ServerBindConfig {
                host: "127.0.0.1".into(),
                port: 0,
                request_timeout_secs: 5,
                body_limit_bytes: 64 * 1024,
            },
            database: DatabaseConfig::in_memory(),
            auth: AuthConfig {
                jwt_secret: SECRET.into(),
                leeway_secs: 0,
            },
            logging: LoggingConfig::default(),
            cors: CorsConfig::default(),
        };

        let pool = create_pool(&config.database).await.unwrap();
        run_migrations(&pool).await.unwrap();
        let state = AppState::with_pool(config, pool);

        Self {
            router: create_router(state.clone()),
            state,
        }
    }

    async fn user(&self, username: &str, role: Option<&str>, is_staff: bool) -> User {
        let role_id = match role {
            Some(name) => {
                let roles = RoleRepository::new(self.state.pool.clone());
                let role = match roles.find_by_name(name).await.unwrap() {
                    Some(role) => role,
                    None => roles.create(name, "").await.unwrap(),
                };
                Some(role.id)
            }
            None => None,
        };

        let record = UserRepository::new(self.state.pool.clone())
            .create(&NewUser {
                username: username.into(),
                role_id,
                is_staff,
                ..NewUser::default()
            })
            .await
            .unwrap();

        let token = encode_token(&Claims::new_access(record.id, username, 3600), SECRET).unwrap();
        User {
            id: record.id,
            token,
        }
    }

    async fn landlord(&self, username: &str) -> User {
        self.user(username, Some("landlord"), false).await
    }

    async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn create_property(&self, owner: &User) -> String {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/v1/properties",
                Some(&owner.token),
                Some(json!({ "name": "Harbour View", "property_type": "apartment" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_str().unwrap().to_string()
    }

    async fn create_unit(&self, owner: &User, property: &str, body: Value) -> String {
        let (status, body) = self
            .request(
                Method::POST,
                &format!("/api/v1/properties/{property}/units"),
                Some(&owner.token),
                Some(body),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_str().unwrap().to_string()
    }
}

struct User {
    id: UserId,
    token: String,
}

const MISSING: &str = "00000000-0000-4000-8000-000000000000";

#[tokio::test]
async fn test_landlord_creates_property_and_unit() {
    let app = TestApp::new().await;
    let alice = app.landlord("alice").await;

    let property = app.create_property(&alice).await;
    let unit = app.create_unit(&alice, &property, json!({ "name": "1A" })).await;

    let (status, body) = app
        .request(Method::GET, &format!("/api/v1/units/{unit}"), Some(&alice.token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["property_id"], property.as_str());
}

#[tokio::test]
async fn test_created_property_has_location_header() {
    let app = TestApp::new().await;
    let alice = app.landlord("alice").await;

    let request = Request::post("/api/v1/properties")
        .header(header::AUTHORIZATION, format!("Bearer {}", alice.token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "name": "Loft", "property_type": "studio" }).to_string(),
        ))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert!(location.starts_with("/api/v1/properties/"));
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_tenant_cannot_create_property() {
    let app = TestApp::new().await;
    let tom = app.user("tom", Some("tenant"), false).await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/properties",
            Some(&tom.token),
            Some(json!({ "name": "Nope", "property_type": "house" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["details"]["reason"], "not_landlord");
}

#[tokio::test]
async fn test_unit_under_foreign_property_is_forbidden() {
    let app = TestApp::new().await;
    let alice = app.landlord("alice").await;
    let bob = app.landlord("bob").await;
    let property = app.create_property(&alice).await;

    let (status, _) = app
        .request(
            Method::POST,
            &format!("/api/v1/properties/{property}/units"),
            Some(&bob.token),
            Some(json!({ "name": "2B" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unit_under_missing_property_is_not_found() {
    let app = TestApp::new().await;
    let alice = app.landlord("alice").await;

    let (status, body) = app
        .request(
            Method::POST,
            &format!("/api/v1/properties/{MISSING}/units"),
            Some(&alice.token),
            Some(json!({ "name": "2B" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["details"]["resource"], "property");
}

#[tokio::test]
async fn test_denial_precedes_validation() {
    let app = TestApp::new().await;
    let alice = app.landlord("alice").await;
    let bob = app.landlord("bob").await;
    let property = app.create_property(&alice).await;

    let (status, _) = app
        .request(
            Method::PUT,
            &format!("/api/v1/properties/{property}"),
            Some(&bob.token),
            Some(json!({ "name": "" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .request(
            Method::PUT,
            &format!("/api/v1/properties/{property}"),
            Some(&alice.token),
            Some(json!({ "name": "" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["fields"]["name"].is_array());
}

#[tokio::test]
async fn test_non_owner_cannot_update_or_delete() {
    let app = TestApp::new().await;
    let alice = app.landlord("alice").await;
    let bob = app.landlord("bob").await;
    let property = app.create_property(&alice).await;
    let unit = app.create_unit(&alice, &property, json!({ "name": "1A" })).await;

    let (status, _) = app
        .request(
            Method::PUT,
            &format!("/api/v1/units/{unit}"),
            Some(&bob.token),
            Some(json!({ "name": "hijacked" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .request(Method::DELETE, &format!("/api/v1/properties/{property}"), Some(&bob.token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .request(Method::GET, &format!("/api/v1/properties/{property}"), Some(&alice.token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_staff_can_manage_any_property() {
    let app = TestApp::new().await;
    let alice = app.landlord("alice").await;
    let staff = app.user("ops", None, true).await;
    let property = app.create_property(&alice).await;

    let (status, body) = app
        .request(
            Method::PUT,
            &format!("/api/v1/properties/{property}"),
            Some(&staff.token),
            Some(json!({ "description": "Inspected" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["description"], "Inspected");
    assert_eq!(body["data"]["updated_by"], staff.id.to_raw());

    let (status, _) = app
        .request(Method::DELETE, &format!("/api/v1/properties/{property}"), Some(&staff.token), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .request(Method::GET, &format!("/api/v1/properties/{property}"), Some(&alice.token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_property_listing_is_scoped_to_owner() {
    let app = TestApp::new().await;
    let alice = app.landlord("alice").await;
    let bob = app.landlord("bob").await;
    let admin = app.user("root", Some("admin"), false).await;
    app.create_property(&alice).await;
    app.create_property(&bob).await;

    let (_, body) = app
        .request(Method::GET, "/api/v1/properties", Some(&alice.token), None)
        .await;
    assert_eq!(body["data"]["pagination"]["total_items"], 1);

    let (_, body) = app
        .request(Method::GET, "/api/v1/properties", Some(&admin.token), None)
        .await;
    assert_eq!(body["data"]["pagination"]["total_items"], 2);
}

#[tokio::test]
async fn test_anonymous_public_listing_shows_only_vacant_public_units() {
    let app = TestApp::new().await;
    let alice = app.landlord("alice").await;
    let property = app.create_property(&alice).await;
    let vacant = app
        .create_unit(&alice, &property, json!({ "name": "vacant", "is_public": true }))
        .await;
    app.create_unit(
        &alice,
        &property,
        json!({ "name": "occupied", "is_public": true, "is_occupied": true }),
    )
    .await;
    app.create_unit(&alice, &property, json!({ "name": "private" })).await;

    let (status, body) = app.request(Method::GET, "/api/v1/units/public", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], vacant.as_str());
}

#[tokio::test]
async fn test_public_listing_rejects_bad_token() {
    let app = TestApp::new().await;

    let (status, _) = app
        .request(Method::GET, "/api/v1/units/public", Some("garbage"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_lease_marks_unit_occupied_and_blocks_second_lease() {
    let app = TestApp::new().await;
    let alice = app.landlord("alice").await;
    let tenant = app.user("tom", Some("tenant"), false).await;
    let property = app.create_property(&alice).await;
    let unit = app
        .create_unit(&alice, &property, json!({ "name": "1A", "is_public": true }))
        .await;

    let lease = json!({
        "tenant_id": tenant.id.to_raw(),
        "start_date": "2026-01-01",
        "end_date": "2026-12-31",
        "rent_amount": "1200.00"
    });
    let (status, body) = app
        .request(
            Method::POST,
            &format!("/api/v1/units/{unit}/lease"),
            Some(&alice.token),
            Some(lease.clone()),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let lease_id = body["data"]["id"].as_str().unwrap().to_string();

    let (_, body) = app
        .request(Method::GET, &format!("/api/v1/units/{unit}"), Some(&alice.token), None)
        .await;
    assert_eq!(body["data"]["is_occupied"], true);

    let (_, body) = app.request(Method::GET, "/api/v1/units/public", None, None).await;
    assert!(body["data"]["items"].as_array().unwrap().is_empty());

    let (status, _) = app
        .request(
            Method::POST,
            &format!("/api/v1/units/{unit}/lease"),
            Some(&alice.token),
            Some(lease),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = app
        .request(Method::GET, &format!("/api/v1/units/{unit}/lease"), Some(&alice.token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], lease_id.as_str());

    let (status, _) = app
        .request(Method::DELETE, &format!("/api/v1/leases/{lease_id}"), Some(&alice.token), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = app
        .request(Method::GET, &format!("/api/v1/units/{unit}"), Some(&alice.token), None)
        .await;
    assert_eq!(body["data"]["is_occupied"], false);
}

#[tokio::test]
async fn test_lease_for_unknown_tenant_is_bad_request() {
    let app = TestApp::new().await;
    let alice = app.landlord("alice").await;
    let property = app.create_property(&alice).await;
    let unit = app.create_unit(&alice, &property, json!({ "name": "1A" })).await;

    let (status, _) = app
        .request(
            Method::POST,
            &format!("/api/v1/units/{unit}/lease"),
            Some(&alice.token),
            Some(json!({
                "tenant_id": MISSING,
                "start_date": "2026-01-01",
                "rent_amount": "900"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .request(Method::GET, &format!("/api/v1/units/{unit}/lease"), Some(&alice.token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_images_belong_to_the_units_property() {
    let app = TestApp::new().await;
    let alice = app.landlord("alice").await;
    let bob = app.landlord("bob").await;
    let property = app.create_property(&alice).await;
    let unit = app.create_unit(&alice, &property, json!({ "name": "1A" })).await;

    let (status, body) = app
        .request(
            Method::POST,
            &format!("/api/v1/units/{unit}/images"),
            Some(&alice.token),
            Some(json!({ "image": "images/front.jpg" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let image = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["property_id"], property.as_str());

    let (status, body) = app
        .request(Method::GET, &format!("/api/v1/units/{unit}/images"), Some(&alice.token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);

    let (status, _) = app
        .request(Method::DELETE, &format!("/api/v1/images/{image}"), Some(&bob.token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .request(Method::DELETE, &format!("/api/v1/images/{image}"), Some(&alice.token), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = TestApp::new().await;

    let (status, body) = app.request(Method::GET, "/api/v1/properties", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_token_for_deleted_user_is_unauthorized() {
    let app = TestApp::new().await;
    let ghost = encode_token(&Claims::new_access(UserId::new(), "ghost", 3600), SECRET).unwrap();

    let (status, _) = app
        .request(Method::GET, "/api/v1/properties", Some(&ghost), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_malformed_id_is_bad_request() {
    let app = TestApp::new().await;
    let alice = app.landlord("alice").await;

    let (status, _) = app
        .request(Method::GET, "/api/v1/properties/not-an-id", Some(&alice.token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_role_writes_require_admin() {
    let app = TestApp::new().await;
    let alice = app.landlord("alice").await;
    let admin = app.user("root", Some("admin"), false).await;

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/roles",
            Some(&alice.token),
            Some(json!({ "name": "auditor" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/roles",
            Some(&admin.token),
            Some(json!({ "name": "auditor", "description": "Read-only reviewer" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let (status, body) = app
        .request(Method::GET, "/api/v1/roles", Some(&alice.token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pagination"]["total_items"], 3);
}

#[tokio::test]
async fn test_current_user_includes_role() {
    let app = TestApp::new().await;
    let alice = app.landlord("alice").await;

    let (status, body) = app
        .request(Method::GET, "/api/v1/auth/user", Some(&alice.token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["role"], "landlord");
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::new().await;

    let (status, _) = app.request(Method::GET, "/internal/health/live", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.request(Method::GET, "/internal/health/ready", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["database"]["is_healthy"], true);
}

#[tokio::test]
async fn test_unknown_route_is_json_not_found() {
    let app = TestApp::new().await;

    let (status, body) = app.request(Method::GET, "/nowhere", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_malformed_query_uses_error_envelope() {
    let app = TestApp::new().await;

    let (status, body) = app
        .request(Method::GET, "/api/v1/units/public?page=abc", None, None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "invalid_query_param");
}

#[tokio::test]
async fn test_lease_update_cannot_end_before_stored_start() {
    let app = TestApp::new().await;
    let alice = app.landlord("alice").await;
    let tenant = app.user("tom", Some("tenant"), false).await;
    let property = app.create_property(&alice).await;
    let unit = app.create_unit(&alice, &property, json!({ "name": "1A" })).await;

    let (status, body) = app
        .request(
            Method::POST,
            &format!("/api/v1/units/{unit}/lease"),
            Some(&alice.token),
            Some(json!({
                "tenant_id": tenant.id.to_raw(),
                "start_date": "2024-06-01",
                "rent_amount": "800"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let lease = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .request(
            Method::PUT,
            &format!("/api/v1/leases/{lease}"),
            Some(&alice.token),
            Some(json!({ "end_date": "2024-01-01" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["fields"]["end_date"].is_array());

    let (_, body) = app
        .request(Method::GET, &format!("/api/v1/leases/{lease}"), Some(&alice.token), None)
        .await;
    assert!(body["data"]["end_date"].is_null());
}
