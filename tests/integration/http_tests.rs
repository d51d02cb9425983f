//! The full application over the database store

#[cfg(test)]
mod tests {
    use crate::common::TestDatabase;
    use actix_web::http::StatusCode;
    use actix_web::{test, web};
    use estate_admin::storage::seed::{BOOTSTRAP_ADMIN_EMAIL, seed_defaults};
    use estate_admin::utils::auth::hash_password;
    use estate_admin::{AppState, Config, HttpServer};
    use serde_json::{Value, json};

    const PASSWORD: &str = "admin123";

    async fn seeded() -> (TestDatabase, AppState) {
        let db = TestDatabase::new().await;
        seed_defaults(db.store().as_ref(), &hash_password(PASSWORD).unwrap())
            .await
            .unwrap();

        let mut config = Config::default();
        config.backend.auth.jwt_secret = "http_integration_secret_long_enough_00".to_string();
        let server = HttpServer::with_store(&config, db.store()).unwrap();
        let state = server.state().clone();
        (db, state)
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(HttpServer::create_app(web::Data::new($state.clone()))).await
        };
    }

    macro_rules! login {
        ($app:expr, $email:expr, $password:expr) => {{
            let req = test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(json!({ "email": $email, "password": $password }))
                .to_request();
            let resp = test::call_service(&$app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
            let body: Value = test::read_body_json(resp).await;
            body["data"]["accessToken"].as_str().unwrap().to_string()
        }};
    }

    fn bearer(token: &str) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", token))
    }

    #[actix_web::test]
    async fn test_health_reports_database() {
        let (_db, state) = seeded().await;
        let app = app!(state);

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("server").unwrap(), "estate-admin");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["store"], "up");
    }

    #[actix_web::test]
    async fn test_delegated_access_end_to_end() {
        let (_db, state) = seeded().await;
        let app = app!(state);
        let root = login!(app, BOOTSTRAP_ADMIN_EMAIL, PASSWORD);

        // Find the admin.view permission in the seeded catalogue
        let req = test::TestRequest::get()
            .uri("/api/admin/permissions")
            .insert_header(bearer(&root))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let admin_view = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .find(|p| p["name"] == "admin.view")
            .unwrap()["id"]
            .clone();

        let req = test::TestRequest::post()
            .uri("/api/admin/roles")
            .insert_header(bearer(&root))
            .set_json(json!({ "name": "Auditor", "permissionIds": [admin_view] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let role_id = body["data"]["roleId"].clone();

        let req = test::TestRequest::post()
            .uri("/api/admin/admins")
            .insert_header(bearer(&root))
            .set_json(json!({
                "name": "Audrey Auditor",
                "email": "audrey@example.com",
                "password": "audit-password",
                "roleIds": [role_id]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let audrey_id = body["data"]["adminId"].as_i64().unwrap();

        let audrey = login!(app, "audrey@example.com", "audit-password");

        // Granted through the role
        let req = test::TestRequest::get()
            .uri("/api/admin/admins?limit=1")
            .insert_header(bearer(&audrey))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["pagination"]["total"], 2);
        assert_eq!(body["data"]["admins"][0]["email"], "audrey@example.com");

        // Not granted
        let req = test::TestRequest::delete()
            .uri(&format!("/api/admin/admins/{}", audrey_id))
            .insert_header(bearer(&audrey))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Insufficient permissions");

        // Deactivation takes effect on the next request
        let req = test::TestRequest::put()
            .uri(&format!("/api/admin/admins/{}", audrey_id))
            .insert_header(bearer(&root))
            .set_json(json!({ "status": "inactive" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(bearer(&audrey))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_bad_inputs() {
        let (_db, state) = seeded().await;
        let app = app!(state);
        let root = login!(app, BOOTSTRAP_ADMIN_EMAIL, PASSWORD);

        let req = test::TestRequest::get()
            .uri("/api/admin/admins/not-a-number")
            .insert_header(bearer(&root))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get()
            .uri("/api/admin/admins/9999")
            .insert_header(bearer(&root))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::post()
            .uri("/api/admin/admins")
            .insert_header(bearer(&root))
            .set_json(json!({
                "name": "Orphan",
                "email": "orphan@example.com",
                "password": "orphan-password",
                "roleIds": [4040]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);

        let req = test::TestRequest::get()
            .uri("/api/admin/roles")
            .insert_header(("Authorization", "Token abc"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_password_reset_over_http() {
        let (_db, state) = seeded().await;
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/auth/forgot-password")
            .set_json(json!({ "email": BOOTSTRAP_ADMIN_EMAIL }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/api/auth/reset-password")
            .set_json(json!({
                "email": BOOTSTRAP_ADMIN_EMAIL,
                "token": "0".repeat(64),
                "password": "replacement"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Invalid or expired reset token");

        // The failed attempt left the old password in place
        login!(app, BOOTSTRAP_ADMIN_EMAIL, PASSWORD);
    }
}
