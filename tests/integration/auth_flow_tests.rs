//! Login and authentication against the database store

#[cfg(test)]
mod tests {
    use crate::common::TestDatabase;
    use crate::common::assertions::AdminErrorAssertions;
    use crate::common::fixtures::{self, AdminFactory, PASSWORD, permission, role};
    use crate::{assert_err, assert_ok};
    use actix_web::http::StatusCode;
    use estate_admin::AdminError;
    use estate_admin::storage::{AdminDirectory, AdminPatch, AdminStatus};

    #[tokio::test]
    async fn test_login_then_authenticate() {
        let db = TestDatabase::new().await;
        let view = permission(db.db(), "property", "view").await;
        let create = permission(db.db(), "property", "create").await;
        let agent = role(db.db(), "Agent", vec![view]).await;
        let id = AdminFactory::new("agent@example.com")
            .name("Agent Smith")
            .roles(vec![agent])
            .permissions(vec![create])
            .create(db.db())
            .await;
        let (auth, _) = fixtures::auth_system(db.store());

        let outcome = assert_ok!(
            auth.login("agent@example.com", PASSWORD, Some("203.0.113.9".to_string()))
                .await
        );
        assert_eq!(outcome.token_type, "Bearer");
        assert_eq!(outcome.admin.id, id);
        assert_eq!(outcome.admin.roles[0].slug, "agent");
        assert_eq!(outcome.admin.permissions["property"], vec!["create", "view"]);

        let admin = assert_ok!(auth.authenticate(Some(&outcome.access_token)).await);
        assert_eq!(admin.id, id);
        assert_eq!(admin.name, "Agent Smith");
        assert_eq!(admin.status, AdminStatus::Active);

        let record = db.db().find_admin_by_id(id).await.unwrap().unwrap();
        assert_eq!(record.last_login_ip.as_deref(), Some("203.0.113.9"));
    }

    #[tokio::test]
    async fn test_failed_logins_are_counted_not_locked() {
        let db = TestDatabase::new().await;
        let id = AdminFactory::new("count@example.com").create(db.db()).await;
        let (auth, _) = fixtures::auth_system(db.store());

        for _ in 0..6 {
            let err = assert_err!(auth.login("count@example.com", "wrong", None).await);
            assert!(matches!(err, AdminError::InvalidCredentials));
        }
        let record = db.db().find_admin_by_id(id).await.unwrap().unwrap();
        assert_eq!(record.login_attempts, 6);

        assert_ok!(auth.login("count@example.com", PASSWORD, None).await);
        let record = db.db().find_admin_by_id(id).await.unwrap().unwrap();
        assert_eq!(record.login_attempts, 0);
    }

    #[tokio::test]
    async fn test_unknown_and_inactive_emails_look_alike() {
        let db = TestDatabase::new().await;
        AdminFactory::new("idle@example.com")
            .inactive()
            .create(db.db())
            .await;
        let (auth, _) = fixtures::auth_system(db.store());

        let unknown = assert_err!(auth.login("nobody@example.com", PASSWORD, None).await);
        let inactive = assert_err!(auth.login("idle@example.com", PASSWORD, None).await);

        assert_eq!(unknown.to_string(), inactive.to_string());
        unknown.assert_status(StatusCode::UNAUTHORIZED);
        inactive.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_deactivation_revokes_outstanding_tokens() {
        let db = TestDatabase::new().await;
        let id = AdminFactory::new("leaver@example.com").create(db.db()).await;
        let (auth, _) = fixtures::auth_system(db.store());

        let token = auth
            .login("leaver@example.com", PASSWORD, None)
            .await
            .unwrap()
            .access_token;
        assert_ok!(auth.authenticate(Some(&token)).await);

        db.db()
            .update_admin(
                id,
                AdminPatch {
                    status: Some(AdminStatus::Inactive),
                    ..AdminPatch::default()
                },
            )
            .await
            .unwrap();

        let err = assert_err!(auth.authenticate(Some(&token)).await);
        assert!(matches!(err, AdminError::InvalidToken(_)));
        err.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_deleted_admin_token_is_rejected() {
        let db = TestDatabase::new().await;
        let id = AdminFactory::new("deleted@example.com").create(db.db()).await;
        let (auth, _) = fixtures::auth_system(db.store());

        let token = auth
            .login("deleted@example.com", PASSWORD, None)
            .await
            .unwrap()
            .access_token;
        db.db().delete_admin(id).await.unwrap();

        let err = assert_err!(auth.authenticate(Some(&token)).await);
        assert!(matches!(err, AdminError::InvalidToken(_)));
    }

    #[tokio::test]
    async fn test_token_from_another_secret_is_rejected() {
        let db = TestDatabase::new().await;
        let id = AdminFactory::new("other@example.com").create(db.db()).await;
        let (auth, _) = fixtures::auth_system(db.store());

        let mut foreign_config = fixtures::auth_config();
        foreign_config.jwt_secret = "a_completely_different_secret_for_signing".to_string();
        let foreign = estate_admin::AuthSystem::new(
            &foreign_config,
            db.store(),
            std::sync::Arc::new(fixtures::RecordingMailer::default()),
        )
        .unwrap();
        let token = foreign
            .login("other@example.com", PASSWORD, None)
            .await
            .unwrap()
            .access_token;

        assert_ok!(foreign.authenticate(Some(&token)).await);
        let err = assert_err!(auth.authenticate(Some(&token)).await);
        err.assert_status(StatusCode::UNAUTHORIZED);
        assert!(auth.profile_by_id(id).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_token() {
        let db = TestDatabase::new().await;
        let (auth, _) = fixtures::auth_system(db.store());

        let err = assert_err!(auth.authenticate(None).await);
        assert!(matches!(err, AdminError::MissingToken));
        assert_eq!(err.to_string(), "Access token required");
    }
}
