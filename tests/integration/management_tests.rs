//! Management operations over the database store

#[cfg(test)]
mod tests {
    use crate::common::TestDatabase;
    use crate::common::assertions::AdminErrorAssertions;
    use crate::common::fixtures;
    use crate::{assert_err, assert_ok};
    use actix_web::http::StatusCode;
    use estate_admin::AdminError;
    use estate_admin::auth::AdminManager;
    use estate_admin::auth::management::{
        AdminListQuery, CreateAdminRequest, CreatePermissionRequest, CreateRoleRequest,
        UpdateAdminRequest, UpdateRoleRequest,
    };
    use estate_admin::storage::AdminStatus;

    async fn manager() -> (TestDatabase, AdminManager) {
        let db = TestDatabase::new().await;
        let (auth, _) = fixtures::auth_system(db.store());
        let manager = auth.management();
        (db, manager)
    }

    fn admin_request(name: &str, email: &str) -> CreateAdminRequest {
        CreateAdminRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: "managed-password".to_string(),
            status: AdminStatus::Active,
            is_super_admin: false,
            role_ids: vec![],
            permission_ids: vec![],
        }
    }

    fn permission_request(module: &str, action: &str) -> CreatePermissionRequest {
        CreatePermissionRequest {
            name: format!("{}.{}", module, action),
            module: module.to_string(),
            action: action.to_string(),
            description: Some(format!("Can {} {}", action, module)),
        }
    }

    #[tokio::test]
    async fn test_admin_lifecycle() {
        let (db, manager) = manager().await;
        let view = assert_ok!(
            manager
                .create_permission(permission_request("property", "view"))
                .await
        );
        let role_id = assert_ok!(
            manager
                .create_role(CreateRoleRequest {
                    name: "Listing Manager".to_string(),
                    slug: None,
                    description: Some("Owns listings".to_string()),
                    permission_ids: vec![view],
                })
                .await
        );

        let mut request = admin_request("Grace", "grace@example.com");
        request.role_ids = vec![role_id];
        let id = assert_ok!(manager.create_admin(request).await);

        let details = assert_ok!(manager.get_admin(id).await);
        assert_eq!(details.roles[0].slug, "listing-manager");
        assert_eq!(details.permissions["property"], vec!["view"]);
        assert_eq!(details.login_attempts, 0);

        assert_ok!(
            manager
                .update_admin(
                    id,
                    UpdateAdminRequest {
                        role_ids: Some(vec![]),
                        permission_ids: Some(vec![view]),
                        ..UpdateAdminRequest::default()
                    },
                )
                .await
        );
        let details = manager.get_admin(id).await.unwrap();
        assert!(details.roles.is_empty());
        assert_eq!(details.permissions["property"], vec!["view"]);

        // A password change through management works for login
        assert_ok!(
            manager
                .update_admin(
                    id,
                    UpdateAdminRequest {
                        password: Some("rotated-password".to_string()),
                        ..UpdateAdminRequest::default()
                    },
                )
                .await
        );
        let (auth, _) = fixtures::auth_system(db.store());
        assert_ok!(auth.login("grace@example.com", "rotated-password", None).await);

        let actor = manager
            .create_admin(admin_request("Root", "root@example.com"))
            .await
            .unwrap();
        assert_ok!(manager.delete_admin(id, actor).await);
        let err = assert_err!(manager.get_admin(id).await);
        err.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_conflicts_and_validation_map_to_client_errors() {
        let (_, manager) = manager().await;
        manager
            .create_admin(admin_request("Heidi", "heidi@example.com"))
            .await
            .unwrap();

        let err = assert_err!(
            manager
                .create_admin(admin_request("Heidi Two", "heidi@example.com"))
                .await
        );
        assert!(matches!(&err, AdminError::Conflict(m) if m == "Email already exists"));
        err.assert_status(StatusCode::BAD_REQUEST);

        let mut unknown = admin_request("Ivan", "ivan@example.com");
        unknown.permission_ids = vec![77];
        let err = assert_err!(manager.create_admin(unknown).await);
        assert!(matches!(err, AdminError::Validation(_)));
        err.assert_status(StatusCode::BAD_REQUEST);

        let err = assert_err!(
            manager
                .update_admin(
                    999,
                    UpdateAdminRequest {
                        status: Some(AdminStatus::Inactive),
                        ..UpdateAdminRequest::default()
                    },
                )
                .await
        );
        err.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_self_delete_is_refused() {
        let (_, manager) = manager().await;
        let id = manager
            .create_admin(admin_request("Judy", "judy@example.com"))
            .await
            .unwrap();

        let err = assert_err!(manager.delete_admin(id, id).await);
        assert!(matches!(&err, AdminError::BadRequest(m) if m == "Cannot delete yourself"));
        assert_ok!(manager.get_admin(id).await);
    }

    #[tokio::test]
    async fn test_listing_over_database() {
        let (_, manager) = manager().await;
        for i in 0..15 {
            manager
                .create_admin(admin_request(
                    &format!("Member {:02}", i),
                    &format!("member{:02}@example.com", i),
                ))
                .await
                .unwrap();
        }

        let first = manager.list_admins(AdminListQuery::default()).await.unwrap();
        assert_eq!(first.admins.len(), 10);
        assert_eq!(first.pagination.total, 15);
        assert_eq!(first.pagination.pages, 2);
        assert_eq!(first.admins[0].email, "member14@example.com");

        let filtered = manager
            .list_admins(AdminListQuery {
                search: Some("member0".to_string()),
                limit: Some(5),
                page: Some(2),
            })
            .await
            .unwrap();
        assert_eq!(filtered.pagination.total, 10);
        assert_eq!(filtered.pagination.pages, 2);
        assert_eq!(filtered.admins.len(), 5);
        assert_eq!(filtered.admins[4].email, "member00@example.com");
    }

    #[tokio::test]
    async fn test_roles_and_permissions_over_database() {
        let (_, manager) = manager().await;
        let view = manager
            .create_permission(permission_request("user", "view"))
            .await
            .unwrap();
        let edit = manager
            .create_permission(permission_request("user", "edit"))
            .await
            .unwrap();

        let err = assert_err!(
            manager
                .create_permission(permission_request("user", "view"))
                .await
        );
        assert!(matches!(err, AdminError::Conflict(_)));

        let role_id = manager
            .create_role(CreateRoleRequest {
                name: "User Desk".to_string(),
                slug: Some("user-desk".to_string()),
                description: None,
                permission_ids: vec![view],
            })
            .await
            .unwrap();

        assert_ok!(
            manager
                .update_role(
                    role_id,
                    UpdateRoleRequest {
                        description: Some("Handles user tickets".to_string()),
                        permission_ids: Some(vec![view, edit]),
                        ..UpdateRoleRequest::default()
                    },
                )
                .await
        );

        let roles = manager.list_roles().await.unwrap();
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].slug, "user-desk");
        assert_eq!(roles[0].description.as_deref(), Some("Handles user tickets"));
        assert_eq!(roles[0].permissions["user"], vec!["edit", "view"]);

        let err = assert_err!(
            manager
                .create_role(CreateRoleRequest {
                    name: "Broken".to_string(),
                    slug: None,
                    description: None,
                    permission_ids: vec![4242],
                })
                .await
        );
        assert!(matches!(err, AdminError::Validation(_)));

        let permissions = manager.list_permissions().await.unwrap();
        assert_eq!(permissions.len(), 2);
        assert_eq!(permissions[0].name, "user.edit");
        assert_eq!(permissions[1].description.as_deref(), Some("Can view user"));
    }
}
