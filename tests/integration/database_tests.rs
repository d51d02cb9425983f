//! Database integration tests
//!
//! The store contract against a migrated in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::common::TestDatabase;
    use crate::common::fixtures::{AdminFactory, permission, role};
    use crate::{assert_err, assert_ok};
    use chrono::{Duration, Utc};
    use estate_admin::AdminError;
    use estate_admin::auth::rbac::Capability;
    use estate_admin::storage::database::DatabaseBackendType;
    use estate_admin::storage::{
        AdminDirectory, AdminPatch, AdminQuery, AdminStatus, CredentialStore, NewAdmin,
        NewPermission, NewRole, ResetTicket, RolePatch,
    };

    #[tokio::test]
    async fn test_database_health_check() {
        let db = TestDatabase::new().await;
        assert_eq!(db.db().backend_type(), DatabaseBackendType::SQLite);
        assert_ok!(db.db().health_check().await);
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let db = TestDatabase::new().await;
        assert_ok!(db.db().migrate().await);
    }

    #[tokio::test]
    async fn test_admin_round_trip() {
        let db = TestDatabase::new().await;
        let id = AdminFactory::new("alice@example.com")
            .name("Alice")
            .super_admin()
            .create(db.db())
            .await;

        let record = assert_ok!(db.db().find_admin_by_id(id).await).unwrap();
        assert_eq!(record.name, "Alice");
        assert_eq!(record.email, "alice@example.com");
        assert_eq!(record.status, AdminStatus::Active);
        assert!(record.is_super_admin);
        assert_eq!(record.login_attempts, 0);
        assert!(record.last_login_at.is_none());

        let credentials = db
            .db()
            .find_active_admin_by_email("alice@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(credentials.admin.id, id);
        assert!(credentials.password_hash.starts_with("$argon2"));

        assert!(db.db().email_exists("alice@example.com").await.unwrap());
        assert!(!db.db().email_exists("bob@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_inactive_admin_is_invisible_to_credential_lookups() {
        let db = TestDatabase::new().await;
        let id = AdminFactory::new("idle@example.com")
            .inactive()
            .create(db.db())
            .await;

        assert!(db.db().find_active_admin_by_id(id).await.unwrap().is_none());
        assert!(db
            .db()
            .find_active_admin_by_email("idle@example.com")
            .await
            .unwrap()
            .is_none());
        assert!(db.db().find_admin_by_id(id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let db = TestDatabase::new().await;
        AdminFactory::new("dup@example.com").create(db.db()).await;

        let err = assert_err!(
            db.db()
                .create_admin(NewAdmin {
                    name: "Again".to_string(),
                    email: "dup@example.com".to_string(),
                    password_hash: "hash".to_string(),
                    status: AdminStatus::Active,
                    is_super_admin: false,
                    role_ids: vec![],
                    permission_ids: vec![],
                })
                .await
        );
        assert!(matches!(err, AdminError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_unknown_grant_ids_roll_back_the_insert() {
        let db = TestDatabase::new().await;

        let err = assert_err!(
            db.db()
                .create_admin(NewAdmin {
                    name: "Orphan".to_string(),
                    email: "orphan@example.com".to_string(),
                    password_hash: "hash".to_string(),
                    status: AdminStatus::Active,
                    is_super_admin: false,
                    role_ids: vec![404],
                    permission_ids: vec![],
                })
                .await
        );
        assert!(matches!(err, AdminError::Validation(_)));
        assert!(!db.db().email_exists("orphan@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_effective_permissions_are_a_distinct_union() {
        let db = TestDatabase::new().await;
        let view = permission(db.db(), "property", "view").await;
        let edit = permission(db.db(), "property", "edit").await;
        let export = permission(db.db(), "report", "export").await;
        let editor = role(db.db(), "Editor", vec![view, edit]).await;
        let id = AdminFactory::new("union@example.com")
            .roles(vec![editor])
            .permissions(vec![view, export])
            .create(db.db())
            .await;

        let permissions = db.db().admin_permissions(id).await.unwrap();
        let names: Vec<&str> = permissions.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["property.edit", "property.view", "report.export"]);

        let roles = db.db().admin_roles(id).await.unwrap();
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].slug, "editor");

        for capability in ["property.view", "property.edit", "report.export"] {
            let capability: Capability = capability.parse().unwrap();
            assert!(db.db().has_permission(id, &capability).await.unwrap());
        }
        assert!(!db
            .db()
            .has_permission(id, &Capability::new("property", "delete"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_patch_replaces_assignment_sets() {
        let db = TestDatabase::new().await;
        let view = permission(db.db(), "user", "view").await;
        let a = role(db.db(), "Role A", vec![]).await;
        let b = role(db.db(), "Role B", vec![]).await;
        let id = AdminFactory::new("patch@example.com")
            .roles(vec![a])
            .permissions(vec![view])
            .create(db.db())
            .await;

        assert!(db
            .db()
            .update_admin(
                id,
                AdminPatch {
                    role_ids: Some(vec![b]),
                    ..AdminPatch::default()
                },
            )
            .await
            .unwrap());
        let roles = db.db().admin_roles(id).await.unwrap();
        assert_eq!(roles.iter().map(|r| r.id).collect::<Vec<_>>(), vec![b]);
        // Untouched set stays
        assert_eq!(db.db().admin_permissions(id).await.unwrap().len(), 1);

        db.db()
            .update_admin(
                id,
                AdminPatch {
                    permission_ids: Some(vec![]),
                    ..AdminPatch::default()
                },
            )
            .await
            .unwrap();
        assert!(db.db().admin_permissions(id).await.unwrap().is_empty());

        assert!(!db
            .db()
            .update_admin(
                999,
                AdminPatch {
                    name: Some("Ghost".to_string()),
                    ..AdminPatch::default()
                },
            )
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_delete_admin_removes_grants() {
        let db = TestDatabase::new().await;
        let view = permission(db.db(), "user", "view").await;
        let viewer = role(db.db(), "Viewer", vec![view]).await;
        let id = AdminFactory::new("gone@example.com")
            .roles(vec![viewer])
            .permissions(vec![view])
            .create(db.db())
            .await;

        assert!(db.db().delete_admin(id).await.unwrap());
        assert!(!db.db().delete_admin(id).await.unwrap());

        assert!(db.db().admin_roles(id).await.unwrap().is_empty());
        assert!(db.db().admin_permissions(id).await.unwrap().is_empty());
        assert!(!db
            .db()
            .has_permission(id, &Capability::new("user", "view"))
            .await
            .unwrap());

        // The role itself survives
        assert_eq!(db.db().role_permissions(viewer).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_login_bookkeeping() {
        let db = TestDatabase::new().await;
        let id = AdminFactory::new("count@example.com").create(db.db()).await;

        db.db().record_failed_login(id).await.unwrap();
        db.db().record_failed_login(id).await.unwrap();
        let record = db.db().find_admin_by_id(id).await.unwrap().unwrap();
        assert_eq!(record.login_attempts, 2);

        db.db()
            .record_successful_login(id, Some("192.0.2.7".to_string()))
            .await
            .unwrap();
        let record = db.db().find_admin_by_id(id).await.unwrap().unwrap();
        assert_eq!(record.login_attempts, 0);
        assert_eq!(record.last_login_ip.as_deref(), Some("192.0.2.7"));
        assert!(record.last_login_at.is_some());
    }

    #[tokio::test]
    async fn test_list_admins_pagination_and_search() {
        let db = TestDatabase::new().await;
        for i in 0..5 {
            AdminFactory::new(&format!("staff{}@example.com", i))
                .name(&format!("Staff {}", i))
                .create(db.db())
                .await;
        }
        AdminFactory::new("owner@corp.test")
            .name("Olivia Owner")
            .create(db.db())
            .await;

        let page = db
            .db()
            .list_admins(&AdminQuery {
                page: 2,
                limit: 4,
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(page.total, 6);
        assert_eq!(page.admins.len(), 2);
        // Newest first, so page 2 holds the two oldest
        assert_eq!(page.admins[1].email, "staff0@example.com");

        let found = db
            .db()
            .list_admins(&AdminQuery {
                page: 1,
                limit: 10,
                search: Some("OLIVIA".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(found.total, 1);
        assert_eq!(found.admins[0].email, "owner@corp.test");

        let by_email = db
            .db()
            .list_admins(&AdminQuery {
                page: 1,
                limit: 10,
                search: Some("example.com".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(by_email.total, 5);
    }

    #[tokio::test]
    async fn test_list_admins_search_treats_wildcards_literally() {
        let db = TestDatabase::new().await;
        AdminFactory::new("ops@example.com")
            .name("ops_team")
            .create(db.db())
            .await;
        AdminFactory::new("alice@example.com")
            .name("Alice")
            .create(db.db())
            .await;

        for (term, expected) in [("%", 0), ("_", 1), ("s_t", 1), ("\\", 0)] {
            let page = db
                .db()
                .list_admins(&AdminQuery {
                    page: 1,
                    limit: 10,
                    search: Some(term.to_string()),
                })
                .await
                .unwrap();
            assert_eq!(page.total, expected, "search {:?}", term);
        }

        let result = db
            .db()
            .list_admins(&AdminQuery {
                page: u64::MAX,
                limit: 100,
                search: None,
            })
            .await;
        let err = assert_err!(result);
        assert!(matches!(err, AdminError::Validation(_)));
    }

    #[tokio::test]
    async fn test_roles_and_permissions_catalogue() {
        let db = TestDatabase::new().await;
        let view = permission(db.db(), "user", "view").await;
        permission(db.db(), "admin", "create").await;

        let err = assert_err!(
            db.db()
                .create_permission(NewPermission {
                    name: "user.read".to_string(),
                    module: "user".to_string(),
                    action: "view".to_string(),
                    description: None,
                })
                .await
        );
        assert!(matches!(err, AdminError::Conflict(_)));

        assert!(db
            .db()
            .permission_exists("user.view", &Capability::new("x", "y"))
            .await
            .unwrap());
        assert!(db
            .db()
            .permission_exists("other", &Capability::new("admin", "create"))
            .await
            .unwrap());
        assert!(!db
            .db()
            .permission_exists("other", &Capability::new("admin", "delete"))
            .await
            .unwrap());

        let names: Vec<String> = db
            .db()
            .list_permissions()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["admin.create", "user.view"]);

        let support = role(db.db(), "Support", vec![view]).await;
        assert!(db.db().role_slug_exists("support").await.unwrap());
        let err = assert_err!(
            db.db()
                .create_role(NewRole {
                    name: "Support Two".to_string(),
                    slug: "support".to_string(),
                    description: None,
                    permission_ids: vec![],
                })
                .await
        );
        assert!(matches!(err, AdminError::Conflict(_)));

        assert!(db
            .db()
            .update_role(
                support,
                RolePatch {
                    name: Some("Customer Support".to_string()),
                    description: Some("Front line".to_string()),
                    permission_ids: Some(vec![]),
                },
            )
            .await
            .unwrap());
        let roles = db.db().list_roles().await.unwrap();
        assert_eq!(roles[0].name, "Customer Support");
        assert_eq!(roles[0].slug, "support");
        assert_eq!(roles[0].description.as_deref(), Some("Front line"));
        assert!(db.db().role_permissions(support).await.unwrap().is_empty());

        assert!(!db
            .db()
            .update_role(999, RolePatch::default())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_purge_expired_tickets() {
        let db = TestDatabase::new().await;
        let now = Utc::now();

        for (hash, offset) in [("old", -Duration::minutes(5)), ("fresh", Duration::minutes(5))] {
            db.db()
                .create_reset_ticket(ResetTicket {
                    email: "someone@example.com".to_string(),
                    token_hash: hash.to_string(),
                    expires_at: now + offset,
                })
                .await
                .unwrap();
        }

        assert_eq!(db.db().purge_expired_tickets(now).await.unwrap(), 1);
        assert_eq!(db.db().purge_expired_tickets(now).await.unwrap(), 0);
    }
}
