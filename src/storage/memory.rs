//! In-memory credential store
//!
//! Keeps every relation in a single `RwLock`-protected state. Locks are never
//! held across an `.await`. The store can be switched offline or slowed down,
//! which lets callers exercise the guards' failure paths.

use super::types::*;
use super::{AdminDirectory, CredentialStore};
use crate::auth::rbac::Capability;
use crate::utils::error::{AdminError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
struct StoredAdmin {
    record: AdminRecord,
    password_hash: String,
}

#[derive(Debug, Clone)]
struct StoredTicket {
    ticket: ResetTicket,
    used: bool,
}

#[derive(Debug, Default)]
struct MemoryState {
    last_admin_id: i32,
    last_role_id: i32,
    last_permission_id: i32,
    admins: BTreeMap<i32, StoredAdmin>,
    roles: BTreeMap<i32, RoleRecord>,
    permissions: BTreeMap<i32, PermissionRecord>,
    /// (role_id, permission_id)
    role_grants: BTreeSet<(i32, i32)>,
    /// (admin_id, role_id)
    role_assignments: BTreeSet<(i32, i32)>,
    /// (admin_id, permission_id)
    direct_grants: BTreeSet<(i32, i32)>,
    tickets: Vec<StoredTicket>,
}

impl MemoryState {
    fn reachable_permission_ids(&self, admin_id: i32) -> BTreeSet<i32> {
        let direct = self
            .direct_grants
            .iter()
            .filter(|(admin, _)| *admin == admin_id)
            .map(|(_, permission)| *permission);

        let roles: BTreeSet<i32> = self
            .role_assignments
            .iter()
            .filter(|(admin, _)| *admin == admin_id)
            .map(|(_, role)| *role)
            .collect();

        let inherited = self
            .role_grants
            .iter()
            .filter(|(role, _)| roles.contains(role))
            .map(|(_, permission)| *permission);

        direct.chain(inherited).collect()
    }

    fn sorted_permissions<I: IntoIterator<Item = i32>>(&self, ids: I) -> Vec<PermissionRecord> {
        let mut permissions: Vec<PermissionRecord> = ids
            .into_iter()
            .filter_map(|id| self.permissions.get(&id).cloned())
            .collect();
        permissions.sort_by(|a, b| (&a.module, &a.action).cmp(&(&b.module, &b.action)));
        permissions
    }

    fn ensure_known(&self, role_ids: &[i32], permission_ids: &[i32]) -> Result<()> {
        let roles_known = role_ids.iter().all(|id| self.roles.contains_key(id));
        let permissions_known = permission_ids
            .iter()
            .all(|id| self.permissions.contains_key(id));
        if roles_known && permissions_known {
            Ok(())
        } else {
            Err(AdminError::validation("Unknown role or permission id"))
        }
    }

    fn replace_roles(&mut self, admin_id: i32, role_ids: &[i32]) {
        self.role_assignments.retain(|(admin, _)| *admin != admin_id);
        self.role_assignments
            .extend(role_ids.iter().map(|role| (admin_id, *role)));
    }

    fn replace_direct_grants(&mut self, admin_id: i32, permission_ids: &[i32]) {
        self.direct_grants.retain(|(admin, _)| *admin != admin_id);
        self.direct_grants
            .extend(permission_ids.iter().map(|permission| (admin_id, *permission)));
    }

    fn replace_role_grants(&mut self, role_id: i32, permission_ids: &[i32]) {
        self.role_grants.retain(|(role, _)| *role != role_id);
        self.role_grants
            .extend(permission_ids.iter().map(|permission| (role_id, *permission)));
    }
}

/// Credential store kept entirely in process memory
#[derive(Debug)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
    available: AtomicBool,
    latency: RwLock<Option<Duration>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState::default()),
            available: AtomicBool::new(true),
            latency: RwLock::new(None),
        }
    }

    /// Make every subsequent call fail with a storage error (or recover)
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Delay permission lookups by the given duration
    pub fn set_latency(&self, latency: Option<Duration>) {
        *self.latency.write() = latency;
    }

    /// Number of stored reset tickets, used or not
    pub fn ticket_count(&self) -> usize {
        self.state.read().tickets.len()
    }

    fn ensure_available(&self) -> Result<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AdminError::storage("memory store is offline"))
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_active_admin_by_id(&self, id: i32) -> Result<Option<AdminRecord>> {
        self.ensure_available()?;
        let state = self.state.read();
        Ok(state
            .admins
            .get(&id)
            .filter(|stored| stored.record.is_active())
            .map(|stored| stored.record.clone()))
    }

    async fn find_active_admin_by_email(&self, email: &str) -> Result<Option<AdminCredentials>> {
        self.ensure_available()?;
        let state = self.state.read();
        Ok(state
            .admins
            .values()
            .find(|stored| stored.record.email == email && stored.record.is_active())
            .map(|stored| AdminCredentials {
                admin: stored.record.clone(),
                password_hash: stored.password_hash.clone(),
            }))
    }

    async fn has_permission(&self, admin_id: i32, capability: &Capability) -> Result<bool> {
        self.ensure_available()?;

        let latency = *self.latency.read();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let state = self.state.read();
        let granted = state
            .reachable_permission_ids(admin_id)
            .into_iter()
            .filter_map(|id| state.permissions.get(&id))
            .any(|p| p.module == capability.module && p.action == capability.action);

        debug!(admin_id, %capability, granted, "Memory permission lookup");
        Ok(granted)
    }

    async fn admin_roles(&self, admin_id: i32) -> Result<Vec<RoleSummary>> {
        self.ensure_available()?;
        let state = self.state.read();
        Ok(state
            .role_assignments
            .iter()
            .filter(|(admin, _)| *admin == admin_id)
            .filter_map(|(_, role_id)| state.roles.get(role_id))
            .map(|role| RoleSummary {
                id: role.id,
                name: role.name.clone(),
                slug: role.slug.clone(),
            })
            .collect())
    }

    async fn admin_permissions(&self, admin_id: i32) -> Result<Vec<PermissionRecord>> {
        self.ensure_available()?;
        let state = self.state.read();
        Ok(state.sorted_permissions(state.reachable_permission_ids(admin_id)))
    }

    async fn record_failed_login(&self, admin_id: i32) -> Result<()> {
        self.ensure_available()?;
        if let Some(stored) = self.state.write().admins.get_mut(&admin_id) {
            stored.record.login_attempts += 1;
        }
        Ok(())
    }

    async fn record_successful_login(&self, admin_id: i32, ip: Option<String>) -> Result<()> {
        self.ensure_available()?;
        if let Some(stored) = self.state.write().admins.get_mut(&admin_id) {
            stored.record.login_attempts = 0;
            stored.record.last_login_at = Some(Utc::now());
            stored.record.last_login_ip = ip;
        }
        Ok(())
    }

    async fn create_reset_ticket(&self, ticket: ResetTicket) -> Result<()> {
        self.ensure_available()?;
        self.state.write().tickets.push(StoredTicket {
            ticket,
            used: false,
        });
        Ok(())
    }

    async fn redeem_reset_ticket(
        &self,
        email: &str,
        token_hash: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        self.ensure_available()?;

        // Single write lock: claim and password change are one step.
        let mut state = self.state.write();
        let Some(admin_id) = state
            .admins
            .values()
            .find(|stored| stored.record.email == email)
            .map(|stored| stored.record.id)
        else {
            return Ok(false);
        };

        let Some(stored_ticket) = state.tickets.iter_mut().find(|stored| {
            !stored.used
                && stored.ticket.email == email
                && stored.ticket.token_hash == token_hash
                && stored.ticket.expires_at > now
        }) else {
            return Ok(false);
        };
        stored_ticket.used = true;

        if let Some(stored) = state.admins.get_mut(&admin_id) {
            stored.password_hash = password_hash.to_string();
        }
        Ok(true)
    }

    async fn health_check(&self) -> Result<()> {
        self.ensure_available()
    }
}

#[async_trait]
impl AdminDirectory for MemoryStore {
    async fn find_admin_by_id(&self, id: i32) -> Result<Option<AdminRecord>> {
        self.ensure_available()?;
        Ok(self
            .state
            .read()
            .admins
            .get(&id)
            .map(|stored| stored.record.clone()))
    }

    async fn email_exists(&self, email: &str) -> Result<bool> {
        self.ensure_available()?;
        Ok(self
            .state
            .read()
            .admins
            .values()
            .any(|stored| stored.record.email == email))
    }

    async fn list_admins(&self, query: &AdminQuery) -> Result<AdminPage> {
        self.ensure_available()?;
        let state = self.state.read();
        let offset = query.offset()?;
        let term = query.search_term();

        let matching: Vec<AdminRecord> = state
            .admins
            .values()
            .rev()
            .map(|stored| &stored.record)
            .filter(|admin| match &term {
                Some(term) => {
                    admin.name.to_lowercase().contains(term)
                        || admin.email.to_lowercase().contains(term)
                }
                None => true,
            })
            .cloned()
            .collect();

        let total = matching.len() as u64;
        let admins = matching
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(query.limit).unwrap_or(usize::MAX))
            .collect();

        Ok(AdminPage { admins, total })
    }

    async fn create_admin(&self, admin: NewAdmin) -> Result<i32> {
        self.ensure_available()?;
        let mut state = self.state.write();

        if state
            .admins
            .values()
            .any(|stored| stored.record.email == admin.email)
        {
            return Err(AdminError::conflict("Email already exists"));
        }
        state.ensure_known(&admin.role_ids, &admin.permission_ids)?;

        state.last_admin_id += 1;
        let id = state.last_admin_id;
        state.admins.insert(
            id,
            StoredAdmin {
                record: AdminRecord {
                    id,
                    name: admin.name,
                    email: admin.email,
                    status: admin.status,
                    is_super_admin: admin.is_super_admin,
                    login_attempts: 0,
                    last_login_at: None,
                    last_login_ip: None,
                    created_at: Utc::now(),
                },
                password_hash: admin.password_hash,
            },
        );
        state.replace_roles(id, &admin.role_ids);
        state.replace_direct_grants(id, &admin.permission_ids);

        Ok(id)
    }

    async fn update_admin(&self, id: i32, patch: AdminPatch) -> Result<bool> {
        self.ensure_available()?;
        let mut state = self.state.write();

        if !state.admins.contains_key(&id) {
            return Ok(false);
        }
        state.ensure_known(
            patch.role_ids.as_deref().unwrap_or_default(),
            patch.permission_ids.as_deref().unwrap_or_default(),
        )?;
        let Some(stored) = state.admins.get_mut(&id) else {
            return Ok(false);
        };
        if let Some(name) = patch.name {
            stored.record.name = name;
        }
        if let Some(status) = patch.status {
            stored.record.status = status;
        }
        if let Some(is_super_admin) = patch.is_super_admin {
            stored.record.is_super_admin = is_super_admin;
        }
        if let Some(password_hash) = patch.password_hash {
            stored.password_hash = password_hash;
        }
        if let Some(role_ids) = patch.role_ids {
            state.replace_roles(id, &role_ids);
        }
        if let Some(permission_ids) = patch.permission_ids {
            state.replace_direct_grants(id, &permission_ids);
        }

        Ok(true)
    }

    async fn delete_admin(&self, id: i32) -> Result<bool> {
        self.ensure_available()?;
        let mut state = self.state.write();

        if state.admins.remove(&id).is_none() {
            return Ok(false);
        }
        state.replace_roles(id, &[]);
        state.replace_direct_grants(id, &[]);
        Ok(true)
    }

    async fn create_role(&self, role: NewRole) -> Result<i32> {
        self.ensure_available()?;
        let mut state = self.state.write();

        if state
            .roles
            .values()
            .any(|r| r.slug == role.slug || r.name == role.name)
        {
            return Err(AdminError::conflict("Role with this slug already exists"));
        }
        state.ensure_known(&[], &role.permission_ids)?;

        state.last_role_id += 1;
        let id = state.last_role_id;
        state.roles.insert(
            id,
            RoleRecord {
                id,
                name: role.name,
                slug: role.slug,
                description: role.description,
                created_at: Utc::now(),
            },
        );
        state.replace_role_grants(id, &role.permission_ids);
        Ok(id)
    }

    async fn update_role(&self, id: i32, patch: RolePatch) -> Result<bool> {
        self.ensure_available()?;
        let mut state = self.state.write();

        if !state.roles.contains_key(&id) {
            return Ok(false);
        }
        state.ensure_known(&[], patch.permission_ids.as_deref().unwrap_or_default())?;
        if let Some(name) = &patch.name {
            if state.roles.values().any(|r| r.id != id && &r.name == name) {
                return Err(AdminError::conflict("Role with this name already exists"));
            }
        }
        let Some(role) = state.roles.get_mut(&id) else {
            return Ok(false);
        };
        if let Some(name) = patch.name {
            role.name = name;
        }
        if let Some(description) = patch.description {
            role.description = Some(description);
        }
        if let Some(permission_ids) = patch.permission_ids {
            state.replace_role_grants(id, &permission_ids);
        }
        Ok(true)
    }

    async fn role_slug_exists(&self, slug: &str) -> Result<bool> {
        self.ensure_available()?;
        Ok(self.state.read().roles.values().any(|r| r.slug == slug))
    }

    async fn list_roles(&self) -> Result<Vec<RoleRecord>> {
        self.ensure_available()?;
        let mut roles: Vec<RoleRecord> = self.state.read().roles.values().cloned().collect();
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(roles)
    }

    async fn role_permissions(&self, role_id: i32) -> Result<Vec<PermissionRecord>> {
        self.ensure_available()?;
        let state = self.state.read();
        let ids = state
            .role_grants
            .iter()
            .filter(|(role, _)| *role == role_id)
            .map(|(_, permission)| *permission);
        Ok(state.sorted_permissions(ids))
    }

    async fn create_permission(&self, permission: NewPermission) -> Result<i32> {
        self.ensure_available()?;
        let mut state = self.state.write();

        if state.permissions.values().any(|p| {
            p.name == permission.name
                || (p.module == permission.module && p.action == permission.action)
        }) {
            return Err(AdminError::conflict("Permission already exists"));
        }

        state.last_permission_id += 1;
        let id = state.last_permission_id;
        state.permissions.insert(
            id,
            PermissionRecord {
                id,
                name: permission.name,
                module: permission.module,
                action: permission.action,
                description: permission.description,
            },
        );
        Ok(id)
    }

    async fn permission_exists(&self, name: &str, capability: &Capability) -> Result<bool> {
        self.ensure_available()?;
        Ok(self.state.read().permissions.values().any(|p| {
            p.name == name || (p.module == capability.module && p.action == capability.action)
        }))
    }

    async fn list_permissions(&self) -> Result<Vec<PermissionRecord>> {
        self.ensure_available()?;
        let state = self.state.read();
        Ok(state.sorted_permissions(state.permissions.keys().copied()))
    }
}
