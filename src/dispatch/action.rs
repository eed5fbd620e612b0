//! The logical actions and their static routing table.

use std::fmt;

use crate::config::Endpoint;
use crate::operation::{HttpMethod, OperationKind, ResponseShape};

/// A logical remote action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Action {
    /// Fetch a user by key.
    GetUser,
    /// Fetch a role by key.
    GetRole,
    /// Fetch a tenant by key.
    GetTenant,
    /// List roles, optionally paginated.
    ListRoles,
    /// List the role assignments of a user.
    GetAssignedRoles,
    /// Create or replace a user.
    SyncUser,
    /// Delete a user.
    DeleteUser,
    /// Create a role.
    CreateRole,
    /// Partially update a role.
    UpdateRole,
    /// Delete a role.
    DeleteRole,
    /// Grant permissions to a role.
    AssignPermissions,
    /// Revoke permissions from a role.
    RemovePermissions,
    /// Create a tenant.
    CreateTenant,
    /// Partially update a tenant.
    UpdateTenant,
    /// Delete a tenant.
    DeleteTenant,
    /// Assign a role to a user within a tenant.
    AssignRole,
    /// Remove a role assignment.
    UnassignRole,
    /// Ask the PDP for a single permission decision.
    Check,
    /// Ask the PDP for many permission decisions.
    BulkCheck,
}

/// Which family of endpoints an action belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointClass {
    /// Data-model management, always on the cloud API.
    Management,
    /// Permission decisions, always on the PDP.
    Decision,
    /// Fact writes, on the PDP only when facts are proxied.
    Fact,
}

impl EndpointClass {
    /// Resolves the endpoint for this class.
    pub fn resolve(self, proxy_facts_via_pdp: bool) -> Endpoint {
        match self {
            EndpointClass::Management => Endpoint::Api,
            EndpointClass::Decision => Endpoint::Pdp,
            EndpointClass::Fact if proxy_facts_via_pdp => Endpoint::Pdp,
            EndpointClass::Fact => Endpoint::Api,
        }
    }
}

/// Static routing facts of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSpec {
    /// Endpoint family.
    pub class: EndpointClass,
    /// HTTP verb.
    pub method: HttpMethod,
    /// Read/write tag.
    pub kind: OperationKind,
    /// Response interpretation.
    pub response: ResponseShape,
}

const fn spec(
    class: EndpointClass,
    method: HttpMethod,
    kind: OperationKind,
    response: ResponseShape,
) -> ActionSpec {
    ActionSpec { class, method, kind, response }
}

impl Action {
    /// Every action, in table order.
    pub const ALL: [Action; 19] = [
        Action::GetUser,
        Action::GetRole,
        Action::GetTenant,
        Action::ListRoles,
        Action::GetAssignedRoles,
        Action::SyncUser,
        Action::DeleteUser,
        Action::CreateRole,
        Action::UpdateRole,
        Action::DeleteRole,
        Action::AssignPermissions,
        Action::RemovePermissions,
        Action::CreateTenant,
        Action::UpdateTenant,
        Action::DeleteTenant,
        Action::AssignRole,
        Action::UnassignRole,
        Action::Check,
        Action::BulkCheck,
    ];

    /// Returns the action name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::GetUser => "get_user",
            Action::GetRole => "get_role",
            Action::GetTenant => "get_tenant",
            Action::ListRoles => "list_roles",
            Action::GetAssignedRoles => "get_assigned_roles",
            Action::SyncUser => "sync_user",
            Action::DeleteUser => "delete_user",
            Action::CreateRole => "create_role",
            Action::UpdateRole => "update_role",
            Action::DeleteRole => "delete_role",
            Action::AssignPermissions => "assign_permissions",
            Action::RemovePermissions => "remove_permissions",
            Action::CreateTenant => "create_tenant",
            Action::UpdateTenant => "update_tenant",
            Action::DeleteTenant => "delete_tenant",
            Action::AssignRole => "assign_role",
            Action::UnassignRole => "unassign_role",
            Action::Check => "check",
            Action::BulkCheck => "bulk_check",
        }
    }

    /// Returns the static routing facts of this action.
    pub fn spec(&self) -> ActionSpec {
        use EndpointClass::*;
        use HttpMethod::*;
        use OperationKind::*;
        use ResponseShape::*;

        match self {
            Action::GetUser => spec(Management, Get, Read, Json),
            Action::GetRole => spec(Management, Get, Read, Json),
            Action::GetTenant => spec(Management, Get, Read, Json),
            Action::ListRoles => spec(Management, Get, Read, Json),
            Action::GetAssignedRoles => spec(Management, Get, Read, Json),
            Action::SyncUser => spec(Fact, Put, Write, Json),
            Action::DeleteUser => spec(Fact, Delete, Write, Status),
            Action::CreateRole => spec(Management, Put, Write, Json),
            Action::UpdateRole => spec(Management, Patch, Write, Json),
            Action::DeleteRole => spec(Management, Delete, Write, Status),
            Action::AssignPermissions => spec(Management, Post, Write, Json),
            Action::RemovePermissions => spec(Management, Delete, Write, Json),
            Action::CreateTenant => spec(Fact, Put, Write, Json),
            Action::UpdateTenant => spec(Fact, Patch, Write, Json),
            Action::DeleteTenant => spec(Fact, Delete, Write, Status),
            Action::AssignRole => spec(Fact, Post, Write, Json),
            Action::UnassignRole => spec(Fact, Delete, Write, Json),
            Action::Check => spec(Decision, Post, Read, Json),
            Action::BulkCheck => spec(Decision, Post, Read, Json),
        }
    }

    /// Returns the endpoint this action targets.
    pub fn endpoint(&self, proxy_facts_via_pdp: bool) -> Endpoint {
        self.spec().class.resolve(proxy_facts_via_pdp)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
