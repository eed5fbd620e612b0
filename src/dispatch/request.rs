//! Typed inputs bound to each action.

use serde::Serialize;
use serde_json::{Map, Value};

use super::Action;

/// A user record for [`ActionRequest::SyncUser`].
///
/// Unset optional fields are omitted from the payload.
#[derive(Debug, Clone, PartialEq, Serialize, bon::Builder)]
pub struct UserInput {
    /// Unique user key.
    #[builder(into)]
    pub key: String,
    /// Email address.
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Given name.
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name.
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Free-form attributes used by attribute-based policies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Map<String, Value>>,
}

/// A role definition for [`ActionRequest::CreateRole`].
#[derive(Debug, Clone, PartialEq, Serialize, bon::Builder)]
pub struct RoleInput {
    /// Unique role key.
    #[builder(into)]
    pub key: String,
    /// Display name.
    #[builder(into)]
    pub name: String,
    /// Description.
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Initial permissions, as `resource:action` strings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

/// A partial role update for [`ActionRequest::UpdateRole`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, bon::Builder)]
pub struct RoleUpdate {
    /// New display name.
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A tenant definition for [`ActionRequest::CreateTenant`].
#[derive(Debug, Clone, PartialEq, Serialize, bon::Builder)]
pub struct TenantInput {
    /// Unique tenant key.
    #[builder(into)]
    #[serde(rename = "externalId")]
    pub key: String,
    /// Display name.
    #[builder(into)]
    pub name: String,
    /// Description.
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A tenant update for [`ActionRequest::UpdateTenant`].
#[derive(Debug, Clone, PartialEq, Serialize, bon::Builder)]
pub struct TenantUpdate {
    /// New display name.
    #[builder(into)]
    pub name: String,
    /// New description.
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A role granted to a user within a tenant.
///
/// Serialized as `{"role", "user", "scope"}`, the tenant being the scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleAssignment {
    /// Role key.
    pub role: String,
    /// User key.
    pub user: String,
    /// Tenant key.
    #[serde(rename = "scope")]
    pub tenant: String,
}

impl RoleAssignment {
    /// Creates an assignment of `role` to `user` in `tenant`.
    pub fn new(
        user: impl Into<String>,
        role: impl Into<String>,
        tenant: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            user: user.into(),
            tenant: tenant.into(),
        }
    }
}

/// The subject of a permission check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckUser {
    /// User key.
    pub key: String,
    /// Attributes sent along with the check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Map<String, Value>>,
}

impl From<&str> for CheckUser {
    fn from(key: &str) -> Self {
        Self {
            key: key.to_string(),
            attributes: None,
        }
    }
}

impl From<String> for CheckUser {
    fn from(key: String) -> Self {
        Self { key, attributes: None }
    }
}

/// The object of a permission check.
///
/// Converts from `"type"` or `"type:key"` strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResource {
    /// Resource type.
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Resource instance key; absent for type-level checks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Tenant the resource belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
    /// Resource attributes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Map<String, Value>>,
}

impl CheckResource {
    /// Sets the tenant.
    #[must_use]
    pub fn with_tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant = Some(tenant.into());
        self
    }
}

impl From<&str> for CheckResource {
    fn from(raw: &str) -> Self {
        let (resource_type, key) = match raw.split_once(':') {
            Some((ty, key)) if !key.is_empty() => (ty, Some(key.to_string())),
            Some((ty, _)) => (ty, None),
            None => (raw, None),
        };
        Self {
            resource_type: resource_type.to_string(),
            key,
            tenant: None,
            attributes: None,
        }
    }
}

/// A single permission question for the PDP.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckQuery {
    /// Who is acting.
    pub user: CheckUser,
    /// What they want to do.
    pub action: String,
    /// What they act on.
    pub resource: CheckResource,
    /// Extra context for the decision.
    pub context: Map<String, Value>,
}

impl CheckQuery {
    /// Creates a check with an empty context.
    pub fn new(
        user: impl Into<CheckUser>,
        action: impl Into<String>,
        resource: impl Into<CheckResource>,
    ) -> Self {
        Self {
            user: user.into(),
            action: action.into(),
            resource: resource.into(),
            context: Map::new(),
        }
    }
}

/// An action together with its bound inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionRequest {
    /// See [`Action::GetUser`].
    GetUser {
        /// User key.
        user: String,
    },
    /// See [`Action::GetRole`].
    GetRole {
        /// Role key.
        role: String,
    },
    /// See [`Action::GetTenant`].
    GetTenant {
        /// Tenant key.
        tenant: String,
    },
    /// See [`Action::ListRoles`].
    ListRoles {
        /// Page number, 1-based.
        page: Option<u32>,
        /// Page size.
        per_page: Option<u32>,
    },
    /// See [`Action::GetAssignedRoles`].
    GetAssignedRoles {
        /// User key.
        user: String,
        /// Restrict to one tenant.
        tenant: Option<String>,
    },
    /// See [`Action::SyncUser`].
    SyncUser(UserInput),
    /// See [`Action::DeleteUser`].
    DeleteUser {
        /// User key.
        user: String,
    },
    /// See [`Action::CreateRole`].
    CreateRole(RoleInput),
    /// See [`Action::UpdateRole`].
    UpdateRole {
        /// Role key.
        role: String,
        /// Fields to change.
        update: RoleUpdate,
    },
    /// See [`Action::DeleteRole`].
    DeleteRole {
        /// Role key.
        role: String,
    },
    /// See [`Action::AssignPermissions`].
    AssignPermissions {
        /// Role key.
        role: String,
        /// Permissions to grant.
        permissions: Vec<String>,
    },
    /// See [`Action::RemovePermissions`].
    RemovePermissions {
        /// Role key.
        role: String,
        /// Permissions to revoke.
        permissions: Vec<String>,
    },
    /// See [`Action::CreateTenant`].
    CreateTenant(TenantInput),
    /// See [`Action::UpdateTenant`].
    UpdateTenant {
        /// Tenant key.
        tenant: String,
        /// New values.
        update: TenantUpdate,
    },
    /// See [`Action::DeleteTenant`].
    DeleteTenant {
        /// Tenant key.
        tenant: String,
    },
    /// See [`Action::AssignRole`].
    AssignRole(RoleAssignment),
    /// See [`Action::UnassignRole`].
    UnassignRole(RoleAssignment),
    /// See [`Action::Check`].
    Check(CheckQuery),
    /// See [`Action::BulkCheck`].
    BulkCheck(Vec<CheckQuery>),
}

impl ActionRequest {
    /// Returns the logical action.
    pub fn action(&self) -> Action {
        match self {
            ActionRequest::GetUser { .. } => Action::GetUser,
            ActionRequest::GetRole { .. } => Action::GetRole,
            ActionRequest::GetTenant { .. } => Action::GetTenant,
            ActionRequest::ListRoles { .. } => Action::ListRoles,
            ActionRequest::GetAssignedRoles { .. } => Action::GetAssignedRoles,
            ActionRequest::SyncUser(_) => Action::SyncUser,
            ActionRequest::DeleteUser { .. } => Action::DeleteUser,
            ActionRequest::CreateRole(_) => Action::CreateRole,
            ActionRequest::UpdateRole { .. } => Action::UpdateRole,
            ActionRequest::DeleteRole { .. } => Action::DeleteRole,
            ActionRequest::AssignPermissions { .. } => Action::AssignPermissions,
            ActionRequest::RemovePermissions { .. } => Action::RemovePermissions,
            ActionRequest::CreateTenant(_) => Action::CreateTenant,
            ActionRequest::UpdateTenant { .. } => Action::UpdateTenant,
            ActionRequest::DeleteTenant { .. } => Action::DeleteTenant,
            ActionRequest::AssignRole(_) => Action::AssignRole,
            ActionRequest::UnassignRole(_) => Action::UnassignRole,
            ActionRequest::Check(_) => Action::Check,
            ActionRequest::BulkCheck(_) => Action::BulkCheck,
        }
    }

    /// Renders the bound inputs as a single loggable string.
    ///
    /// Identifiers are percent-encoded; records are rendered as compact JSON.
    pub fn summary(&self) -> String {
        match self {
            ActionRequest::GetUser { user } | ActionRequest::DeleteUser { user } => {
                pairs(&[("user", Some(user))])
            },
            ActionRequest::GetRole { role } | ActionRequest::DeleteRole { role } => {
                pairs(&[("role", Some(role))])
            },
            ActionRequest::GetTenant { tenant } | ActionRequest::DeleteTenant { tenant } => {
                pairs(&[("tenant", Some(tenant))])
            },
            ActionRequest::ListRoles { page, per_page } => {
                let page = page.map(|p| p.to_string());
                let per_page = per_page.map(|p| p.to_string());
                pairs(&[("page", page.as_ref()), ("per_page", per_page.as_ref())])
            },
            ActionRequest::GetAssignedRoles { user, tenant } => {
                pairs(&[("user", Some(user)), ("tenant", tenant.as_ref())])
            },
            ActionRequest::SyncUser(user) => json(user),
            ActionRequest::CreateRole(role) => json(role),
            ActionRequest::UpdateRole { role, update } => {
                format!("{}, {}", pairs(&[("role", Some(role))]), json(update))
            },
            ActionRequest::AssignPermissions { role, permissions }
            | ActionRequest::RemovePermissions { role, permissions } => {
                format!("{}, {}", pairs(&[("role", Some(role))]), json(permissions))
            },
            ActionRequest::CreateTenant(tenant) => json(tenant),
            ActionRequest::UpdateTenant { tenant, update } => {
                format!("{}, {}", pairs(&[("tenant", Some(tenant))]), json(update))
            },
            ActionRequest::AssignRole(assignment) | ActionRequest::UnassignRole(assignment) => {
                json(assignment)
            },
            ActionRequest::Check(query) => json(query),
            ActionRequest::BulkCheck(queries) => json(queries),
        }
    }
}

fn pairs(values: &[(&str, Option<&String>)]) -> String {
    values
        .iter()
        .filter_map(|(name, value)| {
            value.map(|v| format!("{}={}", name, urlencoding::encode(v)))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| String::from("<unserializable>"))
}
