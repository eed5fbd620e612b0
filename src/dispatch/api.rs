//! Named planning methods, grouped by whether they observe or mutate state.
//!
//! Every method returns a deferred [`Operation`]; nothing is sent until the
//! operation is executed.

use serde_json::{Map, Value};

use super::{
    ActionRequest, CheckQuery, Dispatcher, RoleAssignment, RoleInput, RoleUpdate, TenantInput,
    TenantUpdate, UserInput,
};
use crate::Error;
use crate::operation::Operation;

/// Planning of read operations against the cloud API.
pub trait ReadApi {
    /// Plans a lookup of one user.
    fn get_user(&self, user: &str) -> Result<Operation, Error>;

    /// Plans a lookup of one role.
    fn get_role(&self, role: &str) -> Result<Operation, Error>;

    /// Plans a lookup of one tenant.
    fn get_tenant(&self, tenant: &str) -> Result<Operation, Error>;

    /// Plans a listing of roles; pagination parameters are sent only when set.
    fn list_roles(&self, page: Option<u32>, per_page: Option<u32>) -> Result<Operation, Error>;

    /// Plans a listing of a user's role assignments, optionally in one tenant.
    fn get_assigned_roles(&self, user: &str, tenant: Option<&str>) -> Result<Operation, Error>;
}

/// Planning of write operations.
pub trait WriteApi {
    /// Plans a create-or-replace of a user.
    fn sync_user(&self, user: UserInput) -> Result<Operation, Error>;

    /// Plans the deletion of a user.
    fn delete_user(&self, user: &str) -> Result<Operation, Error>;

    /// Plans the creation of a role.
    fn create_role(&self, role: RoleInput) -> Result<Operation, Error>;

    /// Plans a partial update of a role.
    fn update_role(&self, role: &str, update: RoleUpdate) -> Result<Operation, Error>;

    /// Plans the deletion of a role.
    fn delete_role(&self, role: &str) -> Result<Operation, Error>;

    /// Plans granting permissions to a role.
    fn assign_permissions(&self, role: &str, permissions: Vec<String>) -> Result<Operation, Error>;

    /// Plans revoking permissions from a role.
    fn remove_permissions(&self, role: &str, permissions: Vec<String>) -> Result<Operation, Error>;

    /// Plans the creation of a tenant.
    fn create_tenant(&self, tenant: TenantInput) -> Result<Operation, Error>;

    /// Plans an update of a tenant.
    fn update_tenant(&self, tenant: &str, update: TenantUpdate) -> Result<Operation, Error>;

    /// Plans the deletion of a tenant.
    fn delete_tenant(&self, tenant: &str) -> Result<Operation, Error>;

    /// Plans assigning `role` to `user` within `tenant`.
    fn assign_role(&self, user: &str, role: &str, tenant: &str) -> Result<Operation, Error>;

    /// Plans removing a role assignment.
    fn unassign_role(&self, user: &str, role: &str, tenant: &str) -> Result<Operation, Error>;
}

/// Planning of permission checks against the PDP.
pub trait DecisionApi {
    /// Plans a single permission check.
    fn check_operation(&self, query: CheckQuery) -> Result<Operation, Error>;

    /// Plans a batch of permission checks answered in one exchange.
    fn bulk_check_operation(&self, queries: Vec<CheckQuery>) -> Result<Operation, Error>;
}

/// The complete planning surface.
pub trait PermitApi: ReadApi + WriteApi + DecisionApi {}

impl<T: ReadApi + WriteApi + DecisionApi> PermitApi for T {}

impl ReadApi for Dispatcher {
    fn get_user(&self, user: &str) -> Result<Operation, Error> {
        self.plan(ActionRequest::GetUser { user: user.into() })
    }

    fn get_role(&self, role: &str) -> Result<Operation, Error> {
        self.plan(ActionRequest::GetRole { role: role.into() })
    }

    fn get_tenant(&self, tenant: &str) -> Result<Operation, Error> {
        self.plan(ActionRequest::GetTenant { tenant: tenant.into() })
    }

    fn list_roles(&self, page: Option<u32>, per_page: Option<u32>) -> Result<Operation, Error> {
        self.plan(ActionRequest::ListRoles { page, per_page })
    }

    fn get_assigned_roles(&self, user: &str, tenant: Option<&str>) -> Result<Operation, Error> {
        self.plan(ActionRequest::GetAssignedRoles {
            user: user.into(),
            tenant: tenant.map(str::to_string),
        })
    }
}

impl WriteApi for Dispatcher {
    fn sync_user(&self, user: UserInput) -> Result<Operation, Error> {
        self.plan(ActionRequest::SyncUser(user))
    }

    fn delete_user(&self, user: &str) -> Result<Operation, Error> {
        self.plan(ActionRequest::DeleteUser { user: user.into() })
    }

    fn create_role(&self, role: RoleInput) -> Result<Operation, Error> {
        self.plan(ActionRequest::CreateRole(role))
    }

    fn update_role(&self, role: &str, update: RoleUpdate) -> Result<Operation, Error> {
        self.plan(ActionRequest::UpdateRole {
            role: role.into(),
            update,
        })
    }

    fn delete_role(&self, role: &str) -> Result<Operation, Error> {
        self.plan(ActionRequest::DeleteRole { role: role.into() })
    }

    fn assign_permissions(&self, role: &str, permissions: Vec<String>) -> Result<Operation, Error> {
        self.plan(ActionRequest::AssignPermissions {
            role: role.into(),
            permissions,
        })
    }

    fn remove_permissions(&self, role: &str, permissions: Vec<String>) -> Result<Operation, Error> {
        self.plan(ActionRequest::RemovePermissions {
            role: role.into(),
            permissions,
        })
    }

    fn create_tenant(&self, tenant: TenantInput) -> Result<Operation, Error> {
        self.plan(ActionRequest::CreateTenant(tenant))
    }

    fn update_tenant(&self, tenant: &str, update: TenantUpdate) -> Result<Operation, Error> {
        self.plan(ActionRequest::UpdateTenant {
            tenant: tenant.into(),
            update,
        })
    }

    fn delete_tenant(&self, tenant: &str) -> Result<Operation, Error> {
        self.plan(ActionRequest::DeleteTenant { tenant: tenant.into() })
    }

    fn assign_role(&self, user: &str, role: &str, tenant: &str) -> Result<Operation, Error> {
        self.plan(ActionRequest::AssignRole(RoleAssignment::new(user, role, tenant)))
    }

    fn unassign_role(&self, user: &str, role: &str, tenant: &str) -> Result<Operation, Error> {
        self.plan(ActionRequest::UnassignRole(RoleAssignment::new(user, role, tenant)))
    }
}

impl DecisionApi for Dispatcher {
    fn check_operation(&self, query: CheckQuery) -> Result<Operation, Error> {
        self.plan(ActionRequest::Check(query))
    }

    fn bulk_check_operation(&self, queries: Vec<CheckQuery>) -> Result<Operation, Error> {
        self.plan(ActionRequest::BulkCheck(queries))
    }
}

/// Builds a JSON attribute bag from key/value pairs.
///
/// ```rust
/// use permit::dispatch::attributes;
/// use serde_json::Value;
///
/// let attrs = attributes([("plan", Value::from("pro")), ("seats", Value::from(5))]);
/// assert_eq!(attrs["seats"], 5);
/// ```
pub fn attributes<K, I>(pairs: I) -> Map<String, Value>
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Value)>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Endpoint, PermitConfig};
    use crate::dispatch::Action;
    use crate::operation::{HttpMethod, OperationKind};

    fn api() -> Dispatcher {
        Dispatcher::new(PermitConfig::builder().token("tok").build().unwrap())
    }

    fn plan_all(api: &impl PermitApi) -> Vec<Operation> {
        vec![
            api.get_user("u1").unwrap(),
            api.get_role("r1").unwrap(),
            api.get_tenant("t1").unwrap(),
            api.list_roles(None, None).unwrap(),
            api.get_assigned_roles("u1", None).unwrap(),
            api.sync_user(UserInput::builder().key("u1").build()).unwrap(),
            api.delete_user("u1").unwrap(),
            api.create_role(RoleInput::builder().key("r1").name("R").build()).unwrap(),
            api.update_role("r1", RoleUpdate::default()).unwrap(),
            api.delete_role("r1").unwrap(),
            api.assign_permissions("r1", vec!["doc:read".into()]).unwrap(),
            api.remove_permissions("r1", vec!["doc:read".into()]).unwrap(),
            api.create_tenant(TenantInput::builder().key("t1").name("T").build()).unwrap(),
            api.update_tenant("t1", TenantUpdate::builder().name("T").build()).unwrap(),
            api.delete_tenant("t1").unwrap(),
            api.assign_role("u1", "viewer", "t1").unwrap(),
            api.unassign_role("u1", "viewer", "t1").unwrap(),
            api.check_operation(CheckQuery::new("u1", "read", "doc:1")).unwrap(),
            api.bulk_check_operation(vec![CheckQuery::new("u1", "read", "doc:1")]).unwrap(),
        ]
    }

    #[test]
    fn test_every_action_is_reachable() {
        let actions: Vec<Action> = plan_all(&api()).iter().map(Operation::action).collect();
        assert_eq!(actions, Action::ALL.to_vec());
    }

    #[test]
    fn test_kinds_match_table() {
        for op in plan_all(&api()) {
            assert_eq!(op.kind(), op.action().spec().kind);
            assert_eq!(op.method(), op.action().spec().method);
        }
    }

    #[test]
    fn test_reads_are_gets_on_the_api() {
        let api = api();
        let op = api.get_assigned_roles("u1", Some("t1")).unwrap();
        assert_eq!(op.kind(), OperationKind::Read);
        assert_eq!(op.method(), HttpMethod::Get);
        assert_eq!(op.endpoint(), Endpoint::Api);
        assert_eq!(op.url().query(), Some("user=u1&tenant=t1"));
    }

    #[test]
    fn test_attributes_helper() {
        let attrs = attributes([("department", Value::from("eng"))]);
        assert_eq!(attrs.get("department"), Some(&Value::from("eng")));
    }
}
