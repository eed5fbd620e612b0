//! Turns bound action requests into deferred operations.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use url::Url;

use super::{Action, ActionRequest};
use crate::Error;
use crate::config::PermitConfig;
use crate::operation::Operation;

const CLOUD: &str = "cloud";

/// Plans [`Operation`]s against an immutable configuration snapshot.
///
/// Planning is pure: it resolves the endpoint, verb, URL, payload, headers and
/// timeout, and never touches the network. Cloning a `Dispatcher` is cheap.
///
/// ## Example
///
/// ```rust
/// use permit::{ActionRequest, Dispatcher, Endpoint, HttpMethod, PermitConfig};
/// use std::time::Duration;
///
/// let config = PermitConfig::builder()
///     .token("t")
///     .api_timeout(Duration::from_secs(1))
///     .build()
///     .unwrap();
/// let dispatcher = Dispatcher::new(config);
///
/// let op = dispatcher
///     .plan(ActionRequest::GetAssignedRoles { user: "u1".into(), tenant: None })
///     .unwrap();
/// assert_eq!(op.endpoint(), Endpoint::Api);
/// assert_eq!(op.method(), HttpMethod::Get);
/// assert_eq!(op.url().query(), Some("user=u1"));
/// assert_eq!(op.timeout(), Some(Duration::from_secs(1)));
/// ```
#[derive(Debug, Clone)]
pub struct Dispatcher {
    config: Arc<PermitConfig>,
}

impl Dispatcher {
    /// Creates a dispatcher that owns `config`.
    pub fn new(config: PermitConfig) -> Self {
        Self::from_shared(Arc::new(config))
    }

    /// Creates a dispatcher over an already shared configuration.
    pub fn from_shared(config: Arc<PermitConfig>) -> Self {
        Self { config }
    }

    /// Returns the configuration snapshot.
    pub fn config(&self) -> &PermitConfig {
        &self.config
    }

    /// Plans the operation for `request`.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidArgument`](crate::ErrorKind::InvalidArgument) error
    /// if a required identifier is empty.
    pub fn plan(&self, request: ActionRequest) -> Result<Operation, Error> {
        let action = request.action();
        let spec = action.spec();
        let endpoint = spec.class.resolve(self.config.proxy_facts_via_pdp());
        let params = request.summary();
        let target = Target::for_request(&request)?;
        let url = build_url(self.config.base_url(endpoint), &target.segments, &target.query)?;

        Ok(Operation {
            action,
            kind: spec.kind,
            endpoint,
            method: spec.method,
            url,
            headers: self.headers(),
            body: target.body,
            timeout: self.config.timeout_for(endpoint),
            response: spec.response,
            params,
            debug: self.config.debug_mode(),
        })
    }

    fn headers(&self) -> Vec<(String, String)> {
        vec![
            ("Authorization".to_string(), format!("Bearer {}", self.config.token())),
            ("Content-Type".to_string(), "application/json".to_string()),
        ]
    }
}

/// Path, query and payload of one request.
struct Target {
    segments: Vec<String>,
    query: Vec<(&'static str, String)>,
    body: Option<Value>,
}

impl Target {
    fn new(segments: &[&str]) -> Self {
        Self {
            segments: segments.iter().map(|s| s.to_string()).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    fn query(mut self, name: &'static str, value: Option<impl ToString>) -> Self {
        if let Some(value) = value {
            self.query.push((name, value.to_string()));
        }
        self
    }

    fn body<T: Serialize>(mut self, body: &T) -> Result<Self, Error> {
        let value = serde_json::to_value(body).map_err(|e| {
            Error::invalid_argument(format!("request body cannot be serialized: {}", e))
                .with_source(e)
        })?;
        self.body = Some(value);
        Ok(self)
    }

    fn for_request(request: &ActionRequest) -> Result<Self, Error> {
        let action = request.action();
        let target = match request {
            ActionRequest::GetUser { user } | ActionRequest::DeleteUser { user } => {
                Target::new(&[CLOUD, "users", required(action, "user", user)?])
            },
            ActionRequest::GetRole { role } | ActionRequest::DeleteRole { role } => {
                Target::new(&[CLOUD, "roles", required(action, "role", role)?])
            },
            ActionRequest::GetTenant { tenant } | ActionRequest::DeleteTenant { tenant } => {
                Target::new(&[CLOUD, "tenants", required(action, "tenant", tenant)?])
            },
            ActionRequest::ListRoles { page, per_page } => Target::new(&[CLOUD, "roles"])
                .query("page", *page)
                .query("per_page", *per_page),
            ActionRequest::GetAssignedRoles { user, tenant } => {
                Target::new(&[CLOUD, "role_assignments"])
                    .query("user", Some(required(action, "user", user)?))
                    .query("tenant", tenant.as_deref())
            },
            ActionRequest::SyncUser(user) => {
                required(action, "user key", &user.key)?;
                Target::new(&[CLOUD, "users"]).body(user)?
            },
            ActionRequest::CreateRole(role) => {
                required(action, "role key", &role.key)?;
                Target::new(&[CLOUD, "roles"]).body(role)?
            },
            ActionRequest::UpdateRole { role, update } => {
                Target::new(&[CLOUD, "roles", required(action, "role", role)?]).body(update)?
            },
            ActionRequest::AssignPermissions { role, permissions }
            | ActionRequest::RemovePermissions { role, permissions } => {
                Target::new(&[CLOUD, "roles", required(action, "role", role)?, "permissions"])
                    .body(&serde_json::json!({ "permissions": permissions }))?
            },
            ActionRequest::CreateTenant(tenant) => {
                required(action, "tenant key", &tenant.key)?;
                Target::new(&[CLOUD, "tenants"]).body(tenant)?
            },
            ActionRequest::UpdateTenant { tenant, update } => {
                Target::new(&[CLOUD, "tenants", required(action, "tenant", tenant)?]).body(update)?
            },
            ActionRequest::AssignRole(assignment) => {
                validate_assignment(action, assignment)?;
                Target::new(&[CLOUD, "role_assignments"]).body(assignment)?
            },
            ActionRequest::UnassignRole(assignment) => {
                validate_assignment(action, assignment)?;
                Target::new(&[CLOUD, "role_assignments"])
                    .query("role", Some(&assignment.role))
                    .query("user", Some(&assignment.user))
                    .query("scope", Some(&assignment.tenant))
            },
            ActionRequest::Check(query) => {
                required(action, "user key", &query.user.key)?;
                Target::new(&["allowed"]).body(query)?
            },
            ActionRequest::BulkCheck(queries) => {
                for query in queries {
                    required(action, "user key", &query.user.key)?;
                }
                Target::new(&["allowed", "bulk"]).body(queries)?
            },
        };
        Ok(target)
    }
}

/// Checks an identifier bound into the path or query.
///
/// `.` and `..` are dot-segments: a URL path resolves them away, which would
/// send the request to a different resource.
fn required<'a>(action: Action, field: &str, value: &'a str) -> Result<&'a str, Error> {
    if value.trim().is_empty() {
        return Err(Error::invalid_argument(format!("{}: {} cannot be empty", action, field)));
    }
    if matches!(value, "." | "..") {
        return Err(Error::invalid_argument(format!(
            "{}: {} cannot be {:?}",
            action, field, value
        )));
    }
    Ok(value)
}

fn validate_assignment(action: Action, assignment: &super::RoleAssignment) -> Result<(), Error> {
    required(action, "user", &assignment.user)?;
    required(action, "role", &assignment.role)?;
    required(action, "tenant", &assignment.tenant)?;
    Ok(())
}

/// Appends `segments` to the base path and replaces the query.
///
/// Segments are percent-encoded, so a `/` inside an identifier never splits
/// the path. An empty query leaves no trailing `?`.
fn build_url(
    base: &Url,
    segments: &[String],
    query: &[(&'static str, String)],
) -> Result<Url, Error> {
    let mut url = base.clone();
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|_| Error::configuration(format!("{} cannot be used as a base URL", base)))?
        .pop_if_empty()
        .extend(segments);

    url.set_query(None);
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
    }
    Ok(url)
}
