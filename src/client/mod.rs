//! The client facade.
//!
//! [`Client`] pairs a [`Dispatcher`] with a [`Transport`]:
//! - [`Client::api()`] plans deferred operations
//! - [`Client::execute()`] and [`Client::execute_all()`] run them
//! - [`Client::check()`] and [`Client::bulk_check()`] answer permission
//!   questions directly, applying the default tenant policy
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use permit::prelude::*;
//!
//! let client = Client::new(PermitConfig::from_env()?)?;
//!
//! let op = client.api().assign_role("u1", "viewer", "t1")?;
//! let outcome = client.execute(&op).await?;
//!
//! let allowed = client.check("u1", "read", "document:readme").await?;
//! ```

mod builder;
mod inner;

pub use builder::{ClientBuilder, HasConfig, NoConfig};

use std::sync::Arc;

use futures::future::join_all;
use serde_json::Value;

use crate::Error;
use crate::config::PermitConfig;
use crate::dispatch::{self, CheckQuery, CheckResource, CheckUser, DecisionApi, Dispatcher};
use crate::operation::{Operation, Outcome};
use crate::transport::Transport;

/// The Permit client.
///
/// ## Thread Safety
///
/// `Client` is `Clone` and thread-safe. Clones share the configuration and
/// the transport.
///
/// ## Example
///
/// ```rust
/// use permit::{Client, PermitConfig, ReadApi};
/// use permit::testing::MockTransport;
///
/// # #[tokio::main]
/// # async fn main() {
/// let client = Client::builder()
///     .config(PermitConfig::builder().token("t").build().unwrap())
///     .transport(MockTransport::new())
///     .build()
///     .unwrap();
///
/// let op = client.api().get_user("u1").unwrap();
/// let outcome = client.execute(&op).await.unwrap();
/// assert!(outcome.body().is_some());
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<inner::ClientInner>,
}

impl Client {
    /// Creates a new client builder.
    pub fn builder() -> ClientBuilder<NoConfig> {
        ClientBuilder::new()
    }

    /// Creates a client over the default REST transport.
    #[cfg(feature = "rest")]
    pub fn new(config: PermitConfig) -> Result<Self, Error> {
        Self::builder().config(config).build()
    }

    /// Returns the configuration snapshot.
    pub fn config(&self) -> &PermitConfig {
        self.inner.dispatcher.config()
    }

    /// Returns the dispatcher used to plan operations.
    pub fn api(&self) -> &Dispatcher {
        &self.inner.dispatcher
    }

    /// Returns the transport that executes operations.
    pub fn transport(&self) -> &dyn Transport {
        self.inner.transport.as_ref()
    }

    /// Executes one planned operation.
    pub async fn execute(&self, operation: &Operation) -> Result<Outcome, Error> {
        dispatch::execute(self.inner.transport.as_ref(), operation).await
    }

    /// Executes many operations concurrently.
    ///
    /// Results are returned in input order. One failure does not cancel the
    /// other operations.
    pub async fn execute_all(&self, operations: &[Operation]) -> Vec<Result<Outcome, Error>> {
        join_all(operations.iter().map(|op| self.execute(op))).await
    }

    /// Asks the PDP whether `user` may perform `action` on `resource`.
    ///
    /// Resources given as `"type:key"` strings carry no tenant, so the default
    /// tenant policy of the configuration applies.
    ///
    /// # Errors
    ///
    /// Transport failures, or [`InvalidResponse`](crate::ErrorKind::InvalidResponse)
    /// if the PDP answer carries no decision.
    pub async fn check(
        &self,
        user: impl Into<CheckUser>,
        action: &str,
        resource: impl Into<CheckResource>,
    ) -> Result<bool, Error> {
        let query = self.with_default_tenant(CheckQuery::new(user, action, resource));
        let op = self.api().check_operation(query)?;
        let body = expect_body(self.execute(&op).await?)?;
        decision(&body)
    }

    /// Asks the PDP many questions in one exchange.
    ///
    /// Decisions are returned in query order.
    pub async fn bulk_check(&self, queries: Vec<CheckQuery>) -> Result<Vec<bool>, Error> {
        let expected = queries.len();
        let queries = queries
            .into_iter()
            .map(|q| self.with_default_tenant(q))
            .collect();
        let op = self.api().bulk_check_operation(queries)?;
        let body = expect_body(self.execute(&op).await?)?;

        let answers = match &body {
            Value::Array(items) => items,
            Value::Object(map) => match map.get("allow") {
                Some(Value::Array(items)) => items,
                _ => return Err(missing_decision(&body)),
            },
            _ => return Err(missing_decision(&body)),
        };
        if answers.len() != expected {
            return Err(Error::invalid_response(format!(
                "PDP returned {} decisions for {} checks",
                answers.len(),
                expected
            )));
        }
        answers.iter().map(decision).collect()
    }

    fn with_default_tenant(&self, mut query: CheckQuery) -> CheckQuery {
        if query.resource.tenant.is_none() {
            query.resource.tenant = self
                .config()
                .multi_tenancy()
                .resolve_tenant(None)
                .map(str::to_string);
        }
        query
    }

    pub(crate) fn from_inner(inner: inner::ClientInner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("pdp_url", &self.config().pdp_url().as_str())
            .field("api_url", &self.config().api_url().as_str())
            .field("transport", &self.transport().name())
            .finish_non_exhaustive()
    }
}

fn expect_body(outcome: Outcome) -> Result<Value, Error> {
    outcome
        .into_body()
        .ok_or_else(|| Error::invalid_response("PDP returned no body"))
}

fn decision(body: &Value) -> Result<bool, Error> {
    body.get("allow")
        .and_then(Value::as_bool)
        .ok_or_else(|| missing_decision(body))
}

fn missing_decision(body: &Value) -> Error {
    Error::invalid_response(format!("PDP response carries no decision: {}", body))
}
