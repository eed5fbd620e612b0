//! The request-dispatch core.
//!
//! Turns a logical action plus its inputs into a deferred [`Operation`]
//! ([`Dispatcher::plan`]) and performs it on demand ([`execute`]):
//!
//! ```text
//! ActionRequest ──plan──▶ Operation ──execute(transport)──▶ Outcome | Error
//! ```
//!
//! Routing rules:
//! - data-model management goes to the cloud API
//! - permission checks go to the PDP
//! - fact writes go to the PDP only when `proxy_facts_via_pdp` is set
//!
//! [`Operation`]: crate::Operation

mod action;
mod api;
mod dispatcher;
mod execute;
mod request;

pub use action::{Action, ActionSpec, EndpointClass};
pub use api::{DecisionApi, PermitApi, ReadApi, WriteApi, attributes};
pub use dispatcher::Dispatcher;
pub use execute::execute;
pub use request::{
    ActionRequest, CheckQuery, CheckResource, CheckUser, RoleAssignment, RoleInput, RoleUpdate,
    TenantInput, TenantUpdate, UserInput,
};
