//! Prelude module for convenient imports.
//!
//! ```rust
//! use permit::prelude::*;
//! ```
//!
//! This provides access to:
//! - The client, its configuration and the dispatcher
//! - The planning traits (`ReadApi`, `WriteApi`, `DecisionApi`)
//! - Operation and outcome types
//! - Error types

pub use crate::{
    client::{Client, ClientBuilder},
    config::{Endpoint, MultiTenancyConfig, PermitConfig},
    dispatch::{
        Action, ActionRequest, CheckQuery, CheckResource, DecisionApi, Dispatcher, PermitApi,
        ReadApi, RoleAssignment, RoleInput, RoleUpdate, TenantInput, TenantUpdate, UserInput,
        WriteApi,
    },
    error::{Error, ErrorKind, Result},
    operation::{HttpMethod, Operation, OperationKind, Outcome, StatusResult},
    transport::Transport,
};
