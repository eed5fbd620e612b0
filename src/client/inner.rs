//! Internal client implementation.

use std::sync::Arc;

use crate::Dispatcher;
use crate::transport::Transport;

pub(crate) struct ClientInner {
    /// Plans operations against the configuration snapshot.
    pub dispatcher: Dispatcher,

    /// Executes planned operations.
    pub transport: Arc<dyn Transport>,
}
