//! Error types for the Permit client.
//!
//! Every failure is an [`Error`] carrying an [`ErrorKind`]:
//!
//! - `Configuration` surfaces synchronously when the configuration is built.
//! - Transport failures (`Timeout`, `Connection`, `InvalidResponse`,
//!   `Transport`) surface only when an operation is executed.
//!
//! ## Key Invariant
//!
//! A non-2xx response is not an error. The dispatch core returns it as data:
//!
//! ```rust,ignore
//! // 404 from the cloud API is Ok(Outcome::Body(..)), not Err
//! let outcome = client.execute(&client.api().get_user("missing")?).await?;
//! ```

#[allow(clippy::module_inception)]
mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// A specialized `Result` type for Permit client operations.
pub type Result<T> = std::result::Result<T, Error>;
