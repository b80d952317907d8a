//! Service module - Request/response boundary around the engine.
//!
//! Decodes JSON request bodies, runs the reconciler or a lookup helper, and
//! encodes the outcome as a success body or an error envelope. Transport is
//! left to the caller: a [`Router`] maps route names to plain handler
//! functions and returns a [`Response`] per request.

mod error;
mod request;
mod response;
mod router;


pub use error::*;
pub use request::*;
pub use response::*;
pub use router::*;
