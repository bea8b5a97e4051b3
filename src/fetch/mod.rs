//! Transport collaborators: local file reads and blocking HTTP fetches.
//!
//! Everything here follows one contract: produce the raw text plus whatever
//! hint material the response carries, or report absence. A fetch failure is
//! logged and absorbed — policy for what absence means belongs to the
//! loader, not to the transport.

pub mod http;
pub mod local;
