//! # blebridge-adapter-stdio
//!
//! JSON-lines transport for the command router.
//!
//! ## Protocol
//!
//! One request per line:
//!
//! ```json
//! {"id": 1, "method": "getKnownDevices", "arguments": {"deviceIdentifiers": ["AA:BB:CC:DD:EE:01"]}}
//! ```
//!
//! One response per request, echoing `id`:
//!
//! | `status` | Other fields |
//! |----------|--------------|
//! | `success` | `result` |
//! | `error` | `code` (string or `null`), `message`, `details` |
//! | `notImplemented` | none |
//!
//! Responses are written when the operation resolves, so their order may
//! differ from request order.

mod channel;
mod protocol;
mod server;

pub use channel::{LineChannel, SharedWriter, write_response};
pub use protocol::{ProtocolError, Request, Response};
pub use server::{ServeSummary, serve};
