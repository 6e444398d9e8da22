// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const AUTH_GATE_MISSING: &str = "auth.gate.missing";
pub const AUTH_GATE_REJECTED: &str = "auth.gate.rejected";
pub const AUTH_GATE_ACCEPTED: &str = "auth.gate.accepted";
pub const LINK_CREATED: &str = "link.created";
pub const LINK_DELETED: &str = "link.deleted";
pub const REMOTE_COMMAND: &str = "remote.command";
pub const REMOTE_COMMAND_FAILED: &str = "remote.command.failed";
