//! Panic messages for every rejection the contract can produce.
//!
//! Each message starts with a stable kind tag so callers (and tests) can
//! match on the failure class without parsing the whole string.

pub const ERR_NOT_ADMIN: &str = "Unauthorized: only the admin can toggle the registry";
pub const ERR_NOT_INITIATOR: &str = "Unauthorized: only the swap initiator can add a counterparty";
pub const ERR_INACTIVE: &str = "Inactive: the swap registry is disabled";
pub const ERR_SWAP_EXISTS: &str = "AlreadyExists: an open swap already uses this hashed secret";
pub const ERR_SWAP_NOT_FOUND: &str = "NotFound: no open swap with this hashed secret";
pub const ERR_INVALID_DEADLINE: &str = "InvalidDeadline: refund deadline must be in the future";
pub const ERR_WRONG_STATE: &str = "WrongState: operation not allowed in the swap's current state";
pub const ERR_EXPIRED: &str = "Expired: the refund deadline has passed";
pub const ERR_NOT_YET_EXPIRED: &str = "NotYetExpired: the refund deadline has not been reached";
pub const ERR_BAD_SECRET: &str = "BadSecret: secret does not match the stored commitment";
