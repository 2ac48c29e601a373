use near_sdk::{near, AccountId, CryptoHash, NearToken, Timestamp};

// Unique identifier for a swap: the double-SHA256 commitment to its secret.
pub type SwapId = CryptoHash;

#[near(serializers = [json, borsh])]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SwapState {
    /// Escrowed, no counterparty bound yet. An open offer.
    Waiting,
    /// A specific participant has been bound by the initiator.
    Initiated,
}

/// One swap record per active hashed secret. Everything except `participant`
/// and `state` is fixed at creation; the record is deleted outright on
/// redeem or refund, freeing the key for reuse.
#[near(serializers = [json, borsh])]
#[derive(Clone)]
pub struct Swap {
    pub hashed_secret: SwapId,
    /// Party that funded the escrow; refund beneficiary.
    pub initiator: AccountId,
    /// Initiator's identity on the other ledger. Informational only.
    pub counterparty_ref: String,
    /// Redeem beneficiary. Equals `initiator` until a counterparty is added.
    pub participant: AccountId,
    /// Absolute nanosecond timestamp. Redeem strictly before, refund at or after.
    pub refund_deadline: Timestamp,
    /// Native amount held in custody for this key.
    pub value: NearToken,
    pub state: SwapState,
}
