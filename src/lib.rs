use near_sdk::json_types::{Base58CryptoHash, Base64VecU8, U64};
use near_sdk::store::IterableMap;
use near_sdk::{
    bs58, env, ext_contract, near, require, AccountId, NearToken, PanicOnDefault, Promise,
    PromiseResult,
};

mod errors;
mod swap;
mod utils;

pub use errors::*;
pub use swap::{Swap, SwapId, SwapState};
use utils::{double_sha256, log_swap_event};

// Self-callback interface for settlement results
#[ext_contract(ext_self)]
pub trait SelfCallbacks {
    fn on_swap_settled(&mut self, swap: Swap);
}

// Define the contract structure
#[near(contract_state)]
#[derive(PanicOnDefault)]
pub struct Contract {
    /// Only identity allowed to flip `active`.
    pub admin: AccountId,
    /// Gates creation of new swaps. Never gates redeem or refund, so a
    /// disabled registry can never trap funds already in custody.
    pub active: bool,
    // The main collection storing all open swaps, keyed by the
    // double-SHA256 commitment to their secret.
    pub swaps: IterableMap<SwapId, Swap>,
}

// Implement the contract structure
#[near]
impl Contract {
    /// The registry starts disabled; the admin must call `set_active(true)`
    /// before any swap can be created.
    #[init]
    pub fn new(admin: AccountId) -> Self {
        Self {
            admin,
            active: false,
            swaps: IterableMap::new(b"s"),
        }
    }

    /// Enables or disables swap creation. Admin only.
    pub fn set_active(&mut self, active: bool) {
        require!(env::predecessor_account_id() == self.admin, ERR_NOT_ADMIN);
        self.active = active;
        env::log_str(&format!("REGISTRY_ACTIVE: {}", active));
    }

    /// Opens a new swap keyed by `hashed_secret`, escrowing the attached
    /// deposit. The record starts in `Waiting` with the caller as both
    /// initiator and provisional participant, so the escrow can be posted
    /// as an open offer before a trading partner is known.
    ///
    /// Escrow and record creation are one atomic call: if any guard fails
    /// the whole transaction reverts and the deposit is returned.
    #[payable]
    pub fn initiate(
        &mut self,
        hashed_secret: Base58CryptoHash,
        refund_deadline: U64,
        counterparty_ref: String,
    ) {
        require!(self.active, ERR_INACTIVE);

        let key: SwapId = hashed_secret.into();
        require!(!self.swaps.contains_key(&key), ERR_SWAP_EXISTS);
        require!(
            refund_deadline.0 > env::block_timestamp(),
            ERR_INVALID_DEADLINE
        );

        let initiator = env::predecessor_account_id();
        let value: NearToken = env::attached_deposit();
        let swap = Swap {
            hashed_secret: key,
            initiator: initiator.clone(),
            counterparty_ref,
            participant: initiator.clone(),
            refund_deadline: refund_deadline.0,
            value,
            state: SwapState::Waiting,
        };
        self.swaps.insert(key, swap);

        log_swap_event("INITIATED", &key, &initiator, value);
    }

    /// Binds a counterparty to a `Waiting` swap and moves it to
    /// `Initiated`. Only the initiator may do this, and only once: the
    /// transition is irreversible and `Initiated` swaps reject it.
    pub fn add_counterparty(&mut self, hashed_secret: Base58CryptoHash, participant: AccountId) {
        require!(self.active, ERR_INACTIVE);

        let key: SwapId = hashed_secret.into();
        let caller = env::predecessor_account_id();
        let swap = self
            .swaps
            .get_mut(&key)
            .unwrap_or_else(|| env::panic_str(ERR_SWAP_NOT_FOUND));

        require!(swap.state == SwapState::Waiting, ERR_WRONG_STATE);
        require!(caller == swap.initiator, ERR_NOT_INITIATOR);

        swap.participant = participant.clone();
        swap.state = SwapState::Initiated;
        let value = swap.value;

        log_swap_event("COUNTERPARTY_ADDED", &key, &participant, value);
    }

    /// Pays the escrowed value to the stored participant in exchange for
    /// the secret behind the commitment, then deletes the record.
    ///
    /// Callable by anyone: the secret itself is the authorization, and the
    /// payout target is fixed by the record, so a relayer can complete the
    /// swap for an offline participant. Deletion frees the key, so a
    /// repeated call fails with `NotFound`. If the payout receipt fails the
    /// settlement callback restores the record.
    pub fn redeem(&mut self, hashed_secret: Base58CryptoHash, secret: Base64VecU8) -> Promise {
        let key: SwapId = hashed_secret.into();
        let swap = self
            .swaps
            .get(&key)
            .unwrap_or_else(|| env::panic_str(ERR_SWAP_NOT_FOUND));

        require!(swap.state == SwapState::Initiated, ERR_WRONG_STATE);
        require!(env::block_timestamp() < swap.refund_deadline, ERR_EXPIRED);
        require!(
            double_sha256(&secret.0) == swap.hashed_secret,
            ERR_BAD_SECRET
        );

        let swap = self
            .swaps
            .remove(&key)
            .unwrap_or_else(|| env::panic_str(ERR_SWAP_NOT_FOUND));
        let recipient = swap.participant.clone();
        let value = swap.value;

        log_swap_event("REDEEMED", &key, &recipient, value);
        Promise::new(recipient)
            .transfer(value)
            .then(ext_self::ext(env::current_account_id()).on_swap_settled(swap))
    }

    /// Returns the escrowed value to the initiator once the deadline has
    /// been reached, then deletes the record. A `Waiting` swap that never
    /// found a counterparty is refundable exactly like an `Initiated` one.
    ///
    /// Callable by anyone; funds always go back to the original initiator.
    pub fn refund(&mut self, hashed_secret: Base58CryptoHash) -> Promise {
        let key: SwapId = hashed_secret.into();
        let swap = self
            .swaps
            .get(&key)
            .unwrap_or_else(|| env::panic_str(ERR_SWAP_NOT_FOUND));

        require!(
            matches!(swap.state, SwapState::Waiting | SwapState::Initiated),
            ERR_WRONG_STATE
        );
        require!(
            env::block_timestamp() >= swap.refund_deadline,
            ERR_NOT_YET_EXPIRED
        );

        let swap = self
            .swaps
            .remove(&key)
            .unwrap_or_else(|| env::panic_str(ERR_SWAP_NOT_FOUND));
        let recipient = swap.initiator.clone();
        let value = swap.value;

        log_swap_event("REFUNDED", &key, &recipient, value);
        Promise::new(recipient)
            .transfer(value)
            .then(ext_self::ext(env::current_account_id()).on_swap_settled(swap))
    }

    // --- VIEW METHODS ---

    pub fn get_swap(&self, hashed_secret: Base58CryptoHash) -> Option<Swap> {
        let key: SwapId = hashed_secret.into();
        self.swaps.get(&key).cloned()
    }

    pub fn get_swaps(&self, from_index: u32, limit: u32) -> Vec<Swap> {
        self.swaps
            .values()
            .skip(from_index as usize)
            .take(limit as usize)
            .cloned()
            .collect()
    }

    pub fn swap_count(&self) -> u32 {
        self.swaps.len()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn get_admin(&self) -> AccountId {
        self.admin.clone()
    }

    // --- PRIVATE CALLBACKS ---

    /// Settles the payout issued by `redeem`/`refund`. A native transfer
    /// can still fail (e.g. the participant was bound to an account that
    /// does not exist), in which case the deposit bounces back to the
    /// contract; the record is restored so settlement can be retried.
    #[private]
    pub fn on_swap_settled(&mut self, swap: Swap) {
        if let PromiseResult::Successful(_) = env::promise_result(0) {
            env::log_str(&format!(
                "SWAP_SETTLED: hashed_secret='{}'",
                bs58::encode(&swap.hashed_secret).into_string()
            ));
        } else {
            let key = swap.hashed_secret;
            // The key may have been reused by a fresh swap between the
            // removal and this callback; that record must not be clobbered.
            if self.swaps.contains_key(&key) {
                env::log_str(&format!(
                    "SWAP_SETTLEMENT_FAILED: key '{}' reused, record not restored",
                    bs58::encode(&key).into_string()
                ));
            } else {
                self.swaps.insert(key, swap);
                env::log_str(&format!(
                    "SWAP_SETTLEMENT_FAILED: restored swap '{}'",
                    bs58::encode(&key).into_string()
                ));
            }
        }
    }
}
