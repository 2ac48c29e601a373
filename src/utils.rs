use near_sdk::{bs58, env, AccountId, CryptoHash, NearToken};

/// The commitment scheme: two applications of SHA256 over the secret.
/// Double-hashing keeps the single SHA256 of the secret unusable as a
/// payment hash in other protocols sharing the same secret.
pub fn double_sha256(secret: &[u8]) -> CryptoHash {
    env::sha256_array(&env::sha256_array(secret))
}

// Helper for consistent logging
pub fn log_swap_event(
    event: &str,
    hashed_secret: &CryptoHash,
    actor: &AccountId,
    amount: NearToken,
) {
    env::log_str(&format!(
        "SWAP_{}: hashed_secret='{}', actor='{}', amount='{}'",
        event,
        bs58::encode(hashed_secret).into_string(),
        actor,
        amount.as_yoctonear()
    ));
}
