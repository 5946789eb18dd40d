/// Seed prefix for the lamport vault PDA of every smart account.
pub const SMART_ACCOUNT_SEED: &[u8] = b"smart_account";

/// Marker a verifier returns when it accepts a signature.
/// Anything else (or a failed CPI) counts as rejection.
pub const SIGNATURE_MAGIC: [u8; 4] = [0x16, 0x26, 0xba, 0x7e];
