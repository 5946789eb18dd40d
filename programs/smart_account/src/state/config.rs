use anchor_lang::prelude::*;

#[account]
#[derive(Default, InitSpace)]
pub struct Config {
    pub authority: Pubkey,
    pub default_implementation: Pubkey,
    pub default_verifier: Pubkey,
    pub default_fallback_handler: Pubkey,
}

impl Config {
    pub const PREFIX_SEED: &'static [u8] = b"config";
}

#[derive(Debug, AnchorSerialize, AnchorDeserialize)]
pub enum UpdateConfigType {
    Authority = 0,
    DefaultImplementation = 1,
    DefaultVerifier = 2,
    DefaultFallbackHandler = 3,
}
