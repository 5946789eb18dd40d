use anchor_lang::prelude::*;

use crate::errors::ValueLimitError;

/// Wire format of the configuration blob stored at install time: a single
/// per-call lamport ceiling, borsh encoded.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValueLimitConfig {
    pub max_value: u64,
}

impl ValueLimitConfig {
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::try_from_slice(data).map_err(|_| ValueLimitError::MalformedConfig.into())
    }

    /// Strictly per call; there is no cumulative accounting.
    pub fn allows(&self, value: u64) -> bool {
        value <= self.max_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_roundtrips() {
        let config = ValueLimitConfig {
            max_value: 100_000_000,
        };
        let bytes = config.try_to_vec().unwrap();
        assert_eq!(bytes.len(), 8);

        let decoded = ValueLimitConfig::parse(&bytes).unwrap();
        assert_eq!(decoded, config);
    }

    #[test]
    fn parse_rejects_wrong_lengths() {
        let err = ValueLimitConfig::parse(&[]).unwrap_err();
        assert_eq!(err, ValueLimitError::MalformedConfig.into());

        let err = ValueLimitConfig::parse(&[1, 2, 3]).unwrap_err();
        assert_eq!(err, ValueLimitError::MalformedConfig.into());

        // Trailing bytes are an encoding mistake, not a longer config
        let err = ValueLimitConfig::parse(&[0u8; 9]).unwrap_err();
        assert_eq!(err, ValueLimitError::MalformedConfig.into());
    }

    #[test]
    fn limit_is_inclusive() {
        let config = ValueLimitConfig {
            max_value: 100_000_000,
        };

        assert!(config.allows(0));
        assert!(config.allows(50_000_000));
        assert!(config.allows(100_000_000));
        assert!(!config.allows(100_000_001));
        assert!(!config.allows(200_000_000));
    }

    #[test]
    fn zero_limit_blocks_all_value() {
        let config = ValueLimitConfig { max_value: 0 };
        assert!(config.allows(0));
        assert!(!config.allows(1));
    }
}
