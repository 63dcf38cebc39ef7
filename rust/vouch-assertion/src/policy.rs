//! Verification policy.

use serde::{Deserialize, Serialize};

/// How the monotonic signature counter is enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CounterPolicy {
    /// Skip the monotonicity check when both the stored and presented
    /// counters are zero, treating the authenticator as one that does
    /// not implement counters. This is the WebAuthn-recommended
    /// behavior for counterless authenticators.
    #[default]
    AllowUnsupported,

    /// Require the counter to advance on every assertion, rejecting
    /// authenticators that do not track one.
    AlwaysEnforce,
}

/// Caller policy for a verification call.
///
/// Defaults match a typical assertion ceremony: user presence required,
/// user verification optional, no relying-party pinning, counterless
/// authenticators tolerated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Require the User Present flag.
    pub require_user_present: bool,
    /// Require the User Verified flag (biometric/PIN ceremonies).
    pub require_user_verified: bool,
    /// When set, the parsed `rpIdHash` must equal this value.
    pub expected_rp_id_hash: Option<[u8; 32]>,
    /// Counter enforcement mode.
    pub counter: CounterPolicy,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            require_user_present: true,
            require_user_verified: false,
            expected_rp_id_hash: None,
            counter: CounterPolicy::AllowUnsupported,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_require_presence_only() {
        let policy = Policy::default();
        assert!(policy.require_user_present);
        assert!(!policy.require_user_verified);
        assert!(policy.expected_rp_id_hash.is_none());
        assert_eq!(policy.counter, CounterPolicy::AllowUnsupported);
    }

    #[test]
    fn serde_round_trip() {
        let policy = Policy {
            require_user_verified: true,
            expected_rp_id_hash: Some([7u8; 32]),
            counter: CounterPolicy::AlwaysEnforce,
            ..Policy::default()
        };
        let json = serde_json::to_string(&policy).unwrap();
        let decoded: Policy = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, policy);
    }
}
