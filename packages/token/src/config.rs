//! Token configuration: call options, the mutable draft they act on, and the
//! resolved immutable [`Config`] the codec signs with.
//!
//! Options are plain draft mutators applied left to right. They never
//! conflict with each other; a later option of the same kind replaces an
//! earlier one. Validation happens once, when an encode or decode call
//! resolves the draft.

use crate::{
    clock::{Clock, SystemClock},
    error::{TokenError, TokenResult},
    types::SigningMethod,
};
use chrono::{DateTime, Duration, SubsecRound, Utc};
use std::{fmt, sync::Arc};
use zeroize::Zeroizing;

/// A single configuration option for [`encode`](crate::encode) /
/// [`decode`](crate::decode).
#[derive(Clone)]
pub enum TokenOption {
    /// Keyed-hash function
    SigningMethod(SigningMethod),
    /// HMAC secret
    Key(Zeroizing<Vec<u8>>),
    /// Expire this long after encode time
    Ttl(Duration),
    /// Expire at a fixed instant
    ExpiresAt(DateTime<Utc>),
    /// Time source for "now"
    Clock(Arc<dyn Clock>),
}

impl fmt::Debug for TokenOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SigningMethod(method) => f.debug_tuple("SigningMethod").field(method).finish(),
            Self::Key(_) => f.write_str("Key(<redacted>)"),
            Self::Ttl(ttl) => f.debug_tuple("Ttl").field(ttl).finish(),
            Self::ExpiresAt(at) => f.debug_tuple("ExpiresAt").field(at).finish(),
            Self::Clock(_) => f.write_str("Clock(..)"),
        }
    }
}

/// Select the signing method
#[must_use]
pub fn with_signing_method(method: SigningMethod) -> TokenOption {
    TokenOption::SigningMethod(method)
}

/// Set the HMAC secret
#[must_use]
pub fn with_key(key: impl AsRef<[u8]>) -> TokenOption {
    TokenOption::Key(Zeroizing::new(key.as_ref().to_vec()))
}

/// Expire tokens `ttl` after they are encoded.
///
/// `exp` is carried in whole seconds, so the resolved instant rounds down:
/// a ttl of zero (or under a second) can expire as soon as the clock ticks.
#[must_use]
pub fn with_ttl(ttl: Duration) -> TokenOption {
    TokenOption::Ttl(ttl)
}

/// Expire tokens at an absolute instant.
///
/// The instant rounds down to whole seconds on encode; encoding fails when
/// the rounded instant is not after the current time.
#[must_use]
pub fn with_expires_at(instant: DateTime<Utc>) -> TokenOption {
    TokenOption::ExpiresAt(instant)
}

/// Read "now" from `clock` instead of the system clock
#[must_use]
pub fn with_clock(clock: impl Clock + 'static) -> TokenOption {
    TokenOption::Clock(Arc::new(clock))
}

/// Expiration policy of a resolved configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expiration {
    /// Tokens carry no `exp` claim
    #[default]
    Never,
    /// `exp = now + ttl`, fixed at encode time
    Ttl(Duration),
    /// `exp` is this instant
    At(DateTime<Utc>),
}

impl Expiration {
    /// `exp` claim in whole seconds since the Unix epoch, resolved against `now`.
    ///
    /// # Errors
    /// `ConfigurationMalformed` if `now + ttl` leaves the representable range.
    pub fn exp_claim(&self, now: DateTime<Utc>) -> TokenResult<Option<i64>> {
        match *self {
            Self::Never => Ok(None),
            Self::At(at) => Ok(Some(at.timestamp())),
            Self::Ttl(ttl) => now
                .checked_add_signed(ttl)
                .map(|at| Some(at.timestamp()))
                .ok_or(TokenError::ConfigurationMalformed("ttl out of range")),
        }
    }
}

/// Options applied so far. Unvalidated.
#[derive(Clone, Default)]
pub struct ConfigDraft {
    signing_method: Option<SigningMethod>,
    key: Zeroizing<Vec<u8>>,
    ttl: Option<Duration>,
    expires_at: Option<DateTime<Utc>>,
    clock: Option<Arc<dyn Clock>>,
}

impl ConfigDraft {
    /// Empty draft
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft with `options` applied in order
    #[must_use]
    pub fn from_options(options: &[TokenOption]) -> Self {
        let mut draft = Self::new();
        for option in options {
            draft.apply(option.clone());
        }
        draft
    }

    /// Apply one option. Last write wins.
    pub fn apply(&mut self, option: TokenOption) {
        match option {
            TokenOption::SigningMethod(method) => self.signing_method = Some(method),
            TokenOption::Key(key) => self.key = key,
            TokenOption::Ttl(ttl) => self.ttl = Some(ttl),
            TokenOption::ExpiresAt(at) => self.expires_at = Some(at),
            TokenOption::Clock(clock) => self.clock = Some(clock),
        }
    }

    /// Validate for encoding. An absolute expiry, rounded down to the whole
    /// second carried in `exp`, must still lie in the future.
    ///
    /// # Errors
    /// `ConfigurationMalformed` if both ttl and expiry instant are set, or the
    /// rounded instant is not after the clock's current time.
    pub fn resolve_for_encode(self) -> TokenResult<Config> {
        let config = self.resolve()?;
        if let Expiration::At(at) = config.expiration {
            if at.trunc_subsecs(0) <= config.now() {
                return Err(TokenError::ConfigurationMalformed(
                    "expiration instant already passed",
                ));
            }
        }
        Ok(config)
    }

    /// Validate for decoding. Expiry options do not affect verification.
    ///
    /// # Errors
    /// `ConfigurationMalformed` if both ttl and expiry instant are set.
    pub fn resolve_for_decode(self) -> TokenResult<Config> {
        self.resolve()
    }

    fn resolve(self) -> TokenResult<Config> {
        let expiration = match (self.ttl, self.expires_at) {
            (Some(_), Some(_)) => {
                return Err(TokenError::ConfigurationMalformed(
                    "ttl and expiration instant are mutually exclusive",
                ));
            }
            (Some(ttl), None) => Expiration::Ttl(ttl),
            (None, Some(at)) => Expiration::At(at),
            (None, None) => Expiration::Never,
        };

        Ok(Config {
            signing_method: self.signing_method,
            key: self.key,
            expiration,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
        })
    }
}

impl fmt::Debug for ConfigDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigDraft")
            .field("signing_method", &self.signing_method)
            .field("key", &"<redacted>")
            .field("ttl", &self.ttl)
            .field("expires_at", &self.expires_at)
            .field("custom_clock", &self.clock.is_some())
            .finish()
    }
}

/// Resolved, immutable token configuration.
#[derive(Clone)]
pub struct Config {
    signing_method: Option<SigningMethod>,
    key: Zeroizing<Vec<u8>>,
    expiration: Expiration,
    clock: Arc<dyn Clock>,
}

impl Config {
    /// Configured signing method.
    ///
    /// # Errors
    /// `InvalidSignMethod` when none was configured.
    pub fn signing_method(&self) -> TokenResult<SigningMethod> {
        self.signing_method.ok_or(TokenError::InvalidSignMethod)
    }

    /// HMAC secret
    #[must_use]
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Expiration policy
    #[must_use]
    pub fn expiration(&self) -> Expiration {
        self.expiration
    }

    /// Current time according to the configured clock
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("signing_method", &self.signing_method)
            .field("key", &"<redacted>")
            .field("expiration", &self.expiration)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    #[test]
    fn last_write_wins() {
        let config = ConfigDraft::from_options(&[
            with_signing_method(SigningMethod::Hs256),
            with_key("first"),
            with_signing_method(SigningMethod::Hs512),
            with_key("second"),
            with_ttl(Duration::seconds(5)),
            with_ttl(Duration::seconds(10)),
        ])
        .resolve_for_decode()
        .expect("valid draft");

        assert_eq!(config.signing_method(), Ok(SigningMethod::Hs512));
        assert_eq!(config.key(), b"second");
        assert_eq!(config.expiration(), Expiration::Ttl(Duration::seconds(10)));
    }

    #[test]
    fn ttl_and_instant_conflict() {
        let clock = ManualClock::at_unix(100);
        let draft = ConfigDraft::from_options(&[
            with_ttl(Duration::seconds(1)),
            with_expires_at(clock.now() + Duration::hours(1)),
            with_clock(clock),
        ]);

        assert!(matches!(
            draft.clone().resolve_for_encode(),
            Err(TokenError::ConfigurationMalformed(_))
        ));
        assert!(matches!(
            draft.resolve_for_decode(),
            Err(TokenError::ConfigurationMalformed(_))
        ));
    }

    #[test]
    fn past_instant_rejected_only_on_encode() {
        let clock = Arc::new(ManualClock::at_unix(1_000));
        let options = [
            with_expires_at(clock.now()),
            with_clock(clock.clone()),
        ];

        assert!(matches!(
            ConfigDraft::from_options(&options).resolve_for_encode(),
            Err(TokenError::ConfigurationMalformed(_))
        ));
        assert!(ConfigDraft::from_options(&options).resolve_for_decode().is_ok());

        clock.set(clock.now() - Duration::seconds(1));
        assert!(ConfigDraft::from_options(&options).resolve_for_encode().is_ok());
    }

    #[test]
    fn sub_second_instant_checked_at_exp_precision() {
        let clock = Arc::new(ManualClock::at_unix(1_000));
        clock.advance(Duration::milliseconds(500));
        let now = clock.now();

        // 1000.9s rounds down to 1000s, which is already behind 1000.5s.
        let options = [
            with_expires_at(now + Duration::milliseconds(400)),
            with_clock(clock.clone()),
        ];
        assert!(matches!(
            ConfigDraft::from_options(&options).resolve_for_encode(),
            Err(TokenError::ConfigurationMalformed(_))
        ));

        let options = [
            with_expires_at(now + Duration::milliseconds(600)),
            with_clock(clock.clone()),
        ];
        assert!(ConfigDraft::from_options(&options).resolve_for_encode().is_ok());
    }

    #[test]
    fn missing_method_surfaces_lazily() {
        let config = ConfigDraft::new()
            .resolve_for_encode()
            .expect("empty draft resolves");
        assert_eq!(config.signing_method(), Err(TokenError::InvalidSignMethod));
        assert!(config.key().is_empty());
    }

    #[test]
    fn exp_claim_resolution() {
        let now = ManualClock::at_unix(1_700_000_000).now();
        assert_eq!(Expiration::Never.exp_claim(now), Ok(None));
        assert_eq!(
            Expiration::Ttl(Duration::seconds(60)).exp_claim(now),
            Ok(Some(1_700_000_060))
        );
        assert_eq!(
            Expiration::At(now + Duration::milliseconds(1_500)).exp_claim(now),
            Ok(Some(1_700_000_001))
        );
        assert!(matches!(
            Expiration::Ttl(Duration::MAX).exp_claim(now),
            Err(TokenError::ConfigurationMalformed(_))
        ));
    }

    #[test]
    fn debug_redacts_key() {
        let draft = ConfigDraft::from_options(&[with_key("hunter2")]);
        assert!(!format!("{draft:?}").contains("hunter2"));
        assert_eq!(format!("{:?}", with_key("hunter2")), "Key(<redacted>)");
    }
}
