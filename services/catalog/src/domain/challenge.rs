//! Confirmation challenges gating destructive tool actions.
//!
//! A challenge binds a one-time code (stored only as a hash) to a
//! `(user, tool, action)` tuple. It is single use, expires after
//! [`CHALLENGE_TTL_MINUTES`], and locks after [`MAX_ATTEMPTS`] wrong codes.
//! [`Challenge::redeem`] is the only place its state changes after issuance.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use toolhub_domain::UnknownVariant;

use crate::domain::secret::SecretHasher;

/// Minutes a freshly issued challenge stays redeemable.
pub const CHALLENGE_TTL_MINUTES: i64 = 10;

/// Wrong submissions tolerated before a challenge is locked.
pub const MAX_ATTEMPTS: u8 = 5;

/// Operation a challenge authorizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChallengeAction {
    DeleteTool,
}

impl ChallengeAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DeleteTool => "delete_tool",
        }
    }
}

impl fmt::Display for ChallengeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChallengeAction {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "delete_tool" => Ok(Self::DeleteTool),
            _ => Err(UnknownVariant {
                kind: "challenge action",
                value: s.to_owned(),
            }),
        }
    }
}

/// The tuple that owns at most one unconsumed challenge at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChallengeKey {
    pub user_id: Uuid,
    pub tool_id: Uuid,
    pub action: ChallengeAction,
}

impl ChallengeKey {
    pub fn delete_tool(user_id: Uuid, tool_id: Uuid) -> Self {
        Self {
            user_id,
            tool_id,
            action: ChallengeAction::DeleteTool,
        }
    }

    /// Stable identifier of the tuple, used to serialize issue/redeem per tuple.
    pub fn lock_key(&self) -> String {
        format!("challenge:{}:{}:{}", self.user_id, self.tool_id, self.action)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub id: Uuid,
    pub key: ChallengeKey,
    pub code_hash: String,
    pub attempts: u8,
    pub max_attempts: u8,
    pub expires_at: DateTime<Utc>,
    pub consumed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Result of one redemption attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Code matched; the challenge is now consumed.
    Authorized,
    /// The challenge was already consumed.
    AlreadyConsumed,
    Expired,
    /// Attempt ceiling reached; the code is not compared.
    TooManyAttempts,
    /// Code did not match; one attempt was spent.
    InvalidCode,
}

impl Challenge {
    pub fn new(key: ChallengeKey, code_hash: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            key,
            code_hash,
            attempts: 0,
            max_attempts: MAX_ATTEMPTS,
            expires_at: now + Duration::minutes(CHALLENGE_TTL_MINUTES),
            consumed_at: None,
            created_at: now,
        }
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed_at.is_some()
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn is_exhausted(&self) -> bool {
        self.attempts >= self.max_attempts
    }

    /// Check `submitted` against this challenge, updating `attempts` or
    /// `consumed_at` in place. The caller must persist the record afterwards
    /// and must hold the tuple lock for the whole read-redeem-write sequence.
    pub fn redeem(&mut self, submitted: &str, now: DateTime<Utc>, hasher: &SecretHasher) -> Verdict {
        if self.is_consumed() {
            return Verdict::AlreadyConsumed;
        }
        if self.is_expired(now) {
            return Verdict::Expired;
        }
        if self.is_exhausted() {
            return Verdict::TooManyAttempts;
        }
        if !hasher.verify(submitted, &self.code_hash) {
            self.attempts += 1;
            return Verdict::InvalidCode;
        }
        self.consumed_at = Some(now);
        Verdict::Authorized
    }
}
