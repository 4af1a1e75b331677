use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::challenge::{Challenge, ChallengeKey, Verdict};
use crate::domain::repository::{ChallengeRepository, CodeNotifier};
use crate::domain::secret::{SecretHasher, generate_numeric_code};
use crate::domain::types::CodeNotice;
use crate::error::CatalogError;

// ── IssueChallenge ───────────────────────────────────────────────────────────

pub struct IssueChallengeInput {
    pub key: ChallengeKey,
    /// Address the plaintext code is sent to.
    pub deliver_to: String,
    pub tool_name: String,
}

pub struct IssueChallengeUseCase<C, N>
where
    C: ChallengeRepository,
    N: CodeNotifier,
{
    pub challenges: C,
    pub notifier: N,
    pub hasher: SecretHasher,
}

impl<C, N> IssueChallengeUseCase<C, N>
where
    C: ChallengeRepository,
    N: CodeNotifier,
{
    pub async fn execute(&self, input: IssueChallengeInput) -> Result<(), CatalogError> {
        // 1. Fresh code; only its hash is persisted
        let code = generate_numeric_code();
        let code_hash = self
            .hasher
            .hash_blocking(SecretString::from(code.expose_secret().to_owned()))
            .await?;

        // 2. Supersede any unconsumed challenge for the tuple
        let challenge = Challenge::new(input.key, code_hash, Utc::now());
        self.challenges.replace_active(&challenge).await?;
        tracing::info!(
            challenge_id = %challenge.id,
            user_id = %input.key.user_id,
            tool_id = %input.key.tool_id,
            action = %input.key.action,
            "confirmation challenge issued"
        );

        // 3. Hand the plaintext to the notifier once; it is dropped with `notice`
        let notice = CodeNotice {
            to: input.deliver_to,
            tool_name: input.tool_name,
            code,
        };
        self.notifier.send_code(&notice).await
    }
}

// ── VerifyChallenge ──────────────────────────────────────────────────────────

pub struct VerifyChallengeUseCase<C: ChallengeRepository> {
    pub challenges: C,
    pub hasher: SecretHasher,
}

impl<C: ChallengeRepository> VerifyChallengeUseCase<C> {
    /// `Ok(())` means the challenge was consumed and the action is authorized.
    pub async fn execute(&self, key: ChallengeKey, submitted: &str) -> Result<(), CatalogError> {
        let verdict = self
            .challenges
            .redeem(&key, submitted, Utc::now(), &self.hasher)
            .await?;

        match verdict {
            Some(Verdict::Authorized) => {
                tracing::info!(
                    user_id = %key.user_id,
                    tool_id = %key.tool_id,
                    action = %key.action,
                    "confirmation challenge consumed"
                );
                Ok(())
            }
            // Lookups skip consumed rows, so this only happens if one slipped past the filter.
            None | Some(Verdict::AlreadyConsumed) => Err(CatalogError::NoActiveChallenge),
            Some(Verdict::Expired) => Err(CatalogError::ChallengeExpired),
            Some(Verdict::TooManyAttempts) => Err(CatalogError::TooManyAttempts),
            Some(Verdict::InvalidCode) => Err(CatalogError::InvalidCode),
        }
    }
}
