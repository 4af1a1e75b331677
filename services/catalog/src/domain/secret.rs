//! One-time code generation and Argon2id hashing for codes and passwords.

use anyhow::{Context as _, anyhow};
use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use rand::RngExt;
use secrecy::{ExposeSecret, SecretString};

/// Exclusive upper bound of the numeric code space (six decimal digits).
const CODE_SPACE: u32 = 1_000_000;

const SALT_LEN: usize = 16;

/// Generate a uniformly random six-digit code, `000000`..=`999999`.
pub fn generate_numeric_code() -> SecretString {
    let mut rng = rand::rng();
    format_code(rng.random_range(0..CODE_SPACE))
}

fn format_code(value: u32) -> SecretString {
    SecretString::from(format!("{value:06}"))
}

/// Slow salted hash for low-entropy secrets (confirmation codes, passwords).
#[derive(Clone)]
pub struct SecretHasher {
    argon2: Argon2<'static>,
}

impl SecretHasher {
    /// Argon2id with explicit cost parameters.
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> anyhow::Result<Self> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| anyhow!("invalid argon2 parameters: {e}"))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash `secret` with a fresh random salt, returning a PHC string.
    pub fn hash(&self, secret: &str) -> anyhow::Result<String> {
        let mut rng = rand::rng();
        let salt_bytes: Vec<u8> = (0..SALT_LEN)
            .map(|_| rng.random_range(0..=u8::MAX))
            .collect();
        let salt =
            SaltString::encode_b64(&salt_bytes).map_err(|e| anyhow!("failed to encode salt: {e}"))?;
        let hash = self
            .argon2
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| anyhow!("failed to hash secret: {e}"))?;
        Ok(hash.to_string())
    }

    /// Constant-time check of `secret` against a stored PHC string.
    /// An unparsable stored hash never matches.
    pub fn verify(&self, secret: &str, stored_hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(stored_hash) else {
            return false;
        };
        self.argon2
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok()
    }

    /// [`Self::hash`] on the blocking pool, keeping Argon2 off async workers.
    pub async fn hash_blocking(&self, secret: SecretString) -> anyhow::Result<String> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash(secret.expose_secret()))
            .await
            .context("hash task panicked")?
    }

    /// [`Self::verify`] on the blocking pool.
    pub async fn verify_blocking(
        &self,
        secret: SecretString,
        stored_hash: String,
    ) -> anyhow::Result<bool> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.verify(secret.expose_secret(), &stored_hash))
            .await
            .context("verify task panicked")
    }
}

impl Default for SecretHasher {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}
