/// Trait for loading service configuration from environment variables.
///
/// Implementors derive `serde::Deserialize` (fields map to upper-cased env var
/// names) and call `Config::from_env()` at startup.
pub trait Config: Sized + ::serde::de::DeserializeOwned {
    fn try_from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// # Panics
    ///
    /// Panics if any required env var is missing or cannot be deserialized.
    fn from_env() -> Self {
        Self::try_from_env().expect("failed to load config from environment")
    }
}
