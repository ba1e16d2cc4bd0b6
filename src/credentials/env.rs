//! Process environment access behind a trait so tests can count reads.

/// Environment variable holding the item-store access key ID.
pub const ENV_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";

/// Environment variable holding the item-store secret access key.
pub const ENV_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";

/// Read access to environment-style variables.
pub trait EnvReader: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// [`EnvReader`] over the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvReader for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}
