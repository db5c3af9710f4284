use std::borrow::Cow;
use std::fmt;

use crate::error::RequestError;

const CONSUMER_KEY_VAR: &str = "BRICKLINK_CONSUMER_KEY";
const CONSUMER_SECRET_VAR: &str = "BRICKLINK_CONSUMER_SECRET";
const TOKEN_VALUE_VAR: &str = "BRICKLINK_TOKEN_VALUE";
const TOKEN_SECRET_VAR: &str = "BRICKLINK_TOKEN_SECRET";

/// Source of the credential quadruple used to sign requests.
pub trait SecretsProvider {
    /// Returns `(consumer_key, consumer_secret)`.
    fn consumer_pair(&self) -> (&str, &str);

    /// Returns `(token, token_secret)`.
    fn token_pair(&self) -> (&str, &str);
}

/// Registered consumer credentials plus the store-scoped access token.
///
/// The API only accepts requests that carry all four values, so they are
/// supplied together at construction and never change afterwards. The
/// `Debug` implementation redacts both secrets.
#[derive(Clone)]
pub struct Secrets<'a> {
    consumer_key: Cow<'a, str>,
    consumer_secret: Cow<'a, str>,
    token: Cow<'a, str>,
    token_secret: Cow<'a, str>,
}

impl<'a> Secrets<'a> {
    pub fn new<CK, CS, T, TS>(
        consumer_key: CK,
        consumer_secret: CS,
        token: T,
        token_secret: TS,
    ) -> Self
    where
        CK: Into<Cow<'a, str>>,
        CS: Into<Cow<'a, str>>,
        T: Into<Cow<'a, str>>,
        TS: Into<Cow<'a, str>>,
    {
        Secrets {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            token: token.into(),
            token_secret: token_secret.into(),
        }
    }
}

impl Secrets<'static> {
    /// Load the credential quadruple from the environment.
    ///
    /// A `.env` file in the working directory is read first when present.
    /// Expected variables: `BRICKLINK_CONSUMER_KEY`,
    /// `BRICKLINK_CONSUMER_SECRET`, `BRICKLINK_TOKEN_VALUE` and
    /// `BRICKLINK_TOKEN_SECRET`.
    pub fn from_env() -> Result<Self, RequestError> {
        dotenvy::dotenv().ok();

        Ok(Secrets::new(
            read_var(CONSUMER_KEY_VAR)?,
            read_var(CONSUMER_SECRET_VAR)?,
            read_var(TOKEN_VALUE_VAR)?,
            read_var(TOKEN_SECRET_VAR)?,
        ))
    }
}

fn read_var(name: &'static str) -> Result<String, RequestError> {
    std::env::var(name).map_err(|_| RequestError::MissingEnvVar(name))
}

impl SecretsProvider for Secrets<'_> {
    fn consumer_pair(&self) -> (&str, &str) {
        (&self.consumer_key, &self.consumer_secret)
    }

    fn token_pair(&self) -> (&str, &str) {
        (&self.token, &self.token_secret)
    }
}

impl fmt::Debug for Secrets<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"[REDACTED]")
            .field("token", &self.token)
            .field("token_secret", &"[REDACTED]")
            .finish()
    }
}
