/*!
bricklink-api: signed access to the BrickLink store API.

# Overview

This library talks to the store REST API at
`https://api.bricklink.com/api/store/v1`, which authenticates every request
through an OAuth 1.0a HMAC-SHA1 signature. The signing pipeline — strict
percent-encoding, parameter normalization, signature base construction,
HMAC-SHA1 and `Authorization` header assembly — is implemented here on top
of [reqwest](https://crates.io/crates/reqwest); the catalog endpoints are
thin wrappers that build a path and hand it to the signed executor.

Registered consumer credentials and a store-scoped access token are
required up front; the token-acquisition handshake is not part of this
crate. Response bodies are returned as raw strings, including error
responses — the status code is never inspected.

# How to use

## Query the catalog

```rust,no_run
# #[tokio::main]
# async fn main() -> Result<(), bricklink_api::Error> {
use bricklink_api::{Bricklink, ItemType, PriceGuideQuery, Secrets};

let secrets = Secrets::new(
    "[CONSUMER_KEY]",
    "[CONSUMER_SECRET]",
    "[TOKEN_VALUE]",
    "[TOKEN_SECRET]",
);
let client = Bricklink::new(secrets)?;

// a classic 2x4 brick
let item = client.item(ItemType::Part, "3001").await?;
println!("{}", item);

let query = PriceGuideQuery {
    guide_type: Some("sold"),
    new_or_used: Some("U"),
    ..Default::default()
};
let price = client.item_price(ItemType::Part, "3001", &query).await?;
println!("{}", price);
# Ok(())
# }
```

## Sign a request yourself

The signer is usable on its own, e.g. for endpoints this crate does not
wrap. Timestamp and nonce are generated per call unless pinned:

```rust
use bricklink_api::{OAuthParameters, Secrets, Signer};
use http::Method;

let secrets = Secrets::new("key", "secret", "token", "token secret");
let parameters = OAuthParameters::new()
    .timestamp(1_234_567_890u64)
    .nonce("8067914368018875334");

let header = Signer::new(&secrets, parameters)
    .authorization_header(&Method::GET, "https://api.bricklink.com/api/store/v1/colors");
assert!(header.starts_with("OAuth oauth_consumer_key="));
```
*/

mod catalog;
mod client;
mod encode;
mod error;
mod secrets;
mod signer;

// exposed to external program
pub use catalog::{ItemType, PriceGuideQuery};
pub use client::{Bricklink, API_BASE_URL};
pub use error::{Error, RequestError, Result};
pub use secrets::{Secrets, SecretsProvider};
pub use signer::{OAuthParameters, Signer, OAUTH_VERSION, SIGNATURE_METHOD};

// header parameter names, listed in the order they appear in the
// Authorization header
pub(crate) const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
pub(crate) const OAUTH_TOKEN_KEY: &str = "oauth_token";
pub(crate) const OAUTH_SIGNATURE_METHOD_KEY: &str = "oauth_signature_method";
pub(crate) const OAUTH_SIGNATURE_KEY: &str = "oauth_signature";
pub(crate) const OAUTH_TIMESTAMP_KEY: &str = "oauth_timestamp";
pub(crate) const OAUTH_NONCE_KEY: &str = "oauth_nonce";
pub(crate) const OAUTH_VERSION_KEY: &str = "oauth_version";
