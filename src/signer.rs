use std::borrow::Cow;
use std::time::{SystemTime, UNIX_EPOCH};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use http::Method;
use rand::Rng;
use sha1::Sha1;

use crate::encode::percent_encode;
use crate::secrets::SecretsProvider;
use crate::{
    OAUTH_CONSUMER_KEY, OAUTH_NONCE_KEY, OAUTH_SIGNATURE_KEY, OAUTH_SIGNATURE_METHOD_KEY,
    OAUTH_TIMESTAMP_KEY, OAUTH_TOKEN_KEY, OAUTH_VERSION_KEY,
};

type HmacSha1 = Hmac<Sha1>;

/// Value of `oauth_signature_method` sent with every request.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";

/// Value of `oauth_version` sent with every request.
pub const OAUTH_VERSION: &str = "1.0";

/// Per-request protocol parameters.
///
/// Timestamp and nonce are generated freshly for every signed request;
/// the builder methods pin them to fixed values, which is mainly useful
/// for reproducing known signatures in tests.
#[derive(Debug, Clone)]
pub struct OAuthParameters<'a> {
    signature_method: &'static str,
    version: &'static str,
    timestamp: Option<u64>,
    nonce: Option<Cow<'a, str>>,
}

impl Default for OAuthParameters<'_> {
    fn default() -> Self {
        OAuthParameters {
            signature_method: SIGNATURE_METHOD,
            version: OAUTH_VERSION,
            timestamp: None,
            nonce: None,
        }
    }
}

impl<'a> OAuthParameters<'a> {
    pub fn new() -> Self {
        Default::default()
    }

    /// Pin the `oauth_timestamp` value.
    pub fn timestamp<T>(self, timestamp: T) -> Self
    where
        T: Into<u64>,
    {
        OAuthParameters {
            timestamp: Some(timestamp.into()),
            ..self
        }
    }

    /// Pin the `oauth_nonce` value.
    pub fn nonce<T>(self, nonce: T) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        OAuthParameters {
            nonce: Some(nonce.into()),
            ..self
        }
    }
}

/// Computes the `Authorization` header for one request at a time.
///
/// Holds only borrowed credentials and the algorithm constants; every
/// invocation generates a fresh timestamp/nonce pair (unless pinned) and
/// recomputes the signature, so a single signer may be shared freely
/// between concurrent callers.
#[derive(Debug, Clone)]
pub struct Signer<'a, TSecretsProvider>
where
    TSecretsProvider: SecretsProvider,
{
    secrets: &'a TSecretsProvider,
    parameters: OAuthParameters<'a>,
}

impl<'a, TSecretsProvider> Signer<'a, TSecretsProvider>
where
    TSecretsProvider: SecretsProvider,
{
    pub fn new(secrets: &'a TSecretsProvider, parameters: OAuthParameters<'a>) -> Self {
        Signer {
            secrets,
            parameters,
        }
    }

    /// Produce the header value for `method` on the absolute target `uri`.
    ///
    /// The query-string portion of `uri`, if any, participates in the
    /// signature; its segments are taken as opaque, already-encoded
    /// `name=value` strings and duplicate keys are preserved.
    pub fn authorization_header(&self, method: &Method, uri: &str) -> String {
        let (consumer_key, consumer_secret) = self.secrets.consumer_pair();
        let (token, token_secret) = self.secrets.token_pair();

        let timestamp = self
            .parameters
            .timestamp
            .unwrap_or_else(unix_timestamp)
            .to_string();
        let nonce = match &self.parameters.nonce {
            Some(nonce) => nonce.clone().into_owned(),
            None => fresh_nonce(),
        };

        let (base_uri, query) = match uri.split_once('?') {
            Some((base, query)) => (base, Some(query)),
            None => (uri, None),
        };

        let parameters = self.request_parameters(consumer_key, token, &timestamp, &nonce, query);
        let base = signature_base(method, base_uri, parameters);
        let signature = sign(&base, consumer_secret, token_secret);

        // Field order is fixed; consumers of the header rely on it.
        format!(
            "OAuth {}=\"{}\",{}=\"{}\",{}=\"{}\",{}=\"{}\",{}=\"{}\",{}=\"{}\",{}=\"{}\"",
            OAUTH_CONSUMER_KEY,
            percent_encode(consumer_key),
            OAUTH_TOKEN_KEY,
            percent_encode(token),
            OAUTH_SIGNATURE_METHOD_KEY,
            self.parameters.signature_method,
            OAUTH_SIGNATURE_KEY,
            signature,
            OAUTH_TIMESTAMP_KEY,
            timestamp,
            OAUTH_NONCE_KEY,
            nonce,
            OAUTH_VERSION_KEY,
            self.parameters.version,
        )
    }

    /// Merge the protocol parameters with the raw query segments of the
    /// target URI into one unordered `name=value` list.
    fn request_parameters(
        &self,
        consumer_key: &str,
        token: &str,
        timestamp: &str,
        nonce: &str,
        query: Option<&str>,
    ) -> Vec<String> {
        let mut parameters = vec![
            format!("{}={}", OAUTH_CONSUMER_KEY, consumer_key),
            format!("{}={}", OAUTH_TOKEN_KEY, token),
            format!(
                "{}={}",
                OAUTH_SIGNATURE_METHOD_KEY, self.parameters.signature_method
            ),
            format!("{}={}", OAUTH_TIMESTAMP_KEY, timestamp),
            format!("{}={}", OAUTH_NONCE_KEY, nonce),
            format!("{}={}", OAUTH_VERSION_KEY, self.parameters.version),
        ];
        if let Some(query) = query {
            parameters.extend(
                query
                    .split('&')
                    .filter(|segment| !segment.is_empty())
                    .map(str::to_owned),
            );
        }
        parameters
    }
}

/// Build the signature base string from the uppercased method, the encoded
/// base URI and the sorted, joined, then once-encoded parameter list.
///
/// With no parameters the result is exactly `METHOD&encoded-uri`, without
/// a trailing separator.
pub(crate) fn signature_base(method: &Method, base_uri: &str, mut parameters: Vec<String>) -> String {
    parameters.sort();
    let joined = parameters.join("&");

    let mut base = format!(
        "{}&{}",
        method.as_str().to_uppercase(),
        percent_encode(base_uri)
    );
    if !joined.is_empty() {
        base.push('&');
        base.push_str(&percent_encode(&joined));
    }
    base
}

/// HMAC-SHA1 over `base` keyed with `encode(consumer_secret)&encode(token_secret)`,
/// then base64- and percent-encoded. Empty secrets are valid input.
pub(crate) fn sign(base: &str, consumer_secret: &str, token_secret: &str) -> String {
    let key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    );

    let mut mac =
        HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(base.as_bytes());
    let digest = mac.finalize().into_bytes();

    percent_encode(&BASE64.encode(digest))
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

fn fresh_nonce() -> String {
    // Thread-local CSPRNG; nonces must stay distinct across rapid
    // successive calls and across threads.
    rand::thread_rng().gen::<u64>().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::Secrets;

    fn frozen_signer<'a>(secrets: &'a Secrets<'static>) -> Signer<'a, Secrets<'static>> {
        let parameters = OAuthParameters::new()
            .timestamp(1_234_567_890u64)
            .nonce("8067914368018875334");
        Signer::new(secrets, parameters)
    }

    #[test]
    fn base_without_parameters_has_no_trailing_separator() {
        let base = signature_base(&Method::GET, "https://foo.com", vec![]);
        assert_eq!(base, "GET&https%3A%2F%2Ffoo.com");
    }

    #[test]
    fn base_sorts_parameters_before_joining() {
        let parameters = vec!["token=abcd".to_owned(), "secret=1234".to_owned()];
        let base = signature_base(&Method::GET, "https://foo.com", parameters);
        assert_eq!(base, "GET&https%3A%2F%2Ffoo.com&secret%3D1234%26token%3Dabcd");
    }

    #[test]
    fn sign_matches_known_vectors() {
        assert_eq!(sign("foobar", "foo", "bar"), "uTIVP8RyuDOKi71kmTPV3t8%2BIfw%3D");
        assert_eq!(
            sign("GET&GET&https%3A%2F%2Ffoo.com", "abcd", "1234"),
            "0wM5ydwpQqPq0%2FOgU%2FVHLzmAroM%3D"
        );
        assert_eq!(
            sign("GET&GET&https%3A%2F%2Ffoo.com&foo%3Dbar", "abcd", "1234"),
            "ipi8jiHZZl7T8GxkATgpxCJI5Nk%3D"
        );
    }

    #[test]
    fn sign_accepts_empty_secrets() {
        assert!(!sign("foobar", "", "").is_empty());
    }

    #[test]
    fn single_character_changes_alter_the_signature() {
        let reference = sign("foobar", "foo", "bar");
        assert_ne!(sign("foobaz", "foo", "bar"), reference);
        assert_ne!(sign("foobar", "fop", "bar"), reference);
        assert_ne!(sign("foobar", "foo", "baz"), reference);
    }

    #[test]
    fn header_contains_seven_fields_in_fixed_order() {
        let secrets = Secrets::new("ConsumerKey", "ConsumerSecret", "TokenValue", "TokenSecret");
        let header = frozen_signer(&secrets)
            .authorization_header(&Method::GET, "https://api.bricklink.com/api/store/v1/colors");

        let fields: Vec<&str> = header.strip_prefix("OAuth ").unwrap().split(',').collect();
        assert_eq!(fields.len(), 7);

        let names: Vec<&str> = fields
            .iter()
            .map(|field| field.split('=').next().unwrap())
            .collect();
        assert_eq!(
            names,
            [
                "oauth_consumer_key",
                "oauth_token",
                "oauth_signature_method",
                "oauth_signature",
                "oauth_timestamp",
                "oauth_nonce",
                "oauth_version",
            ]
        );
    }

    #[test]
    fn golden_header_without_query() {
        let secrets = Secrets::new("ConsumerKey", "ConsumerSecret", "TokenValue", "TokenSecret");
        let header = frozen_signer(&secrets).authorization_header(
            &Method::GET,
            "https://api.bricklink.com/api/store/v1/items/PART/3001",
        );

        assert_eq!(
            header,
            "OAuth oauth_consumer_key=\"ConsumerKey\",oauth_token=\"TokenValue\",\
             oauth_signature_method=\"HMAC-SHA1\",oauth_signature=\"PYnJsS7xYDT62ZNZni1NSCsk5ew%3D\",\
             oauth_timestamp=\"1234567890\",oauth_nonce=\"8067914368018875334\",oauth_version=\"1.0\""
        );
    }

    #[test]
    fn golden_header_with_query() {
        let secrets = Secrets::new("ConsumerKey", "ConsumerSecret", "TokenValue", "TokenSecret");
        let header = frozen_signer(&secrets).authorization_header(
            &Method::GET,
            "https://api.bricklink.com/api/store/v1/items/PART/3001/price?guide_type=sold&new_or_used=U",
        );

        assert_eq!(
            header,
            "OAuth oauth_consumer_key=\"ConsumerKey\",oauth_token=\"TokenValue\",\
             oauth_signature_method=\"HMAC-SHA1\",oauth_signature=\"uSLooZzAPLqZ873SIgYi5kuoE9A%3D\",\
             oauth_timestamp=\"1234567890\",oauth_nonce=\"8067914368018875334\",oauth_version=\"1.0\""
        );
    }

    #[test]
    fn duplicate_query_keys_are_preserved() {
        let secrets = Secrets::new("ck", "cs", "t", "ts");
        let signer = Signer::new(&secrets, OAuthParameters::new());
        let parameters =
            signer.request_parameters("ck", "t", "0", "1", Some("color=1&color=2"));

        assert_eq!(parameters.len(), 8);
        assert!(parameters.contains(&"color=1".to_owned()));
        assert!(parameters.contains(&"color=2".to_owned()));
    }

    #[test]
    fn query_values_are_taken_as_opaque_and_encoded_once() {
        // "a b" arrives pre-encoded as a%20b; the pipeline must not
        // encode the value a second time before the joined pass.
        let secrets = Secrets::new("ck", "cs", "t", "ts");
        let signer = Signer::new(&secrets, OAuthParameters::new());
        let parameters = signer.request_parameters("ck", "t", "0", "1", Some("q=a%20b"));
        let base = signature_base(&Method::GET, "https://foo.com", parameters);

        assert!(base.contains("q%3Da%2520b"));
        assert!(!base.contains("q%3Da%20b"));
    }

    #[test]
    fn fresh_requests_use_distinct_nonces() {
        let secrets = Secrets::new("ck", "cs", "t", "ts");
        let signer = Signer::new(&secrets, OAuthParameters::new());
        let uri = "https://api.bricklink.com/api/store/v1/colors";

        let first = signer.authorization_header(&Method::GET, uri);
        let second = signer.authorization_header(&Method::GET, uri);
        assert_ne!(first, second);
    }
}
