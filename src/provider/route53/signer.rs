//! AWS Signature Version 4 for Route 53 requests.
//!
//! Only the headers `host` and `x-amz-date` are signed and requests carry no
//! query string, which is all the change API needs.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use super::route53::Credentials;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const SIGNED_HEADERS: &str = "host;x-amz-date";

/// Route 53 is a global service, signed against us-east-1.
pub(super) const REGION: &str = "us-east-1";
pub(super) const SERVICE: &str = "route53";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Signature {
    pub authorization: String,
    pub amz_date: String,
}

pub(super) struct Request<'a> {
    pub method: &'a str,
    pub uri: &'a str,
    pub host: &'a str,
    pub payload: &'a str,
}

pub(super) struct Signer<'a> {
    credentials: &'a Credentials,
}

impl<'a> Signer<'a> {
    pub fn new(credentials: &'a Credentials) -> Self {
        Self { credentials }
    }

    pub fn sign(&self, request: &Request<'_>, now: DateTime<Utc>) -> Signature {
        let date = now.format("%Y%m%d").to_string();
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();

        let canonical_request = Self::canonical_request(request, &amz_date);
        let scope = format!("{}/{}/{}/aws4_request", date, REGION, SERVICE);
        let string_to_sign = format!(
            "{}\n{}\n{}\n{}",
            ALGORITHM,
            amz_date,
            scope,
            Self::sha256_hex(&canonical_request)
        );

        let signature = hex::encode(Self::hmac_sha256(
            &self.signing_key(&date),
            &string_to_sign,
        ));

        Signature {
            authorization: format!(
                "{} Credential={}/{}, SignedHeaders={}, Signature={}",
                ALGORITHM, self.credentials.access_key_id, scope, SIGNED_HEADERS, signature
            ),
            amz_date,
        }
    }

    fn canonical_request(request: &Request<'_>, amz_date: &str) -> String {
        let canonical_headers = format!("host:{}\nx-amz-date:{}\n", request.host, amz_date);
        format!(
            "{}\n{}\n\n{}\n{}\n{}",
            request.method,
            request.uri,
            canonical_headers,
            SIGNED_HEADERS,
            Self::sha256_hex(request.payload)
        )
    }

    fn signing_key(&self, date: &str) -> Vec<u8> {
        let secret = format!("AWS4{}", self.credentials.secret_access_key);
        let k_date = Self::hmac_sha256(secret.as_bytes(), date);
        let k_region = Self::hmac_sha256(&k_date, REGION);
        let k_service = Self::hmac_sha256(&k_region, SERVICE);
        Self::hmac_sha256(&k_service, "aws4_request")
    }

    fn hmac_sha256(key: &[u8], msg: &str) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
        mac.update(msg.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }

    fn sha256_hex(input: &str) -> String {
        hex::encode(Sha256::digest(input.as_bytes()))
    }
}
