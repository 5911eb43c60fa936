mod restful_cli;
mod serializer;
mod signer;

mod route53;
pub use route53::Credentials;
pub use route53::DEFAULT_ENDPOINT;
pub use route53::Route53;
