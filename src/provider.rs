mod types;
pub use types::ChangeInfo;
pub use types::Provider;

pub mod route53;
