pub mod core;
pub mod dam;

pub use crate::core::{config::DamConfig, errors::DamError};
pub use crate::dam::builder::{build_with_credentials, connect};
pub use crate::dam::client::AssetBankClient;
pub use crate::dam::types::Credentials;
