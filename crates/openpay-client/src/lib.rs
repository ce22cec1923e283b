//! Openpay Client SDK.
//!
//! Typed access to the Openpay customers API: create, list, get, update and
//! delete customers, and charge them.
//!
//! # Example
//!
//! ```no_run
//! use openpay_client::{ChargeArgs, CustomerArgs, Merchant};
//!
//! # async fn example() -> Result<(), openpay_client::ClientError> {
//! let merchant = Merchant::new("your-merchant-id", "sk_your_private_key")?;
//!
//! let customer = merchant
//!     .add_customer(&CustomerArgs::new("Ana", "ana@example.com").with_last_name("López"))
//!     .await?;
//!
//! let charge = customer
//!     .charge(&ChargeArgs::card("card-or-token-id", 100.0, "Cargo inicial", "device-session-id"))
//!     .await?;
//!
//! println!("Charge {} is {}", charge.id, charge.status);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod config;
mod customers;
mod error;
mod merchant;
mod types;

pub use config::{ClientOptions, Environment, MerchantConfig, PRODUCTION_URL, SANDBOX_URL};
pub use error::ClientError;
pub use merchant::Merchant;
pub use types::*;
