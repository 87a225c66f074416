//! Reconstruction of a Shamir-shared secret $f(0)$ from $k$ shares $(x_i, f(x_i))$ whose values
//! are written in arbitrary bases, by Lagrange interpolation either over a prime field or over the
//! exact rationals.
//!
//! ```
//! use sss_recon::{loader, RecoveryConfig};
//!
//! let set = loader::from_str(r#"{
//!     "keys": { "n": 2, "k": 2 },
//!     "1": { "base": "10", "value": "5" },
//!     "2": { "base": "2", "value": "111" }
//! }"#).unwrap();
//!
//! assert_eq!(set.reconstruct(&RecoveryConfig::default()).unwrap().to_string(), "3");
//! ```

pub mod config;
pub mod error;
pub mod fraction;
pub mod lagrange;
pub mod loader;
pub mod modular;
pub mod polynomials;
pub mod radix;
pub mod secret;
pub mod share;

pub use config::{RecoveryConfig, SelectionOrder};
pub use error::{ReconError, Result};
pub use fraction::Fraction;
pub use lagrange::{interpolate_at_zero, ArithmeticMode};
pub use radix::decode;
pub use secret::{Secret, Warning};
pub use share::{RawShare, Share, ShareSet};
