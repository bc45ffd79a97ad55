//! Authentication utilities library
//!
//! Provides the cryptographic building blocks of the SSO service:
//! - Password hashing (Argon2id, tunable cost)
//! - JWT signing and validation (HS256, one key per trust domain)
//!
//! The service defines its own token claims and storage traits and adapts these
//! implementations. Nothing in here knows about users or applications.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("other_password", &hash).unwrap());
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::JwtHandler;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Claims {
//!     sub: String,
//!     exp: i64,
//! }
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let token = handler
//!     .encode(&Claims { sub: "user123".to_string(), exp: 4_102_444_800 })
//!     .unwrap();
//! let decoded: Claims = handler.decode(&token).unwrap();
//! assert_eq!(decoded.sub, "user123");
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
