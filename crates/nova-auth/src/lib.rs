//! # nova-auth
//!
//! Credential handling for NoteNova:
//! - argon2id password hashing and verification
//! - HMAC-SHA256 signed session tokens (JWT wire format, 7-day lifetime,
//!   stateless verification)
//! - the register/login/verify service over a `UserRepository`

pub mod password;
pub mod service;
pub mod token;

pub use password::{hash_password, verify_password};
pub use service::{AuthService, AuthSession};
pub use token::{Claims, TokenSigner};
