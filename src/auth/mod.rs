//! Session and authentication core: password hashing, signed session
//! tokens, cookie-held sessions, and the request gate that enforces them.

pub mod gate;
pub mod hasher;
pub mod session;
pub mod token;

pub use session::{SessionManager, VerifiedSession, SESSION_COOKIE};
pub use token::{Claims, TokenCodec};
