//! Bearer token adapters.

mod jwt;

pub use jwt::{JWT_SECRET_MIN_LEN, JwtSecret, JwtTokenService};
