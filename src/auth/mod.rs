pub mod extractor;
pub mod jwt;
pub mod password;

/// Name of the http-only cookie carrying the session token.
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
