//! Default values for configuration options.

/// Default output format for interface listings.
pub const FORMAT: &str = "text";

/// Default path written by `init`.
pub const INIT_OUTPUT: &str = "cast-addr.toml";

/// Whether IPv6 zones print as numbers unless configured otherwise.
pub const NUMERIC_SCOPES: bool = false;

/// Port given to a bare address by `endpoint`, the Cast receiver's default.
pub const CAST_PORT: u16 = 8010;
