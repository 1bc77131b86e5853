//! Default configuration values

pub struct HttpDefaults;

impl HttpDefaults {
    pub const HOST: &'static str = "127.0.0.1";
    pub const PORT: u16 = 5003;
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    pub const MAX_REQUEST_SIZE: usize = 2 * 1024 * 1024;
    pub const SHUTDOWN_TIMEOUT_SECS: u64 = 10;
    pub const CSRF_TOKEN_LIFETIME_SECS: u64 = 3600;
}
