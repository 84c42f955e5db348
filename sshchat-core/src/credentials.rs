pub const DEFAULT_PORT: u16 = 22;

/// Connection details for the (simulated) remote host.
///
/// The store keeps one of these and hands out copies; a dispatch task works
/// from the copy it took when it started, never from a live reference.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub host: String,
    pub port: u16,
    pub username: String,
    /// Password-equivalent. Hidden from `Debug` output.
    pub secret: String,
}

impl Credentials {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            username: username.into(),
            secret: secret.into(),
        }
    }

    /// Host, username and secret are all present.
    pub fn is_complete(&self) -> bool {
        !self.host.is_empty() && !self.username.is_empty() && !self.secret.is_empty()
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_PORT,
            username: String::new(),
            secret: String::new(),
        }
    }
}

// Hand-written so the secret never reaches a log line.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("secret_empty", &self.secret.is_empty())
            .finish()
    }
}
