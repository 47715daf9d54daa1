use std::env;
use std::time::Duration;

pub const DEFAULT_COMMUNITY: &str = "public";
pub const DEFAULT_PORT: u16 = 161;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);
pub const DEFAULT_RETRIES: u32 = 1;
pub const DEFAULT_WORKERS: usize = 16;
pub const DEFAULT_HOST_FANOUT: usize = 3;
pub const DEFAULT_MAX_WALK_ROWS: usize = 4096;

/// Settings for one sweep over a candidate list.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    pub community: String,
    pub port: u16,
    /// Upper bound for a single request/response exchange.
    pub timeout: Duration,
    /// Extra attempts after the first one times out.
    pub retries: u32,
    /// Hosts inventoried at the same time.
    pub workers: usize,
    /// Queries in flight against the same host.
    pub host_fanout: usize,
    /// Rows a single walk may produce before it is cut off.
    pub max_walk_rows: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            community: DEFAULT_COMMUNITY.to_string(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
            workers: DEFAULT_WORKERS,
            host_fanout: DEFAULT_HOST_FANOUT,
            max_walk_rows: DEFAULT_MAX_WALK_ROWS,
        }
    }
}

impl SweepConfig {
    /// Applies `SNMP_COMMUNITY`, `SNMP_TIMEOUT` (seconds), `SNMP_RETRIES` and
    /// `SNMP_PORT` when they are set and parse.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(community) = lookup("SNMP_COMMUNITY") {
            self.community = community;
        }
        if let Some(timeout) = lookup("SNMP_TIMEOUT").and_then(|s| parse_seconds(&s)) {
            self.timeout = timeout;
        }
        if let Some(retries) = lookup("SNMP_RETRIES").and_then(|s| s.trim().parse().ok()) {
            self.retries = retries;
        }
        if let Some(port) = lookup("SNMP_PORT").and_then(|s| s.trim().parse().ok()) {
            self.port = port;
        }
        self
    }

    pub fn query_options(&self) -> QueryOptions {
        QueryOptions {
            community: self.community.clone(),
            port: self.port,
            timeout: self.timeout,
            retries: self.retries,
        }
    }
}

/// What a single get or get-next needs to know. Nothing else survives between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    pub community: String,
    pub port: u16,
    pub timeout: Duration,
    pub retries: u32,
}

impl QueryOptions {
    pub fn attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }

    /// Longest a call may take before giving up.
    pub fn deadline(&self) -> Duration {
        self.timeout.saturating_mul(self.attempts())
    }
}

impl Default for QueryOptions {
    fn default() -> Self {
        SweepConfig::default().query_options()
    }
}

/// Parses "2" or "0.5" as seconds. Negative or non-finite input is rejected.
pub fn parse_seconds(s: &str) -> Option<Duration> {
    let secs: f64 = s.trim().parse().ok()?;
    Duration::try_from_secs_f64(secs).ok()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
