//! # Wire and Normalized Values
//!
//! [`RawValue`] is what the protocol client decoded off the wire. It carries no
//! meaning until the normalizer turns it into a [`NormalizedValue`]. A failed
//! query is the `Err` side of [`QueryResult`], never a value.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

pub const NOT_AVAILABLE: &str = "not available";

const SECONDS_PER_DAY: u32 = 86_400;
const SECONDS_PER_HOUR: u32 = 3_600;
const SECONDS_PER_MINUTE: u32 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// Printable octet string, object identifier or address, as text.
    PlainString(String),
    /// Non-printable octet string, as space separated hex pairs.
    HexOctets(String),
    /// Hundredths of a second.
    TimeTicks(u32),
    Integer(i64),
}

/// Why a single query produced no value.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("no reply after {attempts} attempt(s)")]
    Timeout { attempts: u32 },
    #[error("agent returned an error: {reason}")]
    Protocol { reason: String },
    #[error("end of MIB view")]
    EndOfMibView,
    #[error("transport failure: {0}")]
    Transport(#[from] std::io::Error),
}

pub type QueryResult = Result<RawValue, QueryError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("malformed value '{stripped}'")]
    MalformedValue { stripped: String },
}

/// Coarse elapsed time: seconds are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Uptime {
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
}

impl Uptime {
    pub fn from_ticks(ticks: u32) -> Self {
        let total_seconds = ticks / 100;
        Self {
            days: total_seconds / SECONDS_PER_DAY,
            hours: (total_seconds % SECONDS_PER_DAY) / SECONDS_PER_HOUR,
            minutes: (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
        }
    }
}

impl fmt::Display for Uptime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = if self.days == 1 { "day" } else { "days" };
        let Uptime {
            days,
            hours,
            minutes,
        } = self;
        write!(f, "{days} {unit}, {hours:02}:{minutes:02}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedValue {
    Text(String),
    /// Lowercase, colon separated, six octets.
    Mac(String),
    Uptime(Uptime),
    NotAvailable,
}

impl NormalizedValue {
    pub fn is_available(&self) -> bool {
        !matches!(self, NormalizedValue::NotAvailable)
    }

    /// True when the value would survive into a device record.
    pub fn has_content(&self) -> bool {
        match self {
            NormalizedValue::Text(text) | NormalizedValue::Mac(text) => !text.is_empty(),
            NormalizedValue::Uptime(_) => true,
            NormalizedValue::NotAvailable => false,
        }
    }

    /// Textual form for string-typed fields. Empty text counts as missing.
    pub fn into_text(self) -> Option<String> {
        if !self.has_content() {
            return None;
        }
        match self {
            NormalizedValue::Text(text) | NormalizedValue::Mac(text) => Some(text),
            NormalizedValue::Uptime(uptime) => Some(uptime.to_string()),
            NormalizedValue::NotAvailable => None,
        }
    }

    pub fn into_uptime(self) -> Option<Uptime> {
        match self {
            NormalizedValue::Uptime(uptime) => Some(uptime),
            _ => None,
        }
    }
}

impl fmt::Display for NormalizedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizedValue::Text(text) | NormalizedValue::Mac(text) => f.write_str(text),
            NormalizedValue::Uptime(uptime) => write!(f, "{uptime}"),
            NormalizedValue::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
