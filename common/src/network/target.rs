//! # Candidate Targets
//!
//! Parses the candidate host list handed to a sweep:
//! * A single IPv4 address (`192.168.1.5`).
//! * An IPv4 range (`192.168.1.1-100` or `10.0.0.1-10.0.1.20`).
//! * A CIDR block (`192.168.1.0/24`).
//! * A comma separated mix of the above.

use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::str::FromStr;

use thiserror::Error;

use crate::network::range::{self, Ipv4Range};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetError {
    #[error("invalid target: {0}")]
    Invalid(String),
    #[error("invalid start IP in range '{input}'")]
    RangeStart { input: String },
    #[error("invalid end of range '{input}'")]
    RangeEnd { input: String },
    #[error("invalid CIDR block '{input}': {reason}")]
    Cidr { input: String, reason: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Host { target_addr: Ipv4Addr },
    Range { ipv4_range: Ipv4Range },
    Multi { targets: Vec<Target> },
}

impl FromStr for Target {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.contains(',') {
            return parse_commas(s);
        }

        if let Some(target) = parse_host(s) {
            return Ok(target);
        }

        if let Some(target) = parse_ip_range(s)? {
            return Ok(target);
        }

        if let Some(target) = parse_cidr_range(s)? {
            return Ok(target);
        }

        Err(TargetError::Invalid(s.to_string()))
    }
}

impl Target {
    /// Candidate addresses in order, produced on demand.
    ///
    /// First occurrence wins; later duplicates are dropped. Only a comma
    /// list can repeat an address, so only a comma list tracks what it has
    /// already yielded.
    pub fn candidates(&self) -> Box<dyn Iterator<Item = Ipv4Addr> + Send + '_> {
        match self {
            Target::Multi { .. } => {
                let mut seen: HashSet<Ipv4Addr> = HashSet::new();
                Box::new(self.addresses().filter(move |ip| seen.insert(*ip)))
            }
            _ => self.addresses(),
        }
    }

    pub fn candidate_count(&self) -> usize {
        match self {
            Target::Multi { .. } => self.candidates().count(),
            Target::Host { .. } => 1,
            Target::Range { ipv4_range } => ipv4_range.len(),
        }
    }

    fn addresses(&self) -> Box<dyn Iterator<Item = Ipv4Addr> + Send + '_> {
        match self {
            Target::Host { target_addr } => Box::new(std::iter::once(*target_addr)),
            Target::Range { ipv4_range } => Box::new(ipv4_range.to_iter()),
            Target::Multi { targets } => Box::new(targets.iter().flat_map(Target::addresses)),
        }
    }
}

/// Parses "192.168.1.5, 10.0.0.1-50, 172.16.0.0/30".
fn parse_commas(s: &str) -> Result<Target, TargetError> {
    let targets = s
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(Target::from_str)
        .collect::<Result<Vec<Target>, _>>()?;

    Ok(Target::Multi { targets })
}

fn parse_host(s: &str) -> Option<Target> {
    s.parse::<Ipv4Addr>()
        .ok()
        .map(|target_addr| Target::Host { target_addr })
}

/// Parses "1.1.1.1-2.2.2.2" or "1.1.1.1-50".
fn parse_ip_range(s: &str) -> Result<Option<Target>, TargetError> {
    let Some((start_str, end_str)) = s.split_once('-') else {
        return Ok(None);
    };

    let start_addr = start_str
        .trim()
        .parse::<Ipv4Addr>()
        .map_err(|_| TargetError::RangeStart {
            input: s.to_string(),
        })?;

    let end_addr = parse_range_end_addr(end_str.trim(), &start_addr).ok_or_else(|| {
        TargetError::RangeEnd {
            input: s.to_string(),
        }
    })?;

    Ok(Some(Target::Range {
        ipv4_range: Ipv4Range::new(start_addr, end_addr),
    }))
}

/// "192.168.1.1-50" implies 192.168.1.50; a full address is taken as is.
fn parse_range_end_addr(end_str: &str, start_addr: &Ipv4Addr) -> Option<Ipv4Addr> {
    if let Ok(full_addr) = end_str.parse::<Ipv4Addr>() {
        return Some(full_addr);
    }

    let partial_octets: Vec<u8> = end_str
        .split('.')
        .map(|octet_str| octet_str.parse::<u8>())
        .collect::<Result<Vec<u8>, _>>()
        .ok()?;

    if partial_octets.is_empty() || partial_octets.len() > 4 {
        return None;
    }

    let mut end_octets = start_addr.octets();
    let start_index = 4 - partial_octets.len();
    end_octets[start_index..].copy_from_slice(&partial_octets);

    Some(Ipv4Addr::from(end_octets))
}

fn parse_cidr_range(s: &str) -> Result<Option<Target>, TargetError> {
    let Some((ip_str, prefix_str)) = s.split_once('/') else {
        return Ok(None);
    };

    let cidr_error = |reason: String| TargetError::Cidr {
        input: s.to_string(),
        reason,
    };

    let ipv4_addr = ip_str
        .parse::<Ipv4Addr>()
        .map_err(|e| cidr_error(e.to_string()))?;

    let prefix = prefix_str
        .parse::<u8>()
        .map_err(|e| cidr_error(e.to_string()))?;

    let ipv4_range = range::cidr_range(ipv4_addr, prefix).map_err(|e| cidr_error(e.to_string()))?;

    Ok(Some(Target::Range { ipv4_range }))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
