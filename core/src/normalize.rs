//! # Value Normalizer
//!
//! Pure decoding of [`RawValue`]s into display-ready [`NormalizedValue`]s.
//! Nothing here fails: a value that cannot be decoded degrades to a
//! best-effort passthrough, and a failed query becomes the sentinel.

use tmd_common::network::mac::format_mac;
use tmd_common::snmp::{NormalizeError, NormalizedValue, QueryResult, RawValue, Uptime};
use tracing::debug;

/// Type prefixes agents and tools put in front of rendered values.
const TYPE_TAGS: &[&str] = &[
    "STRING",
    "Hex-STRING",
    "OCTET STRING",
    "INTEGER",
    "Gauge32",
    "Counter32",
    "Counter64",
    "Timeticks",
    "OID",
    "IpAddress",
];

const MAC_HEX_LEN: usize = 12;

pub fn normalize(raw: QueryResult) -> NormalizedValue {
    match raw {
        Err(_) => NormalizedValue::NotAvailable,
        Ok(RawValue::PlainString(text)) => NormalizedValue::Text(clean_text(&text)),
        Ok(RawValue::HexOctets(hex)) => match mac_from_hex(&hex) {
            Ok(mac) => NormalizedValue::Mac(mac),
            Err(NormalizeError::MalformedValue { stripped }) => {
                debug!(%hex, %stripped, "hex value is not a MAC address");
                NormalizedValue::Text(stripped)
            }
        },
        Ok(RawValue::TimeTicks(ticks)) => NormalizedValue::Uptime(Uptime::from_ticks(ticks)),
        Ok(RawValue::Integer(n)) => NormalizedValue::Text(n.to_string()),
    }
}

/// Normalizes a physical-address column value.
///
/// Agents may return the address as binary octets that happen to be
/// printable, so six-byte text is read as raw octets when the hex rule does
/// not produce a MAC.
pub fn normalize_mac(raw: QueryResult) -> NormalizedValue {
    match raw {
        Ok(RawValue::PlainString(text)) => {
            let cleaned = clean_text(&text);
            match mac_from_hex(&cleaned) {
                Ok(mac) => NormalizedValue::Mac(mac),
                Err(_) => match <[u8; 6]>::try_from(text.as_bytes()) {
                    Ok(octets) => NormalizedValue::Mac(format_mac(octets)),
                    Err(_) => NormalizedValue::Text(strip_non_hex(&cleaned)),
                },
            }
        }
        other => normalize(other),
    }
}

/// Normalizes `sysUpTime`.
///
/// Anything that cannot be read as hundredths of a second is unavailable,
/// never a free-form string.
pub fn normalize_uptime(raw: QueryResult) -> NormalizedValue {
    let ticks = match raw {
        Ok(RawValue::TimeTicks(ticks)) => Some(ticks),
        Ok(RawValue::Integer(n)) => u32::try_from(n).ok(),
        Ok(RawValue::PlainString(text)) => ticks_from_text(&text),
        _ => None,
    };

    match ticks {
        Some(ticks) => NormalizedValue::Uptime(Uptime::from_ticks(ticks)),
        None => NormalizedValue::NotAvailable,
    }
}

/// Strips type tags and surrounding quotes until nothing changes, then trims.
///
/// Running it on its own output is a no-op.
pub fn clean_text(text: &str) -> String {
    let mut current = text.trim();
    loop {
        let next = strip_quotes(strip_type_tag(current)).trim();
        if next == current {
            return current.to_string();
        }
        current = next;
    }
}

/// Keeps only hex digits; exactly twelve of them make a MAC.
pub fn mac_from_hex(text: &str) -> Result<String, NormalizeError> {
    let stripped = strip_non_hex(strip_type_tag(text.trim()));

    if stripped.len() != MAC_HEX_LEN {
        return Err(NormalizeError::MalformedValue { stripped });
    }

    let mut octets = [0u8; 6];
    for (octet, pair) in octets.iter_mut().zip(stripped.as_bytes().chunks(2)) {
        let pair = std::str::from_utf8(pair).map_err(|_| NormalizeError::MalformedValue {
            stripped: stripped.clone(),
        })?;
        *octet = u8::from_str_radix(pair, 16).map_err(|_| NormalizeError::MalformedValue {
            stripped: stripped.clone(),
        })?;
    }

    Ok(format_mac(octets))
}

fn strip_non_hex(text: &str) -> String {
    text.chars().filter(char::is_ascii_hexdigit).collect()
}

fn strip_type_tag(text: &str) -> &str {
    TYPE_TAGS
        .iter()
        .find_map(|tag| text.strip_prefix(tag)?.strip_prefix(':'))
        .unwrap_or(text)
}

fn strip_quotes(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(text)
}

/// Reads "Timeticks: (12345) 0:02:03.45" or a bare "12345".
fn ticks_from_text(text: &str) -> Option<u32> {
    let cleaned = clean_text(text);
    let inner = match (cleaned.find('('), cleaned.find(')')) {
        (Some(open), Some(close)) if open < close => &cleaned[open + 1..close],
        _ => cleaned.as_str(),
    };
    inner.trim().parse().ok()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use tmd_common::snmp::QueryError;

    fn hex(s: &str) -> QueryResult {
        Ok(RawValue::HexOctets(s.to_string()))
    }

    fn text(s: &str) -> QueryResult {
        Ok(RawValue::PlainString(s.to_string()))
    }

    fn uptime(days: u32, hours: u32, minutes: u32) -> NormalizedValue {
        NormalizedValue::Uptime(Uptime {
            days,
            hours,
            minutes,
        })
    }

    #[test]
    fn failed_queries_become_the_sentinel() {
        let timeout = Err(QueryError::Timeout { attempts: 2 });
        let refused = Err(QueryError::Protocol {
            reason: "noSuchObject".into(),
        });
        assert_eq!(normalize(timeout), NormalizedValue::NotAvailable);
        assert_eq!(normalize(refused), NormalizedValue::NotAvailable);
    }

    #[test]
    fn twelve_hex_digits_make_a_mac_whatever_the_separators() {
        for input in [
            "AA BB CC DD EE FF",
            "aa:bb:cc:dd:ee:ff",
            "AA-BB-CC-DD-EE-FF",
            "aabb.ccdd.eeff",
            "AaBbCcDdEeFf",
            " AA BB CC DD EE FF ",
        ] {
            assert_eq!(
                normalize(hex(input)),
                NormalizedValue::Mac("aa:bb:cc:dd:ee:ff".into()),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn other_hex_lengths_pass_through_stripped() {
        assert_eq!(
            normalize(hex("AA BB CC")),
            NormalizedValue::Text("AABBCC".into())
        );
        assert_eq!(
            normalize(hex("00 11 22 33 44 55 66")),
            NormalizedValue::Text("00112233445566".into())
        );
        assert_eq!(normalize(hex("A")), NormalizedValue::Text("A".into()));
        assert_eq!(normalize(hex("zz::")), NormalizedValue::Text(String::new()));
    }

    #[test]
    fn tagged_and_quoted_strings_are_cleaned() {
        assert_eq!(
            normalize(text("STRING: \"Server room 2\"")),
            NormalizedValue::Text("Server room 2".into())
        );
        assert_eq!(
            normalize(text("  \"ops@example.org\"  ")),
            NormalizedValue::Text("ops@example.org".into())
        );
        assert_eq!(
            normalize(text("Linux: kernel")),
            NormalizedValue::Text("Linux: kernel".into())
        );
    }

    #[test]
    fn cleaning_is_idempotent() {
        for input in ["STRING: \"a\"", "\"\"x\"\"", "  plain  ", "STRING: STRING: b", ""] {
            let once = clean_text(input);
            assert_eq!(clean_text(&once), once, "input {input:?}");
            assert_eq!(normalize(text(&once)), NormalizedValue::Text(once.clone()));
        }
    }

    #[test]
    fn timeticks_become_days_hours_minutes() {
        assert_eq!(
            normalize(Ok(RawValue::TimeTicks(865_961_300))),
            uptime(100, 5, 26)
        );
    }

    #[test]
    fn integers_become_numeric_text() {
        assert_eq!(
            normalize(Ok(RawValue::Integer(-42))),
            NormalizedValue::Text("-42".into())
        );
    }

    #[test]
    fn mac_column_accepts_binary_looking_text() {
        assert_eq!(
            normalize_mac(text("abcdef")),
            NormalizedValue::Mac("61:62:63:64:65:66".into())
        );
        assert_eq!(
            normalize_mac(text("00:1a:2b:3c:4d:5e")),
            NormalizedValue::Mac("00:1a:2b:3c:4d:5e".into())
        );
        assert_eq!(
            normalize_mac(text("")),
            NormalizedValue::Text(String::new())
        );
        assert_eq!(
            normalize_mac(hex("00 1A 2B 3C 4D 5E")),
            NormalizedValue::Mac("00:1a:2b:3c:4d:5e".into())
        );
    }

    #[test]
    fn uptime_accepts_ticks_in_several_shapes() {
        let expected = uptime(0, 0, 2);
        assert_eq!(normalize_uptime(Ok(RawValue::TimeTicks(12_345))), expected);
        assert_eq!(normalize_uptime(Ok(RawValue::Integer(12_345))), expected);
        assert_eq!(
            normalize_uptime(text("Timeticks: (12345) 0:02:03.45")),
            expected
        );
        assert_eq!(
            normalize_uptime(text("a while")),
            NormalizedValue::NotAvailable
        );
        assert_eq!(
            normalize_uptime(Ok(RawValue::Integer(-5))),
            NormalizedValue::NotAvailable
        );
    }
}
