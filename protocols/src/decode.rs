use std::net::Ipv4Addr;

use snmp2::{Oid, Value};
use tmd_common::snmp::{Identifier, QueryError, QueryResult, RawValue};

/// Converts a varbind value into an owned [`RawValue`].
///
/// Exception values (`noSuchObject`, `noSuchInstance`, `endOfMibView`) come
/// back as errors so they can never be mistaken for data.
pub fn raw_value(value: Value<'_>) -> QueryResult {
    match value {
        Value::Integer(n) => Ok(RawValue::Integer(n)),
        Value::Counter32(n) | Value::Unsigned32(n) => Ok(RawValue::Integer(n.into())),
        Value::Counter64(n) => Ok(i64::try_from(n)
            .map(RawValue::Integer)
            .unwrap_or_else(|_| RawValue::PlainString(n.to_string()))),
        Value::Timeticks(ticks) => Ok(RawValue::TimeTicks(ticks)),
        Value::OctetString(bytes) => Ok(octets(bytes)),
        Value::IpAddress(addr) => Ok(RawValue::PlainString(Ipv4Addr::from(addr).to_string())),
        Value::ObjectIdentifier(oid) => Ok(RawValue::PlainString(oid.to_id_string())),
        Value::Boolean(flag) => Ok(RawValue::PlainString(flag.to_string())),
        Value::EndOfMibView => Err(QueryError::EndOfMibView),
        Value::NoSuchObject => Err(QueryError::Protocol {
            reason: "noSuchObject".to_string(),
        }),
        Value::NoSuchInstance => Err(QueryError::Protocol {
            reason: "noSuchInstance".to_string(),
        }),
        Value::Null => Err(QueryError::Protocol {
            reason: "null value".to_string(),
        }),
        _ => Err(QueryError::Protocol {
            reason: "unsupported value type".to_string(),
        }),
    }
}

/// Printable text stays text; anything else becomes "AA BB CC" hex pairs.
pub fn octets(bytes: &[u8]) -> RawValue {
    match std::str::from_utf8(bytes) {
        Ok(text) if is_printable(text) => RawValue::PlainString(text.to_string()),
        _ => RawValue::HexOctets(to_hex_pairs(bytes)),
    }
}

fn is_printable(text: &str) -> bool {
    text.chars().all(|c| !c.is_control() || c.is_whitespace())
}

fn to_hex_pairs(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn to_wire_oid(oid: &Identifier) -> Result<Oid<'static>, QueryError> {
    let components: Vec<u64> = oid.components().iter().map(|&c| u64::from(c)).collect();
    Oid::from(&components).map_err(|e| QueryError::Protocol {
        reason: format!("cannot encode identifier {oid}: {e:?}"),
    })
}

pub fn from_wire_oid(oid: &Oid<'_>) -> Result<Identifier, QueryError> {
    let dotted = oid.to_id_string();
    dotted.parse::<Identifier>().map_err(|e| QueryError::Protocol {
        reason: format!("agent returned unusable identifier {dotted}: {e}"),
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
