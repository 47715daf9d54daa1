use pnet::util::MacAddr;

/// Canonical form: six lowercase octets joined by `:`.
pub fn format_mac(octets: [u8; 6]) -> String {
    let [a, b, c, d, e, f] = octets;
    MacAddr::new(a, b, c, d, e, f).to_string()
}

/// Parses a canonical (or any colon separated) MAC string back into octets.
pub fn parse_mac(s: &str) -> Option<MacAddr> {
    s.parse::<MacAddr>().ok()
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

    #[test]
    fn formats_lowercase_with_leading_zeros() {
        assert_eq!(
            format_mac([0x0A, 0xBB, 0x0C, 0xD0, 0x01, 0xFF]),
            "0a:bb:0c:d0:01:ff"
        );
    }

    #[test]
    fn parse_round_trips_canonical_form() {
        let mac = parse_mac("a8:a1:59:13:41:46").unwrap();
        assert_eq!(mac, MacAddr::new(0xa8, 0xa1, 0x59, 0x13, 0x41, 0x46));
        assert!(parse_mac("a8a159134146").is_none());
    }
}
