use std::sync::OnceLock;

use mac_oui::Oui;
use pnet::util::MacAddr;
use tmd_common::inventory::InterfaceTable;
use tmd_common::network::mac::parse_mac;
use tracing::warn;

/// Resolves the manufacturer behind a MAC address.
pub trait VendorRepository: Send + Sync {
    fn get_vendor(&self, mac: MacAddr) -> Option<String>;
}

static OUI_DB: OnceLock<Option<Oui>> = OnceLock::new();

/// Loads the bundled **Organizationally unique identifier** database once.
fn get_oui_db() -> Option<&'static Oui> {
    OUI_DB
        .get_or_init(|| match Oui::default() {
            Ok(db) => Some(db),
            Err(e) => {
                warn!(
                    "OUI database unavailable, vendors will not be resolved: {e}"
                );
                None
            }
        })
        .as_ref()
}

pub struct MacOuiRepo;

impl VendorRepository for MacOuiRepo {
    fn get_vendor(&self, mac: MacAddr) -> Option<String> {
        let db = get_oui_db()?;
        match db.lookup_by_mac(&mac.to_string()) {
            Ok(Some(entry)) => Some(entry.company_name.clone()),
            _ => None,
        }
    }
}

/// Fills `vendor` for every interface whose MAC is well formed.
pub fn enrich_vendors(interfaces: &mut InterfaceTable, repo: &dyn VendorRepository) {
    for interface in interfaces.iter_mut() {
        let Some(mac) = interface.mac.as_deref().and_then(parse_mac) else {
            continue;
        };
        if let Some(vendor) = repo.get_vendor(mac) {
            interface.vendor = Some(vendor);
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
