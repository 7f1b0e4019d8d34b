//! Turns scanned or pasted payloads into wallet routes.
//!
//! Supported payloads:
//!
//! - `bitcoin:<address>?amount=<btc>&message=<memo>` (BIP21; `label` is used
//!   as memo when there is no `message`, unknown `req-` parameters reject the
//!   whole URI)
//! - `lightning:<invoice>` and bare bolt11 invoices (`lnbc`, `lntb`, `lnbcrt`)
//! - bare addresses of any network, checksum verified

use std::str::FromStr;

use bitcoin::{
    Amount, Denomination,
    address::{Address, NetworkUnchecked},
    bech32::{Fe32, Hrp},
};
use deck_engine::{
    Sats,
    collab::{Route, RouteResolver},
};
use url::Url;

const INVOICE_PREFIXES: [&str; 3] = ["lnbc", "lntb", "lnbcrt"];
/// A bolt11 data part holds at least a timestamp and a checksum.
const MIN_INVOICE_DATA: usize = 7 + 6;

#[derive(Debug, Default, Clone, Copy)]
pub struct PayloadRouter;

impl RouteResolver for PayloadRouter {
    fn route_for(&self, payload: &str) -> Option<Route> {
        let payload = payload.trim();
        if payload.is_empty() {
            return None;
        }

        if let Ok(uri) = Url::parse(payload) {
            match uri.scheme() {
                "bitcoin" => return bip21(&uri),
                "lightning" => return invoice(uri.path()),
                _ => {}
            }
        }
        if let Some(route) = invoice(payload) {
            return Some(route);
        }
        is_address(payload).then(|| Route::SendDetails {
            address: payload.to_string(),
            amount: None,
            memo: None,
        })
    }
}

fn bip21(uri: &Url) -> Option<Route> {
    let address = uri.path();
    if !is_address(address) {
        tracing::debug!(address, "bitcoin uri without a valid address");
        return None;
    }

    let mut amount = None;
    let mut message = None;
    let mut label = None;
    for (key, value) in uri.query_pairs() {
        match key.to_ascii_lowercase().as_str() {
            // A malformed amount makes the whole URI invalid.
            "amount" => amount = Some(btc_amount(&value)?),
            "message" => message = Some(value.into_owned()),
            "label" => label = Some(value.into_owned()),
            other if other.starts_with("req-") => {
                tracing::debug!(parameter = other, "bitcoin uri requires an unknown parameter");
                return None;
            }
            _ => {}
        }
    }

    Some(Route::SendDetails {
        address: address.to_string(),
        amount,
        memo: message.or(label).filter(|memo| !memo.is_empty()),
    })
}

fn btc_amount(value: &str) -> Option<Sats> {
    let amount = Amount::from_str_in(value, Denomination::Bitcoin).ok()?;
    i64::try_from(amount.to_sat()).ok().map(Sats::new)
}

fn invoice(value: &str) -> Option<Route> {
    is_invoice(value).then(|| Route::LightningInvoice {
        invoice: value.to_ascii_lowercase(),
    })
}

/// Bolt11 shape check: a lightning human readable part followed by bech32
/// data. The signature is not verified.
fn is_invoice(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    let Some((hrp, data)) = lower.rsplit_once('1') else {
        return false;
    };
    INVOICE_PREFIXES.iter().any(|prefix| hrp.starts_with(prefix))
        && Hrp::parse(hrp).is_ok()
        && data.len() >= MIN_INVOICE_DATA
        && data.chars().all(|ch| Fe32::from_char(ch).is_ok())
}

fn is_address(value: &str) -> bool {
    Address::<NetworkUnchecked>::from_str(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESS: &str = "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq";
    const LEGACY: &str = "1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2";
    const TESTNET: &str = "tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx";
    const INVOICE: &str = "lnbc20u1pvjluezpp5qqqsyqcyq5rqwzqfqqqsyqcyq5rqwzqfqqqsyqcyq5rqwzqfqypq";

    fn route(payload: &str) -> Option<Route> {
        PayloadRouter.route_for(payload)
    }

    fn send_to(address: &str) -> Option<Route> {
        Some(Route::SendDetails {
            address: address.to_string(),
            amount: None,
            memo: None,
        })
    }

    #[test]
    fn bip21_with_amount_and_message() {
        assert_eq!(
            route(&format!("bitcoin:{ADDRESS}?amount=0.0005&message=Coffee%20beans")),
            Some(Route::SendDetails {
                address: ADDRESS.to_string(),
                amount: Some(Sats::new(50_000)),
                memo: Some("Coffee beans".to_string()),
            })
        );
    }

    #[test]
    fn bip21_label_is_a_fallback_memo() {
        assert_eq!(
            route(&format!("BITCOIN:{LEGACY}?label=Alice+Shop")),
            Some(Route::SendDetails {
                address: LEGACY.to_string(),
                amount: None,
                memo: Some("Alice Shop".to_string()),
            })
        );
    }

    #[test]
    fn bip21_with_bad_amount_is_rejected() {
        assert_eq!(route(&format!("bitcoin:{ADDRESS}?amount=lots")), None);
        assert_eq!(route(&format!("bitcoin:{ADDRESS}?amount=0.123456789")), None);
        assert_eq!(route("bitcoin:notanaddress"), None);
    }

    #[test]
    fn bip21_unknown_required_parameter_is_rejected() {
        assert_eq!(route(&format!("bitcoin:{ADDRESS}?req-somethingyoudontunderstand=50")), None);
        assert_eq!(route(&format!("bitcoin:{ADDRESS}?somethingelse=50")), send_to(ADDRESS));
    }

    #[test]
    fn lightning_invoices() {
        let expected = Some(Route::LightningInvoice {
            invoice: INVOICE.to_string(),
        });
        assert_eq!(route(&format!("lightning:{INVOICE}")), expected);
        assert_eq!(route(&INVOICE.to_uppercase()), expected);
        assert_eq!(route("lnbc20u1pvjluezbio"), None);
    }

    #[test]
    fn bare_addresses_of_any_network() {
        assert_eq!(route(ADDRESS), send_to(ADDRESS));
        assert_eq!(route(LEGACY), send_to(LEGACY));
        assert_eq!(route(TESTNET), send_to(TESTNET));
    }

    #[test]
    fn addresses_with_bad_checksums_are_rejected() {
        assert_eq!(route("1111111111111111111111111111"), None);
        assert_eq!(route("1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN3"), None);
        assert_eq!(route("bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdz"), None);
        assert_eq!(route(&format!("bitcoin:{}", "1".repeat(30))), None);
        assert_eq!(route("hello world"), None);
        assert_eq!(route("   "), None);
    }
}
