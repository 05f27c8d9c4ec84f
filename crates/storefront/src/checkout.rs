//! Checkout handoff: order summary text and messaging deep link.
//!
//! Completed orders are submitted by opening a WhatsApp deep link with a
//! human-readable summary; the API's order record is best-effort alongside
//! it, never the channel the shop relies on.

use mirai_core::{Contact, OrderItem, Price};
use url::Url;

/// Compose the order message sent to the shop.
#[must_use]
pub fn order_summary(items: &[OrderItem], contact: &Contact) -> String {
    let total: Price = items
        .iter()
        .map(|item| item.unit_price.times(item.quantity))
        .sum();

    let mut lines = vec!["Halo Mirai, saya ingin memesan:".to_owned()];
    lines.extend(items.iter().map(|item| {
        format!(
            "- {} x{} ({})",
            item.name,
            item.quantity,
            item.unit_price.times(item.quantity).display_idr()
        )
    }));
    lines.push(format!("Total: {}", total.display_idr()));
    lines.push(String::new());
    lines.push(format!("Nama: {}", contact.name));
    lines.push(format!("Telepon: {}", contact.phone));
    if let Some(email) = contact.email.as_deref().filter(|e| !e.is_empty()) {
        lines.push(format!("Email: {email}"));
    }
    if let Some(note) = contact.note.as_deref().filter(|n| !n.is_empty()) {
        lines.push(format!("Catatan: {note}"));
    }
    lines.join("\n")
}

/// Build the `wa.me` deep link carrying `summary` to `phone`.
///
/// # Errors
///
/// Returns `url::ParseError` if `phone` produces an unparseable URL.
pub fn handoff_link(phone: &str, summary: &str) -> Result<Url, url::ParseError> {
    Url::parse(&format!(
        "https://wa.me/{phone}?text={}",
        urlencoding::encode(summary)
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use mirai_core::ProductId;

    fn items() -> Vec<OrderItem> {
        vec![
            OrderItem {
                product_id: ProductId::new(4),
                name: "Isigny Croissant".to_owned(),
                quantity: 2,
                unit_price: Price::new("5.5".parse().unwrap()),
            },
            OrderItem {
                product_id: ProductId::new(2),
                name: "Noir Hazelnut Tart".to_owned(),
                quantity: 1,
                unit_price: Price::new("9".parse().unwrap()),
            },
        ]
    }

    fn contact() -> Contact {
        Contact {
            name: "Dewi".to_owned(),
            phone: "+62 812 3456".to_owned(),
            email: None,
            note: None,
        }
    }

    #[test]
    fn test_summary_lists_lines_and_total() {
        let summary = order_summary(&items(), &contact());
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines[0], "Halo Mirai, saya ingin memesan:");
        assert_eq!(lines[1], "- Isigny Croissant x2 (Rp 11.000)");
        assert_eq!(lines[2], "- Noir Hazelnut Tart x1 (Rp 9.000)");
        assert_eq!(lines[3], "Total: Rp 20.000");
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "Nama: Dewi");
        assert_eq!(lines[6], "Telepon: +62 812 3456");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_summary_includes_optional_contact_fields() {
        let mut c = contact();
        c.email = Some("dewi@example.com".to_owned());
        c.note = Some("Pickup at 4pm".to_owned());
        let summary = order_summary(&items(), &c);
        assert!(summary.contains("Email: dewi@example.com"));
        assert!(summary.contains("Catatan: Pickup at 4pm"));
    }

    #[test]
    fn test_handoff_link_encodes_summary() {
        let link = handoff_link("+62895404922012", "Halo Mirai\nTotal: Rp 1.000").unwrap();
        assert_eq!(link.host_str(), Some("wa.me"));
        assert_eq!(link.path(), "/+62895404922012");
        let text = link
            .query_pairs()
            .find(|(k, _)| k == "text")
            .map(|(_, v)| v.into_owned())
            .unwrap();
        assert_eq!(text, "Halo Mirai\nTotal: Rp 1.000");
    }
}
