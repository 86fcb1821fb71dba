//! Plain-text receipts for orders.

use crate::server::model::{
    cafe::CafeInfo,
    order::{Order, OrderType},
    payment::Payment,
};

const RULE: &str = "==================================================";
const WIDTH: usize = 50;

/// Receipt layouts served by the receipt endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptFormat {
    Full,
    Mini,
}

impl ReceiptFormat {
    /// Parses the `format` query value; absent means `Full`.
    pub fn parse(value: Option<&str>) -> Option<Self> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            None | Some("full") => Some(Self::Full),
            Some("mini") => Some(Self::Mini),
            Some(_) => None,
        }
    }
}

pub fn render(
    format: ReceiptFormat,
    cafe: &CafeInfo,
    order: &Order,
    payment: Option<&Payment>,
) -> String {
    match format {
        ReceiptFormat::Full => full(cafe, order, payment),
        ReceiptFormat::Mini => mini(cafe, order),
    }
}

/// Full receipt with cafe header, items, payment and customer sections.
pub fn full(cafe: &CafeInfo, order: &Order, payment: Option<&Payment>) -> String {
    let mut lines = vec![
        RULE.to_string(),
        centered(&cafe.name),
        centered(&cafe.address),
        centered(&format!("Tel: {}", cafe.phone)),
        RULE.to_string(),
        centered("STRUK PEMBAYARAN"),
        RULE.to_string(),
        format!("No. Order : {}", order.order_number),
        format!(
            "Tanggal   : {}",
            order.created_at.format("%d %B %Y, %H:%M WIB")
        ),
        "Kasir     : AI Assistant".to_string(),
        RULE.to_string(),
        centered("DETAIL PESANAN"),
        RULE.to_string(),
    ];

    for item in &order.items {
        lines.push(item.menu_name().to_string());
        lines.push(format!(
            "  {} x {} = {}",
            item.quantity,
            rupiah(item.unit_price),
            rupiah(item.total_price)
        ));
    }

    lines.push(RULE.to_string());
    lines.push(format!("TOTAL: {}", rupiah(order.total_amount)));
    lines.push(RULE.to_string());

    lines.push(centered("INFORMASI PEMBAYARAN"));
    lines.push(RULE.to_string());
    lines.push(format!("Metode    : {}", order.payment_method));
    lines.push(format!("Status    : {}", order.payment_status));
    if let Some(payment) = payment {
        lines.push(format!("Transaksi : {}", payment.transaction_id));
    }
    lines.push(RULE.to_string());

    lines.push(centered("INFORMASI PELANGGAN"));
    lines.push(RULE.to_string());
    lines.push(format!("Nama      : {}", order.customer_name));
    if let Some(phone) = order.customer_phone.as_deref().filter(|p| !p.is_empty()) {
        lines.push(format!("Telepon   : {}", phone));
    }
    match OrderType::parse(&order.order_type) {
        Some(OrderType::DineIn) => lines.push(format!(
            "Meja      : {}",
            order.table_number.as_deref().unwrap_or("-")
        )),
        Some(OrderType::Delivery) => lines.push(format!(
            "Alamat    : {}",
            order.delivery_address.as_deref().unwrap_or("-")
        )),
        Some(OrderType::TakeAway) => lines.push("Jenis     : Bawa Pulang".to_string()),
        None => {}
    }

    if let Some(notes) = order.notes.as_deref().filter(|n| !n.is_empty()) {
        lines.push(RULE.to_string());
        lines.push(centered("CATATAN"));
        lines.push(RULE.to_string());
        lines.push(notes.to_string());
    }

    lines.push(RULE.to_string());
    lines.push(centered("Terima kasih atas kunjungan Anda!"));
    lines.push(centered(&format!("Silakan datang kembali ke {}", cafe.name)));
    lines.push(RULE.to_string());

    lines.join("\n")
}

/// Short receipt for chat and mobile display.
pub fn mini(cafe: &CafeInfo, order: &Order) -> String {
    let mut out = format!(
        "**{}** - {}\nNo: {}\n\n",
        cafe.name,
        order.created_at.format("%d/%m %H:%M"),
        order.order_number
    );

    for item in &order.items {
        out.push_str(&format!(
            "- {} ({}x) = Rp {:.0}\n",
            item.menu_name(),
            item.quantity,
            item.total_price
        ));
    }

    out.push_str(&format!(
        "---\n**Total: Rp {:.0}**\n\nMetode: {}\nStatus: {}\n\nTerima kasih! ☕",
        order.total_amount, order.payment_method, order.payment_status
    ));

    out
}

/// Formats an amount as `Rp 25.000`, grouping thousands with dots.
pub fn rupiah(amount: f64) -> String {
    let whole = amount.round() as i64;
    let digits = whole.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if whole < 0 {
        format!("Rp -{}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}

fn centered(text: &str) -> String {
    format!("{:^width$}", text, width = WIDTH)
        .trim_end()
        .to_string()
}
