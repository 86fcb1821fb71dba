//! Keyword rules that interpret free text when no structured reply is available.

use crate::server::model::{
    cafe::CafeInfo,
    chat::{ConciergeReply, OrderIntent, OrderIntentItem, ACTION_CREATE_ORDER},
    menu::Menu,
};

/// Menus suggested by the offline reply.
pub const OFFLINE_MENU_SUGGESTIONS: usize = 3;

const INTENT_RULES: [(&str, &[&str]); 5] = [
    ("greeting", &["halo", "hai", "selamat", "pagi", "siang", "sore", "malam"]),
    ("order", &["pesan", "mau", "saya ingin", "tolong", "buatkan"]),
    ("inquiry", &["apa", "menu", "kopi", "harga", "berapa"]),
    ("complaint", &["keluhan", "komplain", "tidak", "jelek", "salah"]),
    ("goodbye", &["terima kasih", "sampai jumpa", "dulu", "selamat tinggal"]),
];

const DEFAULT_INTENT: &str = "inquiry";

const CONFIRM_WORDS: [&str; 5] = ["benar", "apakah", "konfirmasi", "yakin", "sesuai"];
const ORDERING_WORDS: [&str; 2] = ["pesan", "mau"];

fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|word| text.contains(word))
}

/// Classifies the user's message; the first matching rule wins.
pub fn detect_intent(user_message: &str) -> &'static str {
    let text = user_message.to_lowercase();

    INTENT_RULES
        .iter()
        .find(|(_, words)| contains_any(&text, words))
        .map(|(intent, _)| *intent)
        .unwrap_or(DEFAULT_INTENT)
}

/// True when the reply asks for confirmation or the user is placing an order.
pub fn should_confirm(user_message: &str, reply: &str) -> bool {
    contains_any(&reply.to_lowercase(), &CONFIRM_WORDS)
        || contains_any(&user_message.to_lowercase(), &ORDERING_WORDS)
}

/// Builds an order from menu names mentioned in the message.
pub fn detect_order_intent(user_message: &str, menus: &[Menu]) -> Option<OrderIntent> {
    let text = user_message.to_lowercase();

    let quantity = if text.contains('2') || text.contains("dua") {
        2
    } else if text.contains('3') || text.contains("tiga") {
        3
    } else {
        1
    };

    let items: Vec<OrderIntentItem> = menus
        .iter()
        .filter(|menu| text.contains(&menu.name.to_lowercase()))
        .map(|menu| OrderIntentItem {
            menu_id: menu.id.clone(),
            name: menu.name.clone(),
            quantity,
            price: menu.price,
            notes: None,
        })
        .collect();

    if items.is_empty() {
        return None;
    }

    let order_type = if text.contains("bawa pulang") || text.contains("take away") {
        "take_away"
    } else if text.contains("antar") || text.contains("delivery") {
        "delivery"
    } else {
        "dine_in"
    };

    Some(OrderIntent {
        action: ACTION_CREATE_ORDER.to_string(),
        items,
        order_type: Some(order_type.to_string()),
        notes: None,
    })
}

/// Wraps a free-text model answer with keyword-derived intent and order.
pub fn interpret(user_message: &str, reply: String, menus: &[Menu]) -> ConciergeReply {
    ConciergeReply {
        intent: detect_intent(user_message).to_string(),
        should_confirm: should_confirm(user_message, &reply),
        order_intent: detect_order_intent(user_message, menus),
        message: reply,
    }
}

/// Removes a surrounding Markdown code fence, with or without a language tag.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    let inner = inner.strip_prefix("json").unwrap_or(inner);

    inner.trim()
}

/// Uses the model output as structured JSON when it parses, else interprets it as text.
pub fn parse_reply(user_message: &str, text: &str, menus: &[Menu]) -> ConciergeReply {
    match serde_json::from_str::<ConciergeReply>(strip_code_fences(text)) {
        Ok(reply) => reply,
        Err(_) => interpret(user_message, text.trim().to_string(), menus),
    }
}

/// Canned answer used when no language model is configured.
pub fn offline_reply(cafe: &CafeInfo, user_message: &str, menus: &[Menu]) -> ConciergeReply {
    let mut reply = format!(
        "Halo! Saya asisten {}. Saya bisa bantu lihat menu dan buat pesanan.",
        cafe.name
    );

    if !menus.is_empty() {
        reply.push_str(" Beberapa menu kami:");
        for menu in menus.iter().take(OFFLINE_MENU_SUGGESTIONS) {
            reply.push_str(&format!("\n- {} (Rp {:.0})", menu.name, menu.price));
        }
    }
    reply.push_str("\nSilakan sebutkan menu yang ingin dipesan.");

    interpret(user_message, reply, menus)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn menu(id: &str, name: &str, price: f64) -> Menu {
        Menu {
            id: id.to_string(),
            cafe_id: "cafe-1".to_string(),
            name: name.to_string(),
            description: None,
            category: "coffee".to_string(),
            price,
            image_url: None,
            is_available: true,
            ingredients: None,
            prep_time: 5,
            is_popular: false,
            is_recommended: false,
            calories: 0,
            allergens: None,
            customizable: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn menus() -> Vec<Menu> {
        vec![
            menu("m-1", "Espresso", 15_000.0),
            menu("m-2", "Cappuccino", 25_000.0),
            menu("m-3", "Croissant", 20_000.0),
            menu("m-4", "Orange Juice", 25_000.0),
        ]
    }

    #[test]
    fn intent_rules_apply_in_order() {
        assert_eq!(detect_intent("Halo kak"), "greeting");
        assert_eq!(detect_intent("Saya mau espresso"), "order");
        assert_eq!(detect_intent("Berapa harga latte?"), "inquiry");
        assert_eq!(detect_intent("Rasanya jelek"), "complaint");
        assert_eq!(detect_intent("Terima kasih"), "goodbye");
        assert_eq!(detect_intent("ok"), "inquiry");
    }

    #[test]
    fn confirmation_follows_reply_or_ordering_words() {
        assert!(should_confirm("ok", "Apakah pesanan sudah sesuai?"));
        assert!(should_confirm("Saya pesan satu", "Baik"));
        assert!(!should_confirm("Halo", "Selamat datang"));
    }

    #[test]
    fn order_intent_collects_mentioned_menus() {
        let intent = detect_order_intent("mau dua cappuccino dan croissant, bawa pulang", &menus())
            .unwrap();

        assert_eq!(intent.action, ACTION_CREATE_ORDER);
        assert_eq!(intent.order_type.as_deref(), Some("take_away"));
        let names: Vec<&str> = intent.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Cappuccino", "Croissant"]);
        assert!(intent.items.iter().all(|i| i.quantity == 2));
        assert_eq!(intent.items[0].menu_id, "m-2");
        assert_eq!(intent.items[0].price, 25_000.0);
    }

    #[test]
    fn order_intent_defaults() {
        let intent = detect_order_intent("espresso please", &menus()).unwrap();
        assert_eq!(intent.items[0].quantity, 1);
        assert_eq!(intent.order_type.as_deref(), Some("dine_in"));

        let delivery = detect_order_intent("tiga espresso diantar", &menus()).unwrap();
        assert_eq!(delivery.items[0].quantity, 3);
        assert_eq!(delivery.order_type.as_deref(), Some("delivery"));

        assert!(detect_order_intent("ada teh?", &menus()).is_none());
    }

    #[test]
    fn strips_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("  plain  "), "plain");
    }

    #[test]
    fn parses_structured_reply() {
        let text = "```json\n{\"message\":\"Siap!\",\"intent\":\"order\",\"order_intent\":null,\"should_confirm\":true}\n```";
        let reply = parse_reply("mau espresso", text, &menus());

        assert_eq!(reply.message, "Siap!");
        assert_eq!(reply.intent, "order");
        assert!(reply.order_intent.is_none());
        assert!(reply.should_confirm);
    }

    #[test]
    fn falls_back_to_keywords_for_free_text() {
        let reply = parse_reply("saya mau 2 espresso", "Baik, 2 Espresso ya.", &menus());

        assert_eq!(reply.message, "Baik, 2 Espresso ya.");
        assert_eq!(reply.intent, "order");
        assert!(reply.should_confirm);
        let intent = reply.order_intent.unwrap();
        assert_eq!(intent.items.len(), 1);
        assert_eq!(intent.items[0].quantity, 2);
    }

    #[test]
    fn offline_reply_lists_three_menus() {
        let cafe = CafeInfo {
            name: "SiipCoffee".to_string(),
            address: String::new(),
            phone: String::new(),
        };
        let reply = offline_reply(&cafe, "halo", &menus());

        assert!(reply.message.contains("asisten SiipCoffee"));
        assert!(reply.message.contains("- Espresso (Rp 15000)"));
        assert!(reply.message.contains("- Croissant (Rp 20000)"));
        assert!(!reply.message.contains("Orange Juice"));
        assert_eq!(reply.intent, "greeting");
        assert!(reply.order_intent.is_none());
    }
}
