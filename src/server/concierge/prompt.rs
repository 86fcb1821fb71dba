//! Prompt text sent to the language model.

use crate::server::model::{cafe::CafeInfo, chat::ChatMessage, menu::Menu};

/// Menus listed in the prompt.
pub const PROMPT_MENU_LIMIT: usize = 10;

/// History lines quoted in the prompt.
pub const PROMPT_HISTORY_LIMIT: usize = 5;

pub const NEW_CONVERSATION: &str = "Mulai percakapan baru.";

pub fn system_prompt(cafe: &CafeInfo, menus: &[Menu]) -> String {
    let mut menu_text = String::from("MENU:\n");
    for menu in menus.iter().take(PROMPT_MENU_LIMIT) {
        menu_text.push_str(&format!(
            "- {} (Rp {:.0}): {}\n",
            menu.name,
            menu.price,
            menu.description.as_deref().unwrap_or_default()
        ));
    }

    format!(
        "AI Assistant untuk {name} - {phone}

{menu_text}
ATURAN:
- Respons singkat, jelas, ramah
- Fokus pada pemesanan dan rekomendasi
- Konfirmasi sebelum buat order
- Bahasa Indonesia alami

JENIS PESANAN:
- dine_in (makan di tempat)
- take_away (bawa pulang)
- delivery (pengantaran)

PEMBAYARAN:
- crypto (Bitcoin/Ethereum)
- cash (tunai)
- transfer (bank)

RESPONS JSON SAJA, tidak perlu penjelasan.",
        name = cafe.name,
        phone = cafe.phone,
    )
}

/// The last few history lines as `User:`/`AI:` transcript.
pub fn conversation_context(history: &[ChatMessage]) -> String {
    if history.is_empty() {
        return NEW_CONVERSATION.to_string();
    }

    let start = history.len().saturating_sub(PROMPT_HISTORY_LIMIT);
    history[start..]
        .iter()
        .map(|msg| {
            let role = if msg.is_ai { "AI" } else { "User" };
            format!("{}: {}\n", role, msg.message)
        })
        .collect()
}

pub fn full_prompt(
    cafe: &CafeInfo,
    menus: &[Menu],
    history: &[ChatMessage],
    message: &str,
) -> String {
    format!(
        "{system}

=== Riwayat Percakapan ===
{context}

=== Pesan User ===
{message}

=== Instruksi Respon ===
1. Berikan respons yang natural dan percakapan dalam bahasa Indonesia
2. Respons harus singkat, jelas, dan ramah
3. Jika user memesan, sebutkan nama menu, jumlah dan harga, lalu tanyakan konfirmasi
4. Balas dengan JSON:
   {{
     \"message\": \"pesan yang akan ditampilkan ke user\",
     \"intent\": \"greeting | order | inquiry | complaint | goodbye\",
     \"order_intent\": {{\"action\": \"create_order\", \"items\": [{{\"menu_id\": \"...\", \"name\": \"...\", \"quantity\": 1, \"price\": 0}}], \"order_type\": \"dine_in\"}} atau null,
     \"should_confirm\": true atau false
   }}",
        system = system_prompt(cafe, menus),
        context = conversation_context(history),
    )
}
