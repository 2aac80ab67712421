// src/synth/prompt.rs
//! The newsletter contract sent to the generative service. Kept as named
//! constants so the wording can be reviewed and versioned apart from the call path.

use crate::aggregate::CompositePayload;

/// Bumped whenever `SYSTEM_ROLE` or `DIGEST_CONTRACT` changes.
pub const PROMPT_VERSION: &str = "digest-v1";

pub const SYSTEM_ROLE: &str = "Jesteś pomocnym i profesjonalnym asystentem AI.";

/// Link label every news item must end with.
pub const READ_MORE_LABEL: &str = "Więcej >>";

pub const WEATHER_PLACEHOLDER: &str = "{weather}";
pub const NEWS_PLACEHOLDER: &str = "{news}";

pub const DIGEST_CONTRACT: &str = r#"Jesteś redaktorem naczelnym nowoczesnego newslettera "AI Daily Brief".

TWOJE ZADANIE:
Przygotuj zwięzłe podsumowanie dla użytkownika w formacie Markdown.

STRUKTURA MAILA:
1. **🌤️ Sekcja Pogodowa**: Na samej górze. Na podstawie danych napisz krótko, jak się ubrać. Bądź miły.
2. **🚀 Przegląd Newsów**:
   - Wybierz 5-7 najważniejszych informacji z dostarczonej listy.
   - Ignoruj duplikaty i mało ważne clickbaity.
   - Podziel na kategorie (np. Świat, Tech, Polska).
   - Każdy news musi mieć Tytuł i 1 zdanie streszczenia.
   - **BARDZO WAŻNE**: Na końcu każdego newsa dodaj link w formacie Markdown: [Więcej >>](link).
3. **💡 Cytat dnia**: Wymyśl lub zacytuj inspirującą myśl (krótką).

DANE WEJŚCIOWE:
=== POGODA ===
{weather}

=== NEWSY ===
{news}
"#;

/// Fill the contract with the payload. Placeholders are replaced once each, so
/// braces inside feed text are left alone.
pub fn build_prompt(payload: &CompositePayload) -> String {
    let (head, rest) = DIGEST_CONTRACT
        .split_once(WEATHER_PLACEHOLDER)
        .unwrap_or((DIGEST_CONTRACT, ""));
    let (middle, tail) = rest.split_once(NEWS_PLACEHOLDER).unwrap_or((rest, ""));

    let mut out = String::with_capacity(
        DIGEST_CONTRACT.len() + payload.weather_text.len() + payload.news_text.len(),
    );
    out.push_str(head);
    out.push_str(payload.weather_text.trim_end());
    out.push_str(middle);
    out.push_str(payload.news_text.trim_end());
    out.push_str(tail);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> CompositePayload {
        CompositePayload {
            weather_text: "MIASTO: Gdańsk\nTEMP: 3.0°C".into(),
            news_text: "TYTUŁ: A {news}\nOPIS: x\nLINK: https://ex.test\n---\n".into(),
        }
    }

    #[test]
    fn contract_has_each_placeholder_once() {
        assert_eq!(DIGEST_CONTRACT.matches(WEATHER_PLACEHOLDER).count(), 1);
        assert_eq!(DIGEST_CONTRACT.matches(NEWS_PLACEHOLDER).count(), 1);
        assert!(DIGEST_CONTRACT.find(WEATHER_PLACEHOLDER) < DIGEST_CONTRACT.find(NEWS_PLACEHOLDER));
    }

    #[test]
    fn contract_demands_the_three_sections() {
        assert!(DIGEST_CONTRACT.contains("Sekcja Pogodowa"));
        assert!(DIGEST_CONTRACT.contains("5-7"));
        assert!(DIGEST_CONTRACT.contains(&format!("[{READ_MORE_LABEL}](link)")));
        assert!(DIGEST_CONTRACT.contains("Cytat dnia"));
    }

    #[test]
    fn prompt_embeds_both_sections_under_labels() {
        let p = build_prompt(&payload());
        let w = p.find("=== POGODA ===\nMIASTO: Gdańsk").unwrap();
        let n = p.find("=== NEWSY ===\nTYTUŁ: A").unwrap();
        assert!(w < n);
        assert!(!p.contains(WEATHER_PLACEHOLDER));
    }

    #[test]
    fn braces_in_feed_text_survive() {
        let p = build_prompt(&payload());
        assert!(p.contains("TYTUŁ: A {news}"));
    }
}
