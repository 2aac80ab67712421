// src/synth/validate.rs
//! Structural check of a generated digest. Findings are advisory; the
//! document is delivered as-is.

use once_cell::sync::OnceCell;
use regex::Regex;

use super::prompt::READ_MORE_LABEL;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DigestIssue {
    MissingWeatherSection,
    NoReadMoreLinks,
    NewsCountOutOfRange { found: usize },
    MissingQuote,
}

/// Links in the `[Więcej >>](url)` form.
pub fn read_more_links(markdown: &str) -> Vec<&str> {
    static RE: OnceCell<Regex> = OnceCell::new();
    let re = RE.get_or_init(|| {
        Regex::new(&format!(r"\[{}\]\(([^)\s]+)\)", regex::escape(READ_MORE_LABEL))).unwrap()
    });
    re.captures_iter(markdown)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect()
}

pub fn check_digest(markdown: &str) -> Vec<DigestIssue> {
    let lower = markdown.to_lowercase();
    let mut issues = Vec::new();

    if !lower.contains("pogod") {
        issues.push(DigestIssue::MissingWeatherSection);
    }

    let links = read_more_links(markdown).len();
    if links == 0 {
        issues.push(DigestIssue::NoReadMoreLinks);
    } else if !(5..=7).contains(&links) {
        issues.push(DigestIssue::NewsCountOutOfRange { found: links });
    }

    if !lower.contains("cytat") {
        issues.push(DigestIssue::MissingQuote);
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digest(n_links: usize) -> String {
        let mut s = String::from("## 🌤️ Sekcja Pogodowa\nWeź kurtkę.\n\n## 🚀 Przegląd Newsów\n");
        for i in 0..n_links {
            s.push_str(&format!("- **News {i}** Zdanie. [Więcej >>](https://ex.test/{i})\n"));
        }
        s.push_str("\n## 💡 Cytat dnia\n> Carpe diem.\n");
        s
    }

    #[test]
    fn well_formed_digest_has_no_issues() {
        assert!(check_digest(&digest(6)).is_empty());
    }

    #[test]
    fn extracts_link_targets() {
        assert_eq!(
            read_more_links("a [Więcej >>](https://x.test/1) b [Więcej >>](https://x.test/2)"),
            vec!["https://x.test/1", "https://x.test/2"]
        );
    }

    #[test]
    fn too_few_items_are_reported() {
        assert_eq!(
            check_digest(&digest(3)),
            vec![DigestIssue::NewsCountOutOfRange { found: 3 }]
        );
    }

    #[test]
    fn bare_text_reports_everything() {
        let issues = check_digest("hello");
        assert!(issues.contains(&DigestIssue::MissingWeatherSection));
        assert!(issues.contains(&DigestIssue::NoReadMoreLinks));
        assert!(issues.contains(&DigestIssue::MissingQuote));
    }
}
