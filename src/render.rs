// src/render.rs
//! Markdown digest -> HTML email body.

use chrono::NaiveDate;
use pulldown_cmark::{html, Options, Parser};

use crate::synth::DigestDocument;

const EMAIL_STYLE: &str = r#"
    body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; background-color: #f4f4f9; padding: 20px; }
    .container { max-width: 600px; margin: 0 auto; background: #ffffff; border-radius: 12px; overflow: hidden; box-shadow: 0 4px 15px rgba(0,0,0,0.1); }
    .header { background: linear-gradient(135deg, #4facfe 0%, #00f2fe 100%); padding: 30px 20px; text-align: center; color: white; }
    .header h1 { margin: 0; font-size: 28px; letter-spacing: 1px; }
    .header p { margin: 5px 0 0; opacity: 0.9; font-size: 14px; }
    .content { padding: 30px; color: #333; line-height: 1.6; }
    h1, h2, h3 { color: #2c3e50; margin-top: 25px; border-bottom: 2px solid #f0f0f0; padding-bottom: 8px; }
    a { color: #007bff; text-decoration: none; font-weight: bold; }
    ul { padding-left: 20px; }
    li { margin-bottom: 10px; }
    .footer { background-color: #f8f9fa; padding: 15px; text-align: center; font-size: 12px; color: #888; border-top: 1px solid #eee; }
"#;

const FOOTER_TEXT: &str = "Wygenerowano automatycznie: Rust + Groq + OpenWeather";

/// CommonMark (+ tables, strikethrough) to an HTML fragment.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(markdown, opts);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Full HTML document for the email.
pub fn render_email(digest: &DigestDocument, date: NaiveDate) -> String {
    let content = markdown_to_html(digest.as_markdown());
    let date_line = date.format("%A, %d %B %Y");
    format!(
        r#"<html>
<head>
<meta charset="utf-8">
<style>{EMAIL_STYLE}</style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1>AI Daily Brief</h1>
      <p>{date_line}</p>
    </div>
    <div class="content">
{content}
    </div>
    <div class="footer">
      <p>{FOOTER_TEXT}</p>
    </div>
  </div>
</body>
</html>
"#
    )
}

pub fn subject_line(date: NaiveDate) -> String {
    format!("☕ Twoja Prasówka - {}", date.format("%d.%m"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()
    }

    #[test]
    fn subject_uses_day_and_month() {
        assert_eq!(subject_line(day()), "☕ Twoja Prasówka - 07.03");
    }

    #[test]
    fn header_carries_long_date() {
        let html = render_email(&DigestDocument::new("hi"), day());
        assert!(html.contains("<p>Friday, 07 March 2025</p>"), "{html}");
    }

    #[test]
    fn links_become_anchors() {
        let html = markdown_to_html("[Więcej >>](https://ex.test/a)");
        assert!(html.contains(r#"<a href="https://ex.test/a">Więcej &gt;&gt;</a>"#), "{html}");
    }
}
