//! Render a Markdown digest file into the email HTML and print it (no sending).
//!
//! Usage: `render_preview path/to/digest.md > preview.html`

use anyhow::{Context, Result};
use chrono::Local;
use daily_brief::render::{render_email, subject_line};
use daily_brief::synth::validate::check_digest;
use daily_brief::DigestDocument;

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).with_writer(std::io::stderr).init();

    let path = std::env::args()
        .nth(1)
        .context("usage: render_preview <digest.md>")?;
    let markdown =
        std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;

    for issue in check_digest(&markdown) {
        tracing::warn!(?issue, "structure check");
    }

    let today = Local::now().date_naive();
    tracing::info!(subject = %subject_line(today), "rendered preview");
    println!("{}", render_email(&DigestDocument::new(markdown), today));
    Ok(())
}
