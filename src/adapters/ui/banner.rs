//! TRIP WINDOWS banner, shaded left to right like a shoreline: deep water, lagoon, sand.

use crossterm::QueueableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{self, Write};

const BANNER_TEXT: &str = "TRIP WINDOWS";

/// Palette stops, sampled evenly across the banner width.
const SHORELINE: [[u8; 3]; 3] = [
    [0x0a, 0x2e, 0x4d], // deep water
    [0x62, 0xb6, 0xcb], // lagoon
    [0xf2, 0xd0, 0x9c], // sand
];

/// Color for column `col` of a `width`-wide banner.
fn shade(col: usize, width: usize) -> [u8; 3] {
    let span = width.saturating_sub(1).max(1);
    let segments = SHORELINE.len() - 1;
    // Position along the palette in 1/span steps, kept in integers.
    let pos = col.min(span) * segments;
    let idx = (pos / span).min(segments - 1);
    let rem = pos - idx * span;
    let (from, to) = (SHORELINE[idx], SHORELINE[idx + 1]);
    let mut out = [0u8; 3];
    for (c, slot) in out.iter_mut().enumerate() {
        let (a, b) = (i64::from(from[c]), i64::from(to[c]));
        let v = a + (b - a) * rem as i64 / span as i64;
        *slot = v.clamp(0, 255) as u8;
    }
    out
}

fn banner_art() -> String {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert(BANNER_TEXT).map(|figure| figure.to_string()))
        .unwrap_or_else(|| format!("{}\n", BANNER_TEXT))
}

fn write_banner(out: &mut impl Write, art: &str) -> io::Result<()> {
    let width = art.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    for line in art.lines().filter(|l| !l.trim().is_empty()) {
        for (col, ch) in line.chars().enumerate() {
            if ch != ' ' {
                let [r, g, b] = shade(col, width);
                out.queue(SetForegroundColor(Color::Rgb { r, g, b }))?;
            }
            out.queue(Print(ch))?;
        }
        out.queue(ResetColor)?.queue(Print("\r\n"))?;
    }
    let [r, g, b] = SHORELINE[SHORELINE.len() - 1];
    out.queue(SetForegroundColor(Color::Rgb { r, g, b }))?
        .queue(Print(format!(
            "v{} · group trip availability\r\n",
            env!("CARGO_PKG_VERSION")
        )))?
        .queue(ResetColor)?;
    out.flush()
}

/// Prints the welcome banner. Write errors are ignored.
pub fn print_welcome() {
    let stdout = io::stdout();
    let _ = write_banner(&mut stdout.lock(), &banner_art());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shade_hits_every_stop() {
        assert_eq!(shade(0, 21), SHORELINE[0]);
        assert_eq!(shade(10, 21), SHORELINE[1]);
        assert_eq!(shade(20, 21), SHORELINE[2]);
        assert_eq!(shade(99, 21), SHORELINE[2]);
        assert_eq!(shade(0, 0), SHORELINE[0]);
    }

    #[test]
    fn banner_keeps_the_art_text() {
        let art = banner_art();
        assert!(!art.trim().is_empty());

        let mut buf = Vec::new();
        write_banner(&mut buf, "AB\n").unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains('A') && text.contains('B'));
        assert!(text.contains("group trip availability"));
    }
}
