use std::fmt::Write;

use super::labels::{labels, Labels};
use crate::app::{FeedSession, SessionError};
use crate::preferences::{Preferences, Theme};
use crate::record::UpdateRecord;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

/// ANSI colors for one theme.
struct Palette {
    heading: &'static str,
    badge: &'static str,
    meta: &'static str,
    body: &'static str,
    error: &'static str,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            heading: "\x1b[31m",
            badge: "\x1b[41;97m",
            meta: "\x1b[90m",
            body: "\x1b[30m",
            error: "\x1b[31m",
        },
        Theme::Dark => Palette {
            heading: "\x1b[33m",
            badge: "\x1b[43;30m",
            meta: "\x1b[37m",
            body: "\x1b[97m",
            error: "\x1b[91m",
        },
    }
}

fn card(out: &mut String, record: &UpdateRecord, is_latest: bool, p: &Palette, l: &Labels) {
    let _ = write!(out, "{BOLD}{}{}{RESET}", p.heading, record.name);
    if is_latest {
        let _ = write!(out, " {}{}{RESET}", p.badge, l.latest_badge);
    }
    let _ = writeln!(
        out,
        "\n{}{} · {}{RESET}",
        p.meta,
        record.display_date(),
        record.display_time()
    );
    for paragraph in record.paragraphs() {
        let _ = writeln!(out, "{}{paragraph}{RESET}", p.body);
    }
    if !record.audio_url.is_empty() {
        let _ = writeln!(out, "{}{}: {}{RESET}", p.meta, l.audio, record.audio_url);
    }
    out.push('\n');
}

/// Render the whole feed screen for the current session.
pub fn render_session(session: &FeedSession, prefs: &Preferences) -> String {
    let p = palette(prefs.theme);
    let l = labels(prefs.language);
    let mut out = String::new();

    let _ = writeln!(out, "{BOLD}{}{}{RESET}\n", p.heading, l.latest_heading);
    if let Some(error) = session.error {
        let _ = writeln!(out, "{}{}{RESET}\n", p.error, error_text(error, l));
    }
    match &session.latest {
        Some(latest) => card(&mut out, latest, true, &p, l),
        None if session.is_loading => {
            let _ = writeln!(out, "{}{}{RESET}\n", p.meta, l.loading);
        }
        None => {
            let _ = writeln!(out, "{}{}{RESET}\n", p.body, l.no_latest);
        }
    }

    let _ = writeln!(out, "{BOLD}{}{}{RESET}\n", p.heading, l.previous_heading);
    if session.previous.is_empty() {
        let _ = writeln!(out, "{}{}{RESET}", p.meta, l.no_previous);
    } else {
        for record in &session.previous {
            card(&mut out, record, false, &p, l);
        }
        let footer = if session.has_more {
            l.load_more_hint
        } else {
            l.end_of_feed
        };
        let _ = writeln!(out, "{}{footer}{RESET}", p.meta);
    }
    let _ = writeln!(out, "\n{}{}{RESET}", p.meta, l.commands);
    out
}

fn error_text(error: SessionError, l: &Labels) -> &'static str {
    match error {
        SessionError::LoadFailed => l.load_failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::tests::record;
    use crate::preferences::Language;

    fn prefs(theme: Theme, language: Language) -> Preferences {
        let mut prefs = Preferences::default();
        prefs.theme = theme;
        prefs.language = language;
        prefs
    }

    #[test]
    fn renders_latest_and_previous_cards() {
        let mut session = FeedSession::new(5);
        session.is_loading = false;
        session.latest = Some(record(9, "Pope Updates"));
        session.previous = vec![record(8, "Pope Updates"), record(7, "Pope Updates")];
        session.has_more = false;

        let out = render_session(&session, &prefs(Theme::Light, Language::English));
        assert!(out.contains("Latest Update"));
        assert!(out.contains("LATEST"));
        assert!(out.contains("Update 9."));
        assert!(out.contains("Update 7."));
        assert!(out.contains("clip8.mp3"));
        assert!(out.contains("You have reached the oldest update."));
    }

    #[test]
    fn empty_feed_in_italian() {
        let mut session = FeedSession::new(5);
        session.is_loading = false;
        let out = render_session(&session, &prefs(Theme::Dark, Language::Italian));
        assert!(out.contains("Ultimo aggiornamento"));
        assert!(out.contains("Nessun aggiornamento disponibile al momento."));
        assert!(out.contains("Nessun aggiornamento precedente disponibile."));
        assert!(out.contains("\x1b[33m"));
    }

    #[test]
    fn load_failure_shows_generic_message() {
        let mut session = FeedSession::new(5);
        session.is_loading = false;
        session.error = Some(SessionError::LoadFailed);
        let out = render_session(&session, &prefs(Theme::Light, Language::English));
        assert!(out.contains("Failed to load updates. Please try again later."));
    }
}
