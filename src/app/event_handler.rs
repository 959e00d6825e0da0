use super::state::{AppEvent, AppState};
use crate::store::RecordStore;

/// What the loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Redraw,
    Continue,
    Quit,
}

/// Apply one event to the app state.
pub async fn handle_event<S: RecordStore>(state: &mut AppState<S>, event: AppEvent) -> Flow {
    match event {
        AppEvent::Refresh => {
            state.session.reload(&state.feed).await;
            Flow::Redraw
        }
        AppEvent::LoadMore => {
            let added = state.session.load_more(&state.feed).await;
            log::info!("Loaded {added} more update(s)");
            Flow::Redraw
        }
        AppEvent::ToggleTheme => {
            let theme = state.preferences.toggle_theme();
            log::info!("Theme: {theme:?}");
            save_preferences(state);
            Flow::Redraw
        }
        AppEvent::ToggleLanguage => {
            let language = state.preferences.toggle_language();
            log::info!("Language: {language:?}");
            save_preferences(state);
            Flow::Redraw
        }
        AppEvent::Quit => Flow::Quit,
        AppEvent::Unknown(cmd) => {
            log::warn!("Unknown command: {cmd}");
            Flow::Continue
        }
    }
}

fn save_preferences<S>(state: &AppState<S>) {
    if let Err(e) = state.preferences.save() {
        log::warn!("Failed to save preferences: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::feed::tests::{feed, record};
    use crate::preferences::{Language, Preferences, Theme};
    use crate::store::memory::MemoryStore;

    fn state_in(dir: &tempfile::TempDir, rows: i64) -> AppState<MemoryStore> {
        let prefs = Preferences::load_from(&dir.path().join("preferences.json"));
        let rows = (1..=rows).map(|n| record(n, "Pope Updates")).collect();
        AppState::new(Config::default(), prefs, feed(rows))
    }

    #[tokio::test]
    async fn refresh_then_load_more() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir, 6);

        assert_eq!(handle_event(&mut state, AppEvent::Refresh).await, Flow::Redraw);
        assert_eq!(state.session.previous.len(), 4);
        assert_eq!(handle_event(&mut state, AppEvent::LoadMore).await, Flow::Redraw);
        assert_eq!(state.session.previous.len(), 5);
        assert!(!state.session.has_more);
    }

    #[tokio::test]
    async fn toggles_are_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir, 0);
        state.preferences.theme = Theme::Light;

        handle_event(&mut state, AppEvent::ToggleTheme).await;
        handle_event(&mut state, AppEvent::ToggleLanguage).await;

        let saved = Preferences::load_from(&dir.path().join("preferences.json"));
        assert_eq!(saved.theme, Theme::Dark);
        assert_eq!(saved.language, Language::Italian);
    }

    #[tokio::test]
    async fn quit_and_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir, 0);
        assert_eq!(handle_event(&mut state, AppEvent::Quit).await, Flow::Quit);
        assert_eq!(
            handle_event(&mut state, AppEvent::Unknown("x".into())).await,
            Flow::Continue
        );
        assert_eq!(state.feed.store().calls(), 0);
    }
}
