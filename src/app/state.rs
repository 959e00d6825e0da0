use crate::config::Config;
use crate::feed::UpdateFeed;
use crate::preferences::Preferences;
use crate::record::UpdateRecord;
use crate::store::RecordStore;

/// Events delivered to the feed loop.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Manual or periodic full reload
    Refresh,
    LoadMore,
    ToggleTheme,
    ToggleLanguage,
    Quit,
    Unknown(String),
}

impl AppEvent {
    /// Parse one line typed by the user.
    pub fn from_command(line: &str) -> Option<Self> {
        let cmd = line.trim().to_lowercase();
        let event = match cmd.as_str() {
            "" => return None,
            "more" | "m" => AppEvent::LoadMore,
            "refresh" | "r" => AppEvent::Refresh,
            "theme" | "t" => AppEvent::ToggleTheme,
            "lang" | "language" | "l" => AppEvent::ToggleLanguage,
            "quit" | "exit" | "q" => AppEvent::Quit,
            _ => AppEvent::Unknown(cmd),
        };
        Some(event)
    }
}

/// User-visible failure states. Only the latest-update load reports one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    LoadFailed,
}

/// What the reader currently shows: the latest update plus the older
/// updates accumulated by "load more".
#[derive(Debug, Clone)]
pub struct FeedSession {
    pub latest: Option<UpdateRecord>,
    pub previous: Vec<UpdateRecord>,
    pub page: usize,
    pub page_size: usize,
    pub has_more: bool,
    pub is_loading: bool,
    pub error: Option<SessionError>,
}

impl FeedSession {
    pub fn new(page_size: usize) -> Self {
        Self {
            latest: None,
            previous: Vec::new(),
            page: 0,
            page_size,
            has_more: true,
            is_loading: true,
            error: None,
        }
    }

    /// Reload the latest update and the first page of older ones.
    pub async fn reload<S: RecordStore>(&mut self, feed: &UpdateFeed<S>) {
        self.is_loading = true;
        self.error = None;

        match feed.try_fetch_latest().await {
            Ok(latest) => self.latest = latest,
            Err(e) => {
                log::error!("Error loading latest update: {e}");
                self.latest = None;
                self.error = Some(SessionError::LoadFailed);
            }
        }

        let first = feed.fetch_page(self.page_size, 0).await;
        self.has_more = first.has_more();
        self.previous = self.without_latest(first.records);
        self.page = 0;
        self.is_loading = false;
    }

    /// The latest update has its own card; keep it out of the archive.
    fn without_latest(&self, records: Vec<UpdateRecord>) -> Vec<UpdateRecord> {
        match &self.latest {
            Some(latest) => records.into_iter().filter(|r| r.id != latest.id).collect(),
            None => records,
        }
    }

    /// Append the next page. Returns how many updates were added.
    pub async fn load_more<S: RecordStore>(&mut self, feed: &UpdateFeed<S>) -> usize {
        if !self.has_more {
            log::debug!("No more pages to load");
            return 0;
        }
        let next = self.page + 1;
        let page = feed.fetch_page(self.page_size, next).await;
        if page.is_empty() {
            self.has_more = false;
            return 0;
        }
        self.has_more = page.has_more();
        self.page = next;
        let records = self.without_latest(page.records);
        let added = records.len();
        self.previous.extend(records);
        added
    }
}

/// Everything the feed loop owns.
pub struct AppState<S> {
    pub config: Config,
    pub preferences: Preferences,
    pub feed: UpdateFeed<S>,
    pub session: FeedSession,
}

impl<S: RecordStore> AppState<S> {
    pub fn new(config: Config, preferences: Preferences, feed: UpdateFeed<S>) -> Self {
        let session = FeedSession::new(config.page_size);
        Self {
            config,
            preferences,
            feed,
            session,
        }
    }
}
