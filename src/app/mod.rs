mod event_handler;
mod event_loop;
mod state;

pub use event_loop::run;
pub use state::{AppState, FeedSession, SessionError};
