use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};

use super::event_handler::{handle_event, Flow};
use super::state::{AppEvent, AppState};
use crate::store::RecordStore;
use crate::ui;

/// Send `Refresh` every `period`. Refreshes are not de-duplicated; a slow
/// reload may still be running when the next tick lands in the queue.
pub fn spawn_refresh_ticker(
    sender: async_channel::Sender<AppEvent>,
    period: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // The first tick completes immediately; the initial load is sent separately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            log::info!("Periodic refresh");
            if sender.send(AppEvent::Refresh).await.is_err() {
                log::debug!("Feed loop gone, stopping refresh ticker");
                break;
            }
        }
    })
}

/// Forward commands typed on stdin. EOF quits.
pub fn spawn_command_reader(sender: async_channel::Sender<AppEvent>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if let Some(event) = AppEvent::from_command(&line) {
                        if sender.send(event).await.is_err() {
                            break;
                        }
                    }
                }
                Ok(None) => {
                    let _ = sender.send(AppEvent::Quit).await;
                    break;
                }
                Err(e) => {
                    log::error!("Failed to read command: {e}");
                    let _ = sender.send(AppEvent::Quit).await;
                    break;
                }
            }
        }
    });
}

/// Drive the reader until the user quits.
pub async fn run<S: RecordStore>(mut state: AppState<S>) {
    let (sender, receiver) = async_channel::unbounded::<AppEvent>();

    let _ticker = spawn_refresh_ticker(sender.clone(), state.config.refresh_interval());
    spawn_command_reader(sender.clone());

    // Initial load
    let _ = sender.send(AppEvent::Refresh).await;
    drop(sender);

    println!("{}", ui::labels::labels(state.preferences.language).loading);

    while let Ok(event) = receiver.recv().await {
        log::debug!("Event: {event:?}");
        match handle_event(&mut state, event).await {
            Flow::Redraw => println!("{}", ui::render_session(&state.session, &state.preferences)),
            Flow::Continue => {
                println!("{}", ui::labels::labels(state.preferences.language).commands)
            }
            Flow::Quit => break,
        }
    }
    log::info!("Update feed stopped");
}
