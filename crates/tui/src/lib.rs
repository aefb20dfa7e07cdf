//! Terminal adapter for the dashboard.
//!
//! Owns the alternate screen and the crossterm event stream, and paints one
//! frame per display tree received from the sampling loop. The loop dictates
//! the refresh cadence; this adapter never runs its own timer.

pub mod ui;

use std::io::stdout;
use std::sync::Arc;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use vitals_config::MonitorConfig;
use vitals_core::Result;
use vitals_render::DisplayTree;

/// Start the dashboard and block until a quit key or interrupt.
///
/// Propagates [`vitals_core::VitalsError::NoCollectors`] when discovery
/// finds nothing usable, before the terminal is touched.
pub async fn run(config: Arc<MonitorConfig>) -> Result<()> {
    let (mut rx, stop_tx) = vitals_monitor::spawn(config)?;

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = event_loop(&mut terminal, &mut rx).await;

    // Stop the sampler, then restore the terminal no matter how we got here.
    let _ = stop_tx.send(true);
    let _ = execute!(stdout(), LeaveAlternateScreen);
    let _ = disable_raw_mode();
    println!("Exiting monitor...");

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    rx: &mut mpsc::Receiver<DisplayTree>,
) -> Result<()> {
    let mut events = EventStream::new();
    let mut latest: Option<DisplayTree> = None;

    loop {
        tokio::select! {
            tree = rx.recv() => {
                match tree {
                    Some(tree) => {
                        terminal.draw(|frame| ui::draw(frame, &tree))?;
                        latest = Some(tree);
                    }
                    // Sampler ended on its own.
                    None => return Ok(()),
                }
            }
            event = events.next() => {
                match event {
                    Some(Ok(Event::Key(key))) if is_quit(&key) => {
                        tracing::debug!("quit requested");
                        return Ok(());
                    }
                    Some(Ok(Event::Resize(..))) => {
                        // Repaint the current batch; never resample early.
                        if let Some(tree) = &latest {
                            terminal.draw(|frame| ui::draw(frame, tree))?;
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => return Ok(()),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::debug!("interrupt received");
                return Ok(());
            }
        }
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn quit_keys() {
        assert!(is_quit(&press(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit(&press(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn other_keys_do_not_quit() {
        assert!(!is_quit(&press(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit(&press(KeyCode::Up, KeyModifiers::NONE)));
    }
}
