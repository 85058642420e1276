mod component;
mod keymap;
mod pages;

use std::{
    io::{self, Stdout},
    panic,
    time::Duration,
};

use crate::{
    core::{Action, Event, Key, Outcome},
    model::Model,
    termination::Interrupted,
    update::update,
};
use anyhow::Context;
use crossterm::{
    event::{Event as TerminalEvent, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use pages::AppRouter;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{Receiver, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

use self::component::ComponentRender;

const RENDERING_TICK_RATE: Duration = Duration::from_millis(120);

pub struct App {
    model: Model,
    router: AppRouter,
    action_tx: UnboundedSender<Action>,
    outcome_rx: UnboundedReceiver<Outcome>,
    terminator_rx: Receiver<Interrupted>,
}

impl App {
    pub fn new(
        model: Model,
        action_tx: UnboundedSender<Action>,
        outcome_rx: UnboundedReceiver<Outcome>,
        terminator_rx: Receiver<Interrupted>,
    ) -> Self {
        Self {
            model,
            router: AppRouter,
            action_tx,
            outcome_rx,
            terminator_rx,
        }
    }

    fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
        let mut stdout = io::stdout();

        enable_raw_mode()?;

        execute!(stdout, EnterAlternateScreen)?;

        Ok(Terminal::new(CrosstermBackend::new(stdout))?)
    }

    fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
        disable_raw_mode()?;

        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

        Ok(terminal.show_cursor()?)
    }

    /// Leaves the terminal usable if the UI panics mid-frame.
    fn install_panic_hook() {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            previous(info);
        }));
    }

    pub async fn run(self) -> anyhow::Result<()> {
        Self::install_panic_hook();
        let mut terminal = Self::setup_terminal().context("could not set up the terminal")?;

        let result = self.event_loop(&mut terminal).await;

        Self::restore_terminal(&mut terminal).context("could not restore the terminal")?;
        result
    }

    async fn event_loop(
        self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<()> {
        let App {
            mut model,
            router,
            action_tx,
            mut outcome_rx,
            mut terminator_rx,
        } = self;

        let mut ticker = tokio::time::interval(RENDERING_TICK_RATE);
        let mut crossterm_events = EventStream::new();

        terminal
            .draw(|frame| router.render(frame, &model))
            .context("could not render to the terminal")?;

        loop {
            let event = tokio::select! {
                _ = ticker.tick() => Some(Event::Tick),
                _ = terminator_rx.recv() => Some(Event::Key(Key::Quit)),
                maybe_event = crossterm_events.next() => match maybe_event {
                    Some(Ok(TerminalEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                        keymap::key_for(key, model.input_mode()).map(Event::Key)
                    }
                    Some(Ok(TerminalEvent::Resize(..))) => Some(Event::Resize),
                    Some(Err(err)) => {
                        warn!(%err, "could not read terminal event");
                        None
                    }
                    None => Some(Event::Key(Key::Quit)),
                    _ => None,
                },
                Some(outcome) = outcome_rx.recv() => {
                    if outcome == Outcome::Quit {
                        break;
                    }
                    Some(Event::Completed(outcome))
                }
            };

            let Some(event) = event else {
                continue;
            };
            if event != Event::Tick {
                debug!(?event, view = ?model.current_view, "dispatching");
            }

            let (next, action) = update(model, event);
            model = next;

            if let Some(action) = action {
                let quit = action == Action::Quit;
                if action_tx.send(action).is_err() && !quit {
                    error!("executor stopped, shutting down");
                    break;
                }
                if quit {
                    info!("quitting");
                    break;
                }
            }

            terminal
                .draw(|frame| router.render(frame, &model))
                .context("could not render to the terminal")?;
        }

        Ok(())
    }
}
