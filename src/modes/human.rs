use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval, interval_at};

use crate::game::{GameConfig, GameOverSignal, Phase, Session, StepResult, TurnResult};
use crate::input::{InputHandler, KeyAction, NameKey};
use crate::leaderboard::{Leaderboard, LeaderboardStore};
use crate::render::{Overlay, Renderer};

/// Which screen the front end is showing
#[derive(Debug, Clone, PartialEq, Eq)]
enum Screen {
    Welcome,
    Playing,
    NewHighScore { score: u32, name: String },
    GameOver,
    Leaderboard { highlight: Option<usize> },
}

/// What the event loop has to do with the tick timer after a state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerUpdate {
    Keep,
    Restart(Duration),
}

pub struct HumanMode {
    session: Session,
    leaderboard: Leaderboard,
    store: LeaderboardStore,
    renderer: Renderer,
    input_handler: InputHandler,
    screen: Screen,
    should_quit: bool,
}

impl HumanMode {
    /// Set up a session and load the leaderboard; an unreadable leaderboard
    /// file is logged and replaced by an empty board
    pub fn new(config: GameConfig, store: LeaderboardStore) -> Result<Self> {
        let session = Session::new(config).context("Invalid game configuration")?;

        let leaderboard = store.load().unwrap_or_else(|err| {
            tracing::warn!(error = ?err, "ignoring unreadable leaderboard");
            Leaderboard::new(session.config().leaderboard_capacity)
        });

        Ok(Self {
            session,
            leaderboard,
            store,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            screen: Screen::Welcome,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = new_tick_timer(self.session.tick_interval());

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            let update = tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => self.on_terminal_event(maybe_event),

                // Game logic tick, only while a game is running
                _ = tick_timer.tick(), if self.session.is_running() => {
                    self.on_tick()
                }

                // Render frame
                _ = render_timer.tick() => {
                    let snapshot = self.session.snapshot();
                    let overlay = self.overlay();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot, &overlay, &self.leaderboard);
                    }).context("Failed to draw frame")?;
                    TimerUpdate::Keep
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                    TimerUpdate::Keep
                }
            };

            if let TimerUpdate::Restart(period) = update {
                tick_timer = new_tick_timer(period);
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// A finished event stream means no more input can arrive, so quit
    fn on_terminal_event(&mut self, maybe_event: Option<io::Result<Event>>) -> TimerUpdate {
        match maybe_event {
            Some(Ok(event)) => self.handle_event(event),
            Some(Err(err)) => {
                tracing::warn!(error = ?err, "terminal event error");
                TimerUpdate::Keep
            }
            None => {
                tracing::info!("terminal event stream closed");
                self.should_quit = true;
                TimerUpdate::Keep
            }
        }
    }

    fn handle_event(&mut self, event: Event) -> TimerUpdate {
        match event {
            // Only process key press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            _ => TimerUpdate::Keep,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> TimerUpdate {
        if let Screen::NewHighScore { name, .. } = &self.screen {
            let name_key = self.input_handler.handle_name_key(key, name.chars().count());
            self.apply_name_key(name_key);
            return TimerUpdate::Keep;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Turn(direction) => match self.session.set_direction(direction) {
                TurnResult::Turned(step) => self.after_step(step),
                TurnResult::Ignored | TurnResult::Rejected | TurnResult::Unchanged => {
                    TimerUpdate::Keep
                }
            },
            KeyAction::Restart => self.start_game(),
            KeyAction::ShowLeaderboard => {
                if self.screen != Screen::Playing {
                    self.screen = Screen::Leaderboard { highlight: None };
                }
                TimerUpdate::Keep
            }
            KeyAction::Quit => {
                self.should_quit = true;
                TimerUpdate::Keep
            }
            KeyAction::None => TimerUpdate::Keep,
        }
    }

    fn apply_name_key(&mut self, name_key: NameKey) {
        match name_key {
            NameKey::Insert(c) => {
                if let Screen::NewHighScore { name, .. } = &mut self.screen {
                    name.push(c);
                }
            }
            NameKey::Backspace => {
                if let Screen::NewHighScore { name, .. } = &mut self.screen {
                    name.pop();
                }
            }
            NameKey::Submit => self.submit_high_score(),
            NameKey::Skip => self.screen = Screen::GameOver,
            NameKey::Quit => self.should_quit = true,
            NameKey::None => {}
        }
    }

    fn on_tick(&mut self) -> TimerUpdate {
        let step = self.session.tick();
        self.after_step(step)
    }

    fn after_step(&mut self, step: StepResult) -> TimerUpdate {
        match step {
            StepResult::Ate { interval } => TimerUpdate::Restart(interval),
            StepResult::Ended(_) => {
                self.finish_game();
                TimerUpdate::Keep
            }
            StepResult::Moved | StepResult::Ignored => TimerUpdate::Keep,
        }
    }

    fn start_game(&mut self) -> TimerUpdate {
        self.session.start_new_game();
        self.screen = Screen::Playing;
        TimerUpdate::Restart(self.session.tick_interval())
    }

    fn finish_game(&mut self) {
        self.screen = match self.session.game_over_signal(&self.leaderboard) {
            Some(GameOverSignal::NewHighScore { score }) => Screen::NewHighScore {
                score,
                name: String::new(),
            },
            Some(GameOverSignal::Final { .. }) | None => Screen::GameOver,
        };
    }

    fn submit_high_score(&mut self) {
        let Screen::NewHighScore { score, name } =
            std::mem::replace(&mut self.screen, Screen::GameOver)
        else {
            return;
        };

        let highlight = self.leaderboard.submit(&name, score);
        tracing::info!(score, rank = ?highlight, "high score submitted");

        if let Err(err) = self.store.save(&self.leaderboard) {
            tracing::warn!(error = ?err, "failed to save leaderboard");
        }

        self.screen = Screen::Leaderboard { highlight };
    }

    fn overlay(&self) -> Overlay<'_> {
        match &self.screen {
            Screen::Welcome => Overlay::Welcome,
            Screen::Playing => Overlay::None,
            Screen::NewHighScore { score, name } => Overlay::NewHighScore {
                score: *score,
                name: name.as_str(),
            },
            Screen::GameOver => match self.session.phase() {
                Phase::GameOver(reason) => Overlay::GameOver {
                    score: self.session.score(),
                    reason,
                },
                Phase::Idle | Phase::Running => Overlay::None,
            },
            Screen::Leaderboard { highlight } => Overlay::Leaderboard {
                highlight: *highlight,
            },
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Tick timer whose first tick fires one full period from now
fn new_tick_timer(period: Duration) -> Interval {
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Direction, EndReason};
    use crate::leaderboard::MAX_ENTRIES;
    use crossterm::event::{KeyCode, KeyModifiers};
    use tempfile::TempDir;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mode(config: GameConfig, dir: &TempDir) -> HumanMode {
        let store = LeaderboardStore::new(dir.path().join("leaderboard.json"), MAX_ENTRIES);
        HumanMode::new(config, store).unwrap()
    }

    /// 3x1 board: the only free cell for the first food is right of the head,
    /// so the snake eats once and then runs into the wall
    fn one_point_config() -> GameConfig {
        GameConfig {
            area_width: 60,
            area_height: 20,
            start_cell: Cell::new(1, 0),
            initial_snake_length: 2,
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_game_initialization() {
        let dir = TempDir::new().unwrap();
        let mode = mode(GameConfig::default(), &dir);
        assert_eq!(mode.screen, Screen::Welcome);
        assert_eq!(mode.session.phase(), Phase::Idle);
        assert!(mode.leaderboard.is_empty());
    }

    #[test]
    fn test_restart_starts_game_and_timer() {
        let dir = TempDir::new().unwrap();
        let mut mode = mode(GameConfig::default(), &dir);

        let update = mode.handle_key(press(KeyCode::Char(' ')));

        assert_eq!(update, TimerUpdate::Restart(Duration::from_millis(400)));
        assert_eq!(mode.screen, Screen::Playing);
        assert!(mode.session.is_running());
    }

    #[test]
    fn test_turn_key_moves_snake() {
        let dir = TempDir::new().unwrap();
        let mut mode = mode(GameConfig::default(), &dir);
        mode.handle_key(press(KeyCode::Char('r')));

        mode.handle_key(press(KeyCode::Down));
        assert_eq!(mode.session.direction(), Direction::Down);

        mode.handle_key(press(KeyCode::Up));
        assert_eq!(mode.session.direction(), Direction::Down);
    }

    #[test]
    fn test_zero_score_goes_straight_to_game_over() {
        let dir = TempDir::new().unwrap();
        let config = GameConfig {
            start_cell: Cell::new(19, 5),
            ..GameConfig::default()
        };
        let mut mode = mode(config, &dir);
        mode.handle_key(press(KeyCode::Char(' ')));

        mode.on_tick();

        assert_eq!(mode.screen, Screen::GameOver);
        assert!(matches!(
            mode.overlay(),
            Overlay::GameOver {
                score: 0,
                reason: EndReason::Wall
            }
        ));
    }

    #[test]
    fn test_high_score_flow_saves_entry() {
        let dir = TempDir::new().unwrap();
        let mut mode = mode(one_point_config(), &dir);
        mode.handle_key(press(KeyCode::Char(' ')));

        assert!(matches!(mode.on_tick(), TimerUpdate::Restart(_)));
        mode.on_tick();
        assert_eq!(
            mode.screen,
            Screen::NewHighScore {
                score: 1,
                name: String::new()
            }
        );

        // Restart letters are part of the name here
        for c in ['r', 'o', 'x', 'y'] {
            mode.handle_key(press(KeyCode::Char(c)));
        }
        mode.handle_key(press(KeyCode::Backspace));
        mode.handle_key(press(KeyCode::Enter));

        assert_eq!(mode.screen, Screen::Leaderboard { highlight: Some(0) });
        assert_eq!(mode.leaderboard.entries()[0].name, "rox");

        let saved = mode.store.load().unwrap();
        assert_eq!(saved.entries()[0].score, 1);
    }

    #[test]
    fn test_skip_name_entry() {
        let dir = TempDir::new().unwrap();
        let mut mode = mode(one_point_config(), &dir);
        mode.handle_key(press(KeyCode::Char(' ')));
        mode.on_tick();
        mode.on_tick();

        mode.handle_key(press(KeyCode::Esc));

        assert_eq!(mode.screen, Screen::GameOver);
        assert!(mode.leaderboard.is_empty());
        assert!(!mode.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_during_name_entry() {
        let dir = TempDir::new().unwrap();
        let mut mode = mode(one_point_config(), &dir);
        mode.handle_key(press(KeyCode::Char(' ')));
        mode.on_tick();
        mode.on_tick();
        assert!(matches!(mode.screen, Screen::NewHighScore { .. }));

        mode.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

        assert!(mode.should_quit);
        assert!(mode.leaderboard.is_empty());
    }

    #[test]
    fn test_closed_event_stream_quits() {
        let dir = TempDir::new().unwrap();
        let mut mode = mode(GameConfig::default(), &dir);

        let key = Event::Key(press(KeyCode::Char(' ')));
        assert_eq!(
            mode.on_terminal_event(Some(Ok(key))),
            TimerUpdate::Restart(Duration::from_millis(400))
        );
        assert!(!mode.should_quit);

        let err = io::Error::new(io::ErrorKind::Other, "read failed");
        assert_eq!(mode.on_terminal_event(Some(Err(err))), TimerUpdate::Keep);
        assert!(!mode.should_quit);

        assert_eq!(mode.on_terminal_event(None), TimerUpdate::Keep);
        assert!(mode.should_quit);
    }

    #[test]
    fn test_leaderboard_screen_only_outside_play() {
        let dir = TempDir::new().unwrap();
        let mut mode = mode(GameConfig::default(), &dir);

        mode.handle_key(press(KeyCode::Char('l')));
        assert_eq!(mode.screen, Screen::Leaderboard { highlight: None });

        mode.handle_key(press(KeyCode::Char(' ')));
        mode.handle_key(press(KeyCode::Char('l')));
        assert_eq!(mode.screen, Screen::Playing);
    }

    #[test]
    fn test_unreadable_leaderboard_starts_empty() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("leaderboard.json"), "{ broken").unwrap();

        let mode = mode(GameConfig::default(), &dir);
        assert!(mode.leaderboard.is_empty());
    }
}
