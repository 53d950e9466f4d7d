//! Shell controller: the state machine driving the five screens.

use std::sync::Arc;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::api::{ScoreSink, WordSource};
use crate::config::ClientConfig;
use crate::routes::Route;
use crate::shell::screen::{AppContext, Screen, ScreenTransition};
use crate::shell::screens::{
    AboutScreen, GameScreen, HomeScreen, LeaderboardScreen, ManageWordsScreen,
};
use crate::shell::widgets::{Banner, Notice, render_loading, render_navbar};
use crate::tick::TickEvent;

/// Active screen in the shell state machine.
#[derive(Debug)]
pub enum ActiveScreen {
    /// Setup screen.
    Home(HomeScreen),
    /// A running game.
    Game(GameScreen),
    /// Ranked scores.
    Leaderboard(LeaderboardScreen),
    /// Word catalog administration.
    ManageWords(ManageWordsScreen),
    /// Project description.
    About(AboutScreen),
}

impl ActiveScreen {
    fn as_screen(&self) -> &dyn Screen {
        match self {
            Self::Home(s) => s,
            Self::Game(s) => s,
            Self::Leaderboard(s) => s,
            Self::ManageWords(s) => s,
            Self::About(s) => s,
        }
    }

    fn as_screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            Self::Home(s) => s,
            Self::Game(s) => s,
            Self::Leaderboard(s) => s,
            Self::ManageWords(s) => s,
            Self::About(s) => s,
        }
    }
}

/// What the body area currently shows.
enum Body<'a> {
    Screen(&'a ActiveScreen),
    Loading,
}

/// Controller that owns the banner, the tick channel, and the current screen.
///
/// Call [`AppController::run`] to start the event loop.
pub struct AppController {
    ctx: AppContext,
    ticks: UnboundedReceiver<TickEvent>,
    banner: Banner,
    route: Route,
}

impl std::fmt::Debug for AppController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppController")
            .field("route", &self.route)
            .field("banner", &self.banner)
            .finish_non_exhaustive()
    }
}

impl AppController {
    /// Creates a controller around the backend collaborators.
    #[instrument(skip(words, scores, config))]
    pub fn new(
        words: Arc<dyn WordSource>,
        scores: Arc<dyn ScoreSink>,
        config: ClientConfig,
    ) -> Self {
        info!(server_url = %config.server_url(), "Creating AppController");
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            ctx: AppContext::new(words, scores, config, tx),
            ticks: rx,
            banner: Banner::default(),
            route: Route::Home,
        }
    }

    /// Runs the event loop at `initial` until the user quits.
    #[instrument(skip(self, terminal))]
    pub async fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        initial: Route,
    ) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        info!(route = %initial, "Starting shell event loop");
        let mut screen = self.open(terminal, initial, None).await?;

        loop {
            self.draw(terminal, Body::Screen(&screen))?;

            while let Ok(tick) = self.ticks.try_recv() {
                screen.as_screen_mut().on_tick(tick);
            }

            let settled = screen
                .as_screen_mut()
                .settle(&self.ctx, &mut self.banner)
                .await;
            if !matches!(settled, ScreenTransition::Stay) {
                screen = match self.apply_transition(terminal, settled, screen).await? {
                    Some(next) => next,
                    None => break,
                };
                continue;
            }

            // Poll with a short timeout so ticks keep redrawing the clock.
            if event::poll(Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
            {
                // Skip key release events (crossterm fires both press and release).
                if key.kind == KeyEventKind::Release {
                    continue;
                }

                let transition = match self.global_key(key) {
                    Some(transition) => transition,
                    None => {
                        screen
                            .as_screen_mut()
                            .handle_key(key, &self.ctx, &mut self.banner)
                            .await
                    }
                };

                screen = match self.apply_transition(terminal, transition, screen).await? {
                    Some(next) => next,
                    None => break,
                };
            }
        }

        info!("Shell quitting");
        Ok(())
    }

    /// Keys handled before the screen sees them.
    fn global_key(&mut self, key: KeyEvent) -> Option<ScreenTransition> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(ScreenTransition::Quit)
            }
            KeyCode::F(1) => Some(ScreenTransition::to(Route::Home)),
            KeyCode::F(2) => Some(ScreenTransition::to(Route::Leaderboard)),
            KeyCode::F(3) => Some(ScreenTransition::to(Route::ManageWords)),
            KeyCode::F(4) => Some(ScreenTransition::to(Route::About)),
            KeyCode::Esc if self.banner.is_visible() => {
                self.banner.dismiss();
                Some(ScreenTransition::Stay)
            }
            _ => None,
        }
    }

    /// Applies a transition, returning the next screen or `None` to quit.
    #[instrument(skip(self, terminal, current))]
    async fn apply_transition<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        transition: ScreenTransition,
        mut current: ActiveScreen,
    ) -> anyhow::Result<Option<ActiveScreen>>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        match transition {
            ScreenTransition::Stay => Ok(Some(current)),
            ScreenTransition::Navigate { route, notice } => {
                debug!(route = %route, "Applying navigation");
                current.as_screen_mut().leave();
                drop(current);
                let next = self.open(terminal, route, notice).await?;
                Ok(Some(next))
            }
            ScreenTransition::Quit => {
                current.as_screen_mut().leave();
                Ok(None)
            }
        }
    }

    /// Draws the loading view, then builds the screen for `route`.
    #[instrument(skip(self, terminal, notice))]
    async fn open<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        route: Route,
        notice: Option<Notice>,
    ) -> anyhow::Result<ActiveScreen>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        self.banner.dismiss();
        self.route = route.clone();
        self.draw(terminal, Body::Loading)?;
        Ok(self.open_route(route, notice).await)
    }

    /// Builds the screen for `route` and shows `notice` on arrival.
    ///
    /// A game whose challenge cannot be fetched opens Home instead, keeping the
    /// nickname, with the failure on the banner. The arrival notice is shown
    /// after the screen has loaded so a load failure never hides it.
    #[instrument(skip(self, notice))]
    pub async fn open_route(&mut self, route: Route, notice: Option<Notice>) -> ActiveScreen {
        self.banner.dismiss();
        self.route = route.clone();

        let screen = match route {
            Route::Home => ActiveScreen::Home(HomeScreen::load(&self.ctx, &mut self.banner, "").await),
            Route::Game(setup) => {
                let nickname = setup.nickname().clone();
                match GameScreen::start(&self.ctx, setup).await {
                    Ok(game) => ActiveScreen::Game(game),
                    Err(e) => {
                        warn!(error = %e, "Could not start game, returning home");
                        self.route = Route::Home;
                        let home = HomeScreen::load(&self.ctx, &mut self.banner, &nickname).await;
                        self.banner.prepend(Notice::error(e.message));
                        ActiveScreen::Home(home)
                    }
                }
            }
            Route::Leaderboard => {
                ActiveScreen::Leaderboard(LeaderboardScreen::load(&self.ctx, &mut self.banner).await)
            }
            Route::ManageWords => {
                ActiveScreen::ManageWords(ManageWordsScreen::load(&self.ctx, &mut self.banner).await)
            }
            Route::About => ActiveScreen::About(AboutScreen),
        };
        if let Some(notice) = notice {
            self.banner.prepend(notice);
        }
        info!(route = %self.route, "Screen opened");
        screen
    }

    /// The message banner shared by every screen.
    pub fn banner(&self) -> &Banner {
        &self.banner
    }

    /// The route of the screen currently open.
    pub fn route(&self) -> &Route {
        &self.route
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>, body: Body<'_>) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        terminal.draw(|f| self.render(f, &body))?;
        Ok(())
    }

    fn render(&self, frame: &mut Frame, body: &Body<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(self.banner.height()),
                Constraint::Min(0),
            ])
            .split(frame.area());

        render_navbar(frame, chunks[0], &self.route);
        self.banner.render(frame, chunks[1]);
        let area: Rect = chunks[2];
        match body {
            Body::Screen(screen) => screen.as_screen().render(frame, area),
            Body::Loading => render_loading(frame, area, &self.route),
        }
    }
}
