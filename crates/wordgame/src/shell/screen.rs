//! Screen trait, shared context, and transition type for the shell state machine.

use std::sync::Arc;

use async_trait::async_trait;
use crossterm::event::KeyEvent;
use derive_new::new;
use ratatui::{Frame, layout::Rect};
use tokio::sync::mpsc::UnboundedSender;

use crate::api::{ScoreSink, WordSource};
use crate::config::ClientConfig;
use crate::routes::Route;
use crate::shell::widgets::{Banner, Notice};
use crate::tick::TickEvent;

/// Collaborators and settings every screen may use.
#[derive(Clone, new)]
pub struct AppContext {
    /// Word source for challenges and catalog administration.
    pub words: Arc<dyn WordSource>,
    /// Score sink for submissions and the leaderboard.
    pub scores: Arc<dyn ScoreSink>,
    /// Client settings.
    pub config: ClientConfig,
    /// Where session ticks are delivered.
    pub ticks: UnboundedSender<TickEvent>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// The result of handling an input event on a screen.
#[derive(Debug, Clone)]
pub enum ScreenTransition {
    /// Stay on the current screen.
    Stay,
    /// Open another view, optionally carrying a message for its banner.
    Navigate {
        /// View to open.
        route: Route,
        /// Message shown once the view is open.
        notice: Option<Notice>,
    },
    /// Exit the application.
    Quit,
}

impl ScreenTransition {
    /// Navigation without a message.
    pub fn to(route: Route) -> Self {
        Self::Navigate {
            route,
            notice: None,
        }
    }

    /// Navigation that shows `notice` on arrival.
    pub fn to_with(route: Route, notice: Notice) -> Self {
        Self::Navigate {
            route,
            notice: Some(notice),
        }
    }
}

/// Implemented by each of the five views.
///
/// Screens own their state, render into the body area below the navigation
/// bar and banner, and handle keys the controller does not intercept.
#[async_trait]
pub trait Screen: Send {
    /// Renders the screen body.
    fn render(&self, frame: &mut Frame, area: Rect);

    /// Handles a key event and returns the resulting transition.
    async fn handle_key(
        &mut self,
        key: KeyEvent,
        ctx: &AppContext,
        banner: &mut Banner,
    ) -> ScreenTransition;

    /// Receives a session tick.
    fn on_tick(&mut self, _event: TickEvent) {}

    /// Runs deferred work after the latest state has been drawn.
    async fn settle(&mut self, _ctx: &AppContext, _banner: &mut Banner) -> ScreenTransition {
        ScreenTransition::Stay
    }

    /// Called before the controller replaces this screen.
    fn leave(&mut self) {}
}
