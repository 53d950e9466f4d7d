//! Screen behavior driven by key events against a fake backend.

mod common;

use std::sync::Arc;

use common::{FakeBackend, entry};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use wordgame::{
    ActiveScreen, AppContext, AppController, Banner, ClientConfig, GameScreen, HomeScreen,
    LeaderboardScreen, ManageWordsScreen, Notice, NoticeLevel, Route, Screen, ScreenTransition,
    TickEvent,
};
use wordgame_core::SessionSetup;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

async fn type_text(screen: &mut dyn Screen, ctx: &AppContext, banner: &mut Banner, text: &str) {
    for c in text.chars() {
        screen.handle_key(key(KeyCode::Char(c)), ctx, banner).await;
    }
}

fn context(backend: Arc<FakeBackend>) -> (AppContext, UnboundedReceiver<TickEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let config = ClientConfig::default().with_win_delay_ms(0);
    (AppContext::new(backend.clone(), backend, config, tx), rx)
}

#[tokio::test]
async fn test_home_requires_nickname_and_category() {
    let backend = Arc::new(FakeBackend::with_words(vec![entry("fruit", "apple", "red")]));
    let (ctx, _ticks) = context(backend);
    let mut banner = Banner::default();
    let mut home = HomeScreen::load(&ctx, &mut banner, "").await;
    assert_eq!(home.categories(), &vec!["fruit".to_string()]);

    let transition = home.handle_key(key(KeyCode::Enter), &ctx, &mut banner).await;
    assert!(matches!(transition, ScreenTransition::Stay));
    let notice = banner.notice().unwrap();
    assert_eq!(notice.text, "Please enter a nickname and select a category.");

    type_text(&mut home, &ctx, &mut banner, "ann").await;
    home.handle_key(key(KeyCode::Down), &ctx, &mut banner).await;
    let transition = home.handle_key(key(KeyCode::Enter), &ctx, &mut banner).await;
    match transition {
        ScreenTransition::Navigate { route, .. } => {
            assert_eq!(route, Route::Game(SessionSetup::new("ann", "fruit").unwrap()));
        }
        other => panic!("unexpected transition: {:?}", other),
    }
}

#[tokio::test]
async fn test_game_hint_and_win_lead_to_leaderboard() {
    let backend = Arc::new(FakeBackend::with_words(vec![entry("fruit", "kiwi", "green inside")]));
    let (ctx, _ticks) = context(backend.clone());
    let mut banner = Banner::default();
    let setup = SessionSetup::new("ann", "fruit").unwrap();
    let mut game = GameScreen::start(&ctx, setup).await.unwrap();

    game.handle_key(key(KeyCode::Tab), &ctx, &mut banner).await;
    let notice = banner.notice().unwrap();
    assert_eq!(notice.level, NoticeLevel::Info);
    assert_eq!(notice.text, "Hint: green inside");

    type_text(&mut game, &ctx, &mut banner, "kiwi").await;
    assert!(matches!(game.settle(&ctx, &mut banner).await, ScreenTransition::Stay));
    game.handle_key(key(KeyCode::Enter), &ctx, &mut banner).await;
    assert_eq!(game.active().session().revealed_display(), "k i w i");

    match game.settle(&ctx, &mut banner).await {
        ScreenTransition::Navigate { route, notice } => {
            assert_eq!(route, Route::Leaderboard);
            assert!(notice.is_none());
        }
        other => panic!("unexpected transition: {:?}", other),
    }
    let scores = backend.stored_scores();
    assert_eq!(scores.len(), 1);
    assert!(*scores[0].used_hint());
}

#[tokio::test]
async fn test_game_escape_returns_home_and_stops_tick() {
    let backend = Arc::new(FakeBackend::with_words(vec![entry("fruit", "kiwi", "green")]));
    let (ctx, _ticks) = context(backend);
    let mut banner = Banner::default();
    let mut game = GameScreen::start(&ctx, SessionSetup::new("ann", "fruit").unwrap())
        .await
        .unwrap();
    assert!(game.active().is_ticking());

    let transition = game.handle_key(key(KeyCode::Esc), &ctx, &mut banner).await;
    assert!(matches!(
        transition,
        ScreenTransition::Navigate {
            route: Route::Home,
            ..
        }
    ));
    assert!(!game.active().is_ticking());
}

#[tokio::test]
async fn test_failed_submission_warns_on_leaderboard() {
    let backend = Arc::new(FakeBackend {
        fail_submit: true,
        ..FakeBackend::with_words(vec![entry("fruit", "fig", "small")])
    });
    let (ctx, _ticks) = context(backend);
    let mut banner = Banner::default();
    let mut game = GameScreen::start(&ctx, SessionSetup::new("ann", "fruit").unwrap())
        .await
        .unwrap();
    type_text(&mut game, &ctx, &mut banner, "fig").await;
    game.handle_key(key(KeyCode::Enter), &ctx, &mut banner).await;

    match game.settle(&ctx, &mut banner).await {
        ScreenTransition::Navigate {
            route: Route::Leaderboard,
            notice: Some(notice),
        } => {
            assert_eq!(notice.level, NoticeLevel::Warning);
            assert!(notice.text.starts_with("Failed to save score"));
        }
        other => panic!("unexpected transition: {:?}", other),
    }
}

#[tokio::test]
async fn test_leaderboard_loads_entries() {
    let backend = Arc::new(FakeBackend::default());
    backend
        .scores
        .lock()
        .unwrap()
        .push(wordgame_core::ScoreRecord::new("ann".into(), 948, 12, 4, false));
    let (ctx, _ticks) = context(backend);
    let mut banner = Banner::default();
    let board = LeaderboardScreen::load(&ctx, &mut banner).await;
    assert_eq!(board.entries().len(), 1);
    assert!(!banner.is_visible());
}

#[tokio::test]
async fn test_manage_words_add_edit_delete() {
    let backend = Arc::new(FakeBackend::with_words(vec![entry("fruit", "apple", "red")]));
    let (ctx, _ticks) = context(backend.clone());
    let mut banner = Banner::default();
    let mut screen = ManageWordsScreen::load(&ctx, &mut banner).await;
    assert_eq!(screen.words().len(), 1);

    // Invalid entry is rejected inline.
    type_text(&mut screen, &ctx, &mut banner, "fruit").await;
    screen.handle_key(key(KeyCode::Enter), &ctx, &mut banner).await;
    assert_eq!(banner.notice().unwrap().text, "All fields are required.");

    screen.handle_key(key(KeyCode::Tab), &ctx, &mut banner).await;
    type_text(&mut screen, &ctx, &mut banner, "Pear").await;
    screen.handle_key(key(KeyCode::Tab), &ctx, &mut banner).await;
    type_text(&mut screen, &ctx, &mut banner, "green").await;
    screen.handle_key(key(KeyCode::Enter), &ctx, &mut banner).await;
    assert!(!banner.is_visible());
    assert_eq!(screen.words().len(), 2);
    assert!(backend.stored_words().contains(&entry("fruit", "pear", "green")));

    // Edit the first entry through the table.
    screen.handle_key(key(KeyCode::Tab), &ctx, &mut banner).await;
    screen.handle_key(key(KeyCode::Char('e')), &ctx, &mut banner).await;
    assert_eq!(screen.editing(), &Some(entry("fruit", "apple", "red")));
    screen.handle_key(key(KeyCode::Tab), &ctx, &mut banner).await;
    screen.handle_key(key(KeyCode::Tab), &ctx, &mut banner).await;
    type_text(&mut screen, &ctx, &mut banner, "dish").await;
    screen.handle_key(key(KeyCode::Enter), &ctx, &mut banner).await;
    assert!(screen.editing().is_none());
    assert!(backend.stored_words().contains(&entry("fruit", "apple", "reddish")));

    // Delete the selected entry.
    screen.handle_key(key(KeyCode::Tab), &ctx, &mut banner).await;
    let before = screen.words().len();
    screen.handle_key(key(KeyCode::Char('d')), &ctx, &mut banner).await;
    assert_eq!(screen.words().len(), before - 1);
}

fn controller(backend: Arc<FakeBackend>) -> AppController {
    let config = ClientConfig::default().with_win_delay_ms(0);
    AppController::new(backend.clone(), backend, config)
}

#[tokio::test]
async fn test_failed_game_start_returns_home_keeping_nickname() {
    let backend = Arc::new(FakeBackend {
        fail_random: true,
        ..FakeBackend::with_words(vec![entry("fruit", "apple", "red")])
    });
    let mut app = controller(backend);
    let setup = SessionSetup::new("ann", "fruit").unwrap();

    let screen = app.open_route(Route::Game(setup), None).await;
    match screen {
        ActiveScreen::Home(home) => {
            assert_eq!(home.nickname().value(), "ann");
            assert_eq!(home.categories(), &vec!["fruit".to_string()]);
        }
        other => panic!("unexpected screen: {:?}", other),
    }
    assert_eq!(app.route(), &Route::Home);
    let notice = app.banner().notice().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.text, "Failed to fetch word");
}

#[tokio::test]
async fn test_unsaved_score_warning_reaches_leaderboard() {
    let backend = Arc::new(FakeBackend {
        fail_submit: true,
        ..FakeBackend::with_words(vec![entry("fruit", "fig", "small")])
    });
    let mut app = controller(backend.clone());
    let (ctx, _ticks) = context(backend);
    let mut banner = Banner::default();
    let mut game = GameScreen::start(&ctx, SessionSetup::new("ann", "fruit").unwrap())
        .await
        .unwrap();
    type_text(&mut game, &ctx, &mut banner, "fig").await;
    game.handle_key(key(KeyCode::Enter), &ctx, &mut banner).await;

    let (route, notice) = match game.settle(&ctx, &mut banner).await {
        ScreenTransition::Navigate { route, notice } => (route, notice),
        other => panic!("unexpected transition: {:?}", other),
    };
    let screen = app.open_route(route, notice).await;

    assert!(matches!(screen, ActiveScreen::Leaderboard(_)));
    assert_eq!(app.route(), &Route::Leaderboard);
    let notice = app.banner().notice().unwrap();
    assert_eq!(notice.level, NoticeLevel::Warning);
    assert_eq!(notice.text, "Failed to save score: connection refused");
}

#[tokio::test]
async fn test_unsaved_score_warning_survives_leaderboard_failure() {
    let backend = Arc::new(FakeBackend {
        fail_leaderboard: true,
        ..FakeBackend::default()
    });
    let mut app = controller(backend);
    let warning = Notice::warning("Failed to save score: connection refused");

    app.open_route(Route::Leaderboard, Some(warning)).await;

    let notice = app.banner().notice().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(notice.text.starts_with("Failed to save score: connection refused"));
    assert!(notice.text.contains("Failed to load scores"));
}
