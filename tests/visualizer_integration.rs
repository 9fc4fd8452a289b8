//! End-to-end tests: the demo host driving every visualizer.
//!
//! The windowed visualizer is exercised through a custom render-driver body,
//! the terminal visualizer through ratatui's `TestBackend`.
//!
//! Run with: cargo test visualizer_integration

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::style::Color;

use turnview::sandbox::{Entity, Player, RunOutcome, Sandbox, SandboxConfig};
use turnview::window::{
    ChannelWake, HEALTH_LEFT_COLOR, PLAYER_COLORS, Primitive, ViewTransform, build_scene,
    glyph_color,
};
use turnview::{
    BoardSize, Cell, EntityKind, Game, GameSnapshot, Health, JsonLinesRecorder, PlayerIndex,
    PlayerView, PluginOptions, Renderable, TerminalVisualizer, TurnEndHandler, VisualizerError,
    WindowedVisualizer,
};

fn quick() -> PluginOptions {
    PluginOptions::try_parse("-t 0").unwrap()
}

/// A single building on an otherwise empty board.
struct Fort {
    cell: Cell,
    owner: Option<PlayerIndex>,
    health: Health,
}

impl Renderable for Fort {
    fn cell(&self) -> Cell {
        self.cell
    }

    fn owner(&self) -> Option<PlayerIndex> {
        self.owner
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Castle
    }

    fn health(&self) -> Option<Health> {
        Some(self.health)
    }
}

struct Seat(&'static str);

impl PlayerView for Seat {
    fn name(&self) -> &str {
        self.0
    }

    fn money(&self) -> i64 {
        100
    }
}

struct Scripted {
    objects: Vec<Fort>,
    players: Vec<Seat>,
}

impl Game for Scripted {
    type Object = Fort;
    type Player = Seat;

    fn board_size(&self) -> BoardSize {
        BoardSize::new(5, 5)
    }

    fn turn(&self) -> u64 {
        0
    }

    fn objects(&self) -> &[Fort] {
        &self.objects
    }

    fn players(&self) -> &[Seat] {
        &self.players
    }

    fn register_turn_end_handler(&mut self, _handler: Box<dyn TurnEndHandler<Self>>) {}
}

fn half_health_fort() -> Scripted {
    Scripted {
        objects: vec![Fort {
            cell: Cell::new(0, 0),
            owner: Some(0),
            health: Health::new(50, 100),
        }],
        players: vec![Seat("red"), Seat("blue")],
    }
}

#[test]
fn test_scene_for_half_health_building() {
    let game = half_health_fort();
    let view = ViewTransform::default();
    let scale = view.scale();
    let scene: Vec<Primitive> = build_scene(&GameSnapshot::capture(&game))
        .iter()
        .map(|p| p.to_screen(&view))
        .collect();

    // board, building, health track, health fill, glyph
    assert_eq!(scene.len(), 5);

    let Primitive::Outlined { stroke, .. } = scene[1] else {
        panic!("expected building outline, got {:?}", scene[1]);
    };
    assert_eq!(stroke, PLAYER_COLORS[0]);

    let (track, fill) = match (scene[2], scene[3]) {
        (Primitive::Outlined { rect: track, .. }, Primitive::Outlined { rect: fill, fill: color, .. }) => {
            assert_eq!(color, HEALTH_LEFT_COLOR);
            (track, fill)
        }
        other => panic!("expected health bar, got {other:?}"),
    };
    assert!((fill.width() - track.width() * 0.5).abs() < 1e-3);
    assert!((track.width() - 52.0 * scale).abs() < 1e-3);

    let Primitive::Glyph { rect, glyph, color, .. } = scene[4] else {
        panic!("expected glyph, got {:?}", scene[4]);
    };
    assert_eq!(glyph, 'C');
    assert_eq!(color, glyph_color(PLAYER_COLORS[0]));
    // Text area spans the cell below the health bar.
    assert!(rect.min.x.abs() < 1e-3);
    assert!((rect.min.y - 12.0 * scale).abs() < 1e-3);
    assert!((rect.max.x - 64.0 * scale).abs() < 1e-3);
    assert!((rect.max.y - 64.0 * scale).abs() < 1e-3);
}

#[test]
fn test_terminal_draws_half_health_building() {
    let game = half_health_fort();
    let terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
    let mut visualizer = TerminalVisualizer::with_terminal(terminal, &game, quick());
    visualizer.on_turn_end(&game).unwrap();

    let buffer = visualizer.terminal().backend().buffer().clone();
    assert_eq!(buffer[(0, 0)].symbol(), "C");
    assert_eq!(buffer[(0, 0)].fg, Color::Green);
    assert_eq!(buffer[(1, 0)].symbol(), ".");
    assert_eq!(buffer[(4, 4)].symbol(), ".");

    // Player rows start below the (5+1)-row field.
    let header: String = (0..11).map(|x| buffer[(x, 6)].symbol().to_string()).collect();
    assert_eq!(header, "name  money");
    assert_eq!(buffer[(0, 7)].symbol(), "r");
    assert_eq!(buffer[(0, 8)].fg, Color::Yellow);
    assert_eq!(buffer[(0, 9)].symbol(), ">");
}

#[test]
fn test_sandbox_with_terminal_visualizer() {
    let config = SandboxConfig {
        max_turns: 20,
        ..SandboxConfig::default()
    };
    let mut game = Sandbox::new(&config).unwrap();
    let terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
    let visualizer = TerminalVisualizer::with_terminal(terminal, &game, quick());
    game.register_turn_end_handler(Box::new(visualizer));

    let outcome = game.run().unwrap();
    assert!(matches!(outcome, RunOutcome::Finished { turns: 20, .. }));
    assert_eq!(game.handler_count(), 1);
}

#[test]
fn test_window_closed_stops_the_game() {
    let mut game = Sandbox::new(&SandboxConfig::default()).unwrap();
    let frames_seen = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&frames_seen);

    let options = PluginOptions::try_parse("--turn-time 0.02").unwrap();
    let visualizer = WindowedVisualizer::with_driver(&game, options, move |shared, frames, ready| {
        ready.signal(Arc::new(ChannelWake));
        for _frame in frames.iter().take(3) {
            let snapshot = shared.load();
            assert!(snapshot.turn >= 1);
            seen.fetch_add(1, Ordering::SeqCst);
        }
    })
    .unwrap();
    assert!(!visualizer.is_closed());
    game.register_turn_end_handler(Box::new(visualizer));

    let outcome = game.run().unwrap();
    let RunOutcome::VisualizersClosed { turns } = outcome else {
        panic!("expected the window to close, got {outcome:?}");
    };
    assert!(turns >= 3);
    assert_eq!(frames_seen.load(Ordering::SeqCst), 3);
    assert_eq!(game.handler_count(), 0);
}

#[test]
fn test_window_driver_that_never_starts() {
    let game = half_health_fort();
    let err = WindowedVisualizer::with_driver(&game, quick(), |_, _, ready| drop(ready)).unwrap_err();
    assert!(matches!(err, VisualizerError::Spawn(_)));
}

#[test]
fn test_window_snapshot_is_isolated_from_engine() {
    let mut game = Sandbox::new(&SandboxConfig::default()).unwrap();
    let mut visualizer = WindowedVisualizer::with_driver(&game, quick(), |_, frames, ready| {
        ready.signal(Arc::new(ChannelWake));
        for _frame in &frames {}
    })
    .unwrap();

    visualizer.on_turn_end(&game).unwrap();
    let before = visualizer.snapshot().load();
    let castle_hp = before.objects[0].health;

    game.objects_mut()[0].damage(50);
    game.players_mut()[0].money = -1;

    let after = visualizer.snapshot().load();
    assert_eq!(after.objects[0].health, castle_hp);
    assert_eq!(after.players[0].money, before.players[0].money);
    assert_ne!(after.players[0].money, -1);
}

#[test]
fn test_json_recorder_follows_the_game() {
    let config = SandboxConfig {
        max_turns: 5,
        ..SandboxConfig::default()
    };
    let mut game = Sandbox::new(&config).unwrap();
    let mut recorder = JsonLinesRecorder::new(Vec::new(), quick());
    for _ in 0..5 {
        game.play_turn().unwrap();
        recorder.on_turn_end(&game).unwrap();
    }
    assert_eq!(recorder.lines_written(), 5);

    let text = String::from_utf8(recorder.into_inner()).unwrap();
    let snapshots: Vec<GameSnapshot> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    let turns: Vec<u64> = snapshots.iter().map(|s| s.turn).collect();
    assert_eq!(turns, vec![1, 2, 3, 4, 5]);
    assert_eq!(snapshots[4], GameSnapshot::capture(&game));
}

#[test]
fn test_scripted_sandbox_layout() {
    let board = BoardSize::new(5, 5);
    let objects = vec![
        Entity::new(1, Cell::new(0, 0), Some(0), EntityKind::Castle),
        Entity::new(2, Cell::new(4, 4), Some(1), EntityKind::Castle),
        Entity::new(3, Cell::new(2, 2), None, EntityKind::Wall),
    ];
    let players = vec![Player::new("ada", 0), Player::new("brutus", 0)];
    let game = Sandbox::from_parts(board, objects, players, 10).unwrap();

    let terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
    let mut visualizer = TerminalVisualizer::with_terminal(terminal, &game, quick());
    visualizer.draw(&game).unwrap();
    let buffer = visualizer.terminal().backend().buffer();
    assert_eq!(buffer[(4, 4)].fg, Color::Yellow);
    assert_eq!(buffer[(2, 2)].symbol(), "#");
    assert_eq!(buffer[(2, 2)].fg, Color::Red);
    // "brutus" is longer than "name", so money starts at column 8.
    assert_eq!(buffer[(8, 6)].symbol(), "m");
}
