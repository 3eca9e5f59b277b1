use puzzletris::core::{Session, SessionConfig};
use puzzletris::term::{tile_color, GameView, Viewport};
use puzzletris::types::{Command, TileId};

fn started(config: SessionConfig) -> Session {
    let mut session = Session::new(config);
    session.start();
    session
}

#[test]
fn term_view_renders_border_corners() {
    let snap = started(SessionConfig::default()).snapshot();

    // cell_w=2, cell_h=1: 10x20 board is 20x20 plus a border.
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_draws_preset_bottom_row() {
    let snap = started(SessionConfig::default()).snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Bottom preset row is "######..##"; each cell is two characters wide.
    let expected: String = "######..##"
        .chars()
        .flat_map(|c| if c == '#' { ['█', '█'] } else { ['·', '·'] })
        .collect();
    let bottom: String = fb.row_text(20).chars().skip(1).take(20).collect();
    assert_eq!(bottom, expected);
    assert_eq!(fb.get(1, 20).unwrap().style.fg, tile_color(TileId::OBSTACLE));
}

#[test]
fn term_view_tracks_active_piece() {
    let mut session = started(SessionConfig::without_preset());
    let view = GameView::default();
    let vp = Viewport::new(22, 22);

    // P spawns with its cap on the top row at x = 0..=1, screen columns 11..=14.
    let before = view.render(&session.snapshot(), vp);
    assert_eq!(before.get(11, 1).unwrap().ch, '█');
    assert_eq!(before.get(13, 1).unwrap().ch, '█');

    session.submit_command(Command::MoveRight);
    let after = view.render(&session.snapshot(), vp);
    assert_eq!(after.get(11, 1).unwrap().ch, '·');
    assert_eq!(after.get(13, 1).unwrap().ch, '█');
    assert_eq!(after.get(15, 1).unwrap().ch, '█');
}

#[test]
fn term_view_render_into_reuses_buffer() {
    let session = started(SessionConfig::default());
    let view = GameView::default();
    let snap = session.snapshot();

    let mut fb = view.render(&snap, Viewport::new(40, 24));
    view.render_into(&snap, Viewport::new(60, 30), &mut fb);
    assert_eq!((fb.width(), fb.height()), (60, 30));
    assert_eq!(fb, view.render(&snap, Viewport::new(60, 30)));
}

#[test]
fn term_view_key_help_can_be_hidden() {
    let snap = started(SessionConfig::default()).snapshot();
    let vp = Viewport::new(60, 24);
    let has_help = |view: GameView| {
        let fb = view.render(&snap, vp);
        (0..fb.height()).any(|y| fb.row_text(y).contains("rotate ccw"))
    };

    assert!(has_help(GameView::default()));
    assert!(has_help(GameView::default().with_key_help(true)));
    assert!(!has_help(GameView::default().with_key_help(false)));
}
