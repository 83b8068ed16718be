//! End-to-end decision tests through the public `Player` surface.

use std::thread;
use std::time::Duration;

use draughts_engine::board::SimpleBoard;
use draughts_engine::{DraughtsMove, DraughtsState, Occupant, Player, SearchConfig};

fn depth_limited(max_depth: u32) -> Player {
    Player::with_config(SearchConfig {
        max_depth: Some(max_depth),
        ..SearchConfig::default()
    })
}

#[test]
fn opening_decision_is_legal_and_level() {
    let mut board = SimpleBoard::initial();
    let player = depth_limited(1);
    let mv = player.decide(&mut board).expect("opening has moves");
    assert!(board.legal_moves().contains(&mv));
    // Depth 1 from the symmetric start resolves to the flat material score.
    assert_eq!(player.current_estimate(), 0);
    assert_eq!(player.stats().depth_completed, 1);
}

#[test]
fn decision_leaves_the_board_untouched() {
    let mut board = SimpleBoard::initial();
    let before = board.clone();
    depth_limited(5).decide(&mut board);
    assert_eq!(board, before);
}

#[test]
fn simple_capture_is_found_and_reported() {
    // White can jump 28x17 over the man on 22 and nothing else.
    let mut board = SimpleBoard::empty();
    board
        .place(28, Occupant::WhiteMan)
        .place(22, Occupant::BlackMan)
        .place(2, Occupant::BlackMan)
        .place(48, Occupant::WhiteMan);

    let player = depth_limited(3);
    let mv = player.decide(&mut board).expect("a capture is available");
    assert!(mv.capture_count() >= 1);
    // Up roughly a man by the player's own estimate.
    assert!(player.current_estimate() >= 90);
}

#[test]
fn stop_before_deciding_degrades_to_the_first_legal_move() {
    let mut board = SimpleBoard::initial();
    let first = board.legal_moves().into_iter().next().unwrap();

    let player = Player::new();
    player.request_stop();
    let mv = player.decide(&mut board);
    assert_eq!(mv, Some(first));
    assert!(player.stats().stopped);
}

#[test]
fn timer_thread_stops_an_unbounded_decision() {
    let mut board = SimpleBoard::initial();
    let legal = board.legal_moves();
    let player = Player::new();

    let mv = thread::scope(|scope| {
        scope.spawn(|| {
            thread::sleep(Duration::from_millis(50));
            player.request_stop();
        });
        player.decide(&mut board)
    });

    let mv = mv.expect("a move must come back");
    assert!(legal.contains(&mv));
    assert!(player.stats().stopped);
    assert!(player.stats().nodes > 0);
}

#[test]
fn no_legal_moves_yields_no_move() {
    // A lone white king boxed into the corner.
    let mut board = SimpleBoard::empty();
    board
        .place(46, Occupant::WhiteKing)
        .place(41, Occupant::BlackMan)
        .place(37, Occupant::BlackMan);
    assert!(board.legal_moves().is_empty());
    assert_eq!(depth_limited(3).decide(&mut board), None);
}

#[test]
fn decisions_are_reproducible() {
    let mut board = SimpleBoard::initial();
    let first = depth_limited(5).decide(&mut board).unwrap();
    let second = depth_limited(5).decide(&mut board).unwrap();
    assert_eq!(first, second);
}

#[test]
fn deeper_search_still_answers_the_forced_line() {
    // A mutual exchange: whatever White plays, the reply recaptures. The
    // deepened decision must still be a legal capture.
    let mut board = SimpleBoard::empty();
    board
        .place(33, Occupant::WhiteMan)
        .place(28, Occupant::BlackMan)
        .place(17, Occupant::BlackMan)
        .place(50, Occupant::WhiteMan)
        .place(5, Occupant::BlackMan);

    let player = depth_limited(7);
    let mv = player.decide(&mut board).expect("the jump is forced");
    assert_eq!(mv.capture_count(), 1);
    assert_eq!(player.stats().depth_completed, 7);
}
