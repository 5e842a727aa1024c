//! Draw/reset flows driven through the public `App` API.

use std::collections::HashSet;

use bingo_engine::{DrawOutcome, InputMode, SessionState};

use crate::common::{enter_size, quiet_app, reset_confirmed};

#[test]
fn full_game_on_default_board() {
    let mut app = quiet_app(75);
    let mut seen = HashSet::new();

    for _ in 0..75 {
        let DrawOutcome::Drawn(ball) = app.draw_number() else {
            panic!("board exhausted early after {} draws", seen.len());
        };
        assert!((1..=75).contains(&ball.get()));
        assert!(seen.insert(ball.get()));
        assert_eq!(app.session().last_drawn(), Some(ball));
    }

    assert_eq!(app.session().state(), SessionState::Exhausted);
    assert_eq!(app.draw_number(), DrawOutcome::Exhausted);
    assert_eq!(app.session().drawn_count(), 75);
}

#[test]
fn drawn_sequence_is_most_recent_first() {
    let mut app = quiet_app(30);
    let mut order = Vec::new();
    for _ in 0..5 {
        if let DrawOutcome::Drawn(ball) = app.draw_number() {
            order.push(ball);
        }
    }
    order.reverse();
    let drawn: Vec<_> = app.session().drawn().collect();
    assert_eq!(drawn, order);
}

#[test]
fn size_five_scenario() {
    let mut app = quiet_app(75);
    enter_size(&mut app, "5");
    reset_confirmed(&mut app);
    assert_eq!(app.session().size().get(), 5);

    for _ in 0..5 {
        app.draw_number();
    }
    let mut values: Vec<u16> = app.snapshot().drawn.iter().map(|b| b.get()).collect();
    values.sort_unstable();
    assert_eq!(values, vec![1, 2, 3, 4, 5]);

    let before = app.snapshot();
    app.draw_number();
    assert_eq!(app.snapshot(), before);
}

#[test]
fn reset_size_edge_cases() {
    let cases = [("1000", 999), ("0", 75), ("-5", 2), ("", 75), ("1", 2), ("999", 999)];
    for (input, expected) in cases {
        let mut app = quiet_app(10);
        app.draw_number();
        enter_size(&mut app, input);
        reset_confirmed(&mut app);

        let snapshot = app.snapshot();
        assert_eq!(snapshot.size.get(), expected, "input {input:?}");
        assert!(snapshot.drawn.is_empty());
        assert!(snapshot.last_drawn.is_none());
        assert_eq!(snapshot.state, SessionState::Active);
    }
}

#[test]
fn declining_reset_keeps_everything() {
    let mut app = quiet_app(40);
    for _ in 0..3 {
        app.draw_number();
    }
    enter_size(&mut app, "12");
    let before = app.snapshot();

    app.request_reset();
    assert_eq!(app.input_mode(), InputMode::ConfirmReset);
    app.dismiss();

    assert_eq!(app.snapshot(), before);
    assert_eq!(app.size_input().text(), "12");
}

#[test]
fn pending_size_survives_reset() {
    let mut app = quiet_app(75);
    enter_size(&mut app, "20");
    reset_confirmed(&mut app);
    reset_confirmed(&mut app);
    assert_eq!(app.session().size().get(), 20);
    assert_eq!(app.size_input().text(), "20");
}
