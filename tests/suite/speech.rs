//! Announcer ordering as seen from the app.

use crate::common::{Spoken, spied_app};

#[test]
fn announcements_follow_draws_and_cancel_overlap() {
    let (mut app, log) = spied_app(75);
    app.set_announce(true);

    let mut expected = Vec::new();
    for i in 0..3 {
        let outcome = app.draw_number();
        let bingo_engine::DrawOutcome::Drawn(ball) = outcome else {
            panic!("draw {i} failed");
        };
        if i > 0 {
            expected.push(Spoken::Cancelled);
        }
        expected.push(Spoken::Text(ball.get().to_string()));
    }

    assert_eq!(*log.lock().unwrap(), expected);
}

#[test]
fn switching_announcer_off_mid_utterance_cuts_it() {
    let (mut app, log) = spied_app(75);
    app.set_announce(true);
    app.draw_number();
    app.set_announce(false);
    app.draw_number();

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 2);
    assert!(matches!(log[0], Spoken::Text(_)));
    assert_eq!(log[1], Spoken::Cancelled);
}

#[test]
fn exhausted_draw_says_nothing() {
    let (mut app, log) = spied_app(2);
    app.draw_number();
    app.draw_number();
    app.set_announce(true);
    log.lock().unwrap().clear();

    app.draw_number();
    assert!(log.lock().unwrap().is_empty());
}
