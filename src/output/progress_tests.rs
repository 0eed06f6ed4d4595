use super::*;

#[test]
fn hidden_when_requested() {
    let progress = ReviewProgress::new_with_visibility(100, true, true);
    assert!(progress.is_hidden());
    progress.finish();
}

#[test]
fn hidden_without_tty() {
    let progress = ReviewProgress::new_with_visibility(100, false, false);
    assert!(progress.is_hidden());
}

#[test]
fn visible_on_tty() {
    let progress = ReviewProgress::new_with_visibility(3, false, true);
    progress.start_file("src/main.py");
    progress.inc();
    assert_eq!(progress.position(), 1);
    progress.finish();
}

#[test]
fn counts_every_file() {
    let progress = ReviewProgress::new(10, true);

    for _ in 0..10 {
        progress.inc();
    }

    assert_eq!(progress.position(), 10);
    progress.finish();
}

#[test]
fn clones_share_position() {
    let progress = ReviewProgress::new(100, true);
    let cloned = progress.clone();

    progress.inc();
    cloned.inc();

    assert_eq!(progress.position(), 2);
}
