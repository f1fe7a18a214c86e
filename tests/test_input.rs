use sprite_collector::input::*;

#[test]
fn released_keys_stop_when_terminal_reports_releases() {
    let mut input = InputTracker::new(true, 8);
    input.key_down(Key::Left, 1);
    // No repeats needed: the key stays held until released.
    assert!(input.is_pressed(Key::Left, 500));
    input.key_up(Key::Left);
    assert!(!input.is_pressed(Key::Left, 501));
}

#[test]
fn press_only_terminals_expire_after_hold_window() {
    let mut input = InputTracker::new(false, 4);
    input.key_down(Key::Up, 10);
    assert!(input.is_pressed(Key::Up, 14));
    assert!(!input.is_pressed(Key::Up, 15));

    // A repeat refreshes the window.
    input.key_down(Key::Up, 15);
    assert!(input.is_pressed(Key::Up, 19));
}

#[test]
fn key_up_works_without_release_support_too() {
    let mut input = InputTracker::new(false, 4);
    input.key_down(Key::Right, 3);
    input.key_up(Key::Right);
    assert!(!input.is_pressed(Key::Right, 3));
}

#[test]
fn unknown_keys_are_not_pressed() {
    let input = InputTracker::new(true, 8);
    assert!(!input.is_pressed(Key::Down, 0));
    assert_eq!(input.movement(0), Movement::default());
}

#[test]
fn movement_snapshot_reports_every_held_direction() {
    let mut input = InputTracker::new(true, 8);
    input.key_down(Key::Up, 1);
    input.key_down(Key::Right, 2);
    assert_eq!(
        input.movement(3),
        Movement {
            up: true,
            down: false,
            left: false,
            right: true
        }
    );

    input.clear();
    assert_eq!(input.movement(4), Movement::default());
}

#[test]
fn focus_loss_drops_keys_whose_release_never_arrives() {
    let mut input = InputTracker::new(true, 8);
    input.key_down(Key::Left, 1);
    input.key_down(Key::Down, 1);
    // Terminal loses focus while both keys are down; no release follows.
    input.clear();
    assert!(!input.is_pressed(Key::Left, 2));
    assert!(!input.is_pressed(Key::Down, 2));

    input.key_down(Key::Left, 3);
    assert!(input.is_pressed(Key::Left, 3));
}
