use std::time::Duration;

use sprite_collector::fade::*;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn holds_full_alpha_for_the_first_second() {
    let m = FadeMessage::new("+12");
    let m = m.advance(ms(999)).unwrap();
    assert_eq!(m.alpha(), 1.0);
    let m = m.advance(ms(1)).unwrap();
    assert_eq!(m.alpha(), 1.0);
    assert_eq!(m.text, "+12");
}

#[test]
fn loses_a_twentieth_every_fifty_millis() {
    let m = FadeMessage::new("+12").advance(HOLD).unwrap();
    let m = m.advance(ms(49)).unwrap();
    assert_eq!(m.alpha(), 1.0);
    let m = m.advance(ms(1)).unwrap();
    assert!((m.alpha() - 0.95).abs() < 1e-6);
    let m = m.advance(ms(100)).unwrap();
    assert!((m.alpha() - 0.85).abs() < 1e-6);
}

#[test]
fn clears_two_seconds_after_creation() {
    let m = FadeMessage::new("+30").advance(ms(1999)).unwrap();
    assert!((m.alpha() - 0.05).abs() < 1e-6);
    assert!(m.advance(ms(1)).is_none());
}

#[test]
fn small_frames_add_up_like_one_big_step() {
    let mut m = Some(FadeMessage::new("+10"));
    for _ in 0..90 {
        m = m.and_then(|msg| msg.advance(ms(16)));
    }
    // 1440ms elapsed: 8 full fade steps.
    let stepped = m.unwrap();
    let direct = FadeMessage::new("+10").advance(ms(1440)).unwrap();
    assert_eq!(stepped, direct);
    assert!((stepped.alpha() - 0.6).abs() < 1e-6);
}

#[test]
fn huge_gap_clears_immediately() {
    assert!(FadeMessage::new("+10").advance(Duration::from_secs(60)).is_none());
}

#[test]
fn constants_describe_a_one_second_fade() {
    assert_eq!(STEP_INTERVAL * FADE_STEPS, Duration::from_secs(1));
}
