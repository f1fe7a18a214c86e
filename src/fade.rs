/// The "+N" pickup message and its fade-out.
///
/// The message holds at full opacity for `HOLD`, then loses `1 / FADE_STEPS`
/// of its alpha every `STEP_INTERVAL` until it disappears.  Time is fed in
/// by the game loop, so the whole sequence is deterministic under test.
use std::time::Duration;

pub const HOLD: Duration = Duration::from_millis(1000);
pub const STEP_INTERVAL: Duration = Duration::from_millis(50);
/// 0.05 alpha per step.
pub const FADE_STEPS: u32 = 20;

#[derive(Clone, Debug, PartialEq)]
enum Phase {
    Holding { remaining: Duration },
    Fading { until_step: Duration, steps_left: u32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct FadeMessage {
    pub text: String,
    phase: Phase,
}

impl FadeMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            phase: Phase::Holding { remaining: HOLD },
        }
    }

    pub fn alpha(&self) -> f32 {
        match self.phase {
            Phase::Holding { .. } => 1.0,
            Phase::Fading { steps_left, .. } => steps_left as f32 / FADE_STEPS as f32,
        }
    }

    /// Advance by `dt`.  Returns `None` once the message has fully faded.
    pub fn advance(self, dt: Duration) -> Option<Self> {
        let mut phase = self.phase;
        let mut left = dt;

        loop {
            match phase {
                Phase::Holding { remaining } => {
                    if left < remaining {
                        phase = Phase::Holding {
                            remaining: remaining - left,
                        };
                        break;
                    }
                    left -= remaining;
                    phase = Phase::Fading {
                        until_step: STEP_INTERVAL,
                        steps_left: FADE_STEPS,
                    };
                }
                Phase::Fading {
                    until_step,
                    steps_left,
                } => {
                    if left < until_step {
                        phase = Phase::Fading {
                            until_step: until_step - left,
                            steps_left,
                        };
                        break;
                    }
                    left -= until_step;
                    if steps_left <= 1 {
                        return None;
                    }
                    phase = Phase::Fading {
                        until_step: STEP_INTERVAL,
                        steps_left: steps_left - 1,
                    };
                }
            }
        }

        Some(Self {
            text: self.text,
            phase,
        })
    }
}
