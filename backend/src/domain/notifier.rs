//! Acknowledgment shown to a child after submitting an activity.
//!
//! The message content is not part of the engine contract, only that one is
//! emitted. Production picks at random; tests inject a fixed notifier.

use rand::seq::SliceRandom;
use tracing::info;

use super::models::activity::Activity;

pub const MOTIVATIONAL_MESSAGES: [&str; 5] = [
    "You're doing great! Keep it up! ⭐",
    "So proud of you! One more activity done! 🎉",
    "Wow! You're becoming a chore superhero! 💪",
    "Amazing! Your parents must be really proud! 🌟",
    "You rock! Keep shining! ✨",
];

pub trait Notifier: Send + Sync {
    /// Produce the acknowledgment for a freshly submitted activity
    fn activity_submitted(&self, activity: &Activity) -> String;
}

/// Picks a random message from [`MOTIVATIONAL_MESSAGES`]
#[derive(Debug, Clone, Default)]
pub struct MotivationalNotifier;

impl Notifier for MotivationalNotifier {
    fn activity_submitted(&self, activity: &Activity) -> String {
        let message = MOTIVATIONAL_MESSAGES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(MOTIVATIONAL_MESSAGES[0]);
        info!("🎉 Acknowledging submission of {}: {}", activity.id, message);
        message.to_string()
    }
}

#[cfg(test)]
pub use fixed::FixedNotifier;

#[cfg(test)]
mod fixed {
    use super::Notifier;
    use crate::domain::models::activity::Activity;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Always returns the same message and counts how often it was asked
    #[derive(Debug, Default)]
    pub struct FixedNotifier {
        message: String,
        calls: AtomicUsize,
    }

    impl FixedNotifier {
        pub fn new(message: impl Into<String>) -> Self {
            Self {
                message: message.into(),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Notifier for FixedNotifier {
        fn activity_submitted(&self, _activity: &Activity) -> String {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.message.clone()
        }
    }
}
