//! Vague reminders: what to say and when to say it.
//!
//! Both choices are memoryless draws from an injectable random source, so the
//! selection logic can be driven by a seeded generator in tests.

use crate::surface::{Notification, NotificationKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use std::time::Duration;

/// Shortest wait before the next reminder (ms)
pub const MIN_DELAY_MS: u32 = 45_000;

/// Longest wait before the next reminder (ms)
pub const MAX_DELAY_MS: u32 = 180_000;

pub const DELAY_RANGE_MS: RangeInclusive<u32> = MIN_DELAY_MS..=MAX_DELAY_MS;

pub const REMINDER_TITLE: &str = "A Vague Reminder";
pub const REMINDER_DURATION: Duration = Duration::from_millis(5000);

pub const RESTORE_TITLE: &str = "It's Back";
pub const RESTORE_BODY: &str = "You can't get rid of it that easily.";
pub const RESTORE_DURATION: Duration = Duration::from_millis(2000);

const BUILTIN_REMINDERS: &[&str] = &[
    "Remember that thing you forgot?",
    "It's probably later than you think.",
    "Are you sure you locked it?",
    "They know.",
    "Don't forget to breathe. Manually.",
    "You left something important behind.",
    "Check the date. Is it the right year?",
    "That quiet sound is not in your head.",
    "You are now aware of your own tongue.",
    "Was that a dream or a memory?",
    "Your keys are not where you think they are.",
    "Did you reply to that urgent message?",
    "The deadline is closer.",
    "Consider the weight of your choices.",
    "Look behind you. No, don't.",
    "It's still there.",
];

/// Fixed, non-empty list of reminder messages
#[derive(Debug, Clone, Copy)]
pub struct ReminderCatalog {
    entries: &'static [&'static str],
}

impl ReminderCatalog {
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_REMINDERS,
        }
    }

    /// Returns `None` for an empty list
    pub fn new(entries: &'static [&'static str]) -> Option<Self> {
        if entries.is_empty() {
            None
        } else {
            Some(Self { entries })
        }
    }

    pub fn entries(&self) -> &'static [&'static str] {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Default for ReminderCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// One scheduled reminder: how long to wait, then what to say
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reminder {
    pub delay_ms: u32,
    pub message: &'static str,
}

impl Reminder {
    pub fn notification(&self) -> Notification {
        reminder_notification(self.message)
    }
}

pub fn reminder_notification(message: &str) -> Notification {
    Notification {
        title: REMINDER_TITLE.to_string(),
        body: message.to_string(),
        kind: NotificationKind::Info,
        duration: REMINDER_DURATION,
    }
}

pub fn restore_notification() -> Notification {
    Notification {
        title: RESTORE_TITLE.to_string(),
        body: RESTORE_BODY.to_string(),
        kind: NotificationKind::Warning,
        duration: RESTORE_DURATION,
    }
}

pub struct ReminderScheduler<R: Rng = StdRng> {
    catalog: ReminderCatalog,
    rng: R,
}

impl ReminderScheduler<StdRng> {
    /// Scheduler over the built-in catalog, seeded from the OS
    pub fn new() -> Self {
        Self::with_rng(ReminderCatalog::builtin(), StdRng::from_entropy())
    }
}

impl Default for ReminderScheduler<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> ReminderScheduler<R> {
    pub fn with_rng(catalog: ReminderCatalog, rng: R) -> Self {
        Self { catalog, rng }
    }

    /// Uniform draw from [45000, 180000] ms
    pub fn next_delay_ms(&mut self) -> u32 {
        self.rng.gen_range(DELAY_RANGE_MS)
    }

    /// Uniform draw (with replacement) from the catalog
    pub fn pick_message(&mut self) -> &'static str {
        let entries = self.catalog.entries();
        entries[self.rng.gen_range(0..entries.len())]
    }

    pub fn next_reminder(&mut self) -> Reminder {
        let message = self.pick_message();
        let delay_ms = self.next_delay_ms();
        Reminder { delay_ms, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn seeded(seed: u64) -> ReminderScheduler<StdRng> {
        ReminderScheduler::with_rng(ReminderCatalog::builtin(), StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_builtin_catalog_has_sixteen_entries() {
        assert_eq!(ReminderCatalog::builtin().len(), 16);
        assert_eq!(ReminderCatalog::builtin().entries()[3], "They know.");
    }

    #[test]
    fn test_empty_catalog_is_refused() {
        assert!(ReminderCatalog::new(&[]).is_none());
        assert_eq!(ReminderCatalog::new(&["only one"]).map(|c| c.len()), Some(1));
    }

    #[test]
    fn test_delays_stay_in_range() {
        let mut scheduler = seeded(7);
        for _ in 0..10_000 {
            let delay = scheduler.next_delay_ms();
            assert!(DELAY_RANGE_MS.contains(&delay), "delay {} out of range", delay);
        }
    }

    #[test]
    fn test_delays_are_roughly_uniform() {
        let mut scheduler = seeded(42);
        let buckets = 10usize;
        let width = (MAX_DELAY_MS - MIN_DELAY_MS + 1) as f64 / buckets as f64;
        let mut counts = vec![0u32; buckets];
        for _ in 0..10_000 {
            let delay = scheduler.next_delay_ms();
            let idx = (((delay - MIN_DELAY_MS) as f64) / width) as usize;
            counts[idx.min(buckets - 1)] += 1;
        }
        // Expect 1000 per bucket; sd is about 30, so 250 is very generous.
        for (i, count) in counts.iter().enumerate() {
            assert!(
                (750..=1250).contains(count),
                "bucket {} has {} draws",
                i,
                count
            );
        }
    }

    #[test]
    fn test_messages_come_from_catalog_and_cover_it() {
        let mut scheduler = seeded(1234);
        let catalog = ReminderCatalog::builtin();
        let mut seen: HashMap<&str, u32> = HashMap::new();
        for _ in 0..5_000 {
            let message = scheduler.pick_message();
            assert!(catalog.entries().contains(&message));
            *seen.entry(message).or_default() += 1;
        }
        assert_eq!(seen.len(), catalog.len());
    }

    #[test]
    fn test_same_seed_same_schedule() {
        let mut a = seeded(99);
        let mut b = seeded(99);
        for _ in 0..20 {
            assert_eq!(a.next_reminder(), b.next_reminder());
        }
    }

    #[test]
    fn test_reminder_notification_text() {
        let n = reminder_notification("They know.");
        assert_eq!(n.title, "A Vague Reminder");
        assert_eq!(n.body, "They know.");
        assert_eq!(n.kind, NotificationKind::Info);
        assert_eq!(n.duration, Duration::from_millis(5000));

        let r = restore_notification();
        assert_eq!(r.title, "It's Back");
        assert_eq!(r.kind, NotificationKind::Warning);
        assert_eq!(r.duration, Duration::from_millis(2000));
    }
}
