use std::collections::VecDeque;
/// Lifecycle counters and a short event history for diagnosing runs
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Track simulation lifecycle events
pub static MEALS: AtomicU64 = AtomicU64::new(0);
pub static MATINGS: AtomicU64 = AtomicU64::new(0);
pub static BIRTHS: AtomicU64 = AtomicU64::new(0);
pub static FAILED_BIRTHS: AtomicU64 = AtomicU64::new(0);
pub static DISPLACEMENTS: AtomicU64 = AtomicU64::new(0);
pub static DROPPED: AtomicU64 = AtomicU64::new(0);
pub static FIGHTS: AtomicU64 = AtomicU64::new(0);
pub static STARVED: AtomicU64 = AtomicU64::new(0);

/// Recent events log (circular buffer)
static EVENTS: Mutex<Option<VecDeque<String>>> = Mutex::new(None);
const MAX_EVENTS: usize = 100;

/// Initialize the debug system
pub fn init() {
    if let Ok(mut events) = EVENTS.lock() {
        *events = Some(VecDeque::with_capacity(MAX_EVENTS));
    }
    tracing::debug!("debug event log initialized");
}

/// Log a debug event
pub fn log_event(msg: impl AsRef<str>) {
    if let Ok(mut events) = EVENTS.lock() {
        if let Some(queue) = events.as_mut() {
            if queue.len() >= MAX_EVENTS {
                queue.pop_front();
            }
            queue.push_back(msg.as_ref().to_string());
        }
    }

    tracing::trace!("{}", msg.as_ref());
}

/// Get recent events for display
pub fn get_recent_events(count: usize) -> Vec<String> {
    if let Ok(events) = EVENTS.lock() {
        if let Some(queue) = events.as_ref() {
            return queue.iter().rev().take(count).rev().cloned().collect();
        }
    }
    Vec::new()
}

pub fn bump(counter: &AtomicU64) -> u64 {
    counter.fetch_add(1, Ordering::Relaxed) + 1
}

/// Print statistics summary
pub fn print_stats() {
    println!("\n=== Debug Statistics ===");
    println!("Meals: {}", MEALS.load(Ordering::Relaxed));
    println!("Matings: {}", MATINGS.load(Ordering::Relaxed));
    println!("Births: {}", BIRTHS.load(Ordering::Relaxed));
    println!("Failed Births: {}", FAILED_BIRTHS.load(Ordering::Relaxed));
    println!("Displacements: {}", DISPLACEMENTS.load(Ordering::Relaxed));
    println!("Dropped: {}", DROPPED.load(Ordering::Relaxed));
    println!("Fights: {}", FIGHTS.load(Ordering::Relaxed));
    println!("Starved: {}", STARVED.load(Ordering::Relaxed));
    println!("=======================\n");
}

/// Reset all counters
pub fn reset_stats() {
    for counter in [
        &MEALS,
        &MATINGS,
        &BIRTHS,
        &FAILED_BIRTHS,
        &DISPLACEMENTS,
        &DROPPED,
        &FIGHTS,
        &STARVED,
    ] {
        counter.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_log_is_bounded() {
        init();
        for i in 0..(MAX_EVENTS + 20) {
            log_event(format!("event {}", i));
        }
        // Other tests may log concurrently, so only check the bound and tail
        let events = get_recent_events(MAX_EVENTS * 2);
        assert!(events.len() <= MAX_EVENTS);
    }

    #[test]
    fn test_bump_returns_new_value() {
        let counter = AtomicU64::new(4);
        assert_eq!(bump(&counter), 5);
        assert_eq!(counter.load(Ordering::Relaxed), 5);
    }
}
