use std::time::{Duration, Instant};

use time::OffsetDateTime;

use crate::config::StatusConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    Ready,
    Synced { at: OffsetDateTime },
}

impl SyncStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SyncStatus::Ready => "💾 Ready",
            SyncStatus::Synced { .. } => "✅ Synced",
        }
    }

    pub fn is_synced(&self) -> bool {
        matches!(self, SyncStatus::Synced { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncEvent {
    Reverted { generation: u64 },
}

/// Cancellation handle for the pending revert. Scheduling bumps the
/// generation, so a deadline captured under an older generation can never
/// fire.
#[derive(Debug, Default)]
pub struct RevertTimer {
    generation: u64,
    pending: Option<(u64, Instant)>,
}

impl RevertTimer {
    pub fn schedule(&mut self, deadline: Instant) -> u64 {
        self.generation += 1;
        self.pending = Some((self.generation, deadline));
        self.generation
    }

    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn fire(&mut self, now: Instant) -> Option<u64> {
        let (generation, deadline) = self.pending?;
        if generation != self.generation || now < deadline {
            return None;
        }
        self.pending = None;
        Some(generation)
    }
}

/// Cosmetic "synced" badge. Nothing is written anywhere.
#[derive(Debug)]
pub struct SyncIndicator {
    status: SyncStatus,
    revert_after: Duration,
    timer: RevertTimer,
}

impl SyncIndicator {
    pub fn new(config: &StatusConfig) -> Self {
        Self {
            status: SyncStatus::Ready,
            revert_after: config.revert_after,
            timer: RevertTimer::default(),
        }
    }

    pub fn status(&self) -> &SyncStatus {
        &self.status
    }

    pub fn timer(&self) -> &RevertTimer {
        &self.timer
    }

    pub fn mark_synced(&mut self, now: Instant) {
        self.mark_synced_at(now, OffsetDateTime::now_utc());
    }

    pub fn mark_synced_at(&mut self, now: Instant, wall: OffsetDateTime) {
        self.timer.cancel();
        let generation = self.timer.schedule(now + self.revert_after);
        self.status = SyncStatus::Synced { at: wall };
        tracing::trace!(generation, "sync badge rescheduled");
    }

    pub fn poll(&mut self, now: Instant) -> Option<SyncEvent> {
        let generation = self.timer.fire(now)?;
        self.status = SyncStatus::Ready;
        Some(SyncEvent::Reverted { generation })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use time::macros::datetime;

    fn indicator(ms: u64) -> SyncIndicator {
        SyncIndicator::new(&StatusConfig {
            revert_after: Duration::from_millis(ms),
        })
    }

    #[test]
    fn starts_ready_and_never_fires_without_schedule() {
        let mut sync = indicator(2000);
        assert_eq!(sync.status(), &SyncStatus::Ready);
        assert_eq!(sync.poll(Instant::now() + Duration::from_secs(60)), None);
    }

    #[test]
    fn reverts_after_delay() {
        let mut sync = indicator(2000);
        let start = Instant::now();
        sync.mark_synced_at(start, datetime!(2024-05-01 12:00 UTC));
        assert!(sync.status().is_synced());
        assert_eq!(sync.status().label(), "✅ Synced");

        assert_eq!(sync.poll(start + Duration::from_millis(1999)), None);
        assert!(sync.status().is_synced());

        assert_matches!(
            sync.poll(start + Duration::from_millis(2000)),
            Some(SyncEvent::Reverted { .. })
        );
        assert_eq!(sync.status(), &SyncStatus::Ready);
        assert_eq!(sync.poll(start + Duration::from_secs(10)), None);
    }

    #[test]
    fn newer_mutation_replaces_pending_revert() {
        let mut sync = indicator(2000);
        let start = Instant::now();
        sync.mark_synced(start);
        let first_generation = sync.timer().generation();
        sync.mark_synced(start + Duration::from_millis(1500));
        assert!(sync.timer().generation() > first_generation);

        // The first deadline has passed but was cancelled.
        assert_eq!(sync.poll(start + Duration::from_millis(2500)), None);
        assert!(sync.status().is_synced());

        let fired = sync.poll(start + Duration::from_millis(3500));
        assert_eq!(
            fired,
            Some(SyncEvent::Reverted {
                generation: sync.timer().generation()
            })
        );
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timer = RevertTimer::default();
        let now = Instant::now();
        timer.schedule(now);
        timer.cancel();
        assert_eq!(timer.fire(now + Duration::from_secs(1)), None);

        let generation = timer.schedule(now);
        assert_eq!(timer.fire(now), Some(generation));
        assert_eq!(timer.fire(now + Duration::from_secs(1)), None);
    }
}
