//! Timer collaborator used by the director.
//!
//! The director never reads wall-clock time. Every delay (cooldowns, effect
//! durations, periodic triggers) is expressed as a [`TimerEvent`] scheduled on
//! an injected [`Scheduler`]. The host moves time forward with
//! [`AbilityDirector::advance`](crate::AbilityDirector::advance), which pops
//! due timers one at a time and routes them back to the owning runtime.
//!
//! # Dispatch Order
//!
//! Due timers fire in this order:
//! 1. Earliest due time first
//! 2. On equal due time: effect triggers, then ability cooldowns, then effect
//!    duration expiry (see [`TimerEvent::dispatch_rank`])
//! 3. Insertion order
//!
//! Ranking triggers ahead of duration expiry means an effect whose last tick
//! lands on its expiry instant still delivers that tick before removal.

use std::collections::BTreeMap;

use crate::ability::AbilityId;
use crate::effect::EffectId;

/// Opaque handle identifying a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(pub u64);

/// What a timer means when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerEvent {
    /// Periodic payload tick of a timed effect.
    EffectTrigger(EffectId),
    /// An ability's cooldown ran out.
    AbilityCooldown(AbilityId),
    /// A timed effect reached the end of its duration.
    EffectDuration(EffectId),
}

impl TimerEvent {
    /// Tie-break rank for timers due at the same instant (lower fires first).
    pub const fn dispatch_rank(&self) -> u8 {
        match self {
            Self::EffectTrigger(_) => 0,
            Self::AbilityCooldown(_) => 1,
            Self::EffectDuration(_) => 2,
        }
    }
}

/// A timer that came due during [`Scheduler::pop_due`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FiredTimer {
    pub handle: TimerHandle,
    pub event: TimerEvent,
}

/// Monotonic timer service.
///
/// Implementations must keep one-shot and repeating timers independent:
/// cancelling one never affects another, and a cancelled handle is never
/// returned by [`Scheduler::pop_due`].
pub trait Scheduler {
    /// Current time in seconds. While timers are being popped this is the due
    /// time of the timer most recently returned.
    fn now(&self) -> f32;

    /// Fires `event` once after `delay` seconds.
    fn schedule_once(&mut self, delay: f32, event: TimerEvent) -> TimerHandle;

    /// Fires `event` every `interval` seconds, first at `now + interval`.
    fn schedule_repeating(&mut self, interval: f32, event: TimerEvent) -> TimerHandle;

    /// Cancels a timer, returning false if it was not pending.
    fn cancel(&mut self, handle: TimerHandle) -> bool;

    /// Seconds until the timer next fires, or `None` if it is not pending.
    fn remaining(&self, handle: TimerHandle) -> Option<f32>;

    /// Returns true if the timer is pending.
    fn is_active(&self, handle: TimerHandle) -> bool {
        self.remaining(handle).is_some()
    }

    /// Moves the target time forward by `dt` seconds.
    fn advance(&mut self, dt: f32);

    /// Pops the next timer due at or before the target time.
    ///
    /// Returns `None` once nothing else is due; the clock then rests at the
    /// target time.
    fn pop_due(&mut self) -> Option<FiredTimer>;
}

#[derive(Clone, Debug)]
struct TimerEntry {
    due: f64,
    interval: Option<f64>,
    seq: u64,
    event: TimerEvent,
}

impl TimerEntry {
    fn order_key(&self) -> (f64, u8, u64) {
        (self.due, self.event.dispatch_rank(), self.seq)
    }
}

/// Deterministic manual clock.
///
/// Time only moves when [`Scheduler::advance`] is called, which makes it the
/// scheduler of choice for tests, replays and hosts with a fixed-step loop.
/// Time is tracked as `f64` internally to keep long-running repeating timers
/// from drifting.
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    now: f64,
    target: f64,
    next_handle: u64,
    next_seq: u64,
    timers: BTreeMap<TimerHandle, TimerEntry>,
}

impl TimerQueue {
    /// Slack applied when comparing due times against the target time.
    const DUE_EPSILON: f64 = 1.0e-9;
    /// Repeating intervals shorter than this are raised to it.
    const MIN_INTERVAL: f64 = 1.0e-6;

    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    fn insert(&mut self, delay: f64, interval: Option<f64>, event: TimerEvent) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        let seq = self.bump_seq();
        self.timers.insert(
            handle,
            TimerEntry {
                due: self.now + delay.max(0.0),
                interval,
                seq,
                event,
            },
        );
        handle
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

impl Scheduler for TimerQueue {
    fn now(&self) -> f32 {
        self.now as f32
    }

    fn schedule_once(&mut self, delay: f32, event: TimerEvent) -> TimerHandle {
        self.insert(delay as f64, None, event)
    }

    fn schedule_repeating(&mut self, interval: f32, event: TimerEvent) -> TimerHandle {
        let interval = (interval as f64).max(Self::MIN_INTERVAL);
        self.insert(interval, Some(interval), event)
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.timers.remove(&handle).is_some()
    }

    fn remaining(&self, handle: TimerHandle) -> Option<f32> {
        self.timers
            .get(&handle)
            .map(|entry| (entry.due - self.now).max(0.0) as f32)
    }

    fn advance(&mut self, dt: f32) {
        self.target = self.target.max(self.now) + (dt as f64).max(0.0);
    }

    fn pop_due(&mut self) -> Option<FiredTimer> {
        let limit = self.target + Self::DUE_EPSILON;
        let next = self
            .timers
            .iter()
            .filter(|(_, entry)| entry.due <= limit)
            .min_by(|(_, a), (_, b)| {
                let (a_due, a_rank, a_seq) = a.order_key();
                let (b_due, b_rank, b_seq) = b.order_key();
                a_due
                    .total_cmp(&b_due)
                    .then(a_rank.cmp(&b_rank))
                    .then(a_seq.cmp(&b_seq))
            })
            .map(|(handle, _)| *handle);

        let Some(handle) = next else {
            self.now = self.now.max(self.target);
            return None;
        };

        let seq = self.bump_seq();
        let entry = self.timers.get_mut(&handle)?;
        self.now = self.now.max(entry.due);
        let event = entry.event;
        let interval = entry.interval;
        match interval {
            Some(interval) => {
                entry.due += interval;
                entry.seq = seq;
            }
            None => {
                self.timers.remove(&handle);
            }
        }

        Some(FiredTimer { handle, event })
    }
}
