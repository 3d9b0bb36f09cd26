//! Frame scheduling
//!
//! The game runs one frame per tick on a single thread. `FixedTickLoop`
//! drives frames natively against an injectable `Clock`; the browser client
//! drives them from `requestAnimationFrame`. Both stop as soon as the shared
//! `CancelToken` is cancelled.

use std::cell::Cell;
use std::rc::Rc;

/// Shared stop flag checked at every frame boundary
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// What a frame callback wants next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Stop,
}

/// Millisecond clock the loop paces itself against
pub trait Clock {
    fn now_ms(&self) -> f64;
    fn sleep_until(&mut self, deadline_ms: f64);
}

/// Wall clock backed by `std::time::Instant`
#[derive(Debug)]
pub struct SystemClock {
    start: std::time::Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    fn sleep_until(&mut self, deadline_ms: f64) {
        let wait = deadline_ms - self.now_ms();
        if wait > 0.0 {
            std::thread::sleep(std::time::Duration::from_secs_f64(wait / 1000.0));
        }
    }
}

/// Clock that only moves when slept on; for headless runs and tests
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now_ms: f64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, ms: f64) {
        self.now_ms += ms;
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }

    fn sleep_until(&mut self, deadline_ms: f64) {
        self.now_ms = self.now_ms.max(deadline_ms);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// The frame callback returned `Tick::Stop`
    Stopped,
    /// The token was cancelled before a frame ran
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopReport {
    pub exit: LoopExit,
    pub frames: u64,
}

/// Runs a frame callback at a fixed period until stopped or cancelled
pub struct FixedTickLoop<C: Clock> {
    clock: C,
    period_ms: f64,
}

impl<C: Clock> FixedTickLoop<C> {
    pub fn new(clock: C, period_ms: f64) -> Self {
        Self { clock, period_ms }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn run<F>(&mut self, token: &CancelToken, mut frame: F) -> LoopReport
    where
        F: FnMut() -> Tick,
    {
        let mut frames = 0;
        let mut next_ms = self.clock.now_ms();

        loop {
            if token.is_cancelled() {
                return LoopReport {
                    exit: LoopExit::Cancelled,
                    frames,
                };
            }

            frames += 1;
            if frame() == Tick::Stop {
                return LoopReport {
                    exit: LoopExit::Stopped,
                    frames,
                };
            }

            // Resync instead of bursting to catch up after a slow frame
            next_ms = (next_ms + self.period_ms).max(self.clock.now_ms());
            self.clock.sleep_until(next_ms);
        }
    }
}
