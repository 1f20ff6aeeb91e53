// Fixed-rate frame loop. The scheduler only tracks whether a timer is
// running; the timer itself comes from the host (window.setInterval in the
// browser, a manual stepper in tests).

use log::debug;

pub const FRAMES_PER_SECOND: i32 = 60;
pub const FRAME_INTERVAL_MS: i32 = 1000 / FRAMES_PER_SECOND;

pub trait IntervalTimer {
    type Handle;
    type Error;

    fn set_interval(&mut self, period_ms: i32, tick: Box<dyn FnMut()>) -> Result<Self::Handle, Self::Error>;
    fn clear_interval(&mut self, handle: Self::Handle);
}

pub enum SchedulerState<H> {
    Idle,
    Running(H),
}

pub struct FrameScheduler<T: IntervalTimer> {
    timer: T,
    state: SchedulerState<T::Handle>,
}

impl<T: IntervalTimer> FrameScheduler<T> {
    pub fn new(timer: T) -> Self {
        FrameScheduler {
            timer,
            state: SchedulerState::Idle,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, SchedulerState::Running(_))
    }

    /// Starts ticking. A running loop is stopped first, so this doubles as a restart.
    pub fn start(&mut self, tick: Box<dyn FnMut()>) -> Result<(), T::Error> {
        self.stop();
        let handle = self.timer.set_interval(FRAME_INTERVAL_MS, tick)?;
        self.state = SchedulerState::Running(handle);
        debug!("frame loop started at {}ms", FRAME_INTERVAL_MS);
        Ok(())
    }

    pub fn stop(&mut self) {
        if let SchedulerState::Running(handle) = std::mem::replace(&mut self.state, SchedulerState::Idle) {
            self.timer.clear_interval(handle);
            debug!("frame loop stopped");
        }
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }
}

impl<T: IntervalTimer> Drop for FrameScheduler<T> {
    fn drop(&mut self) {
        self.stop();
    }
}
