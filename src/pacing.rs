use std::thread;
use std::time::Duration;

/// Something that can block for a while; swapped out in tests
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

impl<S: Sleeper + ?Sized> Sleeper for &mut S {
    fn sleep(&mut self, duration: Duration) {
        (**self).sleep(duration);
    }
}

pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Fixed pause after every request, whatever the request's outcome
pub struct Pacer<S: Sleeper> {
    delay: Duration,
    sleeper: S,
}

impl<S: Sleeper> Pacer<S> {
    pub fn new(delay: Duration, sleeper: S) -> Self {
        Self { delay, sleeper }
    }

    #[cfg(test)]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn wait(&mut self) {
        self.sleeper.sleep(self.delay);
    }

    #[cfg(test)]
    pub fn into_sleeper(self) -> S {
        self.sleeper
    }
}
