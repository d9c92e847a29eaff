//! crates/engine/src/watcher.rs
//!
//! Background thread turning timer ticks and SIGHUPs into reloads.
//!
//! The thread sleeps on a `crossbeam-channel` receive with a timeout. A
//! message (or the sender being dropped) stops it; a timeout is a chance to
//! check the hangup counter and the interval deadline.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};

use crate::controller::ReloadController;
use crate::signal;
use crate::trace::{trace_signal_install_failed, trace_watcher_started, trace_watcher_stopped};
use crate::trigger::Trigger;

/// How often the hangup counter is checked.
pub const DEFAULT_SIGNAL_POLL: Duration = Duration::from_millis(100);

/// What the watcher reacts to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WatchConfig {
    /// Reload on this period, if set.
    pub interval: Option<Duration>,
    /// Reload on SIGHUP.
    pub signals: bool,
    /// Hangup counter polling period.
    pub signal_poll: Duration,
}

impl WatchConfig {
    /// Reports whether there is anything to watch.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.interval.is_some() || self.signals
    }

    fn tick(&self) -> Duration {
        match (self.interval, self.signals) {
            (Some(interval), true) => interval.min(self.signal_poll),
            (Some(interval), false) => interval,
            (None, _) => self.signal_poll,
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval: None,
            signals: false,
            signal_poll: DEFAULT_SIGNAL_POLL,
        }
    }
}

/// Handle to the running watcher thread.
///
/// Dropping the handle stops the thread and waits for it.
#[derive(Debug)]
pub struct Watcher {
    shutdown: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Watcher {
    /// Starts watching on behalf of `controller`.
    ///
    /// With `config.signals` the process-wide SIGHUP handler is installed
    /// first. If that fails the watcher still runs on its interval.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned.
    pub fn spawn(controller: Arc<ReloadController>, config: WatchConfig) -> io::Result<Self> {
        if config.signals
            && let Err(error) = signal::install_hangup_handler()
        {
            trace_signal_install_failed(&error);
        }

        // Read before spawning so a hangup during startup is not missed.
        let seen_hangups = signal::hangup_count();
        let (shutdown, stop) = crossbeam_channel::bounded(1);
        let handle = thread::Builder::new()
            .name("loglove-watcher".into())
            .spawn(move || watch(&controller, config, seen_hangups, &stop))?;
        trace_watcher_started(config.interval, config.signals);

        Ok(Self {
            shutdown: Some(shutdown),
            handle: Some(handle),
        })
    }

    /// Stops the thread and waits for it to exit.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            // A full or disconnected channel means the thread is already leaving.
            let _ = shutdown.try_send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
            trace_watcher_stopped();
        }
    }
}

impl Drop for Watcher {
    fn drop(&mut self) {
        self.stop();
    }
}

fn watch(
    controller: &ReloadController,
    config: WatchConfig,
    mut seen_hangups: u64,
    stop: &Receiver<()>,
) {
    let tick = config.tick();
    let mut next_interval = config.interval.map(|interval| Instant::now() + interval);

    loop {
        match stop.recv_timeout(tick) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }

        if config.signals {
            let hangups = signal::hangup_count();
            if hangups != seen_hangups {
                seen_hangups = hangups;
                controller.reload_for(Trigger::Signal);
            }
        }

        if let (Some(deadline), Some(interval)) = (next_interval, config.interval) {
            let now = Instant::now();
            if now >= deadline {
                next_interval = Some(now + interval);
                controller.reload_for(Trigger::Interval);
            }
        }
    }
}
