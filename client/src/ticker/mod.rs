use std::{
    sync::{
        Arc, RwLock,
        mpsc::{self, Sender, TryRecvError},
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use log::{debug, warn};

use crate::State;

pub mod rows;

/// Drives a [`Ticker`] from a background thread at a fixed interval.
pub struct TickerHost {
    stop_sender: Sender<()>,
    rate_sender: Sender<u64>,
    handle: JoinHandle<()>,
}

impl TickerHost {
    pub fn start(
        state_arc: Arc<RwLock<State>>,
        mut interval: Duration,
        mut ticker: Box<dyn Ticker + Send>,
    ) -> Self {
        let (stop_sender, stop_receiver) = mpsc::channel();
        let (rate_sender, rate_receiver) = mpsc::channel();

        let handle = thread::spawn(move || {
            // Dropping the host disconnects the channel, which stops the thread as well.
            while let Err(TryRecvError::Empty) = stop_receiver.try_recv() {
                let Ok(mut state) = state_arc.write() else {
                    warn!("Ticker stopping, state lock poisoned");
                    break;
                };
                let keep_going = ticker.tick(&mut state);
                drop(state);

                if !keep_going {
                    debug!("Ticker has nothing left to do");
                    break;
                }

                if let Ok(rate) = rate_receiver.try_recv() {
                    interval = Duration::from_millis(rate);
                }

                thread::sleep(interval);
            }
        });

        Self {
            stop_sender,
            rate_sender,
            handle,
        }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    pub fn stop(self) {
        // The thread may have finished on its own already.
        let _ = self.stop_sender.send(());
    }

    pub fn set_rate(&mut self, rate_millis: u64) {
        let _ = self.rate_sender.send(rate_millis);
    }
}

pub trait Ticker {
    /// Returns `false` once there is nothing left to tick.
    fn tick(&mut self, state: &mut State) -> bool;
}
