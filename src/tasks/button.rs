// TiltMorse — Button Task
//
// The edge interrupt only wakes this task; counting, the debounce window and
// the final count → event mapping all run here, so the press counter never
// leaves this thread.

use std::io;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::anyhow;

use crate::events::ProgramState;
use crate::input::ButtonDebouncer;
use crate::mailbox::StateMailbox;

/// Source of press edges.
pub trait EdgeSource {
    /// Block until a press edge arrives (`Ok(true)`) or `timeout` elapses
    /// (`Ok(false)`).  `None` waits forever.
    fn wait_edge(&mut self, timeout: Option<Duration>) -> anyhow::Result<bool>;
}

impl EdgeSource for Receiver<()> {
    fn wait_edge(&mut self, timeout: Option<Duration>) -> anyhow::Result<bool> {
        match timeout {
            Some(timeout) => match self.recv_timeout(timeout) {
                Ok(()) => Ok(true),
                Err(RecvTimeoutError::Timeout) => Ok(false),
                Err(RecvTimeoutError::Disconnected) => Err(anyhow!("edge source disconnected")),
            },
            None => self
                .recv()
                .map(|()| true)
                .map_err(|_| anyhow!("edge source disconnected")),
        }
    }
}

/// Start a button task on its own thread.
///
/// `open` runs on the new thread, so an edge source bound to the task that
/// created it (a FreeRTOS task notification) is waited on by that same task.
pub fn spawn_button_task<E, F>(
    name: &'static str,
    stack_size: usize,
    open: F,
    window: Duration,
    mapping: fn(u32) -> Option<ProgramState>,
    mailbox: Arc<StateMailbox>,
) -> io::Result<thread::JoinHandle<()>>
where
    E: EdgeSource,
    F: FnOnce() -> anyhow::Result<E> + Send + 'static,
{
    thread::Builder::new()
        .name(name.into())
        .stack_size(stack_size)
        .spawn(move || {
            let result = open().and_then(|edges| button_task(name, edges, window, mapping, &mailbox));
            if let Err(e) = result {
                log::error!("{} task stopped: {}", name, e);
            }
        })
}

/// Runs until the edge source fails.
pub fn button_task<E: EdgeSource>(
    name: &str,
    mut edges: E,
    window: Duration,
    mapping: fn(u32) -> Option<ProgramState>,
    mailbox: &StateMailbox,
) -> anyhow::Result<()> {
    log::info!("{} task started", name);

    let mut debouncer = ButtonDebouncer::new(window);

    loop {
        let timeout = debouncer.time_remaining(Instant::now());
        if edges.wait_edge(timeout)? {
            debouncer.on_edge(Instant::now());
            continue;
        }

        let Some(count) = debouncer.poll(Instant::now()) else {
            continue;
        };
        match mapping(count) {
            Some(state) => {
                log::info!("{}: {} press(es) → {:?}", name, count, state);
                let lost = mailbox.post(state).filter(|lost| lost.is_lost_when_replaced_by(state));
                if let Some(lost) = lost {
                    log::warn!("Unsent {:?} overwritten by {:?}", lost, state);
                }
            }
            None => log::warn!("{}: ignoring burst of {} presses", name, count),
        }
    }
}
