// src/progress.rs

use std::io::{self, Write};

/// Lightweight progress reporting for long-running operations (scrapes,
/// lock countdowns). The CLI prints; tests pass the no-op sink.
pub trait Progress {
    /// Called at the start with the total number of ticks (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One unit done (a player scraped, a lock second waited out).
    fn tick(&mut self) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Console sink: status lines plus an in-place `done/total` counter.
#[derive(Default)]
pub struct ConsoleProgress {
    done: usize,
    total: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.done = 0;
        self.total = total;
    }

    fn log(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn tick(&mut self) {
        self.done += 1;
        if self.total > 0 {
            print!("\r{}/{}", self.done, self.total);
        } else {
            print!("\r{}", self.done);
        }
        let _ = io::stdout().flush();
    }

    fn finish(&mut self) {
        if self.done > 0 {
            println!();
        }
        self.done = 0;
        self.total = 0;
    }
}
