use std::io::{self, Write};

/// Console progress for a scan. Presentation only; quiet mode suppresses all
/// of it and never changes the scan result.
#[derive(Debug)]
pub(crate) struct Progress {
    quiet: bool,
    total: usize,
    processed: usize,
    since_update: usize,
}

impl Progress {
    const UPDATE_EVERY: usize = 50;

    pub(crate) fn start(quiet: bool, total: usize) -> Self {
        if !quiet {
            print!("Loading the Ferroscan plugins...");
            let _ = io::stdout().flush();
        }
        Self {
            quiet,
            total,
            processed: 0,
            since_update: 0,
        }
    }

    pub(crate) fn tick(&mut self) {
        self.processed += 1;
        self.since_update += 1;
        if self.since_update > Self::UPDATE_EVERY && !self.quiet {
            self.since_update = 0;
            print!(
                "\rLoading the plugins... {} (out of {})",
                self.processed, self.total
            );
            let _ = io::stdout().flush();
        }
    }

    pub(crate) fn finish(&self) {
        if !self.quiet {
            println!("\rAll plugins loaded                                   ");
        }
    }
}
