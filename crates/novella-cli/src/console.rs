use std::sync::atomic::{AtomicUsize, Ordering};

use novella_core::harvest::{HarvestEvent, HarvestReporter, SkipReason};

/// Prints every chapter outcome as it happens and keeps a running tally,
/// so a tally exists even when the run ends with an error.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    quiet: bool,
    attempted: AtomicUsize,
    succeeded: AtomicUsize,
}

impl ConsoleReporter {
    /// Reporter that only tallies. Used with `--json` to keep stdout clean.
    pub fn quiet() -> Self {
        Self {
            quiet: true,
            ..Self::default()
        }
    }

    /// (attempted, succeeded) so far.
    pub fn tally(&self) -> (usize, usize) {
        (
            self.attempted.load(Ordering::Relaxed),
            self.succeeded.load(Ordering::Relaxed),
        )
    }

    fn say(&self, line: String) {
        if !self.quiet {
            println!("{line}");
        }
    }
}

impl HarvestReporter for ConsoleReporter {
    fn report(&self, event: HarvestEvent<'_>) {
        match event {
            HarvestEvent::NoFreeChapters { .. } => self.say(
                "No directly accessible free chapter links found on this page. \
                 The table of contents may be loaded by JavaScript; paid chapters are never fetched."
                    .to_string(),
            ),
            HarvestEvent::ChapterPaywalled { chapter } => {
                self.say(format!("{} -- skipped (VIP chapter)", chapter.title));
            }
            HarvestEvent::ChapterDownloaded { chapter, .. } => {
                self.attempted.fetch_add(1, Ordering::Relaxed);
                self.succeeded.fetch_add(1, Ordering::Relaxed);
                self.say(format!("{} -- downloaded", chapter.title));
            }
            HarvestEvent::ChapterSkipped {
                chapter, reason, ..
            } => {
                self.attempted.fetch_add(1, Ordering::Relaxed);
                match reason {
                    SkipReason::NoContent => self.say(format!(
                        "{} -- skipped (no free content; paid chapter or page layout changed)",
                        chapter.title
                    )),
                    SkipReason::FetchFailed(error) => {
                        self.say(format!("{} -- skipped ({error})", chapter.title));
                    }
                }
            }
            _ => {}
        }
    }
}
