/// Events emitted while a trajectory is being analyzed.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    /// The wavevector grid was built from the first frame.
    GridReady { points: usize },
    /// Frame `frame` (1-based) has been parsed and is being transformed.
    FrameStart { frame: usize },
    /// Frame `frame` has been written to every channel.
    FrameFinish { frame: usize },

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards progress events to an optional callback.
///
/// A reporter without a callback silently drops every event, which is what the
/// library uses when no front-end is attached.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn reporter_without_callback_ignores_events() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::FrameStart { frame: 1 });
    }

    #[test]
    fn callback_receives_events_in_order() {
        let events = Mutex::new(Vec::new());
        {
            let reporter = ProgressReporter::with_callback(Box::new(|event| {
                events.lock().unwrap().push(event);
            }));
            reporter.report(Progress::GridReady { points: 8 });
            reporter.report(Progress::FrameStart { frame: 1 });
            reporter.report(Progress::FrameFinish { frame: 1 });
        }
        assert_eq!(
            events.into_inner().unwrap(),
            vec![
                Progress::GridReady { points: 8 },
                Progress::FrameStart { frame: 1 },
                Progress::FrameFinish { frame: 1 },
            ]
        );
    }
}
