use article_gen_core::{Sample, SampleSet};

/// Message shown when navigation hits a bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    FirstSample,
    LastSample,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::FirstSample => "First sample reached. No previous sample exists.",
            Notice::LastSample => "Last sample reached. No next sample exists.",
        }
    }
}

/// Pages through the samples of one generation.
///
/// ## Invariants
/// - `samples` is never empty
/// - `index < samples.len()`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    samples: SampleSet,
    index: usize,
}

impl Viewer {
    /// Opens a viewer on the first sample. Returns `None` for an empty set.
    pub fn new(samples: SampleSet) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        Some(Self { samples, index: 0 })
    }

    /// Window title: the title of the first sample.
    pub fn window_title(&self) -> &str {
        self.samples[0].title()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn current(&self) -> &Sample {
        &self.samples[self.index]
    }

    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.samples.len()
    }

    /// Moves to the previous sample, or stays put at the first one.
    pub fn previous(&mut self) -> Result<(), Notice> {
        if !self.has_previous() {
            return Err(Notice::FirstSample);
        }
        self.index -= 1;
        Ok(())
    }

    /// Moves to the next sample, or stays put at the last one.
    pub fn next(&mut self) -> Result<(), Notice> {
        if !self.has_next() {
            return Err(Notice::LastSample);
        }
        self.index += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer(count: usize) -> Viewer {
        let samples = (0..count).map(|i| Sample::new(format!("Title {i}"), format!("Body {i}"))).collect();
        Viewer::new(samples).unwrap()
    }

    #[test]
    fn empty_sample_set_has_no_viewer() {
        assert!(Viewer::new(Vec::new()).is_none());
    }

    #[test]
    fn previous_at_start_is_a_no_op_with_notice() {
        let mut viewer = viewer(3);
        assert!(!viewer.has_previous());
        assert_eq!(viewer.previous(), Err(Notice::FirstSample));
        assert_eq!(viewer.index(), 0);
        assert_eq!(viewer.current().content(), "Body 0");
    }

    #[test]
    fn next_walks_to_the_last_sample_then_stops() {
        let k = 4;
        let mut viewer = viewer(k);
        for _ in 0..k - 1 {
            assert!(viewer.has_next());
            assert_eq!(viewer.next(), Ok(()));
        }
        assert_eq!(viewer.index(), k - 1);
        assert!(!viewer.has_next());
        assert!(viewer.has_previous());

        assert_eq!(viewer.next(), Err(Notice::LastSample));
        assert_eq!(viewer.index(), k - 1);
        assert_eq!(viewer.current().title(), "Title 3");
    }

    #[test]
    fn controls_are_disabled_exactly_at_bounds() {
        let mut viewer = viewer(3);
        let mut states = vec![(viewer.has_previous(), viewer.has_next())];
        while viewer.next().is_ok() {
            states.push((viewer.has_previous(), viewer.has_next()));
        }
        assert_eq!(states, [(false, true), (true, true), (true, false)]);
    }

    #[test]
    fn single_sample_disables_both_controls() {
        let mut viewer = viewer(1);
        assert!(!viewer.has_previous());
        assert!(!viewer.has_next());
        assert_eq!(viewer.next(), Err(Notice::LastSample));
        assert_eq!(viewer.previous(), Err(Notice::FirstSample));
        assert_eq!(viewer.window_title(), "Title 0");
    }
}
