use super::source::{generate, RandomSource};
use super::types::{GeneratorError, Range};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinFrame {
    /// A throwaway draw shown while the reveal is running.
    Rolling(i64),
    /// The committed value; always the last frame.
    Settled(i64),
}

/// The "spinning" reveal of an already committed value.
///
/// Ticks `1..steps` yield fresh draws from the range, tick `steps` yields the
/// committed value, and every tick after that yields `None`.
#[derive(Debug, Clone)]
pub struct Spin {
    range: Range,
    final_value: i64,
    steps: u32,
    current_step: u32,
}

impl Spin {
    pub fn new(range: Range, final_value: i64, steps: u32) -> Self {
        Self {
            range,
            final_value,
            steps: steps.max(1),
            current_step: 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.current_step >= self.steps
    }

    pub fn tick(&mut self, source: &mut impl RandomSource) -> Result<Option<SpinFrame>, GeneratorError> {
        if self.is_finished() {
            return Ok(None);
        }
        self.current_step += 1;

        if self.current_step >= self.steps {
            Ok(Some(SpinFrame::Settled(self.final_value)))
        } else {
            Ok(Some(SpinFrame::Rolling(generate(source, self.range)?)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::source::OsRandomSource;

    #[test]
    fn test_spin_emits_rolling_frames_then_settles() {
        let range = Range::new(1, 6).unwrap();
        let mut spin = Spin::new(range, 4, 20);
        let mut source = OsRandomSource;
        let mut frames = vec![];

        while let Some(frame) = spin.tick(&mut source).unwrap() {
            frames.push(frame);
        }

        assert_eq!(frames.len(), 20);
        assert_eq!(frames.last(), Some(&SpinFrame::Settled(4)));
        for frame in &frames[..19] {
            match frame {
                SpinFrame::Rolling(v) => assert!((1..=6).contains(v)),
                SpinFrame::Settled(_) => panic!("settled before the last tick"),
            }
        }
        assert!(spin.is_finished());
    }

    #[test]
    fn test_spin_stays_finished() {
        let mut spin = Spin::new(Range::default(), 50, 1);
        let mut source = OsRandomSource;

        assert_eq!(spin.tick(&mut source).unwrap(), Some(SpinFrame::Settled(50)));
        assert_eq!(spin.tick(&mut source).unwrap(), None);
        assert_eq!(spin.tick(&mut source).unwrap(), None);
    }

    #[test]
    fn test_zero_steps_still_settles_once() {
        let mut spin = Spin::new(Range::default(), 7, 0);
        let mut source = OsRandomSource;

        assert_eq!(spin.tick(&mut source).unwrap(), Some(SpinFrame::Settled(7)));
        assert!(spin.is_finished());
    }
}
