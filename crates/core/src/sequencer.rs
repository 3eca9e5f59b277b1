//! Sequencer - supplies the next shape to spawn
//!
//! Scripted mode walks a fixed list, either wrapping or holding the final entry once it runs
//! out. Random mode draws uniformly over every shape from a seeded [`SimpleRng`]. An empty
//! scripted list behaves as random mode.

use crate::config::SequenceConfig;
use crate::rng::SimpleRng;
use crate::types::ShapeKind;

#[derive(Debug, Clone)]
pub struct Sequencer {
    shapes: Vec<ShapeKind>,
    scripted: bool,
    looping: bool,
    cursor: usize,
    rng: SimpleRng,
}

impl Sequencer {
    pub fn new(config: &SequenceConfig) -> Self {
        Self {
            shapes: config.shapes.clone(),
            scripted: config.use_sequence && !config.shapes.is_empty(),
            looping: config.loop_sequence,
            cursor: 0,
            rng: SimpleRng::new(config.seed),
        }
    }

    /// Uniform random draws only.
    pub fn random(seed: u32) -> Self {
        Self::new(&SequenceConfig {
            shapes: Vec::new(),
            use_sequence: false,
            loop_sequence: false,
            seed,
        })
    }

    /// True when shapes come from the scripted list.
    pub fn is_scripted(&self) -> bool {
        self.scripted
    }

    /// Take the next shape.
    pub fn draw(&mut self) -> ShapeKind {
        if !self.scripted {
            let idx = self.rng.next_range(ShapeKind::ALL.len() as u32) as usize;
            return ShapeKind::ALL[idx];
        }

        let last = self.shapes.len() - 1;
        let kind = self.shapes[self.cursor.min(last)];
        if self.cursor < last {
            self.cursor += 1;
        } else if self.looping {
            self.cursor = 0;
        }
        kind
    }
}

impl Iterator for Sequencer {
    type Item = ShapeKind;

    fn next(&mut self) -> Option<ShapeKind> {
        Some(self.draw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ShapeKind::*;

    fn scripted(shapes: &[ShapeKind], loop_sequence: bool) -> Sequencer {
        Sequencer::new(&SequenceConfig {
            shapes: shapes.to_vec(),
            use_sequence: true,
            loop_sequence,
            seed: 1,
        })
    }

    #[test]
    fn looping_wraps_to_start() {
        let drawn: Vec<_> = scripted(&[I, O], true).take(5).collect();
        assert_eq!(drawn, vec![I, O, I, O, I]);
    }

    #[test]
    fn hold_last_repeats_final_entry() {
        let drawn: Vec<_> = scripted(&[I, O], false).take(5).collect();
        assert_eq!(drawn, vec![I, O, O, O, O]);
    }

    #[test]
    fn single_entry_script() {
        let drawn: Vec<_> = scripted(&[T], true).take(3).collect();
        assert_eq!(drawn, vec![T, T, T]);
    }

    #[test]
    fn empty_script_falls_back_to_random() {
        let seq = scripted(&[], true);
        assert!(!seq.is_scripted());
        let a: Vec<_> = seq.take(20).collect();
        let b: Vec<_> = Sequencer::random(1).take(20).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn disabled_script_is_random() {
        let seq = Sequencer::new(&SequenceConfig {
            use_sequence: false,
            ..SequenceConfig::default()
        });
        assert!(!seq.is_scripted());
    }

    #[test]
    fn random_mode_is_seeded_and_covers_all_shapes() {
        let a: Vec<_> = Sequencer::random(99).take(400).collect();
        let b: Vec<_> = Sequencer::random(99).take(400).collect();
        assert_eq!(a, b);
        for kind in ShapeKind::ALL {
            assert!(a.contains(&kind), "missing {:?}", kind);
        }
    }
}
