use super::range::Value;
use super::range_set::RangeSet;
use super::stage::Stage;
use tracing::{debug, trace};

/// Stages applied one after another, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Push `seeds` through every stage. A pipeline without stages returns
    /// the seeds unchanged.
    pub fn run(&self, seeds: RangeSet) -> RangeSet {
        if self.stages.is_empty() {
            debug!("pipeline has no stages, seeds pass through unchanged");
            return seeds;
        }

        self.stages
            .iter()
            .enumerate()
            .fold(seeds, |current, (index, stage)| {
                let next = stage.apply(&current);
                trace!(stage = index, pieces_in = current.len(), pieces_out = next.len());
                next
            })
    }

    /// Lowest value any seed reaches after the last stage
    pub fn lowest(&self, seeds: RangeSet) -> Option<Value> {
        self.run(seeds).minimum()
    }
}

impl FromIterator<Stage> for Pipeline {
    fn from_iter<I: IntoIterator<Item = Stage>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
