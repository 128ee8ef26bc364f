//! Value-by-value reference implementation, for tests only.
//!
//! Walks every stage linearly per value. Only usable on tiny populations.

use super::pipeline::Pipeline;
use super::range::Value;
use super::range_set::RangeSet;
use super::stage::Stage;

pub fn map_value(stage: &Stage, value: Value) -> Value {
    stage
        .ranges()
        .iter()
        .find(|r| r.contains(value))
        .map_or(value, |r| value + r.offset())
}

pub fn run_value(pipeline: &Pipeline, value: Value) -> Value {
    pipeline
        .stages()
        .iter()
        .fold(value, |v, stage| map_value(stage, v))
}

pub fn expand(set: &RangeSet) -> impl Iterator<Item = Value> + '_ {
    set.iter().flat_map(|r| r.start()..=r.end())
}

pub fn lowest(pipeline: &Pipeline, seeds: &RangeSet) -> Option<Value> {
    expand(seeds).map(|v| run_value(pipeline, v)).min()
}
