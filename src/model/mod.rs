pub mod booster;
pub mod categories;
pub mod factors;
pub mod thresholds;

#[cfg(test)]
#[path = "../../tests/src_inline/model/fixtures.rs"]
pub(crate) mod fixtures;
