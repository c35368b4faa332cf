pub mod box_scores;
pub mod fantasy;
pub mod schedule;

pub(crate) mod fetch;
pub(crate) mod join;
pub(crate) mod util;
