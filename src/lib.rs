#![allow(non_snake_case)]

mod engine;
mod error;
mod model;
mod serializer;
mod util;

pub use engine::Section;
pub use engine::bpm::BpmChanges;
pub use engine::double::{DoubleRunes, combo_columns, combo_value};
pub use engine::grouping::*;
pub use engine::multi::MultiRunes;
pub use engine::single::SingleRunes;
pub use error::*;
pub use model::chart::*;
pub use model::config::*;
pub use model::version::*;
pub use serializer::*;
pub use util::*;
