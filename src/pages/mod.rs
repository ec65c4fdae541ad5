//! Page components for cardforge.

mod cards;
mod tutorial;

pub use cards::Cards;
pub use tutorial::Tutorial;
