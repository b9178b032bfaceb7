mod attack;
mod bias;
mod chess;
mod clause;
mod coverage;
pub mod geometry;
pub mod mode;
pub mod mylog;
mod notation;
mod position;
pub mod query;
mod relation;
mod syntax;
mod tactic;

pub use self::attack::*;
pub use self::bias::*;
pub use self::chess::*;
pub use self::clause::*;
pub use self::coverage::*;
pub use self::notation::*;
pub use self::position::*;
pub use self::query::{Binding, Value};
pub use self::relation::*;
pub use self::tactic::*;
