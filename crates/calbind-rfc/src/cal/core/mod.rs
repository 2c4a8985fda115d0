//! Core wire-format models.
//!
//! These types represent parsed calendar content independent of any grammar
//! version. They are designed for:
//! - Round-trip fidelity: extension properties keep their raw text verbatim
//! - Fault isolation: values live alongside the type tag that decoded them
//! - Exclusive ownership: a tree belongs to one parse or export call

mod component;
mod datetime;
mod duration;
mod parameter;
mod property;
mod recur;
mod value;

pub use component::{Document, ParsedComponent};
pub use datetime::{Date, DateTime, DateTimeForm, Time, UtcOffset};
pub use duration::Duration;
pub use parameter::Parameter;
pub use property::{ContentLine, PropertyOccurrence};
pub use recur::{Frequency, Recur, RecurEnd, Weekday, WeekdayNum};
pub use value::{Period, TypeTag, Value};
