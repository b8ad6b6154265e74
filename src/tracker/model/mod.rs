//! Shape of a tracked week. [WeekState] is the single record stored per week, [WeekUpdate] is
//! the only way the rest of the application changes it.

pub mod habit;
pub mod section;
pub mod update;
pub mod week_state;

pub use habit::{Habit, HabitKind};
pub use section::{ChecklistItem, Section, SectionKind};
pub use update::{OneTimeField, WeekUpdate, WeeklyField};
pub use week_state::{DayTicks, Metadata, Metrics, OneTimeReflection, WeekState, WeeklyReflection};
