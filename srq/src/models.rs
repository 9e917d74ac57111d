// src/models.rs
pub mod frontmatter;
pub mod note;
pub mod schedule;

pub use frontmatter::{Frontmatter, Tags};
pub use note::{Note, display_name};
pub use schedule::{Schedule, ScheduleEncoding, ScheduleEntry, SourceSpan};
