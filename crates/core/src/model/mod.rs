mod badge;
mod ids;
mod progress;
mod rating;
mod reflection;
mod section;
mod session;

pub use badge::Badge;
pub use ids::{BadgeId, ParseIdError, ProgressId, SessionId};
pub use progress::SectionProgress;
pub use rating::{Rating, RatingError};
pub use reflection::{Reflection, ReflectionError};
pub use section::{SECTION_COUNT, Section, last_section_index, section_at, sections};
pub use session::{Session, SessionType};
