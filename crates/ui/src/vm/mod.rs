mod journey_vm;
mod notice;
mod screen_vm;
mod time_fmt;

pub use journey_vm::{JourneyAction, JourneyIntent, JourneyVm};
pub use notice::{Notice, NoticeTone};
pub use screen_vm::{
    BadgeVm, ProgressItemVm, ReadingVm, SectionCardVm, SessionTypeOptionVm, SetupVm, SurveyVm,
    build_reading_vm, build_setup_vm, build_survey_vm, map_badges,
};
pub use time_fmt::{format_clock_time, format_date};
