//! Output generation for consolidated academic data.
//!
//! - **Projections**: module lists, information indexes and per-module
//!   timetables derived from year records
//! - **Venue information**: weekly schedule and half-hour availability per venue
//! - **Bundles**: every artifact of a run serialized in memory
//! - **Writer**: staged, all-or-nothing publication of a bundle

mod bundle;
mod error;
mod projection;
mod venue_info;
mod writer;

pub use bundle::{OutputBundle, REPORT_FILE, semester_bundle, year_bundle};
pub use error::{OutputError, Result};
pub use projection::{
    InformationHistory, ModuleInformation, ModuleListEntry, SemesterTimetable, module_information,
    module_list, module_timetables, semester_module_codes, year_module_codes,
};
pub use venue_info::{Occupancy, VenueDay, VenueLesson, venue_information};
pub use writer::{WriteSummary, write_bundle};
