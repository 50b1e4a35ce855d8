pub mod auth;
pub mod profile;
pub mod timelog;
pub mod user;

pub use auth::{LoginData, LoginResponse, ResetEnvelope, Role, UserSummary};
pub use profile::{normalize_user_payload, ProfileSnapshot};
pub use timelog::{hours_worked, AttendanceRecord, HoursBadge};
pub use user::{UserPage, UserRow, UsersQuery};
