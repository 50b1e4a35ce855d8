pub mod auth_viewmodel;
pub mod profile_viewmodel;
pub mod reset_viewmodel;
pub mod timelog_viewmodel;
pub mod users_viewmodel;

pub use auth_viewmodel::AuthViewModel;
pub use profile_viewmodel::ProfileViewModel;
pub use reset_viewmodel::ResetViewModel;
pub use timelog_viewmodel::TimelogViewModel;
pub use users_viewmodel::UsersViewModel;
