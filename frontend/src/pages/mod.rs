pub mod activities;
pub mod clients;
pub mod crud;
pub mod dashboard;
pub mod employees;
pub mod holidays;
pub mod leaders;
pub mod login;
pub mod person_form;
pub mod projections;
pub mod projects;
pub mod reports;
pub mod roles;
pub mod users;

pub use activities::ActivitiesPage;
pub use clients::ClientsPage;
pub use dashboard::DashboardPage;
pub use employees::EmployeesPage;
pub use holidays::HolidaysPage;
pub use leaders::LeadersPage;
pub use login::LoginPage;
pub use projections::ProjectionsPage;
pub use projects::ProjectsPage;
pub use reports::ReportsPage;
pub use roles::RolesPage;
pub use users::UsersPage;
