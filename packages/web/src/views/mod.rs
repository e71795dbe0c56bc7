mod shell;
pub use shell::Shell;

mod home;
pub use home::Home;

mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod property_detail;
pub use property_detail::PropertyDetail;

mod create_property;
pub use create_property::CreateProperty;

mod dashboard;
pub use dashboard::Dashboard;
