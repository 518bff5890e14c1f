pub mod chase;
pub mod driver;
pub mod event;
pub mod session;
pub mod snake;
