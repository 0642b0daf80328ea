pub mod environment;
pub mod survey;
pub mod team;
pub mod user;
