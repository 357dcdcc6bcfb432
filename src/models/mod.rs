pub mod book;
pub mod user;

pub use book::BookRecord;
pub use user::UserId;
