pub mod jwt;
pub mod notify;
pub mod ownership;
pub mod rating;
