pub mod admin;
pub mod auth;
pub mod booking;
pub mod menu;
pub mod review;
pub mod testimonial;
