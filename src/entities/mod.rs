pub mod booking;
pub mod menu_item;
pub mod review;
pub mod testimonial;
pub mod user;
