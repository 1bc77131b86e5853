pub mod page_controller;
pub mod post_controller;
