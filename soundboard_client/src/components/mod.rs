pub mod notice;
pub mod page_nav;
