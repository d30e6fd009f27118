pub mod chat_area;
pub mod input_bar;
pub mod sidebar;
pub mod status_bar;
