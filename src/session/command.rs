pub mod end_session_cmd;
pub mod render_nav_cmd;
