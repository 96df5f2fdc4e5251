//! Request handlers.

mod api;
mod helpers;
mod pages;
mod static_files;

pub use api::{api_analyze, api_analyze_info, api_detail, api_list, health};
pub use pages::{
    analyze_form, analyze_submit, detail_page, download_report, history_page, home_page,
    results_page,
};
pub use static_files::{serve_css, serve_media};
