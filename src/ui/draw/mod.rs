//! UI drawing module
//!
//! This module is organized into focused submodules:
//! - `components`: Reusable UI components (header, tab bar, notice, footer, spinners)
//! - `modals`: Modal dialogs (forms, filter, delete confirmation, URL input)
//! - `panels`: Tab bodies (dashboard, students, grades, reports)
//! - `styling`: Grade and status colors

mod components;
mod modals;
mod panels;
mod styling;

pub use components::{render_footer, render_header, render_notice, render_tab_bar};
pub use modals::{
    render_confirm_delete_modal, render_filter_modal, render_grade_form_modal,
    render_student_form_modal, render_url_input_modal,
};
pub use panels::render_body;
