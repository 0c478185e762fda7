// UI components
//
// Each component renders one region of the form from `App` state.

pub mod footer;
pub mod logs_panel;
pub mod result_panel;
pub mod status_bar;
pub mod title_bar;
pub mod url_form;
