pub mod menu;
pub mod question_card;
pub mod results_panel;
pub mod review_list;
pub mod revision_panel;
pub mod study_browser;
pub mod timer_bar;
