//! Terminal presentation shell: input form, warning notice and plot view.

pub mod app;
pub mod layout;
pub mod plot;
pub mod terminal;
