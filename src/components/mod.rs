pub mod bar_chart;
pub mod dialog;
pub mod price_list;
pub mod settings;
pub mod stat_card;
