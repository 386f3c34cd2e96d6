pub mod bucket;
pub mod catalog;
pub mod chart;
pub mod selection;
pub mod sentiment;
pub mod series;
pub mod settings;
