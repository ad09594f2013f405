pub mod chart;
pub mod stats;
pub mod view;

pub use view::Dashboard;
