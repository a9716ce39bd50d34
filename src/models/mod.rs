pub mod history;
pub mod settings;

pub use history::StatisticHistory;
pub use settings::Settings;
