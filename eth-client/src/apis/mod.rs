pub mod explorer;
pub mod marketplace;
