pub mod calculator;
pub mod collection_address;
pub mod fees;
pub mod profit;
pub mod quantity;
