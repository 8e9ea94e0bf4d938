//! Break-even resale pricing for NFT purchases: turns a purchase transaction, its receipt and
//! the collection's marketplace fees into the list price that recovers the full cost.

pub mod derisk_apis;
pub mod error;
pub mod lookup;
pub mod view;

pub use derisk_apis::{
    calculator::{derisk_price, round_display, tx_fee},
    collection_address::resolve_collection_address,
    fees::{FeeSchedule, FeeStatus},
    profit::{project_profit, ProfitProjection},
    quantity::{parse_gas, parse_quantity, wei_to_ether},
};
pub use error::{DeriskError, LookupError, QuantityError, UnresolvedAddress};
pub use lookup::{
    ChainDataSource, DeriskLookup, DisplayFields, ErrorKind, LookupEvent, LookupSnapshot,
    StageFlags, StageStatus,
};
pub use view::{format_eth, format_stats, DeriskView};
