//! finances-core: transfer records, balance accumulators, and the row filter DSL.

pub mod balance;
pub mod dates;
pub mod error;
pub mod filter;
pub mod record;

pub use balance::{Balance, BalanceSummary};
pub use dates::{DATE_FORMAT, parse_date};
pub use error::RecordError;
pub use filter::{
    FilterKey, FilterValue, Filters, Lookup, Until, filter_row, lazy_filter_row, matches,
};
pub use record::{COLUMNS, TransferRecord};
