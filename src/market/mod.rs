// Market price pipeline: field lookup, row selection and the query itself.

pub mod lookup;
pub mod price_query;
pub mod selector;

pub use price_query::PriceQuery;
