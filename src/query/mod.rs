//! Statement builders. Nothing here touches the database; every user value
//! leaves as a bound parameter.
mod mutation;
mod predicate;

pub(crate) use mutation::{ensure_any_column, Changes};
pub(crate) use predicate::{ensure_compatible, ensure_limit, DateRange, Filter, SELECT_EXPENSES};
