//! Static rules describing each legal form.

mod status_table;

pub use status_table::{StatusCriteria, StatusTable};
