pub mod market;
pub mod metric;
pub mod row;
pub mod series;

pub use market::*;
pub use metric::*;
pub use row::*;
pub use series::*;
