pub mod aggregation;
pub mod config;
pub mod dashboard;
pub mod dataframe;
pub mod error;
pub mod groupby;
pub mod io;
pub mod loader;
pub mod model;
pub mod pivot;
pub mod series;
pub mod vis;

// Re-export commonly used types
pub use config::DashboardConfig;
pub use dashboard::{render, DashboardState, Event, Session, ViewModel};
pub use dataframe::{Column, DataFrame, JoinType, MeltOptions};
pub use error::{Error, Result};
pub use groupby::DataFrameGroupBy;
pub use loader::DashboardData;
pub use model::{Gender, Generation};
pub use pivot::{crosstab, AggFunction, CrosstabOptions};
pub use series::Series;

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
