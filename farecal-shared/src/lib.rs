pub mod airport;
pub mod cabin;
pub mod query;

pub use airport::{Airport, AirportCatalog, CatalogError};
pub use cabin::CabinClass;
pub use query::{Price, RouteQuery, YearMonth};
