pub mod etl;
pub mod pipeline;
pub mod reshape;

pub use crate::domain::model::{Deal, RangeNames, SheetExtract, SheetRows, SiteData, StoreLocation};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage, TokenProvider};
pub use crate::utils::error::Result;
