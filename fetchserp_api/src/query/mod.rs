mod common;
pub use self::common::Query;

mod params;
pub use self::params::Params;
