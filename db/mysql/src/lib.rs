pub mod db;
pub mod model;
pub mod query;
mod value;
