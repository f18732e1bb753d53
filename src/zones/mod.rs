mod tables;
mod zone_table;

pub use {tables::*, zone_table::*};
