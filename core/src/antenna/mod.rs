pub mod file;
pub mod position;
pub mod set;

pub use file::{format_layout, load_layout, parse_layout, save_layout};
pub use position::{AntennaPosition, BaselineVector, MAX_COORDINATE_M};
pub use set::AntennaSet;
