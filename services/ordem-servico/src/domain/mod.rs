//! 领域层

pub mod entities;
pub mod enums;
pub mod inventory;
pub mod repositories;
pub mod value_objects;
pub mod views;

pub use entities::*;
pub use enums::*;
pub use inventory::*;
pub use repositories::*;
pub use value_objects::*;
pub use views::*;
