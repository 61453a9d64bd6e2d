pub mod reading_record;
pub mod settings;
pub mod user;

pub use reading_record::*;
pub use settings::*;
pub use user::*;
