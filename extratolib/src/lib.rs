//! extratolib — разбор текста банковских выписок (BR) и выгрузка в OFX.

pub mod amount;
pub mod clock;
pub mod convert;
pub mod error;
pub mod filename;
pub mod model;
pub mod traits;

pub mod formats {
    pub mod ofx;
    pub mod text;
}
