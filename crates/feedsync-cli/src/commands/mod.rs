pub mod inspect;
pub mod sources;
pub mod sync;
