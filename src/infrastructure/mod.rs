pub mod backends;
pub mod compilers;
pub mod stores;
