//! Application services over the catalogue repositories.

pub mod authors;
pub mod books;
pub mod error;
pub mod lookup;
pub mod payload;
pub mod repos;

#[cfg(test)]
pub(crate) mod testing;
