mod int_list;
mod nested;
mod sum;

pub use int_list::IntList;
pub use nested::Nested;
pub use sum::Sum;
