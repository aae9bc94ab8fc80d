mod medicine;

pub use medicine::*;
