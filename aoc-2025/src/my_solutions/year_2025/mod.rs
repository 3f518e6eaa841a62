pub mod day_1;
pub mod day_2;
pub mod day_5;
