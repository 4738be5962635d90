pub mod calendar;
pub mod keyword;
pub mod persona;
