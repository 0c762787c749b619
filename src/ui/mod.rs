pub mod orbit;
pub mod pages;
pub mod panels;
pub mod plot;
pub mod table;
