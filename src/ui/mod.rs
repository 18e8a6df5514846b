pub mod layout;
pub mod panels;
pub mod plot;
pub mod table;
