pub mod fonts;
pub mod form;
pub mod generator;
pub mod gradient;
pub mod logo;
pub mod scheduler;
