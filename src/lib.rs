pub mod marcher;
pub mod math;
