pub mod slider;
pub mod stepper;
