pub mod rangefinder_error;
