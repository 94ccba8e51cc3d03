mod fixed_clock;

pub use fixed_clock::FixedClock;
