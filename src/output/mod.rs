mod progress;

pub use progress::ReviewProgress;
