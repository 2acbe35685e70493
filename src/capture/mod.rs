mod loop_worker;
mod source;

pub use loop_worker::capture_loop;
pub use source::FrameSource;
