//! Intake rules applied to submissions before they reach the queue.

mod classify;
mod limits;
mod validate;

pub use classify::{
    is_text_like, is_video_file, mime_for_name, plan_file_content, FileContentPlan,
};
pub use limits::{human_size, Environment, UploadLimits, GIB, KIB, MIB, TEXT_READ_LIMIT};
pub use validate::{validate_submission, ValidationError};
