use thiserror::Error;

use super::classify::is_video_file;
use super::limits::{human_size, Environment, UploadLimits, MIB};
use crate::content::{Payload, SubmitMethod, Submission};

/// Rejections raised before anything is queued or sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Content cannot be empty")]
    EmptyContent,

    #[error("Please enter a valid URL (http:// or https://): {0}")]
    InvalidUrl(String),

    #[error("Pasted content is too large (max {}MB)", .max / MIB)]
    PasteTooLarge { size: u64, max: u64 },

    #[error(
        "File size ({}) exceeds limit of {}{}",
        human_size(.size),
        human_size(.max),
        video_note(.video)
    )]
    FileTooLarge { size: u64, max: u64, video: bool },
}

fn video_note(video: &bool) -> &'static str {
    if *video {
        " for video files"
    } else {
        ""
    }
}

/// Checks a submission against the intake rules for `env`.
pub fn validate_submission(submission: &Submission, env: Environment) -> Result<(), ValidationError> {
    let limits = UploadLimits::for_env(env);

    let result = match (&submission.payload, submission.method) {
        (Payload::File(file), _) => {
            let video = is_video_file(&file.name);
            let max = limits.file_ceiling(video);
            if file.size_bytes > max {
                Err(ValidationError::FileTooLarge {
                    size: file.size_bytes,
                    max,
                    video,
                })
            } else {
                Ok(())
            }
        }
        (Payload::Text(raw), SubmitMethod::Url) => validate_url(raw),
        (Payload::Text(raw), _) => {
            // The paste ceiling is measured in characters, not bytes.
            let chars = raw.chars().count() as u64;
            if raw.trim().is_empty() {
                Err(ValidationError::EmptyContent)
            } else if chars > limits.paste {
                Err(ValidationError::PasteTooLarge {
                    size: chars,
                    max: limits.paste,
                })
            } else {
                Ok(())
            }
        }
    };

    #[cfg(feature = "tracing")]
    if let Err(err) = &result {
        tracing::debug!(method = submission.method.as_str(), error = %err, "submission rejected");
    }

    result
}

fn validate_url(raw: &str) -> Result<(), ValidationError> {
    let trimmed = raw.trim();
    let parsed = url::Url::parse(trimmed).map_err(|_| ValidationError::InvalidUrl(trimmed.to_string()))?;
    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some() => Ok(()),
        _ => Err(ValidationError::InvalidUrl(trimmed.to_string())),
    }
}
