use serde::{Deserialize, Serialize};

pub const KIB: u64 = 1024;
pub const MIB: u64 = 1024 * KIB;
pub const GIB: u64 = 1024 * MIB;

/// Runtime environment the client talks to. Local backends accept far larger
/// payloads than the hosted one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    #[serde(alias = "localhost")]
    Local,
    #[default]
    Production,
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" | "localhost" | "development" | "dev" => Ok(Self::Local),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!("unknown environment: {other}")),
        }
    }
}

/// Size ceilings for one environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    pub video: u64,
    pub file: u64,
    pub paste: u64,
}

impl UploadLimits {
    pub fn for_env(env: Environment) -> Self {
        match env {
            Environment::Local => Self {
                video: 5 * GIB,
                file: 500 * MIB,
                paste: 10 * MIB,
            },
            Environment::Production => Self {
                video: 100 * MIB,
                file: 10 * MIB,
                paste: MIB,
            },
        }
    }

    pub fn file_ceiling(&self, is_video: bool) -> u64 {
        if is_video {
            self.video
        } else {
            self.file
        }
    }
}

/// Text files above this size are described, not read.
pub const TEXT_READ_LIMIT: u64 = 50 * MIB;

/// Human readable size: one decimal for gigabytes, whole megabytes otherwise.
pub fn human_size(bytes: &u64) -> String {
    let bytes = *bytes;
    if bytes >= GIB {
        format!("{:.1}GB", bytes as f64 / GIB as f64)
    } else {
        format!("{}MB", (bytes as f64 / MIB as f64).round() as u64)
    }
}
